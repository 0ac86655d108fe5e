//! Ewe Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use ewe_core::prelude::*;
//! ```

pub use crate::types::{
    ArticleRecord, Conversation, ConversationTurn, EnrichmentTable, HerbalExcerpt,
    LocalNameRecord, Role, SourceCorpus,
};

pub use crate::config::{LlmProvider, Settings};

pub use crate::error::{EweError, Result, USER_FACING_ERROR};
