//! # Ewe Core
//!
//! Core types shared by every Ewe crate:
//!
//! - **types** — article records, herbal excerpts, conversation turns, local-name records
//! - **error** — the error taxonomy used at component boundaries
//! - **config** — process settings, read once at startup
//!
//! ## Quick Start
//!
//! ```rust
//! use ewe_core::prelude::*;
//!
//! let mut conversation = Conversation::new();
//! conversation.push(ConversationTurn::user("bitter leaf for malaria"));
//! assert_eq!(conversation.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod types;
