//! CLI command implementations.

pub mod chat;
pub mod herbs;
pub mod init;
pub mod render;
pub mod research;
