//! CLI command handlers
//!
//! Each subcommand is implemented in its own module.

pub mod ask;
pub mod chat;
pub mod config;
pub mod helpers;
pub mod random_word;
pub mod serve;
pub mod stats;
