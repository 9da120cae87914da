//! HTTP API for the chat widget
//!
//! Provides:
//! - Query resolution
//! - Random word and statistics endpoints
//! - Dictionary registration

pub mod server;

pub use server::{build_router, ApiServer, ApiServerConfig};
