//! Autocomp Server - search over a content directory, served as JSON-RPC
//!
//! This crate provides:
//! - The JSON-RPC server over HTTP and WebSocket
//! - Handlers that run search work off the async runtime
//! - A content directory watcher that invalidates the index

pub mod error;
pub mod handler;
pub mod server;
pub mod watch;

pub use error::*;
pub use handler::*;
pub use server::*;
pub use watch::*;
