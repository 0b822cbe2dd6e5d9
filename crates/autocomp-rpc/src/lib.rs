//! Autocomp RPC - JSON-RPC protocol definitions
//!
//! This crate defines:
//! - Request/response types that are not already search types
//! - The server and client traits
//! - Error codes

pub mod error;
pub mod methods;
pub mod types;

pub use error::*;
pub use methods::*;
pub use types::*;
