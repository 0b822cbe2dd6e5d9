//! Autocomp Client - client library for autocomp search servers

pub mod client;
pub mod error;

pub use client::*;
pub use error::*;
