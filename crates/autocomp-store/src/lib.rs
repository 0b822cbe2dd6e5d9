//! Autocomp Store - Content sources consumed by the search index
//!
//! This crate provides:
//! - The `ContentSource` trait (articles + taxonomy)
//! - An in-memory store for embedding and tests
//! - A directory-backed store of JSON files
//! - A bundled sample corpus

pub mod error;
pub mod local;
pub mod memory;
pub mod sample;
pub mod source;

pub use error::*;
pub use local::*;
pub use memory::*;
pub use source::*;
