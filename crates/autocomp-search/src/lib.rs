//! Autocomp Search - In-memory search over articles and taxonomy
//!
//! This crate provides:
//! - A document indexer that flattens articles and taxonomy nodes into `SearchDoc`s
//! - A transparent weighted scoring function
//! - A TTL-cached `SearchStore` serving search, suggest and reindex

pub mod clock;
pub mod config;
pub mod doc;
pub mod error;
pub mod indexer;
pub mod query;
pub mod scoring;
pub mod store;
pub mod text;

pub use clock::*;
pub use config::*;
pub use doc::*;
pub use error::*;
pub use indexer::{build_search_index, build_search_index_with_report, index_article, IndexReport};
pub use query::*;
pub use scoring::score_document;
pub use store::*;
