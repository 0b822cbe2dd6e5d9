//! Autocomp Core - Content model consumed by the search index
//!
//! This crate defines the read-only content shapes the rest of autocomp works with:
//! - `ArticleDoc`: a comparison article and its content blocks
//! - `Taxonomy`: the pillar / section / cluster hierarchy

pub mod article;
pub mod taxonomy;
pub mod error;

pub use article::*;
pub use taxonomy::*;
pub use error::*;
