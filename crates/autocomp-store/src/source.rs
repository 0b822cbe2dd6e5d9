//! The read-only contract between content storage and the search index

use std::sync::Arc;

use autocomp_core::{ArticleDoc, Taxonomy};

use crate::error::Result;

/// Something that can hand the indexer every known article and the taxonomy
///
/// Both reads are synchronous and return a full snapshot. An error aborts
/// whatever rebuild asked for it.
pub trait ContentSource: Send + Sync {
    /// All currently known articles, in a stable order
    fn list_articles(&self) -> Result<Vec<ArticleDoc>>;

    /// The pillar / section / cluster hierarchy
    fn taxonomy(&self) -> Result<Taxonomy>;
}

impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    fn list_articles(&self) -> Result<Vec<ArticleDoc>> {
        (**self).list_articles()
    }

    fn taxonomy(&self) -> Result<Taxonomy> {
        (**self).taxonomy()
    }
}
