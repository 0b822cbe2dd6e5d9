//! In-memory content store

use autocomp_core::{ArticleDoc, Taxonomy};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::source::ContentSource;

/// Articles and taxonomy held in memory
///
/// Articles keep their insertion order; upserting an existing slug replaces it
/// in place.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    articles: RwLock<Vec<ArticleDoc>>,
    taxonomy: RwLock<Taxonomy>,
}

impl MemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with articles and a taxonomy
    pub fn with_content(articles: Vec<ArticleDoc>, taxonomy: Taxonomy) -> Self {
        Self {
            articles: RwLock::new(articles),
            taxonomy: RwLock::new(taxonomy),
        }
    }

    /// Insert an article, replacing any article with the same slug
    pub fn upsert_article(&self, article: ArticleDoc) -> Result<()> {
        article.validate()?;

        let mut articles = self.articles.write();
        if let Some(existing) = articles.iter_mut().find(|a| a.slug == article.slug) {
            debug!("Replacing article {}", article.slug);
            *existing = article;
        } else {
            debug!("Adding article {}", article.slug);
            articles.push(article);
        }
        Ok(())
    }

    /// Remove an article by slug
    pub fn remove_article(&self, slug: &str) -> Result<ArticleDoc> {
        let mut articles = self.articles.write();
        let pos = articles
            .iter()
            .position(|a| a.slug == slug)
            .ok_or_else(|| StoreError::ArticleNotFound(slug.to_string()))?;
        Ok(articles.remove(pos))
    }

    /// Get a single article by slug
    pub fn get_article(&self, slug: &str) -> Option<ArticleDoc> {
        self.articles.read().iter().find(|a| a.slug == slug).cloned()
    }

    /// Replace the whole taxonomy
    pub fn set_taxonomy(&self, taxonomy: Taxonomy) {
        *self.taxonomy.write() = taxonomy;
    }

    /// Number of stored articles
    pub fn article_count(&self) -> usize {
        self.articles.read().len()
    }
}

impl ContentSource for MemoryContentStore {
    fn list_articles(&self) -> Result<Vec<ArticleDoc>> {
        Ok(self.articles.read().clone())
    }

    fn taxonomy(&self) -> Result<Taxonomy> {
        Ok(self.taxonomy.read().clone())
    }
}
