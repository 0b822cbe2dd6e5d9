//! Local directory-backed content store

use std::fs as std_fs;
use std::path::{Path, PathBuf};

use autocomp_core::{ArticleDoc, Taxonomy};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::source::ContentSource;

/// Content stored as JSON files on disk
///
/// Directory structure:
/// ```text
/// content/
/// ├── taxonomy.json          # Pillars, sections, clusters
/// └── articles/
///     ├── {slug}.json        # One file per article
///     └── ...
/// ```
///
/// Reads go straight to disk so that files published by another process show
/// up on the next index rebuild.
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    /// Path to the content directory
    pub path: PathBuf,
}

impl LocalContentStore {
    const ARTICLES_DIR: &'static str = "articles";
    const TAXONOMY_FILE: &'static str = "taxonomy.json";

    /// Create a new, empty content directory
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            return Err(StoreError::StoreExists(path.display().to_string()));
        }

        fs::create_dir_all(path.join(Self::ARTICLES_DIR)).await?;

        let taxonomy_json = serde_json::to_string_pretty(&Taxonomy::default())?;
        fs::write(path.join(Self::TAXONOMY_FILE), taxonomy_json).await?;

        info!("Created content directory at {:?}", path);
        Ok(Self { path })
    }

    /// Open an existing content directory
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let articles_dir = path.join(Self::ARTICLES_DIR);
        if !fs::try_exists(&articles_dir).await? {
            return Err(StoreError::InvalidPath(format!(
                "No articles directory found at {}",
                articles_dir.display()
            )));
        }

        info!("Opened content directory {:?}", path);
        Ok(Self { path })
    }

    /// Write an article, replacing any existing file with the same slug
    pub async fn save_article(&self, article: &ArticleDoc) -> Result<()> {
        article.validate()?;

        let json = serde_json::to_string_pretty(article)?;
        fs::write(self.article_path(&article.slug), json).await?;

        debug!("Saved article {}", article.slug);
        Ok(())
    }

    /// Delete an article file
    pub async fn remove_article(&self, slug: &str) -> Result<()> {
        let path = self.article_path(slug);
        if !fs::try_exists(&path).await? {
            return Err(StoreError::ArticleNotFound(slug.to_string()));
        }

        fs::remove_file(&path).await?;
        debug!("Removed article {}", slug);
        Ok(())
    }

    /// Replace the taxonomy file
    pub async fn save_taxonomy(&self, taxonomy: &Taxonomy) -> Result<()> {
        let json = serde_json::to_string_pretty(taxonomy)?;
        fs::write(self.path.join(Self::TAXONOMY_FILE), json).await?;

        debug!("Saved taxonomy with {} nodes", taxonomy.len());
        Ok(())
    }

    /// Directory holding the article files
    pub fn articles_dir(&self) -> PathBuf {
        self.path.join(Self::ARTICLES_DIR)
    }

    // Private helpers

    fn article_path(&self, slug: &str) -> PathBuf {
        self.articles_dir().join(format!("{}.json", slug))
    }

    fn article_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std_fs::read_dir(self.articles_dir())? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl ContentSource for LocalContentStore {
    fn list_articles(&self) -> Result<Vec<ArticleDoc>> {
        let files = self.article_files()?;
        let mut articles = Vec::with_capacity(files.len());

        for path in files {
            let json = std_fs::read_to_string(&path)?;
            match ArticleDoc::from_json(&json) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    warn!("Skipping unreadable article {:?}: {}", path, e);
                }
            }
        }

        Ok(articles)
    }

    fn taxonomy(&self) -> Result<Taxonomy> {
        let path = self.path.join(Self::TAXONOMY_FILE);
        if !path.exists() {
            return Ok(Taxonomy::default());
        }

        let json = std_fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
