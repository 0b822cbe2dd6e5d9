//! Error types for autocomp-store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Content directory already exists at path: {0}")]
    StoreExists(String),

    #[error("Invalid content path: {0}")]
    InvalidPath(String),

    #[error("Content source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] autocomp_core::CoreError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
