//! Error types for autocomp-search

use autocomp_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Content source error: {0}")]
    Source(#[from] StoreError),

    #[error("Query error: {0}")]
    QueryError(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
