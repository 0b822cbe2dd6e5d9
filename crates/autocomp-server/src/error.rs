//! Error types for autocomp-server

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Server error: {0}")]
    Server(String),

    #[error("Store error: {0}")]
    Store(#[from] autocomp_store::StoreError),

    #[error("Search error: {0}")]
    Search(#[from] autocomp_search::SearchError),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use autocomp_store::StoreError;

    #[test]
    fn test_layer_errors_convert() {
        let err: ServerError = StoreError::InvalidPath("content".into()).into();
        assert!(matches!(err, ServerError::Store(_)));

        let err: ServerError = autocomp_search::SearchError::QueryError("bad".into()).into();
        assert!(matches!(err, ServerError::Search(_)));

        let err: ServerError = notify::Error::generic("watch failed").into();
        assert!(matches!(err, ServerError::Watch(_)));
    }
}
