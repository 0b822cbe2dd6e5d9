//! Error types for autocomp-rpc

use autocomp_search::SearchError;
use jsonrpsee::types::ErrorObjectOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Content source error: {0}")]
    Source(String),
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            RpcError::InvalidParams(_) => -32602,
            RpcError::Internal(_) => -32603,
            RpcError::Source(_) => -32001,
        }
    }
}

impl From<SearchError> for RpcError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::QueryError(msg) => RpcError::InvalidParams(msg),
            SearchError::Source(e) => RpcError::Source(e.to_string()),
        }
    }
}

impl From<RpcError> for ErrorObjectOwned {
    fn from(e: RpcError) -> Self {
        ErrorObjectOwned::owned(e.code(), e.to_string(), None::<()>)
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;
