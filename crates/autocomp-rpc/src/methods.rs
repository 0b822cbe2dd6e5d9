//! RPC method definitions using jsonrpsee

use autocomp_search::{IndexStatus, SearchQuery, SearchResponse, SearchSuggestResponse};
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;

use crate::error::RpcError;
use crate::types::*;

/// Autocomp RPC API
#[rpc(server, client, namespace = "autocomp")]
pub trait AutocompApi {
    /// Full search with filters, sorting and pagination
    #[method(name = "search")]
    async fn search(&self, query: SearchQuery) -> Result<SearchResponse, ErrorObjectOwned>;

    /// Typeahead suggestions ranked by relevance
    #[method(name = "suggest")]
    async fn suggest(&self, request: SuggestRequest) -> Result<SearchSuggestResponse, ErrorObjectOwned>;

    /// Rebuild the index immediately
    #[method(name = "reindex")]
    async fn reindex(&self) -> Result<ReindexResponse, ErrorObjectOwned>;

    /// Index state and document counts
    #[method(name = "status")]
    async fn status(&self) -> Result<IndexStatus, ErrorObjectOwned>;
}

/// Convert any error to ErrorObjectOwned
pub fn to_rpc_error(e: impl Into<RpcError>) -> ErrorObjectOwned {
    e.into().into()
}
