//! RPC method handlers

use std::sync::Arc;
use std::time::Instant;

use autocomp_rpc::{to_rpc_error, AutocompApiServer, ReindexResponse, RpcError, SuggestRequest};
use autocomp_search::{IndexStatus, SearchQuery, SearchResponse, SearchStore, SearchSuggestResponse};
use jsonrpsee::core::async_trait;
use jsonrpsee::types::ErrorObjectOwned;
use tracing::{debug, info};

/// RPC handler implementation
///
/// Scoring and rebuilds are CPU and disk bound, so every store call runs on
/// the blocking pool rather than on a runtime worker.
pub struct RpcHandler {
    store: Arc<SearchStore>,
}

impl RpcHandler {
    pub fn new(store: Arc<SearchStore>) -> Self {
        Self { store }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, ErrorObjectOwned>
    where
        T: Send + 'static,
        F: FnOnce(&SearchStore) -> autocomp_search::Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| to_rpc_error(RpcError::Internal(e.to_string())))?
            .map_err(to_rpc_error)
    }
}

#[async_trait]
impl AutocompApiServer for RpcHandler {
    async fn search(&self, query: SearchQuery) -> Result<SearchResponse, ErrorObjectOwned> {
        debug!("search '{}'", query.q);
        self.blocking(move |store| store.search(&query)).await
    }

    async fn suggest(
        &self,
        request: SuggestRequest,
    ) -> Result<SearchSuggestResponse, ErrorObjectOwned> {
        debug!("suggest '{}'", request.text);
        self.blocking(move |store| store.suggest(&request.text, request.limit))
            .await
    }

    async fn reindex(&self) -> Result<ReindexResponse, ErrorObjectOwned> {
        info!("Reindex requested");
        let started = Instant::now();
        let documents = self.blocking(|store| store.reindex()).await?;

        Ok(ReindexResponse {
            documents,
            took_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn status(&self) -> Result<IndexStatus, ErrorObjectOwned> {
        Ok(self.store.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocomp_core::{ArticleDoc, Taxonomy};
    use autocomp_search::{IndexState, SearchConfig};
    use autocomp_store::sample::sample_corpus;
    use autocomp_store::{ContentSource, StoreError};

    fn handler() -> RpcHandler {
        RpcHandler::new(Arc::new(SearchStore::new(sample_corpus(), SearchConfig::default())))
    }

    #[tokio::test]
    async fn test_search_and_suggest() {
        let handler = handler();

        let response = handler.search(SearchQuery::new("honda accord")).await.unwrap();
        assert_eq!(response.results[0].doc.id, "article:2026-midsize-sedan-comparison");

        let response = handler
            .suggest(SuggestRequest {
                text: "electric suv".into(),
                limit: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(response.suggestions[0].id, "article:best-electric-suvs-2026");
    }

    #[tokio::test]
    async fn test_reindex_and_status() {
        let handler = handler();
        assert_eq!(handler.status().await.unwrap().state, IndexState::Empty);

        let response = handler.reindex().await.unwrap();
        let status = handler.status().await.unwrap();
        assert_eq!(status.state, IndexState::Fresh);
        assert_eq!(status.documents, response.documents);
    }

    struct Offline;

    impl ContentSource for Offline {
        fn list_articles(&self) -> autocomp_store::Result<Vec<ArticleDoc>> {
            Err(StoreError::Unavailable("content volume not mounted".into()))
        }

        fn taxonomy(&self) -> autocomp_store::Result<Taxonomy> {
            Ok(Taxonomy::default())
        }
    }

    #[tokio::test]
    async fn test_source_errors_become_rpc_errors() {
        let handler = RpcHandler::new(Arc::new(SearchStore::new(Offline, SearchConfig::default())));

        let err = handler.search(SearchQuery::new("accord")).await.unwrap_err();
        assert_eq!(err.code(), -32001);
        assert!(err.message().contains("not mounted"));
    }
}
