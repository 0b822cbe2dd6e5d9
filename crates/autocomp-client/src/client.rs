//! RPC client implementation

use autocomp_rpc::{AutocompApiClient, ReindexResponse, SuggestRequest};
use autocomp_search::{IndexStatus, SearchQuery, SearchResponse, SearchSuggestResponse};
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// Client for an autocomp search server
pub struct AutocompClient {
    client: HttpClient,
    base_url: Url,
}

impl AutocompClient {
    /// Connect to a server
    ///
    /// HTTP is connectionless, so this only validates the URL; an unreachable
    /// server surfaces on the first call.
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let base_url: Url = url
            .as_ref()
            .parse()
            .map_err(|e| ClientError::Connection(format!("Invalid URL: {}", e)))?;

        let client = HttpClientBuilder::default()
            .build(&base_url)
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        debug!("Using autocomp server at {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Get the server URL
    pub fn url(&self) -> &Url {
        &self.base_url
    }

    pub async fn search(&self, query: SearchQuery) -> Result<SearchResponse> {
        Ok(self.client.search(query).await?)
    }

    pub async fn suggest(
        &self,
        text: impl Into<String>,
        limit: Option<usize>,
    ) -> Result<SearchSuggestResponse> {
        let request = SuggestRequest {
            text: text.into(),
            limit,
        };
        Ok(self.client.suggest(request).await?)
    }

    /// Force a rebuild on the server
    pub async fn reindex(&self) -> Result<ReindexResponse> {
        Ok(self.client.reindex().await?)
    }

    pub async fn status(&self) -> Result<IndexStatus> {
        Ok(self.client.status().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;

    use autocomp_search::{IndexState, SearchConfig, SearchStore, SortOrder};
    use autocomp_server::{SearchServer, ServerConfig};
    use autocomp_store::sample::sample_corpus;

    async fn start() -> SearchServer {
        let store = Arc::new(SearchStore::new(sample_corpus(), SearchConfig::default()));
        let config = ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            watch: false,
            ..ServerConfig::default()
        };
        let mut server = SearchServer::with_store(config, store);
        server.start().await.unwrap();
        server
    }

    #[tokio::test]
    async fn test_invalid_url() {
        assert!(matches!(
            AutocompClient::connect("not a url").await,
            Err(ClientError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_against_server() {
        let mut server = start().await;
        let client = AutocompClient::connect(format!("http://{}", server.addr()))
            .await
            .unwrap();

        let response = client
            .search(SearchQuery::new("sedans").with_sort(SortOrder::Newest).with_limit(2))
            .await
            .unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.limit, 2);

        let suggestions = client.suggest("electric suv", Some(3)).await.unwrap();
        assert_eq!(suggestions.suggestions[0].id, "article:best-electric-suvs-2026");

        let reindexed = client.reindex().await.unwrap();
        let status = client.status().await.unwrap();
        assert_eq!(status.state, IndexState::Fresh);
        assert_eq!(status.documents, reindexed.documents);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let mut server = start().await;
        let url = format!("http://{}", server.addr());
        server.stop().await.unwrap();

        let client = AutocompClient::connect(url).await.unwrap();
        assert!(matches!(client.status().await, Err(ClientError::Rpc(_))));
    }
}
