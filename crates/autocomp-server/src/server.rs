//! Server startup and management

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use autocomp_rpc::AutocompApiServer;
use autocomp_search::{SearchConfig, SearchStore};
use autocomp_store::LocalContentStore;
use jsonrpsee::server::{Server, ServerHandle};
use tracing::info;

use crate::handler::RpcHandler;
use crate::watch::ContentWatcher;
use crate::{Result, ServerError};

/// Configuration for the search server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,

    /// Content directory served when no store is supplied
    pub content_dir: PathBuf,

    pub search: SearchConfig,

    /// Invalidate the index when the content directory changes
    pub watch: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 9877)),
            content_dir: PathBuf::from("content"),
            search: SearchConfig::default(),
            watch: true,
        }
    }
}

/// The search server
pub struct SearchServer {
    config: ServerConfig,
    store: Option<Arc<SearchStore>>,
    watcher: Option<ContentWatcher>,
    handle: Option<ServerHandle>,
    local_addr: Option<SocketAddr>,
}

impl SearchServer {
    /// Serve the configured content directory
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config,
            store: None,
            watcher: None,
            handle: None,
            local_addr: None,
        }
    }

    /// Serve an existing search store; `content_dir` and `watch` are ignored
    pub fn with_store(config: ServerConfig, store: Arc<SearchStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::with_config(config)
        }
    }

    /// The search store, once started
    pub fn store(&self) -> Option<Arc<SearchStore>> {
        self.store.clone()
    }

    /// Start the server
    ///
    /// Opens the content directory (unless a store was supplied), builds the
    /// first index and starts listening.
    pub async fn start(&mut self) -> Result<()> {
        let store = match &self.store {
            Some(store) => Arc::clone(store),
            None => {
                let content = LocalContentStore::open(&self.config.content_dir).await?;
                let store = Arc::new(SearchStore::new(content, self.config.search.clone()));

                if self.config.watch {
                    self.watcher = Some(ContentWatcher::start(
                        &self.config.content_dir,
                        Arc::clone(&store),
                    )?);
                }
                self.store = Some(Arc::clone(&store));
                store
            }
        };

        let warm = Arc::clone(&store);
        let documents = tokio::task::spawn_blocking(move || warm.reindex())
            .await
            .map_err(|e| ServerError::Server(e.to_string()))??;

        let server = Server::builder()
            .build(&self.config.addr)
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;
        let local_addr = server.local_addr()?;

        let methods = RpcHandler::new(store).into_rpc();

        info!(
            "Starting autocomp server on {} with {} documents",
            local_addr, documents
        );
        self.handle = Some(server.start(methods));
        self.local_addr = Some(local_addr);

        Ok(())
    }

    /// Stop the server
    pub async fn stop(&mut self) -> Result<()> {
        self.watcher = None;
        if let Some(handle) = self.handle.take() {
            handle.stop().map_err(|e| ServerError::Server(e.to_string()))?;
            handle.stopped().await;
            info!("Autocomp server stopped");
        }
        Ok(())
    }

    /// Wait for the server to finish
    pub async fn wait(&self) {
        if let Some(ref handle) = self.handle {
            handle.clone().stopped().await;
        }
    }

    /// The bound address (the configured one until started)
    pub fn addr(&self) -> SocketAddr {
        self.local_addr.unwrap_or(self.config.addr)
    }
}

/// Start a server and run it until Ctrl+C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let mut server = SearchServer::with_config(config);
    server.start().await?;

    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    server.stop().await
}
