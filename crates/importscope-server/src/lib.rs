//! HTTP API over the scanned import graph

pub mod router;
pub mod handlers;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use importscope_core::{ImportGraph, StdlibCatalogue};
use importscope_indexer::{discover, Aggregator, ScanConfig, ScanResult};
use importscope_registry::VersionLookup;
use tokio::sync::RwLock;

/// Bind address
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// One scan and the graph built from it. Replaced wholesale on rescan.
#[derive(Debug)]
pub struct ImportModel {
    pub scan: ScanResult,
    pub graph: ImportGraph,
    pub scanned_at: DateTime<Utc>,
}

impl ImportModel {
    pub fn new(scan: ScanResult) -> Self {
        let graph = scan.graph(StdlibCatalogue::python());
        Self {
            scan,
            graph,
            scanned_at: Utc::now(),
        }
    }
}

/// Shared handler state
pub struct ServerState {
    pub root: PathBuf,
    pub config: ScanConfig,
    pub model: RwLock<ImportModel>,
    pub registry: Box<dyn VersionLookup>,
}

impl ServerState {
    pub fn new(
        root: PathBuf,
        config: ScanConfig,
        scan: ScanResult,
        registry: Box<dyn VersionLookup>,
    ) -> Self {
        Self {
            root,
            config,
            model: RwLock::new(ImportModel::new(scan)),
            registry,
        }
    }

    /// Scan `root` again and swap in the new model.
    pub async fn rescan(&self) -> anyhow::Result<()> {
        let root = self.root.clone();
        let config = self.config.clone();
        let scan = tokio::task::spawn_blocking(move || scan_root(&root, &config)).await??;

        let model = ImportModel::new(scan);
        tracing::info!(
            "Rescanned: {} nodes, {} edges",
            model.graph.node_count(),
            model.graph.edge_count()
        );
        *self.model.write().await = model;
        Ok(())
    }
}

/// Discover and scan every source file under `root`.
pub fn scan_root(root: &std::path::Path, config: &ScanConfig) -> anyhow::Result<ScanResult> {
    let paths = discover(root, config)?;
    let result = Aggregator::new(StdlibCatalogue::python())
        .with_threads(config.thread_count())
        .scan_paths(root, &paths, config.max_file_size);
    Ok(result)
}

pub struct ImportScopeServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl ImportScopeServer {
    pub fn new(state: ServerState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let app = router::create_router(self.state());
        let listener = tokio::net::TcpListener::bind(self.address()).await?;
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Listening on http://{}", addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}
