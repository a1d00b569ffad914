//! CLI command implementations

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use importscope_core::{render_manifest, StdlibCatalogue};
use importscope_indexer::{ScanConfig, ScanResult};
use importscope_registry::{create_registry, resolve_manifest, unpinned_manifest, CachedLookup, VersionLookup};
use importscope_server::{scan_root, ImportScopeServer, ServerConfig, ServerState};

const LOOKUP_TTL: Duration = Duration::from_secs(60 * 60);

fn load(root: &Path) -> anyhow::Result<(ScanConfig, ScanResult)> {
    let config = ScanConfig::load(root)?;
    let result = scan_root(root, &config)?;
    if result.cancelled {
        tracing::warn!("Scan was cancelled; results are partial");
    }
    Ok((config, result))
}

fn registry(config: &ScanConfig) -> anyhow::Result<Box<dyn VersionLookup>> {
    let provider = create_registry(&config.registry.provider, config.registry.base_url.clone())?;
    Ok(Box::new(CachedLookup::new(provider, LOOKUP_TTL)))
}

pub fn scan(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, result) = load(root)?;
    let summary = result.summary(StdlibCatalogue::python());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for file in summary.files.files() {
        println!("{}: {}", file.name, file.imports().join(", "));
    }
    println!();
    println!("Standard library ({}): {}", summary.stdlib.len(), summary.stdlib.join(", "));
    println!("Third party ({}): {}", summary.third_party.len(), summary.third_party.join(", "));
    Ok(())
}

pub fn graph(root: &Path) -> anyhow::Result<()> {
    let (_, result) = load(root)?;
    let graph = result.graph(StdlibCatalogue::python());
    tracing::info!("Graph has {} nodes, {} edges", graph.node_count(), graph.edge_count());
    println!("{}", serde_json::to_string_pretty(&graph.export())?);
    Ok(())
}

pub fn search(root: &Path, query: &str) -> anyhow::Result<()> {
    let (_, result) = load(root)?;
    let graph = result.graph(StdlibCatalogue::python());

    let matches = graph.search(query);
    if matches.is_empty() {
        println!("No nodes match {query:?}");
    }
    for node in matches {
        println!("{}\t{:?}\tweight {}", node.id, node.kind, node.weight);
    }
    Ok(())
}

pub async fn manifest(root: &Path, resolve: bool, output: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, result) = load(root)?;
    let third_party = result.third_party(StdlibCatalogue::python());

    let entries = if resolve {
        let lookup = registry(&config)?;
        resolve_manifest(lookup.as_ref(), &third_party, config.registry.concurrency).await
    } else {
        unpinned_manifest(&third_party)
    };
    let text = render_manifest(&entries);

    match output {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!("Wrote {} packages to {}", entries.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub async fn serve(root: PathBuf, host: String, port: u16, open: bool) -> anyhow::Result<()> {
    tracing::info!("Starting ImportScope server on {}:{}", host, port);

    let (config, result) = load(&root)?;
    let lookup = registry(&config)?;
    let state = ServerState::new(root, config, result, lookup);
    {
        let model = state.model.read().await;
        tracing::info!(
            "Indexed {} nodes, {} edges",
            model.graph.node_count(),
            model.graph.edge_count()
        );
    }

    let server = ImportScopeServer::new(state, ServerConfig { host, port });
    if open {
        let url = format!("http://{}/api/graph", server.address());
        if let Err(e) = open::that(&url) {
            tracing::warn!("Cannot open browser at {}: {}", url, e);
        }
    }

    server.start().await
}
