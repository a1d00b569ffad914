//! Integration tests for ImportScope
//!
//! These tests drive discovery, scanning, the graph and manifest output
//! together against real files on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use importscope_core::{render_manifest, NodeId, NodeKind, Selection, StdlibCatalogue};
use importscope_indexer::{discover, Aggregator, RecordingObserver, ScanConfig, ScanEvent};
use importscope_registry::{create_registry, resolve_manifest, unpinned_manifest};
use importscope_server::{scan_root, ImportScopeServer, ServerConfig, ServerState};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
    dir
}

fn sample_project() -> TempDir {
    project(&[
        (
            "app/main.py",
            "\"\"\"Entry point.\n\nimport not_real\n\"\"\"\nimport os, sys\nfrom flask import Flask\nimport yaml  # config\n",
        ),
        (
            "app/models.py",
            "from sqlalchemy.orm import declarative_base\nimport datetime\n\ndef f():\n    import json\n",
        ),
        ("scripts/tool.py", "from . import helpers\nimport requests as r\n"),
        ("README.md", "import markdown\n"),
    ])
}

#[test]
fn test_scan_project_end_to_end() {
    let dir = sample_project();
    let result = scan_root(dir.path(), &ScanConfig::default()).unwrap();

    let names: Vec<&str> = result.table.files().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["app/main.py", "app/models.py", "scripts/tool.py"]);

    assert_eq!(result.table.get("app/main.py").unwrap(), ["flask", "os", "sys", "yaml"]);
    assert_eq!(result.table.get("app/models.py").unwrap(), ["datetime", "json", "sqlalchemy"]);
    assert_eq!(result.table.get("scripts/tool.py").unwrap(), ["requests"]);

    let catalogue = StdlibCatalogue::python();
    assert_eq!(result.stdlib(catalogue), vec!["datetime", "json", "os", "sys"]);
    assert_eq!(result.third_party(catalogue), vec!["flask", "requests", "sqlalchemy", "yaml"]);
}

#[test]
fn test_graph_and_selection_flow() {
    let dir = sample_project();
    let result = scan_root(dir.path(), &ScanConfig::default()).unwrap();
    let graph = result.graph(StdlibCatalogue::python());

    assert_eq!(graph.nodes_of_kind(NodeKind::File).count(), 3);
    assert_eq!(graph.nodes_of_kind(NodeKind::Stdlib).count(), 4);
    assert_eq!(graph.nodes_of_kind(NodeKind::ThirdParty).count(), 4);

    let sqlalchemy = graph.node(&NodeId::import("sqlalchemy")).unwrap();
    assert_eq!(sqlalchemy.full_name, "sqlalchemy.orm");

    let mut selection = Selection::default();
    let hits = graph.search("req");
    assert_eq!(hits.len(), 1);
    selection.select_search_result(hits[0].id.clone());
    selection.hover(Some(NodeId::file("app/main.py")));

    let highlight = graph.highlight(selection.active());
    assert!(highlight.nodes.contains(&NodeId::file("scripts/tool.py")));
    assert!(highlight.edges.contains("file:scripts/tool.py->import:requests"));
    assert!(!highlight.nodes.contains(&NodeId::file("app/main.py")));
}

#[test]
fn test_config_file_changes_discovery() {
    let dir = sample_project();
    fs::write(
        dir.path().join("importscope.toml"),
        "exclude = [\"scripts/**\"]\n",
    )
    .unwrap();

    let config = ScanConfig::load(dir.path()).unwrap();
    let paths = discover(dir.path(), &config).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.starts_with("app")));
}

#[test]
fn test_parallel_scan_reports_every_file() {
    let files: Vec<(String, String)> = (0..40)
        .map(|i| (format!("pkg/m{i:02}.py"), format!("import os\nimport dep{}\n", i % 5)))
        .collect();
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let dir = project(&borrowed);

    let config = ScanConfig::default();
    let paths = discover(dir.path(), &config).unwrap();
    let observer = Arc::new(RecordingObserver::new());
    let result = Aggregator::new(StdlibCatalogue::python())
        .with_threads(4)
        .with_observer(observer.clone())
        .scan_paths(dir.path(), &paths, config.max_file_size);

    assert_eq!(result.table.len(), 40);
    assert_eq!(result.modules.len(), 6);
    let started = observer
        .events()
        .iter()
        .filter(|e| matches!(e, ScanEvent::FileStarted { .. }))
        .count();
    assert_eq!(started, 40);
}

#[tokio::test]
async fn test_manifest_output() {
    let dir = sample_project();
    let result = scan_root(dir.path(), &ScanConfig::default()).unwrap();
    let third_party = result.third_party(StdlibCatalogue::python());

    let expected = "PyYAML\nflask\nrequests\nsqlalchemy\n";
    assert_eq!(render_manifest(&unpinned_manifest(&third_party)), expected);

    let offline = create_registry("offline", None).unwrap();
    let resolved = resolve_manifest(offline.as_ref(), &third_party, 4).await;
    assert_eq!(render_manifest(&resolved), expected);
}

#[tokio::test]
async fn test_server_state_rescan() {
    let dir = project(&[("a.py", "import os\n")]);
    let config = ScanConfig::default();
    let result = scan_root(dir.path(), &config).unwrap();

    let state = ServerState::new(
        dir.path().to_path_buf(),
        config,
        result,
        create_registry("offline", None).unwrap(),
    );
    let server = ImportScopeServer::new(
        state,
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
    );
    let state = server.state();
    assert_eq!(state.model.read().await.graph.node_count(), 2);

    fs::write(dir.path().join("b.py"), "import numpy\nimport os\n").unwrap();
    state.rescan().await.unwrap();

    let model = state.model.read().await;
    assert_eq!(model.graph.node_count(), 4);
    assert_eq!(model.graph.node(&NodeId::import("os")).unwrap().weight, 2);
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent");
    assert!(scan_root(Path::new(&missing), &ScanConfig::default()).is_err());
}
