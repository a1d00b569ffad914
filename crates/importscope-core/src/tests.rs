//! Unit tests for importscope-core

use crate::*;
use std::collections::{BTreeSet, HashSet};

fn occurrence(root: &str, qualified: &str, line: u32, style: ImportStyle) -> ImportOccurrence {
    ImportOccurrence {
        root: root.to_string(),
        qualified: qualified.to_string(),
        line: Some(line),
        style,
    }
}

fn sample_table() -> FileImportTable {
    vec![
        FileImports::from_occurrences(
            "a.py",
            vec![
                occurrence("os", "os", 1, ImportStyle::Plain),
                occurrence("pkg", "pkg", 2, ImportStyle::From),
            ],
        ),
        FileImports::from_occurrences(
            "src/b.py",
            vec![
                occurrence("os", "os.path", 1, ImportStyle::Plain),
                occurrence("requests", "requests", 3, ImportStyle::Plain),
                occurrence("requests", "requests.adapters", 4, ImportStyle::From),
            ],
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_node_ids_are_deterministic() {
    assert_eq!(NodeId::file("a.py").as_str(), "file:a.py");
    assert_eq!(NodeId::import("os.path").as_str(), "import:os");
    assert_eq!(NodeId::import("os"), NodeId::import("os.path"));
}

#[test]
fn test_single_file_scenario() {
    let table = sample_table()
        .files()
        .take(1)
        .cloned()
        .collect::<FileImportTable>();
    let graph = ImportGraph::build(&table, StdlibCatalogue::python());

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.node(&NodeId::import("os")).unwrap().kind, NodeKind::Stdlib);
    assert_eq!(graph.node(&NodeId::import("pkg")).unwrap().kind, NodeKind::ThirdParty);
    assert_eq!(graph.node(&NodeId::file("a.py")).unwrap().kind, NodeKind::File);
}

#[test]
fn test_every_edge_endpoint_exists_and_ids_unique() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());

    let ids: Vec<&NodeId> = graph.nodes().map(|n| &n.id).collect();
    let unique: HashSet<&NodeId> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());

    for edge in graph.edges() {
        assert!(graph.contains(&edge.source), "missing {}", edge.source);
        assert!(graph.contains(&edge.target), "missing {}", edge.target);
    }
}

#[test]
fn test_duplicate_occurrences_keep_edges_not_nodes() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());

    // a.py, src/b.py, os, pkg, requests
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 5);

    let requests_edges = graph
        .edges()
        .filter(|e| e.target == NodeId::import("requests"))
        .count();
    assert_eq!(requests_edges, 2);
    assert_eq!(graph.node(&NodeId::import("requests")).unwrap().weight, 2);
}

#[test]
fn test_module_full_name_keeps_first_spelling() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    let os = graph.node(&NodeId::import("os")).unwrap();
    assert_eq!(os.display_name, "os");
    assert_eq!(os.full_name, "os");

    let requests = graph.node(&NodeId::import("requests")).unwrap();
    assert_eq!(requests.full_name, "requests");

    let b = graph.node(&NodeId::file("src/b.py")).unwrap();
    assert_eq!(b.display_name, "b.py");
    assert_eq!(b.full_name, "src/b.py");
}

#[test]
fn test_neighbors_of_file_node() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    let neighbors = graph.neighbors(&NodeId::file("a.py"));

    let expected: BTreeSet<NodeId> = [
        NodeId::file("a.py"),
        NodeId::import("os"),
        NodeId::import("pkg"),
    ]
    .into_iter()
    .collect();
    assert_eq!(neighbors, expected);
}

#[test]
fn test_neighbors_of_module_node() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    let neighbors = graph.neighbors(&NodeId::import("os"));

    assert_eq!(neighbors.len(), 3);
    assert!(neighbors.contains(&NodeId::import("os")));
    assert!(neighbors.contains(&NodeId::file("a.py")));
    assert!(neighbors.contains(&NodeId::file("src/b.py")));
}

#[test]
fn test_unknown_node_has_no_neighbors() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    assert!(graph.neighbors(&NodeId::import("ghost")).is_empty());
    assert!(graph.incident_edges(&NodeId::import("ghost")).is_empty());
}

#[test]
fn test_incident_edge_keys() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    let edges = graph.incident_edges(&NodeId::import("os"));

    let expected: BTreeSet<String> = ["file:a.py->import:os", "file:src/b.py->import:os"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(edges, expected);
}

#[test]
fn test_highlight_follows_active_selection() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    let mut selection = Selection::new();
    assert!(graph.highlight(selection.active()).is_empty());

    selection.click_node(NodeId::import("pkg"));
    let highlight = graph.highlight(selection.active());
    assert_eq!(highlight.nodes.len(), 2);
    assert!(highlight.edges.contains("file:a.py->import:pkg"));
}

#[test]
fn test_search_is_case_insensitive_and_ordered() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());

    let hits: Vec<&str> = graph.search("PY").iter().map(|n| n.id.as_str()).collect();
    assert_eq!(hits, vec!["file:a.py", "file:src/b.py"]);

    let hits: Vec<&str> = graph.search("req").iter().map(|n| n.id.as_str()).collect();
    assert_eq!(hits, vec!["import:requests"]);
}

#[test]
fn test_search_empty_query_returns_nothing() {
    let graph = ImportGraph::build(&sample_table(), StdlibCatalogue::python());
    assert!(graph.search("").is_empty());
    assert!(graph.search("zzz").is_empty());
}

#[test]
fn test_search_caps_results() {
    let mut table = FileImportTable::new();
    for i in 0..20 {
        table.insert(FileImports::from_modules(format!("mod_{i}.py"), ["os"]));
    }
    let graph = ImportGraph::build(&table, StdlibCatalogue::python());

    let hits = graph.search("mod_");
    assert_eq!(hits.len(), SEARCH_LIMIT);
    assert_eq!(hits[0].id, NodeId::file("mod_0.py"));
}

#[test]
fn test_add_edge_requires_endpoints() {
    let mut graph = ImportGraph::new();
    let file = graph.add_file("a.py");
    assert!(!graph.add_edge(&file, &NodeId::import("os"), None));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_build_is_idempotent() {
    let a = ImportGraph::build(&sample_table(), StdlibCatalogue::python()).export();
    let b = ImportGraph::build(&sample_table(), StdlibCatalogue::python()).export();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_export_shape() {
    let table: FileImportTable = vec![FileImports::from_occurrences(
        "a.py",
        vec![
            occurrence("os", "os", 1, ImportStyle::Plain),
            occurrence("pkg", "pkg", 2, ImportStyle::From),
        ],
    )]
    .into_iter()
    .collect();
    let graph = ImportGraph::build(&table, StdlibCatalogue::python());

    insta::assert_json_snapshot!(graph.export(), @r#"
    {
      "nodes": [
        {
          "id": "file:a.py",
          "displayName": "a.py",
          "fullName": "a.py",
          "kind": "file",
          "weight": 2
        },
        {
          "id": "import:os",
          "displayName": "os",
          "fullName": "os",
          "kind": "stdlib",
          "weight": 1
        },
        {
          "id": "import:pkg",
          "displayName": "pkg",
          "fullName": "pkg",
          "kind": "thirdParty",
          "weight": 1
        }
      ],
      "links": [
        {
          "source": "file:a.py",
          "target": "import:os"
        },
        {
          "source": "file:a.py",
          "target": "import:pkg"
        }
      ]
    }
    "#);
}
