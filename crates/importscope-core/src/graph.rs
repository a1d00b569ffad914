//! Import graph wrapper using petgraph::StableDiGraph keyed by string node ids

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::classify::{ModuleClass, StdlibCatalogue};
use crate::model::{root_module, FileImportTable};

/// Maximum number of nodes returned by [`ImportGraph::search`].
pub const SEARCH_LIMIT: usize = 8;

/// Stable node identifier: `file:<path>` or `import:<root>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn file(path: &str) -> Self {
        NodeId(format!("file:{path}"))
    }

    pub fn import(module: &str) -> Self {
        NodeId(format!("import:{}", root_module(module)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    File,
    Stdlib,
    ThirdParty,
}

impl From<ModuleClass> for NodeKind {
    fn from(class: ModuleClass) -> Self {
        match class {
            ModuleClass::Stdlib => NodeKind::Stdlib,
            ModuleClass::ThirdParty => NodeKind::ThirdParty,
        }
    }
}

/// A file or an imported module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    /// Short label: file name or root module.
    pub display_name: String,
    /// File path, or the first dotted spelling of the module seen in the scan.
    pub full_name: String,
    pub kind: NodeKind,
    /// Number of edges touching this node.
    pub weight: u32,
}

/// A directed file -> module reference. Duplicates are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    /// Line of the import statement in the source file.
    pub line: Option<u32>,
}

impl GraphEdge {
    /// Highlight key, `source->target`.
    pub fn key(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }
}

/// Link as consumed by graph renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
}

/// `{ nodes, links }` view of the whole graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Nodes and edge keys to emphasize around the active node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub nodes: BTreeSet<NodeId>,
    pub edges: BTreeSet<String>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// The file/module dependency graph of one scan.
pub struct ImportGraph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl fmt::Debug for ImportGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl ImportGraph {
    pub fn new() -> Self {
        ImportGraph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build the graph for a scan: one node per file, one per distinct root
    /// module, one edge per recorded import occurrence.
    pub fn build(table: &FileImportTable, catalogue: &StdlibCatalogue) -> Self {
        let mut graph = ImportGraph::new();

        for file in table.files() {
            let file_id = graph.add_file(&file.name);
            for occurrence in file.occurrences() {
                let class = catalogue.classify(&occurrence.root);
                let module_id = graph.add_module(&occurrence.root, &occurrence.qualified, class);
                graph.add_edge(&file_id, &module_id, occurrence.line);
            }
        }

        tracing::debug!(
            "Built import graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Add a node unless one with the same id exists. Returns the id.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let id = node.id.clone();
        if !self.index.contains_key(&id) {
            let idx = self.inner.add_node(node);
            self.index.insert(id.clone(), idx);
        }
        id
    }

    pub fn add_file(&mut self, path: &str) -> NodeId {
        let display_name = path.rsplit(['/', '\\']).next().unwrap_or(path).to_string();
        self.add_node(GraphNode {
            id: NodeId::file(path),
            display_name,
            full_name: path.to_string(),
            kind: NodeKind::File,
            weight: 0,
        })
    }

    pub fn add_module(&mut self, root: &str, qualified: &str, class: ModuleClass) -> NodeId {
        let root = root_module(root);
        self.add_node(GraphNode {
            id: NodeId::import(root),
            display_name: root.to_string(),
            full_name: qualified.to_string(),
            kind: class.into(),
            weight: 0,
        })
    }

    /// Add an edge between two existing nodes. Returns `false` when either
    /// endpoint is missing.
    pub fn add_edge(&mut self, source: &NodeId, target: &NodeId, line: Option<u32>) -> bool {
        let (Some(&s), Some(&t)) = (self.index.get(source), self.index.get(target)) else {
            return false;
        };
        self.inner.add_edge(
            s,
            t,
            GraphEdge {
                source: source.clone(),
                target: target.clone(),
                line,
            },
        );
        for idx in [s, t] {
            if let Some(node) = self.inner.node_weight_mut(idx) {
                node.weight += 1;
            }
        }
        true
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).and_then(|&idx| self.inner.node_weight(idx))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes().filter(move |n| n.kind == kind)
    }

    fn touching_edges(&self, id: &NodeId) -> impl Iterator<Item = &GraphEdge> {
        let idx = self.index.get(id).copied();
        idx.into_iter().flat_map(move |idx| {
            self.inner
                .edges_directed(idx, Direction::Outgoing)
                .chain(self.inner.edges_directed(idx, Direction::Incoming))
                .filter_map(move |edge_ref| self.inner.edge_weight(edge_ref.id()))
        })
    }

    /// The node itself plus every node sharing an edge with it. Empty when
    /// the node does not exist.
    pub fn neighbors(&self, id: &NodeId) -> BTreeSet<NodeId> {
        if !self.contains(id) {
            return BTreeSet::new();
        }
        let mut neighbors = BTreeSet::from([id.clone()]);
        for edge in self.touching_edges(id) {
            neighbors.insert(edge.source.clone());
            neighbors.insert(edge.target.clone());
        }
        neighbors
    }

    /// Keys (`source->target`) of every edge touching the node.
    pub fn incident_edges(&self, id: &NodeId) -> BTreeSet<String> {
        self.touching_edges(id).map(GraphEdge::key).collect()
    }

    /// Highlight sets for the active node, empty when nothing is active.
    pub fn highlight(&self, active: Option<&NodeId>) -> Highlight {
        match active {
            Some(id) => Highlight {
                nodes: self.neighbors(id),
                edges: self.incident_edges(id),
            },
            None => Highlight::default(),
        }
    }

    /// Case-insensitive substring search over display and full names.
    /// Returns at most [`SEARCH_LIMIT`] nodes in insertion order; an empty
    /// query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&GraphNode> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.nodes()
            .filter(|n| {
                n.display_name.to_lowercase().contains(&needle)
                    || n.full_name.to_lowercase().contains(&needle)
            })
            .take(SEARCH_LIMIT)
            .collect()
    }

    pub fn export(&self) -> GraphExport {
        GraphExport {
            nodes: self.nodes().cloned().collect(),
            links: self
                .edges()
                .map(|e| GraphLink {
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
        }
    }
}

impl Default for ImportGraph {
    fn default() -> Self {
        Self::new()
    }
}
