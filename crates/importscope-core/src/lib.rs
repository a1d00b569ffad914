//! Import model, stdlib classifier, dependency graph and selection state

pub mod model;
pub mod classify;
pub mod graph;
pub mod selection;
pub mod manifest;

#[cfg(test)]
mod tests;

pub use model::{
    root_module, is_identifier, SourceFile, ImportStyle, ImportOccurrence, FileImports,
    FileImportTable,
};
pub use classify::{ModuleClass, StdlibCatalogue, is_standard_library};
pub use graph::{
    ImportGraph, NodeId, NodeKind, GraphNode, GraphEdge, GraphLink, GraphExport, Highlight,
    SEARCH_LIMIT,
};
pub use selection::{Selection, SelectionState};
pub use manifest::{ManifestEntry, render_manifest};
