//! REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use importscope_core::{render_manifest, GraphExport, GraphNode, Highlight, NodeId, StdlibCatalogue};
use importscope_indexer::ScanSummary;
use importscope_registry::{resolve_manifest, unpinned_manifest};
use serde::{Deserialize, Serialize};

use crate::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    pub scanned_at: DateTime<Utc>,
    #[serde(flatten)]
    pub graph: GraphExport,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct HighlightParams {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ManifestParams {
    #[serde(default)]
    pub resolve: bool,
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Nodes and links of the current graph
pub async fn get_graph(State(state): State<Arc<ServerState>>) -> Json<GraphResponse> {
    let model = state.model.read().await;
    Json(GraphResponse {
        scanned_at: model.scanned_at,
        graph: model.graph.export(),
    })
}

/// Per-file table, global set and its stdlib / third-party split
pub async fn get_imports(State(state): State<Arc<ServerState>>) -> Json<ScanSummary> {
    let model = state.model.read().await;
    Json(model.scan.summary(StdlibCatalogue::python()))
}

pub async fn search(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<GraphNode>> {
    let model = state.model.read().await;
    Json(model.graph.search(&params.q).into_iter().cloned().collect())
}

/// Neighbor ids and incident edge keys of one node
pub async fn get_highlight(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<HighlightParams>,
) -> Result<Json<Highlight>, StatusCode> {
    let model = state.model.read().await;
    let id = NodeId::from(params.id.as_str());
    if !model.graph.contains(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(model.graph.highlight(Some(&id))))
}

/// Third-party requirements as plain text. `?resolve=true` pins versions.
pub async fn get_manifest(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ManifestParams>,
) -> impl IntoResponse {
    let third_party = {
        let model = state.model.read().await;
        model.scan.third_party(StdlibCatalogue::python())
    };

    let entries = if params.resolve {
        resolve_manifest(
            state.registry.as_ref(),
            &third_party,
            state.config.registry.concurrency,
        )
        .await
    } else {
        unpinned_manifest(&third_party)
    };

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_manifest(&entries),
    )
}

/// Replace the model with a fresh scan of the root
pub async fn rescan(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ScanSummary>, StatusCode> {
    if let Err(e) = state.rescan().await {
        tracing::error!("Rescan failed: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let model = state.model.read().await;
    Ok(Json(model.scan.summary(StdlibCatalogue::python())))
}
