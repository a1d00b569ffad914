//! Axum router setup

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{get_graph, get_highlight, get_imports, get_manifest, health_check, rescan, search},
    ServerState,
};

pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/graph", get(get_graph))
        .route("/api/imports", get(get_imports))
        .route("/api/search", get(search))
        .route("/api/highlight", get(get_highlight))
        .route("/api/manifest", get(get_manifest))
        .route("/api/rescan", post(rescan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
