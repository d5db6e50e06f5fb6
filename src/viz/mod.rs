//! HTTP surface for an interactive Sankey front end.
//!
//! The front end owns the controls and the rendering; it calls
//! `/api/sankey` on every input change and draws whatever comes back. Each
//! request recomputes from the shared, read-only [`FlowSession`], so
//! overlapping requests never interfere and the latest response is simply
//! the one the client draws.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::config::SelectionConfig;
use crate::error::{FlowGraphError, Result};
use crate::graph::pipeline::FlowSession;
use crate::types::{split_labels, Node, TraversalScope};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct VizState {
    session: FlowSession,
    selection: SelectionConfig,
}

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthJson {
    status: &'static str,
    labels: usize,
    edges: usize,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct SankeyQuery {
    start: Option<String>,
    depth: Option<i64>,
    /// Comma-separated labels; absent means every label.
    include: Option<String>,
    scope: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

struct ApiError(FlowGraphError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            FlowGraphError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<Arc<VizState>>) -> Json<HealthJson> {
    Json(HealthJson {
        status: "ok",
        labels: state.session.labels().len(),
        edges: state.session.edges().len(),
    })
}

async fn get_labels(State(state): State<Arc<VizState>>) -> Json<Vec<Node>> {
    Json(state.session.labels().nodes().collect())
}

async fn get_sankey(
    State(state): State<Arc<VizState>>,
    Query(params): Query<SankeyQuery>,
) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let scope = match params.scope.as_deref() {
        Some(raw) => Some(TraversalScope::from_str_loose(raw).ok_or_else(|| {
            ApiError(FlowGraphError::InvalidSelection(format!("unknown scope {raw:?}")))
        })?),
        None => None,
    };

    let selection = state
        .selection
        .resolve(
            state.session.labels(),
            params.start.as_deref(),
            params.depth,
            params.include.as_deref().map(split_labels),
            scope,
        )
        .map_err(ApiError)?;

    Ok(Json(state.session.recompute(&selection).to_plotly()))
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Build the viz Router (extracted for testability).
fn build_router(state: Arc<VizState>) -> Router {
    Router::new()
        .route("/api/health", get(get_health))
        .route("/api/labels", get(get_labels))
        .route("/api/sankey", get(get_sankey))
        .with_state(state)
}

/// Serve `session` on `addr` until Ctrl-C.
pub async fn run_viz_server(
    session: FlowSession,
    selection: SelectionConfig,
    addr: SocketAddr,
) -> Result<()> {
    let state = Arc::new(VizState { session, selection });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("flowgraph server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down flowgraph server");
        })
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
