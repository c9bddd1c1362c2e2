//! mpower-exporter — HTTP surface for the mPower metrics adapter.
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/metrics` | Prometheus exposition, one device round trip per request |
//!
//! Any other path is answered by the same handler.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;

use mpower_metrics::Exporter;

/// Shared state for the metrics handler.
#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<Exporter>,
}

/// Build the exporter router.
pub fn build_router(exporter: Arc<Exporter>) -> Router {
    let state = AppState { exporter };

    Router::new()
        .route("/metrics", get(metrics))
        .fallback(metrics)
        .with_state(state)
}

/// Scrape the device and render the result.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.exporter.scrape().await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mpower_metrics::CONTENT_TYPE)],
        body,
    )
}
