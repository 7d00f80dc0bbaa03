//! Observability HTTP Routes
//!
//! Health check, counters and store status.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::errors::ApiResult;
use crate::forum::{PostService, StoreStatus};
use crate::observability::MetricsSnapshot;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route, mounted at the root
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Counters, mounted under `/observability`
pub fn observability_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(service)
}

/// Store row counts, mounted under `/api`
pub fn service_routes(service: Arc<PostService>) -> Router {
    Router::new()
        .route("/service/status", get(status_handler))
        .with_state(service)
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(State(service): State<Arc<PostService>>) -> Json<MetricsSnapshot> {
    Json(service.metrics().snapshot())
}

async fn status_handler(State(service): State<Arc<PostService>>) -> ApiResult<Json<StoreStatus>> {
    Ok(Json(service.status()?))
}
