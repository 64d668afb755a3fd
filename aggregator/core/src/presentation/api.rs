// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::application::AggregationService;
use crate::domain::{AggregateError, AggregatedInfo};
use crate::infrastructure::metrics::FallbackCounter;

pub struct AppState {
    pub aggregation: Arc<AggregationService>,
    pub fallbacks: Arc<FallbackCounter>,
    /// Rendered at `/metrics`; `None` when no recorder is installed
    /// (unit tests).
    pub prometheus: Option<PrometheusHandle>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/aggregate/{pet_id}/{store_id}", get(aggregate_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Errors surfaced over HTTP by the aggregate endpoint. A technical
/// fallback is not an error here: it serves as a regular 200 with
/// sentinel values.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Aggregate(AggregateError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        };

        let body = json!({
            "error": status.canonical_reason().unwrap_or("error"),
            "detail": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

async fn aggregate_handler(
    State(state): State<Arc<AppState>>,
    Path((pet_id, store_id)): Path<(i64, i64)>,
) -> Result<Json<AggregatedInfo>, ApiError> {
    if pet_id < 1 || store_id < 1 {
        return Err(ApiError::Validation(
            "ids must be positive integers".to_string(),
        ));
    }

    let info = state.aggregation.aggregate(pet_id, store_id).await?;
    Ok(Json(info))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "fallbacks_total": state.fallbacks.value(),
    }))
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.prometheus {
        Some(handle) => handle.render().into_response(),
        None => (
            StatusCode::NOT_IMPLEMENTED,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}
