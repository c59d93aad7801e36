//! # Health Probes
//!
//! Mounted outside the metrics middleware so probes do not skew counters.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::metrics::MetricsSnapshot;
use crate::state::AppState;

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/health/metrics", get(metrics))
}

/// Which collaborators are configured.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Readiness {
    /// Always `"ready"` once the server is accepting connections.
    pub status: String,
    /// Whether a mail dispatcher is configured.
    pub mail: bool,
    /// Whether a review store is configured.
    pub cms: bool,
}

/// GET /health/liveness: always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/liveness",
    responses((status = 200, description = "Process is up", body = String)),
    tag = "health"
)]
pub async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness: report which collaborators are configured.
///
/// Missing collaborators do not make the server unready: their endpoints
/// answer 503 on their own.
#[utoipa::path(
    get,
    path = "/health/readiness",
    responses((status = 200, description = "Server is ready", body = Readiness)),
    tag = "health"
)]
pub async fn readiness(State(state): State<AppState>) -> Json<Readiness> {
    Json(Readiness {
        status: "ready".to_string(),
        mail: state.mailer.is_some(),
        cms: state.gateway.is_some(),
    })
}

/// GET /health/metrics: request counters for `/api/*`.
#[utoipa::path(
    get,
    path = "/health/metrics",
    responses((status = 200, description = "Counter snapshot", body = MetricsSnapshot)),
    tag = "health"
)]
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
