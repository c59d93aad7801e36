//! # folio-api: Axum API for the Portfolio Site
//!
//! Three endpoints back the site's interactive parts, plus probes:
//!
//! | Path | Module | Purpose |
//! |------|--------|---------|
//! | `POST /api/contact` | [`routes::contact`] | Relay a contact message by email |
//! | `GET /api/reviews` | [`routes::reviews`] | Approved reviews, newest first |
//! | `POST /api/reviews` | [`routes::reviews`] | Submit a review for moderation |
//! | `/health/*` | [`routes::health`] | Liveness, readiness, counters |
//! | `/openapi.json` | [`openapi`] | Generated API description |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! SetRequestId → TraceLayer → PropagateRequestId → CORS → Metrics (/api only) → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::middleware::tracing_layer::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);

    let api = Router::new()
        .merge(routes::contact::router())
        .merge(routes::reviews::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(Extension(state.metrics.clone()));

    Router::new()
        .merge(routes::health::router())
        .merge(openapi::router())
        .merge(api)
        .layer(cors_layer(state.config.cors_origin.as_ref()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(middleware::tracing_layer::layer())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state)
}

/// CORS for the static frontend: `GET`, `POST` and preflight with a JSON body.
fn cors_layer(origin: Option<&HeaderValue>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match origin {
        Some(origin) => layer.allow_origin(origin.clone()),
        None => layer.allow_origin(Any),
    }
}
