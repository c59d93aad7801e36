//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document.
//! Serves at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        description = "Contact form relay and moderated review board for the portfolio site.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::contact::submit_contact,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::submit_review,
        crate::routes::health::liveness,
        crate::routes::health::readiness,
        crate::routes::health::metrics,
        openapi_json,
    ),
    components(schemas(
        crate::routes::contact::ContactRequest,
        crate::routes::contact::ContactAck,
        crate::routes::reviews::ReviewRequest,
        crate::routes::reviews::ReviewList,
        crate::routes::reviews::ReviewCreated,
        crate::routes::health::Readiness,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "contact", description = "Contact form relay"),
        (name = "reviews", description = "Public review board"),
        (name = "health", description = "Probes and counters"),
        (name = "meta", description = "API description"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
#[utoipa::path(
    get,
    path = "/openapi.json",
    responses((status = 200, description = "OpenAPI document")),
    tag = "meta"
)]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/contact",
            "/api/reviews",
            "/health/liveness",
            "/health/readiness",
            "/health/metrics",
            "/openapi.json",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let reviews = &doc.paths.paths["/api/reviews"];
        assert!(reviews.operations.len() >= 2);
    }

    #[test]
    fn request_schemas_use_wire_field_names() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        let contact = &schemas["ContactRequest"]["properties"];
        for field in ["authorName", "email", "message", "recipientEmail"] {
            assert!(contact.get(field).is_some(), "ContactRequest missing {field}");
        }
        assert!(contact.get("author_name").is_none());

        let review = &schemas["ReviewRequest"];
        assert!(review["properties"].get("isAnonymous").is_some());
        let required = review["required"].as_array().unwrap();
        assert!(required.iter().any(|f| f == "authorName"));
        assert!(!required.iter().any(|f| f == "isAnonymous"));
    }
}
