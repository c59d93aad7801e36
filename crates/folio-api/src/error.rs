//! # API Error Types
//!
//! [`AppError`] classifies what went wrong; [`Surface`] says which endpoint
//! is answering, since each endpoint has its own failure body:
//!
//! | Surface | Failure body |
//! |---------|--------------|
//! | [`Surface::Contact`] | `{message, success: false}` |
//! | [`Surface::ReviewList`] | `{message, reviews: []}` |
//! | [`Surface::ReviewSubmit`] | `{message}` |
//!
//! Upstream error details are logged and replaced by a generic per-endpoint
//! message before they reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Application-level error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload failed validation (400). The message is shown as-is.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator is not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The mail relay or review store failed (500). Detail is logged only.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    /// Construct a service unavailable error (503).
    pub fn service_unavailable(msg: &str) -> Self {
        Self::ServiceUnavailable(msg.to_string())
    }

    /// Construct an upstream error (500).
    pub fn upstream(msg: String) -> Self {
        Self::Upstream(msg)
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
        }
    }

    /// Attach the endpoint this error is answered on.
    pub fn on(self, surface: Surface) -> EndpointError {
        EndpointError {
            surface,
            error: self,
        }
    }
}

/// The endpoint an error is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// `POST /api/contact`
    Contact,
    /// `GET /api/reviews`
    ReviewList,
    /// `POST /api/reviews`
    ReviewSubmit,
}

impl Surface {
    /// Generic message shown for upstream failures.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Contact => "Failed to send the message. Please try again.",
            Self::ReviewList => "Failed to fetch reviews",
            Self::ReviewSubmit => "Failed to create the review. Please try again.",
        }
    }
}

/// An [`AppError`] bound to the endpoint answering it.
#[derive(Debug)]
pub struct EndpointError {
    /// Endpoint answering the request.
    pub surface: Surface,
    /// What went wrong.
    pub error: AppError,
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let (status, code) = self.error.status_and_code();

        match &self.error {
            AppError::Upstream(_) => {
                tracing::error!(error = %self.error, code, surface = ?self.surface, "request failed")
            }
            AppError::ServiceUnavailable(_) => {
                tracing::warn!(error = %self.error, surface = ?self.surface, "service unavailable")
            }
            AppError::Validation(_) => {
                tracing::debug!(error = %self.error, surface = ?self.surface, "rejected payload")
            }
        }

        // Never expose upstream detail to clients.
        let message = match &self.error {
            AppError::Validation(err) => err.to_string(),
            AppError::ServiceUnavailable(msg) => msg.clone(),
            AppError::Upstream(_) => self.surface.failure_message().to_string(),
        };

        let body = match self.surface {
            Surface::Contact => json!({ "message": message, "success": false }),
            Surface::ReviewList => json!({ "message": message, "reviews": [] }),
            Surface::ReviewSubmit => json!({ "message": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: EndpointError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes() {
        let cases = [
            (
                AppError::Validation(ValidationError::InvalidEmail),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AppError::service_unavailable("not configured"),
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
            ),
            (
                AppError::upstream("smtp down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[tokio::test]
    async fn contact_surface_carries_success_false() {
        let (status, body) = render(
            AppError::Validation(ValidationError::InvalidEmail).on(Surface::Contact),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email address");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn review_list_surface_carries_empty_reviews() {
        let (status, body) =
            render(AppError::service_unavailable("nope").on(Surface::ReviewList)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["reviews"], serde_json::json!([]));
        assert_eq!(body["message"], "nope");
    }

    #[tokio::test]
    async fn upstream_detail_is_hidden() {
        let (status, body) = render(
            AppError::upstream("CMS POST /data/mutate returned 403: token sk-secret".into())
                .on(Surface::ReviewSubmit),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], Surface::ReviewSubmit.failure_message());
        assert!(!body.to_string().contains("sk-secret"));
        assert!(body.get("success").is_none());
    }
}
