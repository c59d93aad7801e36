//! # Request Body Extraction
//!
//! Payloads are taken as raw JSON values so that validation in `folio-core`
//! can report the first violated rule in field order, rather than whatever
//! serde trips over first.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use folio_core::ValidationError;
use serde_json::Value;

use crate::error::AppError;

/// Extract a JSON body, mapping every rejection (bad syntax, wrong content
/// type, unreadable body) to [`ValidationError::MalformedJson`].
///
/// Handlers should use:
/// ```ignore
/// async fn handler(body: Result<Json<Value>, JsonRejection>) -> ... {
///     let raw = extract_json(body)?;
///     let parsed = ContactMessage::from_json(&raw)?;
/// }
/// ```
pub fn extract_json(result: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    result.map(|Json(v)| v).map_err(|err| {
        tracing::debug!(rejection = %err.body_text(), "unreadable JSON body");
        AppError::Validation(ValidationError::MalformedJson)
    })
}
