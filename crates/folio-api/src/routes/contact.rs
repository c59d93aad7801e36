//! # Contact Form
//!
//! Relays a visitor's message by email to the address they picked.
//! Validation runs before the mailer is even looked up, so an invalid
//! payload gets a 400 whether or not mail is configured.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use folio_core::ContactMessage;
use folio_mail::templates;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, EndpointError, Surface};
use crate::extractors::extract_json;
use crate::routes::require_mailer;
use crate::state::AppState;

/// Acknowledgement shown after the message is relayed.
pub const CONTACT_SENT: &str = "Message sent successfully! I'll get back to you soon.";

/// Shown when no SMTP credentials are configured.
pub const MAIL_NOT_CONFIGURED: &str =
    "The email service is not configured. Please reach out directly.";

/// Build the contact router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/contact", post(submit_contact))
}

/// Contact form payload.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ContactRequest {
    /// 2 to 50 characters.
    pub author_name: String,
    /// Visitor's address, used as `Reply-To`.
    pub email: String,
    /// 10 to 1000 characters.
    pub message: String,
    /// Where the message is delivered.
    pub recipient_email: String,
}

/// Response body of `POST /api/contact`, on success and on failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactAck {
    /// Human-readable outcome.
    pub message: String,
    /// Whether the email was relayed.
    pub success: bool,
}

/// POST /api/contact: Relay a contact message by email.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message relayed", body = ContactAck),
        (status = 400, description = "Invalid payload; first violated rule", body = ContactAck),
        (status = 500, description = "Mail relay failed", body = ContactAck),
        (status = 503, description = "Mail not configured", body = ContactAck),
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactAck>, EndpointError> {
    relay(&state, body)
        .await
        .map_err(|e| e.on(Surface::Contact))?;

    Ok(Json(ContactAck {
        message: CONTACT_SENT.to_string(),
        success: true,
    }))
}

async fn relay(
    state: &AppState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(), AppError> {
    let raw = extract_json(body)?;
    let contact = ContactMessage::from_json(&raw)?;
    let mailer = require_mailer(state, MAIL_NOT_CONFIGURED)?;

    mailer
        .send(&templates::contact_email(&contact))
        .await
        .map_err(|e| AppError::upstream(format!("contact email failed: {e}")))?;

    tracing::info!(to = %contact.recipient_email, "contact message relayed");
    Ok(())
}
