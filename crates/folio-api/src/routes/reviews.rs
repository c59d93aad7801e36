//! # Review Board
//!
//! Public listing of approved reviews and submission of new ones. New
//! reviews are stored as `pending`; moderation happens in the CMS studio.
//!
//! After a review is stored the site admin is emailed. That alert is best
//! effort: if mail is not configured or the relay fails, the submission
//! still succeeds.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use folio_core::{Review, ReviewSubmission, ReviewView};
use folio_mail::templates;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, EndpointError, Surface};
use crate::extractors::extract_json;
use crate::routes::require_gateway;
use crate::state::AppState;

/// Shown on the listing when no CMS is configured.
pub const STORE_NOT_CONFIGURED: &str = "Review store is not configured";

/// Shown on submission when no CMS is configured.
pub const STORE_NOT_CONFIGURED_SUBMIT: &str =
    "Review store is not configured. Reviews cannot be saved right now.";

/// Acknowledgement shown after a review is stored.
pub const REVIEW_SUBMITTED: &str = "Review submitted! It will be published after approval.";

/// Build the reviews router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/reviews", get(list_reviews).post(submit_review))
}

/// Review submission payload.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// 2 to 50 characters.
    pub author_name: String,
    /// Private; never shown on the board.
    pub email: String,
    /// 10 to 1000 characters.
    pub message: String,
    /// Hide the author's name on the board. Default: false.
    pub is_anonymous: Option<bool>,
}

/// Response body of `GET /api/reviews`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewList {
    /// Approved reviews, newest first.
    #[schema(value_type = Vec<Object>)]
    pub reviews: Vec<ReviewView>,
    /// Number of reviews returned.
    pub count: usize,
}

/// Response body of a successful `POST /api/reviews`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewCreated {
    /// Human-readable outcome.
    pub message: String,
    /// The stored review, without the author email.
    #[schema(value_type = Object)]
    pub review: ReviewView,
}

/// GET /api/reviews: List approved reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Approved reviews", body = ReviewList),
        (status = 500, description = "Review store failed; `reviews` is empty"),
        (status = 503, description = "Review store not configured; `reviews` is empty"),
    ),
    tag = "reviews"
)]
pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<ReviewList>, EndpointError> {
    let reviews = approved_views(&state)
        .await
        .map_err(|e| e.on(Surface::ReviewList))?;

    Ok(Json(ReviewList {
        count: reviews.len(),
        reviews,
    }))
}

async fn approved_views(state: &AppState) -> Result<Vec<ReviewView>, AppError> {
    let gateway = require_gateway(state, STORE_NOT_CONFIGURED)?;

    let reviews = gateway
        .list_approved()
        .await
        .map_err(|e| AppError::upstream(format!("listing reviews failed: {e}")))?;

    // The gateway already filters; the board must never show anything else.
    Ok(reviews
        .iter()
        .filter(|r| r.is_approved())
        .map(Review::view)
        .collect())
}

/// POST /api/reviews: Submit a review for moderation.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review stored as pending", body = ReviewCreated),
        (status = 400, description = "Invalid payload; first violated rule"),
        (status = 500, description = "Review store failed"),
        (status = 503, description = "Review store not configured"),
    ),
    tag = "reviews"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewCreated>), EndpointError> {
    let stored = store(&state, body)
        .await
        .map_err(|e| e.on(Surface::ReviewSubmit))?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreated {
            message: REVIEW_SUBMITTED.to_string(),
            review: stored.view(),
        }),
    ))
}

async fn store(
    state: &AppState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Review, AppError> {
    let raw = extract_json(body)?;
    let submission = ReviewSubmission::from_json(&raw)?;
    let gateway = require_gateway(state, STORE_NOT_CONFIGURED_SUBMIT)?;

    let stored = gateway
        .create_pending(&submission)
        .await
        .map_err(|e| AppError::upstream(format!("creating review failed: {e}")))?;

    tracing::info!(id = %stored.id, anonymous = submission.is_anonymous, "review submitted");

    notify_admin(state, &submission).await;
    Ok(stored)
}

/// Email the admin about a new pending review. Never fails the request.
async fn notify_admin(state: &AppState, submission: &ReviewSubmission) {
    let (Some(mailer), Some(admin)) = (state.mailer.as_ref(), state.admin_recipient()) else {
        tracing::debug!("mail not configured; skipping review alert");
        return;
    };

    let alert = templates::review_alert(submission, &admin, &state.config.studio_url);
    if let Err(e) = mailer.send(&alert).await {
        tracing::warn!(error = %e, "review alert failed");
    }
}
