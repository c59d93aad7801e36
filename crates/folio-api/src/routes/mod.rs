//! # Route Handlers
//!
//! | Path | Module |
//! |------|--------|
//! | `POST /api/contact` | [`contact`] |
//! | `GET /api/reviews`, `POST /api/reviews` | [`reviews`] |
//! | `/health/*` | [`health`] |

pub mod contact;
pub mod health;
pub mod reviews;

use std::sync::Arc;

use folio_cms_client::ReviewGateway;
use folio_mail::Mailer;

use crate::error::AppError;
use crate::state::AppState;

/// Helper: extract the mailer from AppState or return 503.
pub(crate) fn require_mailer<'a>(
    state: &'a AppState,
    message: &str,
) -> Result<&'a Arc<dyn Mailer>, AppError> {
    state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable(message))
}

/// Helper: extract the review gateway from AppState or return 503.
pub(crate) fn require_gateway<'a>(
    state: &'a AppState,
    message: &str,
) -> Result<&'a Arc<dyn ReviewGateway>, AppError> {
    state
        .gateway
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable(message))
}
