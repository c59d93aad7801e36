//! # folio-mail: Notification Dispatcher
//!
//! Sends transactional HTML email through an SMTP relay. Two messages are
//! produced by this workspace:
//!
//! - the **contact email**, delivered to the address the visitor chose, with
//!   `Reply-To` set to the visitor;
//! - the **review alert**, delivered to the site admin whenever a review is
//!   submitted for moderation.
//!
//! ## Architecture
//!
//! Handlers depend on the [`Mailer`] trait, not on SMTP. [`SmtpMailer`] is
//! the production implementation; tests substitute a recording fake.
//!
//! There is exactly one transmission per [`Mailer::send`] call. No retry,
//! no queue. Callers decide whether a failure matters: the contact flow
//! reports it, the review flow swallows it.
//!
//! ## Configuration
//!
//! [`SmtpConfig::from_env`] returns `Ok(None)` when the sender credentials
//! are absent. The server then runs without a mailer and the contact
//! endpoint answers 503.

pub mod config;
pub mod error;
pub mod smtp;
pub mod templates;

pub use config::{SmtpConfig, SmtpConfigError};
pub use error::MailError;
pub use smtp::SmtpMailer;

use async_trait::async_trait;

/// One email ready to hand to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Optional `Reply-To` address.
    pub reply_to: Option<String>,
}

/// Something that can deliver an [`OutboundEmail`].
///
/// Implementations must be `Send + Sync` so they can be shared across
/// request tasks behind an `Arc`.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email. Exactly one transmission attempt.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;

    /// The sending account's address, used as `From` and as the fallback
    /// admin address.
    fn sender(&self) -> &str;
}
