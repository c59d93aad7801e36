//! Mail dispatcher error types.

/// Errors from building or delivering an email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// An address could not be parsed into a mailbox.
    #[error("invalid mailbox {address:?}: {source}")]
    Address {
        address: String,
        source: lettre::address::AddressError,
    },
    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    /// SMTP connection, TLS, authentication or protocol failure.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    /// The relay answered with a non-positive reply.
    #[error("SMTP relay rejected message: {0}")]
    Rejected(String),
}
