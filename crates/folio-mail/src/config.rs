//! SMTP dispatcher configuration.
//!
//! Defaults target Gmail's relay with an app password, matching how the
//! site is deployed. Override the host and port for any other provider.

use folio_core::is_email_shaped;
use zeroize::Zeroizing;

/// Port for implicit TLS (SMTPS). Any other port uses STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// Configuration for the SMTP relay.
///
/// Custom `Debug` implementation redacts the `app_password` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay hostname. Default: `smtp.gmail.com`.
    pub host: String,
    /// Relay port. Default: 465.
    pub port: u16,
    /// Sending account, also used as the `From` address.
    pub username: String,
    /// App password for the sending account.
    pub app_password: Zeroizing<String>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("app_password", &"[REDACTED]")
            .finish()
    }
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GMAIL_USER` (required for mail)
    /// - `GMAIL_APP_PASSWORD` (required for mail)
    /// - `SMTP_HOST` (default: `smtp.gmail.com`)
    /// - `SMTP_PORT` (default: 465)
    ///
    /// Returns `Ok(None)` when either credential is absent or empty: the
    /// dispatcher is simply not configured. Present but malformed values are
    /// errors.
    pub fn from_env() -> Result<Option<Self>, SmtpConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SmtpConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, SmtpConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (Some(username), Some(password)) =
            (non_empty("GMAIL_USER"), non_empty("GMAIL_APP_PASSWORD"))
        else {
            return Ok(None);
        };

        if !is_email_shaped(&username) {
            return Err(SmtpConfigError::InvalidSender(username));
        }

        let port = match non_empty("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SmtpConfigError::InvalidPort(raw))?,
            None => IMPLICIT_TLS_PORT,
        };

        Ok(Some(Self {
            host: non_empty("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            port,
            username,
            app_password: Zeroizing::new(password),
        }))
    }

    /// Whether the relay is reached with implicit TLS rather than STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum SmtpConfigError {
    #[error("GMAIL_USER is not an email address: {0:?}")]
    InvalidSender(String),
    #[error("invalid SMTP_PORT: {0:?}")]
    InvalidPort(String),
}
