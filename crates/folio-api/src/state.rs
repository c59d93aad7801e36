//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The mail dispatcher and the review gateway are optional. Whether each is
//! present is decided once at startup from the environment; handlers that
//! need an absent collaborator answer 503.

use std::sync::Arc;

use axum::http::HeaderValue;
use folio_cms_client::ReviewGateway;
use folio_core::is_email_shaped;
use folio_mail::templates::DEFAULT_STUDIO_URL;
use folio_mail::Mailer;

use crate::middleware::metrics::ApiMetrics;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Recipient of new-review alerts. Falls back to the mail sender.
    pub admin_email: Option<String>,
    /// Moderation console link placed in review alerts.
    pub studio_url: String,
    /// Single allowed CORS origin. `None` allows any origin.
    pub cors_origin: Option<HeaderValue>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            admin_email: None,
            studio_url: DEFAULT_STUDIO_URL.to_string(),
            cors_origin: None,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `ADMIN_EMAIL` (optional)
    /// - `SANITY_STUDIO_URL` (default: `https://sanity.io`)
    /// - `CORS_ALLOWED_ORIGIN` (optional)
    /// - `LOG_FORMAT` (`text` or `json`, default: `text`)
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse().map_err(|_| AppConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let admin_email = match non_empty("ADMIN_EMAIL") {
            Some(addr) if is_email_shaped(&addr) => Some(addr),
            Some(addr) => return Err(AppConfigError::InvalidAdminEmail(addr)),
            None => None,
        };

        let cors_origin = non_empty("CORS_ALLOWED_ORIGIN")
            .map(|raw| HeaderValue::from_str(&raw).map_err(|_| AppConfigError::InvalidOrigin(raw)))
            .transpose()?;

        let log_format = match non_empty("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(AppConfigError::InvalidLogFormat(other.to_string())),
        };

        Ok(Self {
            port,
            admin_email,
            studio_url: non_empty("SANITY_STUDIO_URL").unwrap_or(defaults.studio_url),
            cors_origin,
            log_format,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
    #[error("ADMIN_EMAIL is not an email address: {0:?}")]
    InvalidAdminEmail(String),
    #[error("CORS_ALLOWED_ORIGIN is not a valid header value: {0:?}")]
    InvalidOrigin(String),
    #[error("LOG_FORMAT must be 'text' or 'json', got {0:?}")]
    InvalidLogFormat(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Mail dispatcher. `None` when SMTP credentials are not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Review store gateway. `None` when the CMS is not configured.
    pub gateway: Option<Arc<dyn ReviewGateway>>,
    /// Request counters.
    pub metrics: ApiMetrics,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("mailer", &self.mailer.as_ref().map(|m| m.sender().to_string()))
            .field("gateway", &self.gateway.is_some())
            .finish()
    }
}

impl AppState {
    /// Create application state from configuration and optional collaborators.
    pub fn new(
        config: AppConfig,
        mailer: Option<Arc<dyn Mailer>>,
        gateway: Option<Arc<dyn ReviewGateway>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
            gateway,
            metrics: ApiMetrics::new(),
        }
    }

    /// Address that receives new-review alerts, if any mail can be sent.
    pub fn admin_recipient(&self) -> Option<String> {
        let mailer = self.mailer.as_ref()?;
        Some(
            self.config
                .admin_email
                .clone()
                .unwrap_or_else(|| mailer.sender().to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(cfg.admin_email.is_none());
        assert_eq!(cfg.studio_url, "https://sanity.io");
        assert!(cfg.cors_origin.is_none());
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_all_variables() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("ADMIN_EMAIL", "admin@x.com"),
            ("SANITY_STUDIO_URL", "https://studio.x.com"),
            ("CORS_ALLOWED_ORIGIN", "https://x.com"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.admin_email.as_deref(), Some("admin@x.com"));
        assert_eq!(cfg.studio_url, "https://studio.x.com");
        assert_eq!(cfg.cors_origin.unwrap(), "https://x.com");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn malformed_values_are_fatal() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(AppConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("ADMIN_EMAIL", "admin")])),
            Err(AppConfigError::InvalidAdminEmail(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])),
            Err(AppConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn no_admin_recipient_without_mailer() {
        let state = AppState::new(AppConfig::default(), None, None);
        assert!(state.admin_recipient().is_none());
    }
}
