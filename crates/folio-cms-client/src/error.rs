//! CMS client error types.

/// Errors from CMS API calls.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// HTTP transport error (connect, TLS, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The CMS returned a non-2xx status.
    #[error("CMS {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// A mutation succeeded but reported no affected document.
    #[error("CMS {endpoint} returned no mutation results")]
    EmptyMutationResult { endpoint: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl CmsError {
    /// HTTP status returned by the CMS, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
