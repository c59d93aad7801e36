//! # folio-cms-client: Typed client for the review store
//!
//! Reviews live in a hosted Sanity dataset and are moderated by hand in its
//! studio. This crate is the only code that talks to that dataset; it exposes
//! two operations behind the [`ReviewGateway`] trait:
//!
//! - [`ReviewGateway::list_approved`]: approved reviews, newest first.
//! - [`ReviewGateway::create_pending`]: store a new review as `pending`.
//!
//! ## API Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/v{version}/data/query/{dataset}?query=…` | GROQ query (CDN host when enabled) |
//! | POST   | `/v{version}/data/mutate/{dataset}?returnDocuments=true` | Create document |
//!
//! Callers hold the gateway as `Arc<dyn ReviewGateway>` so tests can swap in
//! an in-memory fake.

pub mod config;
pub mod error;
pub mod reviews;

pub use config::{CmsConfig, ConfigError};
pub use error::CmsError;
pub use reviews::APPROVED_REVIEWS_QUERY;

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{Review, ReviewSubmission};
use url::Url;

/// Read and write access to the review store.
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Approved reviews ordered by submission time, newest first.
    ///
    /// Anything not `approved` is dropped even if the store returns it.
    async fn list_approved(&self) -> Result<Vec<Review>, CmsError>;

    /// Store `submission` as a new `pending` review and return the stored
    /// document.
    async fn create_pending(&self, submission: &ReviewSubmission) -> Result<Review, CmsError>;
}

/// HTTP client for the review store.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    read_base: Url,
    write_base: Url,
    api_version: String,
    dataset: String,
}

impl CmsClient {
    /// Create a new client from configuration. Does not connect.
    pub fn new(config: CmsConfig) -> Result<Self, CmsError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                    .map_err(|_| CmsError::Config(ConfigError::InvalidToken))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| CmsError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            read_base: config.read_base()?,
            write_base: config.write_base()?,
            api_version: config.api_version,
            dataset: config.dataset,
        })
    }

    /// Dataset this client reads and writes.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }
}
