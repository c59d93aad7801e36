//! # API Client
//!
//! Thin typed wrapper over the portfolio API. Payloads are validated with
//! `folio-core` before anything is sent, so the CLI reports the same first
//! violated rule the server would, without a round trip.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use folio_core::{ContactMessage, ReviewSubmission, ReviewView};
use serde::{Deserialize, Serialize};
use url::Url;

/// Contact form fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub author_name: String,
    pub email: String,
    pub message: String,
    pub recipient_email: String,
}

/// Review form fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    pub author_name: String,
    pub email: String,
    pub message: String,
    pub is_anonymous: bool,
}

#[derive(Debug, Deserialize)]
struct ReviewListBody {
    reviews: Vec<ReviewView>,
}

#[derive(Debug, Deserialize)]
struct ReviewCreatedBody {
    message: String,
    review: ReviewView,
}

/// Any response body carrying a `message`.
#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for one API deployment. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid API URL {base_url:?}"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid endpoint path {path:?}"))
    }

    /// `GET /api/reviews`: approved reviews, newest first.
    pub async fn list_reviews(&self) -> Result<Vec<ReviewView>> {
        let url = self.endpoint("api/reviews")?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("GET /api/reviews failed")?;
        let resp = ensure_success(resp, "GET /api/reviews").await?;

        let body: ReviewListBody = resp
            .json()
            .await
            .context("unexpected response from GET /api/reviews")?;
        Ok(body.reviews)
    }

    /// `POST /api/contact`: returns the server's acknowledgement.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<String> {
        let payload = serde_json::to_value(form)?;
        ContactMessage::from_json(&payload)?;

        let url = self.endpoint("api/contact")?;
        let resp = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .context("POST /api/contact failed")?;
        let resp = ensure_success(resp, "POST /api/contact").await?;

        let body: MessageBody = resp
            .json()
            .await
            .context("unexpected response from POST /api/contact")?;
        Ok(body.message.unwrap_or_default())
    }

    /// `POST /api/reviews`: returns the acknowledgement and the stored review.
    pub async fn submit_review(&self, form: &ReviewForm) -> Result<(String, ReviewView)> {
        let payload = serde_json::to_value(form)?;
        ReviewSubmission::from_json(&payload)?;

        let url = self.endpoint("api/reviews")?;
        let resp = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .context("POST /api/reviews failed")?;
        let resp = ensure_success(resp, "POST /api/reviews").await?;

        let body: ReviewCreatedBody = resp
            .json()
            .await
            .context("unexpected response from POST /api/reviews")?;
        Ok((body.message, body.review))
    }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn ensure_success(resp: reqwest::Response, endpoint: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(text);
    bail!("{endpoint} returned {status}: {message}")
}
