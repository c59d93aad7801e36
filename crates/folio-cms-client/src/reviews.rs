//! Review queries and mutations against the Sanity HTTP API.
//!
//! Reads use the GROQ query endpoint and go through the CDN host when it is
//! enabled; creates use the mutate endpoint on the live host and ask for the
//! stored document back.

use async_trait::async_trait;
use chrono::Utc;
use folio_core::{NewReviewDocument, Review, ReviewStatus, ReviewSubmission, REVIEW_DOC_TYPE};
use serde::{Deserialize, Serialize};

use crate::error::CmsError;
use crate::{CmsClient, ReviewGateway};

/// GROQ query for the public board.
///
/// Projects only public fields; the author email never leaves the store on
/// this path.
pub const APPROVED_REVIEWS_QUERY: &str = concat!(
    r#"*[_type == "review" && status == "approved"] | order(_createdAt desc) "#,
    "{_id, _type, authorName, message, createdAt, isAnonymous, status}"
);

// -- Wire types ---------------------------------------------------------------

/// Envelope of `GET /data/query`.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Debug, Serialize)]
struct MutationRequest<'a> {
    mutations: [Mutation<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Mutation<'a> {
    create: &'a NewReviewDocument,
}

/// Envelope of `POST /data/mutate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationResponse {
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
    #[serde(default)]
    document: Option<Review>,
}

// -- Client -------------------------------------------------------------------

impl CmsClient {
    fn query_url(&self) -> String {
        format!(
            "{}v{}/data/query/{}",
            self.read_base, self.api_version, self.dataset
        )
    }

    fn mutate_url(&self) -> String {
        format!(
            "{}v{}/data/mutate/{}",
            self.write_base, self.api_version, self.dataset
        )
    }
}

/// Turn a non-2xx response into [`CmsError::Api`].
async fn ensure_success(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, CmsError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(CmsError::Api {
        endpoint: endpoint.into(),
        status,
        body,
    })
}

/// Keep approved reviews only, newest first. Undated reviews sort last;
/// ties keep store order.
pub(crate) fn approved_newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.retain(Review::is_approved);
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

#[async_trait]
impl ReviewGateway for CmsClient {
    /// Calls `GET {read_base}/v{version}/data/query/{dataset}?query=…`.
    async fn list_approved(&self) -> Result<Vec<Review>, CmsError> {
        let endpoint = "GET /data/query";

        let resp = self
            .http
            .get(self.query_url())
            .query(&[("query", APPROVED_REVIEWS_QUERY)])
            .send()
            .await
            .map_err(|e| CmsError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = ensure_success(resp, endpoint).await?;

        let body: QueryResponse<Vec<Review>> =
            resp.json().await.map_err(|e| CmsError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let reviews = approved_newest_first(body.result);
        tracing::debug!(count = reviews.len(), "fetched approved reviews");
        Ok(reviews)
    }

    /// Calls `POST {write_base}/v{version}/data/mutate/{dataset}?returnDocuments=true`.
    async fn create_pending(&self, submission: &ReviewSubmission) -> Result<Review, CmsError> {
        let endpoint = "POST /data/mutate";
        let document = NewReviewDocument::pending(submission, Utc::now());
        let request = MutationRequest {
            mutations: [Mutation { create: &document }],
        };

        let resp = self
            .http
            .post(self.mutate_url())
            .query(&[("returnDocuments", "true")])
            .json(&request)
            .send()
            .await
            .map_err(|e| CmsError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = ensure_success(resp, endpoint).await?;

        let body: MutationResponse = resp.json().await.map_err(|e| CmsError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::EmptyMutationResult {
                endpoint: endpoint.into(),
            })?;

        tracing::info!(
            id = %result.id,
            transaction = body.transaction_id.as_deref().unwrap_or("-"),
            "review stored as pending"
        );

        Ok(match result.document {
            Some(stored) => stored,
            None => Review {
                id: result.id,
                doc_type: REVIEW_DOC_TYPE.to_string(),
                author_name: submission.author_name.as_str().to_string(),
                author_email: Some(submission.author_email.as_str().to_string()),
                message: submission.message.as_str().to_string(),
                is_anonymous: submission.is_anonymous,
                status: ReviewStatus::Pending,
                created_at: Some(document.created_at()),
                rejection_reason: None,
            },
        })
    }
}
