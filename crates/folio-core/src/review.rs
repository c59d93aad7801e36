//! # Reviews
//!
//! Three shapes of the same testimonial:
//!
//! - [`ReviewSubmission`]: what a visitor posts, validated.
//! - [`NewReviewDocument`]: what is written to the store. Always `pending`.
//! - [`Review`]: what the store holds, including the private author email.
//!
//! [`ReviewView`] is the public projection of a [`Review`]. It has no email
//! field, so no read path can leak one.
//!
//! Moderation (`pending → approved | rejected`) is done by hand in the CMS;
//! nothing in this workspace transitions a review's status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::fields::{
    as_object, bool_or_false, required_str, AuthorName, EmailAddress, MessageBody,
};

/// Document type name used by the store.
pub const REVIEW_DOC_TYPE: &str = "review";

fn review_doc_type() -> String {
    REVIEW_DOC_TYPE.to_string()
}

/// Query projections yield `null` for fields a document lacks.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Moderation status of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting moderation. Every new review starts here.
    Pending,
    /// Visible on the public board.
    Approved,
    /// Hidden; may carry a rejection reason.
    Rejected,
    /// A status this version does not know. Never listed.
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    /// Return the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated review submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    /// Display name (shown unless `is_anonymous`).
    pub author_name: AuthorName,
    /// Private contact address, never shown publicly.
    pub author_email: EmailAddress,
    /// Review text.
    pub message: MessageBody,
    /// Whether the board should hide the author's name.
    pub is_anonymous: bool,
}

impl ReviewSubmission {
    /// Validate a review payload.
    ///
    /// Fields are checked in order `authorName`, `email`, `message`,
    /// `isAnonymous`; the first failure is returned. `isAnonymous` defaults
    /// to `false` when absent. Any `status`, `createdAt` or `_id` in the
    /// payload is ignored.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value)?;

        let author_name = AuthorName::new(required_str(obj, "authorName")?)?;
        let author_email = EmailAddress::new(required_str(obj, "email")?)?;
        let message = MessageBody::new(required_str(obj, "message")?)?;
        let is_anonymous = bool_or_false(obj, "isAnonymous")?;

        Ok(Self {
            author_name,
            author_email,
            message,
            is_anonymous,
        })
    }

    /// Name to show to moderators and readers: the author's name, or
    /// `"Anonymous"` when they asked to stay anonymous.
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            "Anonymous"
        } else {
            self.author_name.as_str()
        }
    }
}

/// Document body for creating a review in the store.
///
/// Fields are private: the only constructor is [`NewReviewDocument::pending`],
/// so a document with any other status cannot be built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewDocument {
    #[serde(rename = "_type")]
    doc_type: &'static str,
    author_name: String,
    author_email: String,
    message: String,
    is_anonymous: bool,
    status: ReviewStatus,
    created_at: DateTime<Utc>,
}

impl NewReviewDocument {
    /// Build a pending review document stamped with `now`.
    pub fn pending(submission: &ReviewSubmission, now: DateTime<Utc>) -> Self {
        Self {
            doc_type: REVIEW_DOC_TYPE,
            author_name: submission.author_name.as_str().to_string(),
            author_email: submission.author_email.as_str().to_string(),
            message: submission.message.as_str().to_string(),
            is_anonymous: submission.is_anonymous,
            status: ReviewStatus::Pending,
            created_at: now,
        }
    }

    /// Status of the document. Always [`ReviewStatus::Pending`].
    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Submission timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A review as stored in the CMS.
///
/// Documents edited by hand in the studio may omit fields or carry `null`
/// for them; both read as the field's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Store document type (`"review"`).
    #[serde(rename = "_type", default = "review_doc_type")]
    pub doc_type: String,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    /// Private author email. Only present on documents returned from writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Review text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Whether the author asked to stay anonymous.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    /// Moderation status.
    pub status: ReviewStatus,
    /// Submission time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Moderator's note, meaningful only for rejected reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Review {
    /// Whether this review may appear on the public board.
    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }

    /// Public projection of this review, without the author email or
    /// moderation notes.
    pub fn view(&self) -> ReviewView {
        ReviewView {
            id: self.id.clone(),
            doc_type: self.doc_type.clone(),
            author_name: self.author_name.clone(),
            message: self.message.clone(),
            created_at: self.created_at,
            is_anonymous: self.is_anonymous,
            status: self.status,
        }
    }
}

/// Public shape of a review in API responses.
///
/// `{_id, _type, authorName, message, createdAt, isAnonymous, status}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    /// Store-assigned document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Store document type.
    #[serde(rename = "_type")]
    pub doc_type: String,
    /// Display name.
    pub author_name: String,
    /// Review text.
    pub message: String,
    /// Submission time.
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the author asked to stay anonymous.
    pub is_anonymous: bool,
    /// Moderation status.
    pub status: ReviewStatus,
}
