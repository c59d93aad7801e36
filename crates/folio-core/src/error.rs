//! # Validation Errors
//!
//! Structured error type for the validation layer, built with `thiserror`.
//!
//! The `Display` text of each variant is the human-readable message sent
//! back to the visitor in a 400 response, so it is written for end users
//! rather than operators.

use thiserror::Error;

/// A single violated validation rule.
///
/// Validation stops at the first failing rule, so a payload with several
/// problems produces exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body could not be parsed as JSON.
    #[error("Request body is not valid JSON")]
    MalformedJson,

    /// The request body parsed, but is not a JSON object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// A required field is absent or `null`.
    #[error("{field} is required")]
    Missing {
        /// Wire name of the field.
        field: &'static str,
    },

    /// A field is present with the wrong JSON type.
    #[error("{field} must be a {expected}")]
    WrongType {
        /// Wire name of the field.
        field: &'static str,
        /// Expected JSON type ("string", "boolean").
        expected: &'static str,
    },

    /// Author name shorter than the minimum.
    #[error("Name is too short (minimum {min} characters)")]
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// Author name longer than the maximum.
    #[error("Name is too long (maximum {max} characters)")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The sender's email address is not email-shaped.
    #[error("Invalid email address")]
    InvalidEmail,

    /// The recipient email address is not email-shaped.
    #[error("Invalid recipient email address")]
    InvalidRecipientEmail,

    /// Message body shorter than the minimum.
    #[error("Message is too short (minimum {min} characters)")]
    MessageTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// Message body longer than the maximum.
    #[error("Message is too long (maximum {max} characters)")]
    MessageTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_messages_mention_the_name() {
        let short = ValidationError::NameTooShort { min: 2 }.to_string();
        let long = ValidationError::NameTooLong { max: 50 }.to_string();
        assert!(short.contains("Name") && short.contains('2'), "got: {short}");
        assert!(long.contains("Name") && long.contains("50"), "got: {long}");
    }

    #[test]
    fn field_errors_name_the_wire_field() {
        let missing = ValidationError::Missing { field: "authorName" }.to_string();
        assert_eq!(missing, "authorName is required");

        let wrong = ValidationError::WrongType {
            field: "isAnonymous",
            expected: "boolean",
        }
        .to_string();
        assert_eq!(wrong, "isAnonymous must be a boolean");
    }

    #[test]
    fn recipient_email_message_differs_from_sender_email() {
        assert_ne!(
            ValidationError::InvalidEmail.to_string(),
            ValidationError::InvalidRecipientEmail.to_string()
        );
    }
}
