//! # Contact Messages
//!
//! A [`ContactMessage`] is transient: it is built from one request body,
//! handed to the mail dispatcher, and dropped. It is never persisted.

use serde_json::Value;

use crate::error::ValidationError;
use crate::fields::{as_object, required_str, AuthorName, EmailAddress, MessageBody};

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Who wrote the message.
    pub author_name: AuthorName,
    /// Where to reply.
    pub email: EmailAddress,
    /// Message text.
    pub message: MessageBody,
    /// Mailbox the message is delivered to.
    pub recipient_email: EmailAddress,
}

impl ContactMessage {
    /// Validate a contact payload.
    ///
    /// Fields are checked in order `authorName`, `email`, `message`,
    /// `recipientEmail`; the first failure is returned. Unknown fields are
    /// ignored.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value)?;

        let author_name = AuthorName::new(required_str(obj, "authorName")?)?;
        let email = EmailAddress::new(required_str(obj, "email")?)?;
        let message = MessageBody::new(required_str(obj, "message")?)?;
        let recipient_email = EmailAddress::new(required_str(obj, "recipientEmail")?)
            .map_err(|_| ValidationError::InvalidRecipientEmail)?;

        Ok(Self {
            author_name,
            email,
            message,
            recipient_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "authorName": "Jo",
            "email": "jo@x.com",
            "message": "Hello there!",
            "recipientEmail": "me@x.com"
        })
    }

    #[test]
    fn accepts_valid_payload() {
        let msg = ContactMessage::from_json(&valid()).unwrap();
        assert_eq!(msg.author_name.as_str(), "Jo");
        assert_eq!(msg.email.as_str(), "jo@x.com");
        assert_eq!(msg.message.as_str(), "Hello there!");
        assert_eq!(msg.recipient_email.as_str(), "me@x.com");
    }

    #[test]
    fn short_name_is_rejected() {
        let mut body = valid();
        body["authorName"] = json!("J");
        assert_eq!(
            ContactMessage::from_json(&body).unwrap_err(),
            ValidationError::NameTooShort { min: 2 }
        );
    }

    #[test]
    fn first_failure_wins() {
        // Name, email and message are all invalid; only the name is reported.
        let body = json!({
            "authorName": "J",
            "email": "nope",
            "message": "short",
            "recipientEmail": "also-nope"
        });
        assert_eq!(
            ContactMessage::from_json(&body).unwrap_err(),
            ValidationError::NameTooShort { min: 2 }
        );

        // With a valid name, the email comes next.
        let body = json!({
            "authorName": "Jo",
            "email": "nope",
            "message": "short",
            "recipientEmail": "also-nope"
        });
        assert_eq!(
            ContactMessage::from_json(&body).unwrap_err(),
            ValidationError::InvalidEmail
        );
    }

    #[test]
    fn bad_recipient_has_its_own_message() {
        let mut body = valid();
        body["recipientEmail"] = json!("me-at-x.com");
        assert_eq!(
            ContactMessage::from_json(&body).unwrap_err(),
            ValidationError::InvalidRecipientEmail
        );
    }

    #[test]
    fn missing_recipient_is_reported_as_missing() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("recipientEmail");
        assert_eq!(
            ContactMessage::from_json(&body).unwrap_err(),
            ValidationError::Missing {
                field: "recipientEmail"
            }
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(
            ContactMessage::from_json(&json!(["Jo"])).unwrap_err(),
            ValidationError::NotAnObject
        );
    }

    #[test]
    fn numeric_name_is_a_type_error() {
        let mut body = valid();
        body["authorName"] = json!(42);
        assert_eq!(
            ContactMessage::from_json(&body).unwrap_err(),
            ValidationError::WrongType {
                field: "authorName",
                expected: "string"
            }
        );
    }
}
