//! # Validated Field Newtypes
//!
//! Domain-primitive newtypes for the user-supplied fields shared by contact
//! messages and reviews. Each type validates at construction time and is
//! immutable afterwards.
//!
//! ## Length Rules
//!
//! Lengths count Unicode scalar values (`char`s), not bytes. Values are
//! stored exactly as submitted: no trimming, no case folding.
//!
//! | Type | Rule |
//! |------|------|
//! | [`AuthorName`] | 2..=50 characters |
//! | [`MessageBody`] | 10..=1000 characters |
//! | [`EmailAddress`] | [`is_email_shaped`] |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Minimum author name length, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum author name length, in characters.
pub const NAME_MAX: usize = 50;
/// Minimum message length, in characters.
pub const MESSAGE_MIN: usize = 10;
/// Maximum message length, in characters.
pub const MESSAGE_MAX: usize = 1000;

/// Whether `s` has the simple `local@domain.tld` shape.
///
/// Equivalent to the pattern `^[^\s@]+@[^\s@]+\.[^\s@]+$`:
/// - no whitespace anywhere,
/// - exactly one `@`, with a non-empty local part,
/// - a domain containing a `.` that is neither its first nor last character.
pub fn is_email_shaped(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < last)
}

/// Public display name of a visitor (contact sender or review author).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorName(String);

impl AuthorName {
    /// Create a name, validating its length.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NameTooShort`] or [`ValidationError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let len = s.chars().count();
        if len < NAME_MIN {
            return Err(ValidationError::NameTooShort { min: NAME_MIN });
        }
        if len > NAME_MAX {
            return Err(ValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(s))
    }

    /// Access the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email-shaped address. See [`is_email_shaped`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create an address, validating its shape.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidEmail`] if the string is not email-shaped.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !is_email_shaped(&s) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(s))
    }

    /// Access the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text body of a contact message or review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBody(String);

impl MessageBody {
    /// Create a message body, validating its length.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MessageTooShort`] or [`ValidationError::MessageTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let len = s.chars().count();
        if len < MESSAGE_MIN {
            return Err(ValidationError::MessageTooShort { min: MESSAGE_MIN });
        }
        if len > MESSAGE_MAX {
            return Err(ValidationError::MessageTooLong { max: MESSAGE_MAX });
        }
        Ok(Self(s))
    }

    /// Access the message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// JSON field access
// ---------------------------------------------------------------------------

/// Interpret a payload as a JSON object.
pub(crate) fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value.as_object().ok_or(ValidationError::NotAnObject)
}

/// Fetch a required string field. `null` counts as absent.
pub(crate) fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Fetch an optional boolean field, defaulting to `false` when absent.
pub(crate) fn bool_or_false(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<bool, ValidationError> {
    match obj.get(field) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "boolean",
        }),
    }
}
