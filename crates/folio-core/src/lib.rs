#![deny(missing_docs)]

//! # folio-core: Domain Types for the Portfolio Backend
//!
//! This crate defines the types every other crate in the workspace shares.
//! It has no internal crate dependencies: only `serde`, `serde_json`,
//! `thiserror` and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Validated newtypes for user input.** [`AuthorName`], [`EmailAddress`]
//!    and [`MessageBody`] can only be constructed through their checking
//!    constructors. A [`ContactMessage`] or [`ReviewSubmission`] holding them
//!    is therefore valid by construction.
//!
//! 2. **First failure wins.** Parsing a payload checks fields in a fixed
//!    order (name → email → message → recipient / isAnonymous) and stops at
//!    the first violated rule. Exactly one [`ValidationError`] is reported.
//!
//! 3. **The author email is write-only.** [`Review::view`] produces the
//!    public [`ReviewView`], which has no email field at all.
//!
//! 4. **New reviews are always pending.** [`NewReviewDocument`] can only be
//!    built by [`NewReviewDocument::pending`], which fixes the status.

pub mod contact;
pub mod error;
pub mod fields;
pub mod review;

pub use contact::ContactMessage;
pub use error::ValidationError;
pub use fields::{is_email_shaped, AuthorName, EmailAddress, MessageBody};
pub use review::{
    NewReviewDocument, Review, ReviewStatus, ReviewSubmission, ReviewView, REVIEW_DOC_TYPE,
};
