//! # folio-cli: Command-Line Client for the Portfolio API
//!
//! Provides the `folio` command:
//!
//! - `folio reviews`: print the approved review board.
//! - `folio contact`: send a contact message.
//! - `folio review`: submit a review for moderation.
//! - `folio watch`: reprint the review board whenever it changes.
//!
//! The API base URL comes from `--api-url` or `FOLIO_API_URL`
//! (default `http://localhost:8080`).

pub mod client;
pub mod commands;
pub mod watch;

pub use client::{ApiClient, ContactForm, ReviewForm};
pub use watch::{ReviewWatcher, WatchHandle};

use folio_core::ReviewView;

/// Render the board as plain text, one review per block.
pub fn format_reviews(reviews: &[ReviewView]) -> String {
    if reviews.is_empty() {
        return "No reviews yet.\n".to_string();
    }

    let mut out = String::new();
    for review in reviews {
        let author = if review.is_anonymous {
            "Anonymous"
        } else {
            review.author_name.as_str()
        };
        let date = review
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string());
        out.push_str(&format!("{author} ({date})\n"));
        for line in review.message.lines() {
            out.push_str(&format!("  {line}\n"));
        }
        out.push('\n');
    }
    out
}
