//! # Email Templates
//!
//! HTML bodies for the two emails this workspace sends. Every
//! visitor-supplied value is HTML-escaped before interpolation.

use folio_core::{ContactMessage, ReviewSubmission};

use crate::OutboundEmail;

/// Accent colour shared by both templates.
const ACCENT: &str = "#8b5cf6";

/// Subject line of the admin review alert.
pub const REVIEW_ALERT_SUBJECT: &str = "New review pending approval";

/// Default moderation console link when none is configured.
pub const DEFAULT_STUDIO_URL: &str = "https://sanity.io";

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape and turn newlines into `<br />`.
fn multiline(input: &str) -> String {
    escape_html(input).replace("\r\n", "\n").replace('\n', "<br />")
}

/// The contact email delivered to the address chosen by the visitor.
///
/// `Reply-To` is the visitor so the owner can answer directly.
pub fn contact_email(message: &ContactMessage) -> OutboundEmail {
    let name = escape_html(message.author_name.as_str());
    let email = escape_html(message.email.as_str());
    let body = multiline(message.message.as_str());

    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h2 style="color: {ACCENT};">New contact message</h2>
  <p><strong>From:</strong> {name}</p>
  <p><strong>Email:</strong> {email}</p>
  <hr style="border: none; border-top: 1px solid #ddd; margin: 20px 0;" />
  <p><strong>Message:</strong></p>
  <p style="background-color: #f5f5f5; padding: 15px; border-radius: 5px;">
    {body}
  </p>
  <hr style="border: none; border-top: 1px solid #ddd; margin: 20px 0;" />
  <p style="font-size: 12px; color: #999;">Reply to {email}</p>
</div>"#
    );

    OutboundEmail {
        to: message.recipient_email.as_str().to_string(),
        subject: format!("New message from {}", message.author_name),
        html_body,
        reply_to: Some(message.email.as_str().to_string()),
    }
}

/// The alert sent to the site admin when a review awaits moderation.
pub fn review_alert(review: &ReviewSubmission, admin: &str, studio_url: &str) -> OutboundEmail {
    let author = escape_html(review.display_name());
    let email = escape_html(review.author_email.as_str());
    let body = multiline(review.message.as_str());
    let studio = escape_html(studio_url);

    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif;">
  <h2>New review on your portfolio</h2>
  <p><strong>Author:</strong> {author}</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Message:</strong></p>
  <blockquote style="border-left: 4px solid {ACCENT}; padding-left: 15px;">
    {body}
  </blockquote>
  <p><a href="{studio}" style="color: {ACCENT};">Open the moderation console</a></p>
</div>"#
    );

    OutboundEmail {
        to: admin.to_string(),
        subject: REVIEW_ALERT_SUBJECT.to_string(),
        html_body,
        reply_to: None,
    }
}
