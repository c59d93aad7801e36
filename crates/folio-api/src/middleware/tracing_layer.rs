//! # Request/Response Tracing
//!
//! Configures `tower_http::trace::TraceLayer` so every request span carries
//! the `x-request-id` assigned by the outer request-id layer.

use axum::body::Body;
use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span constructor used by [`layer`].
pub type MakeSpanFn = fn(&Request<Body>) -> Span;

/// Build the `TraceLayer` for the API.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpanFn> {
    TraceLayer::new_for_http().make_span_with(make_span as MakeSpanFn)
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_reads_request_id() {
        let request = Request::builder()
            .uri("/api/reviews")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        // Without a subscriber the span is disabled; building it must not panic.
        let _span = make_span(&request);
        let _layer = layer();
    }
}
