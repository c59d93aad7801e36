//! Contract tests for `CmsClient` against a simulated Sanity HTTP API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/v2024-01-01/data/query/test` | `list_approved_*` |
//! | POST   | `/v2024-01-01/data/mutate/test` | `create_pending_*` |

use folio_cms_client::{CmsClient, CmsConfig, CmsError, ReviewGateway, APPROVED_REVIEWS_QUERY};
use folio_core::{ReviewStatus, ReviewSubmission};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v2024-01-01/data/query/test";
const MUTATE_PATH: &str = "/v2024-01-01/data/mutate/test";

/// Build a CmsClient pointed at a wiremock server.
fn test_client(mock_server: &MockServer) -> CmsClient {
    let config = CmsConfig::local_mock(&mock_server.uri(), Some("test-token")).unwrap();
    CmsClient::new(config).unwrap()
}

fn submission(anonymous: bool) -> ReviewSubmission {
    ReviewSubmission::from_json(&json!({
        "authorName": "Ana",
        "email": "ana@x.com",
        "message": "Great portfolio site!",
        "isAnonymous": anonymous
    }))
    .unwrap()
}

// ── GET /data/query ──────────────────────────────────────────────────

#[tokio::test]
async fn list_approved_sends_groq_query_and_returns_reviews() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", APPROVED_REVIEWS_QUERY))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ms": 4,
            "query": APPROVED_REVIEWS_QUERY,
            "result": [
                {
                    "_id": "r2",
                    "_type": "review",
                    "authorName": "Ben",
                    "message": "Second review text",
                    "createdAt": "2024-05-02T00:00:00Z",
                    "isAnonymous": true,
                    "status": "approved"
                },
                {
                    "_id": "r1",
                    "_type": "review",
                    "authorName": "Ana",
                    "message": "First review text",
                    "createdAt": "2024-05-01T00:00:00Z",
                    "isAnonymous": false,
                    "status": "approved"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reviews = test_client(&mock_server).list_approved().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].id, "r2");
    assert!(reviews[0].is_anonymous);
    assert_eq!(reviews[1].id, "r1");
    assert!(reviews.iter().all(|r| r.author_email.is_none()));
}

#[tokio::test]
async fn list_approved_drops_non_approved_and_reorders() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"_id": "old", "authorName": "A", "message": "Old approved one",
                 "createdAt": "2024-01-01T00:00:00Z", "status": "approved"},
                {"_id": "p", "authorName": "B", "message": "Pending one here",
                 "createdAt": "2024-06-01T00:00:00Z", "status": "pending"},
                {"_id": "new", "authorName": "C", "message": "New approved one",
                 "createdAt": "2024-03-01T00:00:00Z", "status": "approved"},
                {"_id": "x", "authorName": "D", "message": "Archived somehow",
                 "createdAt": "2024-04-01T00:00:00Z", "status": "archived"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let reviews = test_client(&mock_server).list_approved().await.unwrap();
    let ids: Vec<_> = reviews.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["new", "old"]);
    assert!(reviews.iter().all(|r| r.status == ReviewStatus::Approved));
    assert!(reviews.iter().all(|r| r.doc_type == "review"));
}

#[tokio::test]
async fn list_approved_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .mount(&mock_server)
        .await;

    let reviews = test_client(&mock_server).list_approved().await.unwrap();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn list_approved_surfaces_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"Unauthorized"}"#))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).list_approved().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, CmsError::Api { ref body, .. } if body.contains("Unauthorized")));
}

#[tokio::test]
async fn list_approved_rejects_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).list_approved().await.unwrap_err();
    assert!(matches!(err, CmsError::Deserialization { .. }));
}

#[tokio::test]
async fn list_approved_tolerates_null_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"_id": "full", "_type": "review", "authorName": "Ana",
                 "message": "Complete review text", "createdAt": "2024-05-01T00:00:00Z",
                 "isAnonymous": false, "status": "approved"},
                {"_id": "sparse", "_type": "review", "authorName": "Ben",
                 "message": "Sparse review text", "createdAt": null,
                 "isAnonymous": null, "status": "approved"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let reviews = test_client(&mock_server).list_approved().await.unwrap();
    let ids: Vec<_> = reviews.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["full", "sparse"]);
    assert!(!reviews[1].is_anonymous);
    assert!(reviews[1].created_at.is_none());
}

#[tokio::test]
async fn list_approved_unreachable_store_is_http_error() {
    // Bind then release an ephemeral port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = CmsConfig::local_mock(&format!("http://127.0.0.1:{port}"), None).unwrap();
    let client = CmsClient::new(config).unwrap();

    let err = client.list_approved().await.unwrap_err();
    assert!(matches!(err, CmsError::Http { .. }), "got {err}");
}

// ── POST /data/mutate ────────────────────────────────────────────────

#[tokio::test]
async fn create_pending_sends_pending_document_and_returns_stored_review() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MUTATE_PATH))
        .and(query_param("returnDocuments", "true"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "mutations": [{
                "create": {
                    "_type": "review",
                    "authorName": "Ana",
                    "authorEmail": "ana@x.com",
                    "message": "Great portfolio site!",
                    "isAnonymous": false,
                    "status": "pending"
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transactionId": "tx-1",
            "results": [{
                "id": "abc",
                "operation": "create",
                "document": {
                    "_id": "abc",
                    "_type": "review",
                    "_rev": "r1",
                    "authorName": "Ana",
                    "authorEmail": "ana@x.com",
                    "message": "Great portfolio site!",
                    "isAnonymous": false,
                    "status": "pending",
                    "createdAt": "2024-05-01T10:00:00Z"
                }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stored = test_client(&mock_server)
        .create_pending(&submission(false))
        .await
        .unwrap();
    assert_eq!(stored.id, "abc");
    assert_eq!(stored.status, ReviewStatus::Pending);
    assert_eq!(stored.author_email.as_deref(), Some("ana@x.com"));
}

#[tokio::test]
async fn create_pending_without_returned_document_rebuilds_from_submission() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MUTATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transactionId": "tx-2",
            "results": [{"id": "def", "operation": "create"}]
        })))
        .mount(&mock_server)
        .await;

    let stored = test_client(&mock_server)
        .create_pending(&submission(true))
        .await
        .unwrap();
    assert_eq!(stored.id, "def");
    assert_eq!(stored.status, ReviewStatus::Pending);
    assert!(stored.is_anonymous);
    assert!(stored.created_at.is_some());
}

#[tokio::test]
async fn create_pending_empty_results_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MUTATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transactionId": "tx-3",
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .create_pending(&submission(false))
        .await
        .unwrap_err();
    assert!(matches!(err, CmsError::EmptyMutationResult { .. }));
}

#[tokio::test]
async fn create_pending_surfaces_permission_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MUTATE_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"error":{"description":"Insufficient permissions"}}"#),
        )
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .create_pending(&submission(false))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
}
