//! Integration tests for outgoing requests.
//!
//! These tests verify, against a live mock server, what actually goes on
//! the wire: methods, normalized URLs, ordered query strings, body
//! encoding per verb, and the three-layer header precedence.

use restpoint::{Body, Query, RequestClient, TransportOptions};
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a catch-all 200 JSON response for the given method and path.
async fn mount_ok(server: &MockServer, http_method: &str, route: &str) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

// ============================================================================
// URL Construction
// ============================================================================

#[tokio::test]
async fn test_get_resolves_path_against_root() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/things").await;

    let client = RequestClient::new(server.uri());
    let resolution = client.get("things", None, None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_redundant_separators_collapse_before_sending() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/a/b").await;

    // Trailing slashes on the root, doubled slashes in the path
    let client = RequestClient::new(format!("{}///", server.uri()));
    let resolution = client.get("//a//b", None, None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_query_parameters_keep_insertion_order() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/things").await;

    let client = RequestClient::new(server.uri());
    let query = Query::new().pair("id", 1).pair("name", "r");
    client.get("things", Some(query), None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("id=1&name=r"));
}

// ============================================================================
// Body Encoding per Verb
// ============================================================================

#[tokio::test]
async fn test_post_passes_string_bodies_through_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/things"))
        .and(body_string("raw payload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let resolution = client.post("things", "raw payload", None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_post_encodes_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/things"))
        .and(body_json(json!({"name": "widget"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let resolution = client
        .post("things", json!({"name": "widget"}), None)
        .await
        .unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_put_json_quotes_string_bodies() {
    let server = MockServer::start().await;
    // A string input to PUT goes on the wire JSON-encoded, quotes and all
    Mock::given(method("PUT"))
        .and(path("/things/7"))
        .and(body_string("\"raw payload\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let resolution = client.put("things/7", "raw payload", None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_put_encodes_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/things/7"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let resolution = client
        .put("things/7", json!({"name": "renamed"}), None)
        .await
        .unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_put_passes_byte_bodies_through() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/blobs/7"))
        .and(body_bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let resolution = client
        .put("blobs/7", vec![0xDE, 0xAD, 0xBE, 0xEF], None)
        .await
        .unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_delete_sends_no_body_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/things/7"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let resolution = client.delete("things/7", None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_delete_accepts_a_body_via_options() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/things"))
        .and(body_json(json!({"ids": [1, 2, 3]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let options = TransportOptions::new().body(Body::Json(json!({"ids": [1, 2, 3]})));
    let resolution = client.delete("things", Some(options)).await.unwrap();

    assert!(resolution.is_success());
}

// ============================================================================
// Header Layering
// ============================================================================

#[tokio::test]
async fn test_content_type_and_authorization_are_synthesized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/things"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::builder(server.uri())
        .authorization("Bearer token")
        .build();
    let resolution = client.get("things", None, None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_synthesized_headers_override_client_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/things"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    // The default transport layer tries to set Content-Type, but the
    // synthesized layer sits above it
    let client = RequestClient::builder(server.uri())
        .transport(
            TransportOptions::new()
                .header("Content-Type", "text/plain")
                .header("Accept", "application/json"),
        )
        .build();
    let resolution = client.get("things", None, None).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_per_call_headers_override_synthesized_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/things"))
        .and(header("content-type", "application/xml"))
        .and(header("authorization", "Bearer per-call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::builder(server.uri())
        .authorization("Bearer client-level")
        .build();
    let options = TransportOptions::new()
        .header("Content-Type", "application/xml")
        .header("Authorization", "Bearer per-call");
    let resolution = client
        .post("things", "<thing/>", Some(options))
        .await
        .unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_no_authorization_header_when_unconfigured() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/things").await;

    let client = RequestClient::new(server.uri());
    client.get("things", None, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0]
        .headers
        .keys()
        .any(|name| name.as_str().eq_ignore_ascii_case("authorization")));
}

// ============================================================================
// Escape Hatch
// ============================================================================

#[tokio::test]
async fn test_request_covers_methods_without_helpers() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/things/7"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = RequestClient::new(server.uri());
    let url = client.url("things/7").unwrap();
    let options = TransportOptions::new()
        .method(reqwest::Method::PATCH)
        .body(json!({"name": "renamed"}));
    let resolution = client.request(url.as_str(), Some(options)).await.unwrap();

    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_verb_helpers_accept_method_overrides() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    // Per-call options can override even the method the helper chose
    let client = RequestClient::builder(server.uri())
        .resolver(|response| async move { Ok(response.status().as_u16()) })
        .build();
    let options = TransportOptions::new().method(reqwest::Method::HEAD);
    let resolution = client.get("things", None, Some(options)).await.unwrap();

    assert_eq!(resolution.success(), Some(200));
}
