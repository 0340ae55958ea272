use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Map;

use sift_providers::Error;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		sift_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-org".to_string(), serde_json::json!(42));

	let err = sift_providers::auth_headers("secret", &defaults).expect_err("Expected error.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[test]
fn includes_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-org".to_string(), serde_json::json!("acme"));

	let headers = sift_providers::auth_headers("secret", &defaults).expect("Failed to build.");

	assert_eq!(headers.get("x-org").expect("Missing default header."), "acme");
}

#[test]
fn builds_browser_headers() {
	let headers =
		sift_providers::fetch::browser_headers("sift-test").expect("Failed to build headers.");

	assert_eq!(headers.get(USER_AGENT).expect("Missing user agent."), "sift-test");
	assert!(headers.get(ACCEPT).is_some());
}

#[test]
fn throttling_and_server_errors_are_retryable() {
	assert!(Error::Status { status: 429, body: String::new() }.is_retryable());
	assert!(Error::Status { status: 502, body: String::new() }.is_retryable());
	assert!(!Error::Status { status: 400, body: String::new() }.is_retryable());
	assert!(!Error::InvalidResponse { message: "bad".to_string() }.is_retryable());
}
