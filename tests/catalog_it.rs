mod common;

// crates.io
use axum::http::StatusCode;
use httpmock::prelude::*;
// self
use common::*;

#[tokio::test]
async fn search_relays_provider_results_verbatim() {
	let gateway = test_gateway().await;
	let mock = gateway
		.server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/models").query_param("search", "castle");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"results":[{"id":"abc123","name":"Castle"}],"total":1}"#);
		})
		.await;
	let response = send(&gateway.router, get("/search?q=castle")).await;

	mock.assert_async().await;

	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;

	assert_eq!(body["total"], 1);
	assert_eq!(body["results"][0]["id"], "abc123");
}

#[tokio::test]
async fn search_forwards_the_page_size() {
	let gateway = test_gateway().await;
	let mock = gateway
		.server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/models")
				.query_param("search", "tree")
				.query_param("page_size", "5");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"results":[],"total":0}"#);
		})
		.await;
	let response = send(&gateway.router, get("/search?q=tree&page_size=5")).await;

	mock.assert_async().await;

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_failure_is_wrapped_in_the_error_envelope() {
	let gateway = test_gateway().await;
	let _mock = gateway
		.server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/models");
			then.status(500)
				.header("content-type", "application/json")
				.body(r#"{"message":"search backend down"}"#);
		})
		.await;
	let response = send(&gateway.router, get("/search?q=anything")).await;

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = body_json(response).await;

	assert_eq!(body["error"], "search backend down");
}

#[tokio::test]
async fn session_endpoint_reports_authentication_state() {
	let gateway = test_gateway().await;
	let anonymous = send(&gateway.router, get("/session")).await;

	assert_eq!(body_json(anonymous).await["authenticated"], false);

	let session = session_cookie_header(&gateway.key, "access", "refresh");
	let authenticated = send(&gateway.router, get_with_cookies("/session", &session)).await;

	assert_eq!(body_json(authenticated).await["authenticated"], true);

	let half = signed_cookie_header(&gateway.key, &[("refresh_token", "orphan")]);
	let unauthenticated = send(&gateway.router, get_with_cookies("/session", &half)).await;

	assert_eq!(body_json(unauthenticated).await["authenticated"], false);
}
