#![allow(dead_code)]

//! Shared fixtures for the gateway integration tests: a mock provider, an in-process router,
//! and signed-cookie helpers.

// std
use std::sync::Arc;
// crates.io
use axum::{
	Router,
	body::{Body, Bytes},
	http::{Request, header},
	response::Response,
};
use cookie::{Cookie, CookieJar, Key};
use http_body_util::BodyExt;
use httpmock::MockServer;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;
// self
use asset_gateway::{
	config::{GatewayConfig, ProviderEndpoints},
	gateway::Gateway,
	routes,
};

pub const CLIENT_ID: &str = "client-it";
pub const CLIENT_SECRET: &str = "secret-it";
pub const REDIRECT_URI: &str = "http://editor.local/callback";

/// Mock provider plus the router wired against it.
pub struct TestGateway {
	pub server: MockServer,
	pub router: Router,
	pub key: Key,
}

/// Deterministic signing key so forged cookies verify across requests.
pub fn test_key() -> Key {
	Key::from(&[7_u8; 64])
}

/// Starts a mock provider and builds a gateway router pointing at it.
///
/// The mock server's own origin doubles as the allow-listed asset origin so proxy tests can
/// serve binaries from it.
pub async fn test_gateway() -> TestGateway {
	let server = MockServer::start_async().await;
	let key = test_key();
	let endpoints = ProviderEndpoints {
		authorize: parse_url(&server.url("/oauth/authorize")),
		token: parse_url(&server.url("/oauth/token")),
		api_base: parse_url(&server.url("/v1/")),
		asset_origin: parse_url(&server.base_url()),
	};
	let config = GatewayConfig::new(endpoints, CLIENT_ID, parse_url(REDIRECT_URI), key.clone())
		.expect("Test configuration should build.")
		.with_client_secret(CLIENT_SECRET)
		.with_secure_cookies(false);
	let gateway =
		Arc::new(Gateway::new(Arc::new(config)).expect("Test gateway should build."));
	let router = routes::router(gateway);

	TestGateway { server, router, key }
}

pub fn parse_url(value: &str) -> Url {
	Url::parse(value).expect("URL fixture should parse successfully.")
}

/// Drives one request through the router without binding a socket.
pub async fn send(router: &Router, request: Request<Body>) -> Response {
	router.clone().oneshot(request).await.expect("Router call should be infallible.")
}

pub fn get(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Request fixture should build.")
}

pub fn get_with_cookies(uri: &str, cookie_header: &str) -> Request<Body> {
	Request::builder()
		.uri(uri)
		.header(header::COOKIE, cookie_header)
		.body(Body::empty())
		.expect("Request fixture should build.")
}

pub fn post_json(uri: &str, body: &str, cookie_header: Option<&str>) -> Request<Body> {
	let mut builder = Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json");

	if let Some(cookies) = cookie_header {
		builder = builder.header(header::COOKIE, cookies);
	}

	builder.body(Body::from(body.to_string())).expect("Request fixture should build.")
}

pub async fn body_bytes(response: Response) -> Bytes {
	response
		.into_body()
		.collect()
		.await
		.expect("Response body should be collectable.")
		.to_bytes()
}

pub async fn body_json(response: Response) -> Value {
	serde_json::from_slice(&body_bytes(response).await)
		.expect("Response body should be valid JSON.")
}

/// Parses every `Set-Cookie` header on a response.
pub fn set_cookies(response: &Response) -> Vec<Cookie<'static>> {
	response
		.headers()
		.get_all(header::SET_COOKIE)
		.iter()
		.map(|value| {
			Cookie::parse(
				value.to_str().expect("Set-Cookie header should be UTF-8.").to_string(),
			)
			.expect("Set-Cookie header should parse.")
		})
		.collect()
}

/// Builds a `Cookie` request header from signed name/value pairs.
pub fn signed_cookie_header(key: &Key, pairs: &[(&str, &str)]) -> String {
	let mut jar = CookieJar::new();

	for (name, value) in pairs {
		jar.signed_mut(key).add(Cookie::new((*name).to_string(), (*value).to_string()));
	}

	jar.iter().map(|cookie| format!("{}={}", cookie.name(), cookie.value())).collect::<Vec<_>>()
		.join("; ")
}

/// Signed cookie header for a fully authenticated session.
pub fn session_cookie_header(key: &Key, access: &str, refresh: &str) -> String {
	signed_cookie_header(key, &[("access_token", access), ("refresh_token", refresh)])
}

/// Re-serializes live (non-removal) `Set-Cookie` values into a `Cookie` request header.
pub fn cookie_header_from(cookies: &[Cookie<'static>]) -> String {
	cookies
		.iter()
		.filter(|cookie| !cookie.value().is_empty())
		.map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
		.collect::<Vec<_>>()
		.join("; ")
}
