//! HTTP surface of the gateway.
//!
//! Paths follow the browser contract: `/login`, `/callback`, `/logout`, `/session`,
//! `/download`, `/proxy-model`, and `/search`. Each inbound request is handled independently
//! and statelessly; the only shared values are the immutable configuration and the outbound
//! HTTP client inside [`Gateway`].

// crates.io
use axum::{
	Json, Router,
	extract::{FromRef, Query, State, rejection::JsonRejection},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use axum_extra::extract::{SignedCookieJar, cookie::Key};
use serde_json::json;
// self
use crate::{_prelude::*, gateway::Gateway, handshake, session::cookies};

/// Media type served for every proxied model binary.
pub const MODEL_CONTENT_TYPE: &str = "model/gltf-binary";
/// Caching directive for proxied assets; safe because each signed URL is unique and
/// time-limited, so a URL is never reused for different content.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Shared handler state: the gateway plus the cookie signing key.
#[derive(Clone)]
pub struct AppState {
	/// Gateway brokering all provider calls.
	pub gateway: Arc<Gateway>,
	key: Key,
}
impl FromRef<AppState> for Key {
	fn from_ref(state: &AppState) -> Self {
		state.key.clone()
	}
}

/// Builds the gateway router.
pub fn router(gateway: Arc<Gateway>) -> Router {
	let state = AppState { key: gateway.config.cookie_key.clone(), gateway };

	Router::new()
		.route("/login", get(login))
		.route("/callback", get(callback))
		.route("/logout", post(logout))
		.route("/session", get(session_info))
		.route("/download", post(download))
		.route("/proxy-model", get(proxy_model).options(proxy_model_preflight))
		.route("/search", get(search))
		.with_state(state)
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = error_status(&self);

		if status.is_server_error() {
			tracing::error!(error = ?self, "request failed");
		}

		(status, Json(json!({ "error": self.to_string() }))).into_response()
	}
}

fn error_status(err: &Error) -> StatusCode {
	match err {
		Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
		Error::AuthenticationRequired | Error::StateMismatch | Error::InvalidCredential { .. } =>
			StatusCode::UNAUTHORIZED,
		Error::Forbidden { .. } => StatusCode::FORBIDDEN,
		Error::NotFound { .. } => StatusCode::NOT_FOUND,
		Error::Upstream { status, .. } =>
			StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
		Error::Config(_)
		| Error::Transport(_)
		| Error::HandshakeFailed { .. }
		| Error::AssetFetch { .. }
		| Error::UpstreamParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
	}
}

/// 302 redirect; the handshake contract specifies `Found` rather than axum's 303 default.
fn found(location: &str) -> Response {
	(StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

async fn login(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
	let attempt = state.gateway.start_authorization();

	tracing::info!("starting authorization handshake");

	let jar = jar.add(cookies::state_cookie(&attempt.state, state.gateway.config.secure_cookies));

	(jar, found(attempt.authorize_url.as_str())).into_response()
}

#[derive(Deserialize)]
struct CallbackParams {
	code: Option<String>,
	state: Option<String>,
}

async fn callback(
	State(state): State<AppState>,
	jar: SignedCookieJar,
	Query(params): Query<CallbackParams>,
) -> Response {
	let (Some(code), Some(returned_state)) = (params.code, params.state) else {
		return Error::BadRequest { reason: "Missing code or state parameter".into() }
			.into_response();
	};
	// The nonce is single-use: consumed here whether or not the exchange succeeds.
	let (jar, stored_state) = cookies::take_state(jar);

	if let Err(err) = handshake::validate_state(stored_state.as_deref(), &returned_state) {
		tracing::warn!("callback rejected: state nonce mismatch");

		return (jar, err.into_response()).into_response();
	}

	match state.gateway.exchange_code(&code).await {
		Ok(grant) => {
			let config = &state.gateway.config;
			let mut jar = jar.add(cookies::access_token_cookie(
				&grant.access_token,
				grant.expires_in,
				config.secure_cookies,
			));

			match &grant.refresh_token {
				Some(refresh) => {
					jar = jar.add(cookies::refresh_token_cookie(
						refresh,
						None,
						config.secure_cookies,
					));
				},
				None => tracing::warn!("provider issued no refresh token"),
			}

			tracing::info!("authorization handshake completed");

			(jar, found(&config.post_login_redirect)).into_response()
		},
		// State cookie removal still applies; no token cookie is written on failure.
		Err(err) => (jar, err.into_response()).into_response(),
	}
}

async fn logout(jar: SignedCookieJar) -> Response {
	let jar = cookies::clear_session(jar);

	(jar, Json(json!({ "message": "Logged out" }))).into_response()
}

async fn session_info(jar: SignedCookieJar) -> Json<Value> {
	let session = cookies::session_from_jar(&jar);

	Json(json!({ "authenticated": session.is_authenticated() }))
}

#[derive(Deserialize)]
struct DownloadRequest {
	#[serde(rename = "modelId", default)]
	model_id: String,
}

async fn download(
	State(state): State<AppState>,
	jar: SignedCookieJar,
	payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Response {
	let Ok(Json(request)) = payload else {
		return broker_failure(&Error::BadRequest { reason: "Invalid request body".into() });
	};
	let session = cookies::session_from_jar(&jar);

	match state.gateway.request_download(&session, &request.model_id).await {
		Ok(descriptor) =>
			(StatusCode::OK, Json(json!({ "success": true, "result": descriptor })))
				.into_response(),
		Err(err) => broker_failure(&err),
	}
}

/// Broker endpoints wrap failures in the `{success, error}` envelope instead of the bare
/// `{error}` shape used elsewhere.
fn broker_failure(err: &Error) -> Response {
	let status = error_status(err);

	if status.is_server_error() {
		tracing::error!(error = ?err, "download request failed");
	}

	(status, Json(json!({ "success": false, "error": err.to_string() }))).into_response()
}

#[derive(Deserialize)]
struct ProxyParams {
	url: Option<String>,
}

async fn proxy_model(
	State(state): State<AppState>,
	Query(params): Query<ProxyParams>,
) -> Response {
	let Some(raw_url) = params.url else {
		return Error::BadRequest { reason: "Missing url parameter".into() }.into_response();
	};

	match state.gateway.fetch_asset(&raw_url).await {
		Ok(bytes) => (
			[
				(header::CONTENT_TYPE, MODEL_CONTENT_TYPE),
				(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
				(header::CACHE_CONTROL, ASSET_CACHE_CONTROL),
			],
			bytes,
		)
			.into_response(),
		Err(err) => err.into_response(),
	}
}

/// Answered directly with permissive CORS headers; never touches the allow-list or the
/// network.
async fn proxy_model_preflight() -> Response {
	(
		StatusCode::OK,
		[
			(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
			(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
			(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
		],
	)
		.into_response()
}

#[derive(Deserialize)]
struct SearchParams {
	q: Option<String>,
	page_size: Option<u32>,
}

async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<Value>, Error> {
	let results = state
		.gateway
		.search_models(params.q.as_deref().unwrap_or_default(), params.page_size)
		.await?;

	Ok(Json(results))
}
