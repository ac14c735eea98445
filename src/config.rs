//! Immutable gateway configuration.
//!
//! The configuration is constructed once (explicitly, or from the environment by the binary)
//! and injected into every component; nothing mutates it afterwards. No ambient singletons.

// std
use std::{env, time::Duration as StdDuration};
// crates.io
use axum_extra::extract::cookie::Key;
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, error::ConfigError};

/// Default upper bound applied to every outbound provider call.
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

const ENV_CLIENT_ID: &str = "ASSET_GATEWAY_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "ASSET_GATEWAY_CLIENT_SECRET";
const ENV_REDIRECT_URI: &str = "ASSET_GATEWAY_REDIRECT_URI";
const ENV_AUTHORIZE_URL: &str = "ASSET_GATEWAY_AUTHORIZE_URL";
const ENV_TOKEN_URL: &str = "ASSET_GATEWAY_TOKEN_URL";
const ENV_API_BASE: &str = "ASSET_GATEWAY_API_BASE";
const ENV_ASSET_ORIGIN: &str = "ASSET_GATEWAY_ASSET_ORIGIN";
const ENV_COOKIE_KEY: &str = "ASSET_GATEWAY_COOKIE_KEY";
const ENV_POST_LOGIN_REDIRECT: &str = "ASSET_GATEWAY_POST_LOGIN_REDIRECT";
const ENV_SECURE_COOKIES: &str = "ASSET_GATEWAY_SECURE_COOKIES";

const DEFAULT_AUTHORIZE_URL: &str = "https://app.meshy.ai/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://api.meshy.ai/oauth/token";
const DEFAULT_API_BASE: &str = "https://api.meshy.ai/openapi/v1/";
const DEFAULT_ASSET_ORIGIN: &str = "https://assets.meshy.ai";

/// Provider endpoint set used by the handshake, broker, proxy, and catalog layers.
#[derive(Clone, Debug)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the browser is redirected to at handshake start.
	pub authorize: Url,
	/// Token endpoint used for the authorization-code exchange.
	pub token: Url,
	/// Base URL for the provider's model API (`models/{id}/download`, search).
	pub api_base: Url,
	/// Sole allow-listed origin the binary proxy will fetch from.
	pub asset_origin: Url,
}

/// Immutable configuration value injected into the gateway at construction.
#[derive(Clone)]
pub struct GatewayConfig {
	/// Provider endpoint set.
	pub endpoints: ProviderEndpoints,
	/// Registered OAuth 2.0 client identifier.
	pub client_id: String,
	/// Optional client secret sent during the code exchange.
	pub client_secret: Option<String>,
	/// Registered redirect URI echoed in the authorize URL and the exchange.
	pub redirect_uri: Url,
	/// Application path the browser is sent to after a successful handshake.
	pub post_login_redirect: String,
	/// Whether session cookies carry the `Secure` flag (enable in production delivery).
	pub secure_cookies: bool,
	/// Upper bound on every outbound provider call.
	pub request_timeout: StdDuration,
	/// Signing key for the session and state cookies.
	pub cookie_key: Key,
}
impl GatewayConfig {
	/// Creates a configuration from explicit parts.
	///
	/// Fails when the API base URL cannot carry path segments (e.g. `data:` URLs), since the
	/// broker and catalog layers append endpoint paths to it.
	pub fn new(
		endpoints: ProviderEndpoints,
		client_id: impl Into<String>,
		redirect_uri: Url,
		cookie_key: Key,
	) -> Result<Self, ConfigError> {
		if endpoints.api_base.cannot_be_a_base() {
			return Err(ConfigError::OpaqueBaseUrl);
		}

		Ok(Self {
			endpoints,
			client_id: client_id.into(),
			client_secret: None,
			redirect_uri,
			post_login_redirect: "/".into(),
			secure_cookies: true,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			cookie_key,
		})
	}

	/// Loads the configuration from `ASSET_GATEWAY_*` environment variables.
	///
	/// Provider endpoints default to the Meshy production endpoints when unset. A missing
	/// cookie key yields a process-local random key, which invalidates sessions on restart.
	pub fn from_env() -> Result<Self, ConfigError> {
		let client_id = require_env(ENV_CLIENT_ID)?;
		let redirect_uri = url_env(ENV_REDIRECT_URI, None)?;
		let endpoints = ProviderEndpoints {
			authorize: url_env(ENV_AUTHORIZE_URL, Some(DEFAULT_AUTHORIZE_URL))?,
			token: url_env(ENV_TOKEN_URL, Some(DEFAULT_TOKEN_URL))?,
			api_base: url_env(ENV_API_BASE, Some(DEFAULT_API_BASE))?,
			asset_origin: url_env(ENV_ASSET_ORIGIN, Some(DEFAULT_ASSET_ORIGIN))?,
		};
		let cookie_key = match env::var(ENV_COOKIE_KEY) {
			Ok(encoded) => decode_cookie_key(&encoded)?,
			Err(_) => {
				tracing::warn!(
					"{ENV_COOKIE_KEY} is unset; using a process-local key, sessions will not \
					 survive a restart"
				);

				Key::generate()
			},
		};
		let mut config = Self::new(endpoints, client_id, redirect_uri, cookie_key)?;

		if let Ok(secret) = env::var(ENV_CLIENT_SECRET) {
			config = config.with_client_secret(secret);
		}
		if let Ok(path) = env::var(ENV_POST_LOGIN_REDIRECT) {
			config = config.with_post_login_redirect(path);
		}
		if let Ok(flag) = env::var(ENV_SECURE_COOKIES) {
			config = config.with_secure_cookies(!matches!(flag.as_str(), "0" | "false" | "no"));
		}

		Ok(config)
	}

	/// Sets or replaces the client secret used during the code exchange.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Overrides the post-login redirect path (defaults to `/`).
	pub fn with_post_login_redirect(mut self, path: impl Into<String>) -> Self {
		self.post_login_redirect = path.into();

		self
	}

	/// Overrides the `Secure` cookie flag (defaults to enabled).
	pub fn with_secure_cookies(mut self, secure: bool) -> Self {
		self.secure_cookies = secure;

		self
	}

	/// Overrides the outbound request timeout (defaults to 30 seconds).
	pub fn with_request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = timeout;

		self
	}
}
impl Debug for GatewayConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GatewayConfig")
			.field("endpoints", &self.endpoints)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("post_login_redirect", &self.post_login_redirect)
			.field("secure_cookies", &self.secure_cookies)
			.field("request_timeout", &self.request_timeout)
			.finish()
	}
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
	env::var(name).map_err(|_| ConfigError::MissingEnv { name })
}

fn url_env(name: &'static str, default: Option<&str>) -> Result<Url, ConfigError> {
	let raw = match (env::var(name), default) {
		(Ok(value), _) => value,
		(Err(_), Some(fallback)) => fallback.into(),
		(Err(_), None) => return Err(ConfigError::MissingEnv { name }),
	};

	Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}

fn decode_cookie_key(encoded: &str) -> Result<Key, ConfigError> {
	let bytes = STANDARD.decode(encoded).map_err(|_| ConfigError::InvalidCookieKey)?;

	Key::try_from(bytes.as_slice()).map_err(|_| ConfigError::InvalidCookieKey)
}
