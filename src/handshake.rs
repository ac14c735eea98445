//! Authorization-code handshake: authorize-URL issuance and the code-for-tokens exchange.
//!
//! The state nonce is a short, single-use random value binding one authorization attempt to
//! its callback. A callback whose echoed state does not exactly match the stored nonce is a
//! forged or expired request and is rejected without writing any token state. Fail closed,
//! never open.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, broker, error::TransportError, gateway::Gateway, session::TokenSecret};

const STATE_LEN: usize = 32;

/// One authorization attempt: the nonce plus the fully-formed authorize URL.
#[derive(Clone, Debug)]
pub struct AuthorizationAttempt {
	/// Opaque state value that must round-trip via the provider redirect.
	pub state: String,
	/// Provider authorize URL the browser should be redirected to.
	pub authorize_url: Url,
}

/// Token pair returned by a successful code exchange.
#[derive(Clone, Debug)]
pub struct TokenGrant {
	/// Bearer credential for provider API calls.
	pub access_token: TokenSecret,
	/// Longer-lived credential for obtaining a new access token; not all providers issue one.
	pub refresh_token: Option<TokenSecret>,
	/// Provider-declared access-token lifetime, when supplied.
	pub expires_in: Option<Duration>,
}

#[derive(Deserialize)]
struct TokenEndpointResponse {
	access_token: String,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	expires_in: Option<i64>,
}

/// Validates the echoed `state` parameter against the nonce stored at handshake start.
///
/// `stored` is `None` when the state cookie is missing or expired; both cases reject.
pub fn validate_state(stored: Option<&str>, returned: &str) -> Result<()> {
	match stored {
		Some(expected) if expected == returned => Ok(()),
		_ => Err(Error::StateMismatch),
	}
}

impl Gateway {
	/// Starts an authorization attempt: a fresh nonce and the authorize URL carrying it.
	///
	/// The nonce comes from a non-cryptographic random source; single-use and ten-minute
	/// scoped, collision probability is negligible for session CSRF protection.
	pub fn start_authorization(&self) -> AuthorizationAttempt {
		let state = random_state();
		let mut authorize_url = self.config.endpoints.authorize.clone();

		{
			let mut pairs = authorize_url.query_pairs_mut();

			pairs.append_pair("response_type", "code");
			pairs.append_pair("client_id", &self.config.client_id);
			pairs.append_pair("redirect_uri", self.config.redirect_uri.as_str());
			pairs.append_pair("state", &state);
		}

		AuthorizationAttempt { state, authorize_url }
	}

	/// Exchanges an authorization code for the access/refresh token pair.
	///
	/// Any failure (provider unreachable, non-2xx status, malformed JSON) surfaces before any
	/// token state exists, so a partial write is impossible.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
		let mut form = vec![
			("grant_type", "authorization_code"),
			("code", code),
			("redirect_uri", self.config.redirect_uri.as_str()),
			("client_id", self.config.client_id.as_str()),
		];

		if let Some(secret) = self.config.client_secret.as_deref() {
			form.push(("client_secret", secret));
		}

		let response = self
			.http
			.post(self.config.endpoints.token.clone())
			.form(&form)
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.text().await.map_err(TransportError::from)?;

		if !status.is_success() {
			tracing::warn!(status = status.as_u16(), "token exchange rejected by provider");

			return Err(Error::HandshakeFailed {
				message: broker::extract_provider_message(&body)
					.unwrap_or_else(|| "Token exchange failed".into()),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_str(&body);
		let parsed: TokenEndpointResponse = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::UpstreamParse { source })?;

		Ok(TokenGrant {
			access_token: TokenSecret::new(parsed.access_token),
			refresh_token: parsed.refresh_token.map(TokenSecret::new),
			expires_in: parsed.expires_in.filter(|secs| *secs > 0).map(Duration::seconds),
		})
	}
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
