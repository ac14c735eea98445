//! Asset download broker: authenticated download-URL issuance with normalized errors.
//!
//! The broker relays the provider's download descriptor verbatim on success and maps every
//! provider failure onto the gateway error taxonomy: 401 → invalid credential, 403 →
//! forbidden, 404 → not found, anything else → generic upstream failure with the status
//! forwarded. No retries and no silent refresh happen here; transient failures belong to the
//! caller's retry policy.

// self
use crate::{_prelude::*, error::TransportError, gateway::Gateway, session::Session};

/// Provider body fields consulted for a human-readable message, in priority order.
const MESSAGE_FIELDS: [&str; 3] = ["detail", "error", "message"];

impl Gateway {
	/// Requests provider-issued, time-limited download URLs for a model.
	///
	/// Fails fast, before any outbound call, when the session lacks bearer auth or the model
	/// identifier is empty. The identifier is otherwise opaque; the provider is the source of
	/// truth for existence.
	pub async fn request_download(&self, session: &Session, model_id: &str) -> Result<Value> {
		let Some(bearer) = session.bearer() else {
			return Err(Error::AuthenticationRequired);
		};

		if model_id.trim().is_empty() {
			return Err(Error::BadRequest { reason: "Model id must not be empty".into() });
		}

		let mut url = self.config.endpoints.api_base.clone();

		url.path_segments_mut()
			.map_err(|()| crate::error::ConfigError::OpaqueBaseUrl)?
			.pop_if_empty()
			.extend(["models", model_id, "download"]);

		let response = self
			.http
			.get(url)
			.bearer_auth(bearer)
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.text().await.map_err(TransportError::from)?;

		if status.is_success() {
			let mut deserializer = serde_json::Deserializer::from_str(&body);

			return serde_path_to_error::deserialize(&mut deserializer)
				.map_err(|source| Error::UpstreamParse { source });
		}

		tracing::warn!(status = status.as_u16(), model_id, "download request rejected upstream");

		Err(match status.as_u16() {
			401 => Error::InvalidCredential {
				message: extract_provider_message(&body)
					.unwrap_or_else(|| "Invalid or expired access token".into()),
			},
			403 => Error::Forbidden {
				message: extract_provider_message(&body)
					.unwrap_or_else(|| "Model is not downloadable".into()),
			},
			404 => Error::NotFound { message: "Model not found".into() },
			other => Error::Upstream {
				status: other,
				message: extract_provider_message(&body)
					.unwrap_or_else(|| format!("Provider request failed with status {other}")),
			},
		})
	}
}

/// Pulls a human-readable message out of a provider error body.
///
/// Inspects `detail`, `error`, then `message`; returns `None` when the body is not JSON or
/// carries none of them.
pub(crate) fn extract_provider_message(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;

	MESSAGE_FIELDS
		.iter()
		.find_map(|field| value.get(field).and_then(Value::as_str).map(str::to_owned))
}
