//! Binary proxy: allow-list-gated relay for provider-signed asset URLs.
//!
//! The origin check is the proxy's only access-control decision; skipping it would turn the
//! proxy into an open relay. The URL itself already encodes a
//! provider-issued signature and expiry, so the fetch is unauthenticated. The full body is
//! buffered before any byte reaches the caller; a partial, streamed-then-aborted response is
//! never emitted.

// crates.io
use axum::body::Bytes;
// self
use crate::{_prelude::*, error::TransportError, gateway::Gateway};

/// Rejects any URL whose origin is not the single allow-listed asset origin.
///
/// Scheme, host, and port must all match exactly.
pub fn ensure_allowed_origin(url: &Url, allowed: &Url) -> Result<()> {
	if url.origin() == allowed.origin() {
		Ok(())
	} else {
		tracing::warn!(url = %url, "proxy request for a non-allow-listed origin");

		Err(Error::BadRequest { reason: "URL origin is not allowed".into() })
	}
}

impl Gateway {
	/// Fetches an allow-listed, provider-signed asset URL and returns the full binary body.
	pub async fn fetch_asset(&self, raw_url: &str) -> Result<Bytes> {
		let url = Url::parse(raw_url)
			.map_err(|_| Error::BadRequest { reason: "Invalid asset URL".into() })?;

		ensure_allowed_origin(&url, &self.config.endpoints.asset_origin)?;

		let response = self.http.get(url).send().await.map_err(TransportError::from)?;
		let status = response.status();

		if !status.is_success() {
			return Err(Error::AssetFetch { status: status.as_u16() });
		}

		let bytes = response.bytes().await.map_err(TransportError::from)?;

		Ok(bytes)
	}
}
