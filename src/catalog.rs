//! Unauthenticated catalog search relay.
//!
//! Read-only and involving no secret material; carried server-side so all provider traffic
//! shares one origin from the browser's point of view.

// self
use crate::{_prelude::*, broker, error::TransportError, gateway::Gateway};

impl Gateway {
	/// Queries the provider's public model search endpoint and relays the JSON verbatim.
	pub async fn search_models(&self, query: &str, page_size: Option<u32>) -> Result<Value> {
		let mut url = self.config.endpoints.api_base.clone();

		url.path_segments_mut()
			.map_err(|()| crate::error::ConfigError::OpaqueBaseUrl)?
			.pop_if_empty()
			.push("models");
		url.query_pairs_mut().append_pair("search", query);

		if let Some(size) = page_size {
			url.query_pairs_mut().append_pair("page_size", &size.to_string());
		}

		let response = self.http.get(url).send().await.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.text().await.map_err(TransportError::from)?;

		if !status.is_success() {
			return Err(Error::Upstream {
				status: status.as_u16(),
				message: broker::extract_provider_message(&body)
					.unwrap_or_else(|| format!("Search failed with status {}", status.as_u16())),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_str(&body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::UpstreamParse { source })
	}
}
