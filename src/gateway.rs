//! Gateway core: the immutable configuration plus the shared outbound HTTP client.
//!
//! Individual operations live with their modules ([`handshake`](crate::handshake),
//! [`broker`](crate::broker), [`proxy`](crate::proxy), [`catalog`](crate::catalog)); this
//! module only owns construction so every provider call shares one client and one timeout.

// self
use crate::{_prelude::*, config::GatewayConfig, error::ConfigError};

/// Brokers every downstream provider call on behalf of the browser.
///
/// Stateless across requests: all session state lives in the request/response cookie headers,
/// and all model state lives with the provider. Cloning is cheap and shares the underlying
/// connection pool.
#[derive(Clone)]
pub struct Gateway {
	/// Injected immutable configuration.
	pub config: Arc<GatewayConfig>,
	pub(crate) http: ReqwestClient,
}
impl Gateway {
	/// Builds a gateway around the provided configuration.
	///
	/// The HTTP client is constructed once with the configured outbound timeout so no provider
	/// call can pin resources indefinitely.
	pub fn new(config: Arc<GatewayConfig>) -> Result<Self, ConfigError> {
		let http = ReqwestClient::builder()
			.timeout(config.request_timeout)
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self { config, http })
	}
}
impl Debug for Gateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway").field("config", &self.config).finish()
	}
}
