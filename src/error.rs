//! Gateway-level error types shared across the handshake, broker, and proxy layers.
//!
//! Every provider-side failure is converted into one of these variants before it leaves the
//! core, so no unnormalized provider payload ever reaches the browser on an error path. The
//! `Display` output of each variant is the exact message surfaced inside the `{"error": ...}`
//! envelope.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error("Gateway is misconfigured")]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) while contacting the provider.
	#[error("Failed to contact the provider")]
	Transport(#[from] TransportError),

	/// Caller input rejected before any network call.
	#[error("{reason}")]
	BadRequest {
		/// Human-readable rejection reason.
		reason: String,
	},
	/// No authenticated session accompanied a request that requires bearer auth.
	#[error("Authentication required")]
	AuthenticationRequired,
	/// Callback state did not match the nonce bound to the authorization attempt.
	#[error("Invalid state parameter")]
	StateMismatch,
	/// Provider rejected the presented access token.
	#[error("{message}")]
	InvalidCredential {
		/// Provider- or gateway-supplied reason string.
		message: String,
	},
	/// Model exists but license or ownership forbids download.
	#[error("{message}")]
	Forbidden {
		/// Provider- or gateway-supplied reason string.
		message: String,
	},
	/// Model identifier unknown to the provider.
	#[error("{message}")]
	NotFound {
		/// Provider- or gateway-supplied reason string.
		message: String,
	},
	/// Authorization-code exchange failed; no partial token state was written.
	#[error("{message}")]
	HandshakeFailed {
		/// Best-available message extracted from the token endpoint response.
		message: String,
	},
	/// Provider returned a non-2xx status not covered by a dedicated variant.
	#[error("{message}")]
	Upstream {
		/// Upstream HTTP status, forwarded to the caller.
		status: u16,
		/// Best-available message extracted from the response body.
		message: String,
	},
	/// Allow-listed asset URL resolved but the CDN refused to serve it.
	#[error("Asset fetch failed with upstream status {status}")]
	AssetFetch {
		/// Upstream HTTP status reported by the asset CDN.
		status: u16,
	},
	/// Provider responded with JSON the gateway could not parse.
	#[error("Provider returned a malformed response")]
	UpstreamParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}

/// Configuration and validation failures raised at gateway construction.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Required environment variable is unset.
	#[error("Environment variable `{name}` is required.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable holds an unparseable URL.
	#[error("Environment variable `{name}` is not a valid URL.")]
	InvalidUrl {
		/// Variable name.
		name: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Cookie signing key is not valid base64 or is shorter than 64 bytes.
	#[error("Cookie signing key must be at least 64 bytes of base64.")]
	InvalidCookieKey,
	/// Provider API base URL cannot carry path segments.
	#[error("Provider API base URL cannot be a base for endpoint paths.")]
	OpaqueBaseUrl,
}
impl ConfigError {
	/// Wraps a transport builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}
