//! Explicit session value threaded through every authenticated operation.
//!
//! The session is the pair (access token, refresh token). It lives exclusively in the
//! request/response cookie headers; the HTTP encoding is isolated to [`cookies`].

pub mod cookies;

// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping bearer material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl std::ops::Deref for TokenSecret {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl std::fmt::Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Browser session decoded from the incoming cookie set.
///
/// A session is authenticated for broker operations only when both tokens are present; one
/// token on its own is treated the same as none.
#[derive(Clone, Debug, Default)]
pub struct Session {
	/// Access token, when the `access_token` cookie is present and validly signed.
	pub access_token: Option<TokenSecret>,
	/// Refresh token, when the `refresh_token` cookie is present and validly signed.
	pub refresh_token: Option<TokenSecret>,
}
impl Session {
	/// Builds a session from optional token halves.
	pub fn new(access_token: Option<TokenSecret>, refresh_token: Option<TokenSecret>) -> Self {
		Self { access_token, refresh_token }
	}

	/// Whether both session secrets are present.
	pub fn is_authenticated(&self) -> bool {
		self.access_token.is_some() && self.refresh_token.is_some()
	}

	/// Bearer credential for provider calls; `None` unless the session is authenticated.
	pub fn bearer(&self) -> Option<&str> {
		if self.is_authenticated() { self.access_token.as_deref() } else { None }
	}
}
