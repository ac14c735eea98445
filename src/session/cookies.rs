//! HTTP-cookie encoding boundary for the session secrets and the handshake state nonce.
//!
//! All three cookies are signed, HTTP-only, and `SameSite=Lax`. The two token cookies are
//! scoped to the whole site and default to a 30-day lifetime unless the provider returned an
//! explicit expiry; the state cookie lives for ten minutes and is consumed at callback. Reads
//! return absent-value, never an error; an unsigned or tampered cookie reads as absent.

// crates.io
use axum_extra::extract::{
	SignedCookieJar,
	cookie::{Cookie, SameSite},
};
// self
use crate::{
	_prelude::*,
	session::{Session, TokenSecret},
};

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// Transient cookie binding one authorization attempt to its callback.
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Token cookie lifetime applied when the provider does not supply an expiry.
pub const DEFAULT_TOKEN_MAX_AGE: Duration = Duration::days(30);
/// State nonce lifetime; an authorization attempt older than this is treated as expired.
pub const STATE_MAX_AGE: Duration = Duration::minutes(10);

/// Decodes the session from the incoming cookie set.
pub fn session_from_jar(jar: &SignedCookieJar) -> Session {
	let access = jar.get(ACCESS_TOKEN_COOKIE).map(|cookie| TokenSecret::new(cookie.value()));
	let refresh = jar.get(REFRESH_TOKEN_COOKIE).map(|cookie| TokenSecret::new(cookie.value()));

	Session::new(access, refresh)
}

/// Builds the outgoing access-token cookie.
pub fn access_token_cookie(
	token: &TokenSecret,
	max_age: Option<Duration>,
	secure: bool,
) -> Cookie<'static> {
	token_cookie(ACCESS_TOKEN_COOKIE, token, max_age, secure)
}

/// Builds the outgoing refresh-token cookie.
pub fn refresh_token_cookie(
	token: &TokenSecret,
	max_age: Option<Duration>,
	secure: bool,
) -> Cookie<'static> {
	token_cookie(REFRESH_TOKEN_COOKIE, token, max_age, secure)
}

/// Builds the short-lived state-nonce cookie set at handshake start.
pub fn state_cookie(state: &str, secure: bool) -> Cookie<'static> {
	Cookie::build((OAUTH_STATE_COOKIE, state.to_string()))
		.http_only(true)
		.secure(secure)
		.same_site(SameSite::Lax)
		.path("/")
		.max_age(STATE_MAX_AGE)
		.build()
}

/// Removes both token cookies; used by session teardown and safe to repeat.
pub fn clear_session(jar: SignedCookieJar) -> SignedCookieJar {
	jar.remove(removal_cookie(ACCESS_TOKEN_COOKIE)).remove(removal_cookie(REFRESH_TOKEN_COOKIE))
}

/// Reads and consumes the state nonce in one step; the nonce is single-use.
pub fn take_state(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
	let stored = jar.get(OAUTH_STATE_COOKIE).map(|cookie| cookie.value().to_string());
	let jar = jar.remove(removal_cookie(OAUTH_STATE_COOKIE));

	(jar, stored)
}

fn token_cookie(
	name: &'static str,
	token: &TokenSecret,
	max_age: Option<Duration>,
	secure: bool,
) -> Cookie<'static> {
	Cookie::build((name, token.expose().to_string()))
		.http_only(true)
		.secure(secure)
		.same_site(SameSite::Lax)
		.path("/")
		.max_age(max_age.unwrap_or(DEFAULT_TOKEN_MAX_AGE))
		.build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
	Cookie::build(name).path("/").build()
}
