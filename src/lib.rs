//! Server-side OAuth session lifecycle and authenticated asset proxy for browser-based 3D scene
//! editors: keep provider credentials out of the browser while brokering catalog search,
//! download-URL issuance, and binary asset fetches.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod broker;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handshake;
pub mod proxy;
pub mod routes;
pub mod session;

mod _prelude {
	pub use std::{
		fmt::{Debug, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use reqwest::Client as ReqwestClient;
	pub use serde::Deserialize;
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;

// Pulled in by the gateway binary target only.
use {tokio as _, tracing_subscriber as _};
#[cfg(test)] use {cookie as _, http_body_util as _, httpmock as _, tower as _};
