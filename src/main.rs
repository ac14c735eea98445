//! Gateway binary: loads configuration from the environment and serves the HTTP surface.

// std
use std::{net::SocketAddr, sync::Arc};
// crates.io
use tracing_subscriber::EnvFilter;
// self
use asset_gateway::{config::GatewayConfig, gateway::Gateway, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let config = GatewayConfig::from_env()?;
	let addr: SocketAddr = std::env::var("ASSET_GATEWAY_LISTEN")
		.unwrap_or_else(|_| "127.0.0.1:8787".into())
		.parse()?;
	let gateway = Arc::new(Gateway::new(Arc::new(config))?);
	let app = routes::router(gateway);
	let listener = tokio::net::TcpListener::bind(addr).await?;

	tracing::info!(%addr, "asset gateway listening");

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

async fn shutdown_signal() {
	// Serve until interrupted; per-request state lives in cookies, so shutdown loses nothing.
	let _ = tokio::signal::ctrl_c().await;
}
