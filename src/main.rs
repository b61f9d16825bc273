//! Runs the Mapbox token edge with configuration taken from the process environment.

// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use mapbox_token_edge::{
	config::{Config, SystemEnv},
	server,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config = Config::from_env(&SystemEnv)?;

	if config.credentials.private_token.is_none() || config.credentials.username.is_none() {
		tracing::warn!("Mapbox credentials are incomplete; token requests will fail until they are set.");
	}

	server::serve(config, server::shutdown_signal()).await?;

	Ok(())
}
