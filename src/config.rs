//! Environment-backed configuration.
//!
//! Everything is read once at startup into [`Config`] and handed to the server. Provider
//! credentials are kept optional here and checked on every request, so a deployment with a
//! missing secret still serves pre-flight requests and answers token requests with a
//! descriptive error instead of refusing to boot.
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `MAPBOX_PRIVATE_TOKEN` | none | Secret credential used to mint tokens |
//! | `MAPBOX_USERNAME` | none | Account that owns the minted tokens |
//! | `MAPBOX_API_URL` | `https://api.mapbox.com/` | Provider API base |
//! | `TOKEN_EDGE_HOST` | `0.0.0.0` | Listen address |
//! | `TOKEN_EDGE_PORT` | `8787` | Listen port |

// std
use std::{
	env::{self, VarError},
	net::{IpAddr, SocketAddr},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	provider::DEFAULT_API_BASE,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8787;

/// Read access to process-style environment variables.
pub trait ReadEnv {
	/// Returns the value for `key`, mirroring [`std::env::var`].
	fn var(&self, key: &str) -> Result<String, VarError>;
}

/// Zero-sized reader that delegates to [`std::env`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;
impl ReadEnv for SystemEnv {
	fn var(&self, key: &str) -> Result<String, VarError> {
		env::var(key)
	}
}
impl ReadEnv for HashMap<String, String> {
	fn var(&self, key: &str) -> Result<String, VarError> {
		self.get(key).cloned().ok_or(VarError::NotPresent)
	}
}

/// Resolved service configuration.
#[derive(Clone, Debug)]
pub struct Config {
	/// Socket the HTTP server binds to.
	pub listen_addr: SocketAddr,
	/// Provider API base (validated by the descriptor at startup).
	pub api_base: Url,
	/// Provider credentials, checked per request.
	pub credentials: ProviderCredentials,
}
impl Config {
	/// Loads configuration from `env`.
	///
	/// Only an unparsable API URL or host is fatal; an unparsable port falls back to the
	/// default and absent credentials are deferred to request time.
	pub fn from_env<E>(env: &E) -> Result<Self, ConfigError>
	where
		E: ?Sized + ReadEnv,
	{
		let host = non_empty(env, "TOKEN_EDGE_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
		let ip = host.parse::<IpAddr>().map_err(|source| ConfigError::InvalidListenAddress {
			value: host.clone(),
			source,
		})?;
		let port = non_empty(env, "TOKEN_EDGE_PORT")
			.and_then(|value| value.parse().ok())
			.unwrap_or(DEFAULT_PORT);
		let api_base = Url::parse(
			non_empty(env, "MAPBOX_API_URL").as_deref().unwrap_or(DEFAULT_API_BASE),
		)?;

		Ok(Self {
			listen_addr: SocketAddr::new(ip, port),
			api_base,
			credentials: ProviderCredentials {
				private_token: non_empty(env, "MAPBOX_PRIVATE_TOKEN").map(TokenSecret::new),
				username: non_empty(env, "MAPBOX_USERNAME"),
			},
		})
	}
}

/// Secret credential and account identifier, both optional until a request needs them.
#[derive(Clone, Debug, Default)]
pub struct ProviderCredentials {
	/// Secret bearer credential.
	pub private_token: Option<TokenSecret>,
	/// Raw account identifier.
	pub username: Option<String>,
}
impl ProviderCredentials {
	/// Builds credentials with both values present.
	pub fn new(private_token: impl Into<String>, username: impl Into<String>) -> Self {
		Self {
			private_token: Some(TokenSecret::new(private_token)),
			username: Some(username.into()),
		}
	}

	/// Checks presence, secret first, then account.
	///
	/// Values are not validated beyond presence; the account is percent-encoded when it is
	/// placed in the endpoint path.
	pub fn resolve(&self) -> Result<ResolvedCredentials, ConfigError> {
		let private_token = self.private_token.clone().ok_or(ConfigError::MissingPrivateToken)?;
		let account = self.username.clone().ok_or(ConfigError::MissingUsername)?;

		Ok(ResolvedCredentials { private_token, account })
	}
}

/// Credentials proven present for a single issuance.
#[derive(Clone, Debug)]
pub struct ResolvedCredentials {
	/// Secret bearer credential.
	pub private_token: TokenSecret,
	/// Account identifier, verbatim.
	pub account: String,
}

fn non_empty<E>(env: &E, key: &str) -> Option<String>
where
	E: ?Sized + ReadEnv,
{
	env.var(key).ok().filter(|value| !value.is_empty())
}
