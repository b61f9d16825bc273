//! Mapbox Tokens API descriptor shared by every issuance.

// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	error::ConfigError,
};

/// Public Mapbox API base used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://api.mapbox.com/";
/// Capabilities granted to every temporary token.
pub const TEMPORARY_TOKEN_SCOPES: [&str; 6] = [
	"styles:read",
	"fonts:read",
	"datasets:read",
	"vision:read",
	"navigation:trips",
	"geocoding:read",
];
/// Lifetime of every temporary token.
pub const TEMPORARY_TOKEN_LIFETIME: Duration = Duration::hours(1);

/// Immutable provider descriptor consumed by the issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
	/// API base every endpoint is resolved against; always ends with `/`.
	pub api_base: Url,
	/// Scopes requested for each minted token.
	pub scopes: ScopeSet,
	/// Offset from "now" used to compute the `expires` field.
	pub token_lifetime: Duration,
}
impl ProviderDescriptor {
	/// Builds the Mapbox descriptor with the fixed scope list and one-hour lifetime.
	pub fn mapbox(api_base: Url) -> Result<Self, ConfigError> {
		Ok(Self {
			api_base: normalize_base(api_base)?,
			scopes: ScopeSet::new(TEMPORARY_TOKEN_SCOPES)?,
			token_lifetime: TEMPORARY_TOKEN_LIFETIME,
		})
	}

	/// Resolves the account-scoped token endpoint (`tokens/v2/{account}`).
	///
	/// The account is pushed as a single percent-encoded path segment.
	pub fn token_endpoint(&self, account: &str) -> Url {
		let mut url = self.api_base.clone();

		// `normalize_base` rejects cannot-be-a-base URLs, so segments are always available.
		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().extend(["tokens", "v2", account]);
		}

		url
	}
}

fn normalize_base(mut url: Url) -> Result<Url, ConfigError> {
	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedScheme { url: url.to_string() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}
