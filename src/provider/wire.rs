//! JSON bodies exchanged with the Mapbox Tokens API.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenSecret},
};

/// Body posted to `tokens/v2/{account}`.
#[derive(Clone, Debug, Serialize)]
pub struct MintRequest<'a> {
	/// Absolute expiry as an RFC 3339 timestamp.
	pub expires: &'a str,
	/// Capabilities requested for the token.
	pub scopes: &'a ScopeSet,
}

/// Successful Tokens API response; unknown fields are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct MintResponse {
	/// Minted temporary token.
	pub token: TokenSecret,
}
