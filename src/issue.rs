//! Temporary token issuance against the Mapbox Tokens API.
//!
//! [`TokenIssuer::issue`] resolves the configured credentials, computes an expiry one hour
//! from now, posts a single mint request for the configured account, and classifies the
//! outcome. Nothing is cached and nothing is retried; every call performs at most one
//! outbound request.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::{Config, ProviderCredentials},
	error::{ConfigError, ExpiryError},
	http::{OutboundRequest, ReqwestHttpClient, TokenHttpClient},
	obs::{self, IssueOutcome, IssueSpan},
	provider::{MintRequest, MintResponse, ProviderDescriptor},
};

/// Issuer specialized for the crate's default reqwest transport.
pub type ReqwestTokenIssuer = TokenIssuer<ReqwestHttpClient>;

/// Token handed back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
	/// Minted temporary token.
	pub token: TokenSecret,
	/// Instant the token stops being accepted by the provider.
	#[serde(with = "time::serde::rfc3339")]
	pub expires: OffsetDateTime,
}

/// Mints temporary tokens for a single provider account.
///
/// The issuer holds only immutable data plus a shareable transport, so one instance
/// serves every request concurrently.
pub struct TokenIssuer<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client used for the outbound mint request.
	pub http_client: Arc<C>,
	/// Provider endpoints, scopes, and lifetime.
	pub descriptor: ProviderDescriptor,
	/// Credentials checked on every issuance.
	pub credentials: ProviderCredentials,
}
impl<C> TokenIssuer<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates an issuer that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		credentials: ProviderCredentials,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), descriptor, credentials }
	}

	/// Mints a token that expires one token lifetime after the current UTC instant.
	pub async fn issue(&self) -> Result<IssuedToken> {
		self.issue_at(OffsetDateTime::now_utc()).await
	}

	/// Mints a token relative to the supplied `now`.
	pub async fn issue_at(&self, now: OffsetDateTime) -> Result<IssuedToken> {
		let span = IssueSpan::new("issue");

		obs::record_issue_outcome(IssueOutcome::Attempt);

		let result = span.instrument(self.mint(now)).await;

		match &result {
			Ok(_) => obs::record_issue_outcome(IssueOutcome::Success),
			Err(_) => obs::record_issue_outcome(IssueOutcome::Failure),
		}

		result
	}

	async fn mint(&self, now: OffsetDateTime) -> Result<IssuedToken> {
		let credentials = self.credentials.resolve()?;
		let expires_at = expiry_after(now, self.descriptor.token_lifetime)?;
		let expires = expires_at.format(&Rfc3339).map_err(ExpiryError::from)?;
		let body =
			serde_json::to_vec(&MintRequest { expires: &expires, scopes: &self.descriptor.scopes })
				.map_err(ConfigError::RequestEncode)?;
		let url = self.descriptor.token_endpoint(&credentials.account);
		let response = self
			.http_client
			.post_json(OutboundRequest { url, credential: credentials.private_token, body })
			.await?;

		if !response.is_success() {
			tracing::error!(
				status = response.status,
				body = %response.body_preview(),
				"Mapbox token creation failed."
			);

			return Err(Error::Rejected { status: response.status });
		}

		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let minted: MintResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::MalformedResponse { source, status: response.status })?;

		tracing::debug!(account = %credentials.account, %expires, "Minted temporary token.");

		Ok(IssuedToken { token: minted.token, expires: expires_at })
	}
}
impl TokenIssuer<ReqwestHttpClient> {
	/// Builds the production issuer: Mapbox descriptor, configured credentials, and a
	/// freshly built reqwest transport.
	pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
		let descriptor = ProviderDescriptor::mapbox(config.api_base.clone())?;
		let http_client = ReqwestHttpClient::new()?;

		Ok(Self::with_http_client(descriptor, config.credentials.clone(), http_client))
	}
}
impl<C> Debug for TokenIssuer<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenIssuer")
			.field("descriptor", &self.descriptor)
			.field("private_token_set", &self.credentials.private_token.is_some())
			.field("username", &self.credentials.username)
			.finish()
	}
}

/// Returns `now + lifetime`, truncated to whole seconds.
pub fn expiry_after(now: OffsetDateTime, lifetime: Duration) -> Result<OffsetDateTime, ExpiryError> {
	let expires = now.checked_add(lifetime).ok_or(ExpiryError::Overflow)?;

	Ok(expires.replace_nanosecond(0)?)
}
