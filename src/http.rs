//! Transport primitives for the outbound token-minting call.
//!
//! The module exposes [`TokenHttpClient`], the issuer's only dependency on an HTTP stack,
//! together with the [`OutboundRequest`] / [`HttpResponse`] pair it exchanges. The default
//! implementation wraps reqwest; tests substitute recording fakes to observe whether a call
//! was made at all.

// crates.io
use reqwest::{
	header::{AUTHORIZATION, CONTENT_TYPE},
	redirect::Policy,
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, TransportError},
};

const BODY_PREVIEW_LIMIT: usize = 1024;

/// Boxed future returned by [`TokenHttpClient::post_json`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute the authenticated JSON `POST`
/// issued for every token.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be shared
/// behind an `Arc` by every in-flight request. Any HTTP status, successful or not, is a
/// response; only failures to obtain a response are transport errors.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the raw status and body.
	fn post_json(&self, request: OutboundRequest) -> HttpFuture<'_>;
}

/// Authenticated JSON request addressed to the provider.
#[derive(Clone, Debug)]
pub struct OutboundRequest {
	/// Absolute endpoint URL.
	pub url: Url,
	/// Credential sent as `Authorization: Bearer ...`.
	pub credential: TokenSecret,
	/// Serialized JSON body.
	pub body: Vec<u8>,
}

/// Status and body captured from a provider response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Returns true for any `2xx` status.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Lossy UTF-8 rendering of the body, truncated for logging.
	pub fn body_preview(&self) -> String {
		let text = String::from_utf8_lossy(&self.body);

		match text.char_indices().nth(BODY_PREVIEW_LIMIT) {
			Some((idx, _)) => format!("{}...", &text[..idx]),
			None => text.into_owned(),
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The Tokens API answers directly; redirects are never followed so the bearer credential
/// cannot be forwarded to another host.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds the default client (no redirects, reqwest's default timeouts).
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl TokenHttpClient for ReqwestHttpClient {
	fn post_json(&self, request: OutboundRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.post(request.url)
				.header(AUTHORIZATION, request.credential.bearer())
				.header(CONTENT_TYPE, "application/json")
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}
