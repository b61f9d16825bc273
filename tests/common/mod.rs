//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use axum::{
	Router,
	body::{Body, to_bytes},
	http::{HeaderMap, Method, Request, StatusCode},
};
use httpmock::MockServer;
use tower::ServiceExt;
// self
use mapbox_token_edge::{
	config::ProviderCredentials,
	http::ReqwestHttpClient,
	issue::{ReqwestTokenIssuer, TokenIssuer},
	provider::ProviderDescriptor,
	reqwest::{Client, redirect::Policy},
	server,
	url::Url,
};

pub const PRIVATE_TOKEN: &str = "sk.test-secret";
pub const USERNAME: &str = "acme";
pub const TOKEN_PATH: &str = "/tokens/v2/acme";

/// Response pieces captured from a single router call.
pub struct Captured {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Vec<u8>,
}
impl Captured {
	pub fn json(&self) -> serde_json::Value {
		serde_json::from_slice(&self.body).unwrap_or_else(|e| {
			panic!("Response body is not JSON ({e}): {:?}.", String::from_utf8_lossy(&self.body))
		})
	}

	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	pub fn assert_cors(&self) {
		assert_eq!(self.header("access-control-allow-origin"), Some("*"));
		assert_eq!(self.header("access-control-allow-methods"), Some("GET, POST, OPTIONS"));
		assert_eq!(self.header("access-control-allow-headers"), Some("Content-Type"));
	}
}

pub fn complete_credentials() -> ProviderCredentials {
	ProviderCredentials::new(PRIVATE_TOKEN, USERNAME)
}

pub fn issuer_for_base(base: &str, credentials: ProviderCredentials) -> Arc<ReqwestTokenIssuer> {
	let descriptor = ProviderDescriptor::mapbox(
		Url::parse(base).expect("Provider base URL should parse."),
	)
	.expect("Provider descriptor should build.");

	Arc::new(TokenIssuer::with_http_client(descriptor, credentials, test_reqwest_http_client()))
}

/// Reqwest transport that trusts the mock server's self-signed certificate.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.redirect(Policy::none())
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn router_for(server: &MockServer, credentials: ProviderCredentials) -> Router {
	server::router(issuer_for_base(&server.base_url(), credentials))
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.body(Body::empty())
		.expect("Test request should build.")
}

pub async fn send(app: Router, request: Request<Body>) -> Captured {
	let response = app.oneshot(request).await.expect("Router should always answer.");
	let status = response.status();
	let headers = response.headers().clone();
	let body = to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Response body should be readable.")
		.to_vec();

	Captured { status, headers, body }
}
