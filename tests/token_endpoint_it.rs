mod common;

// crates.io
use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};
// self
use common::*;
use mapbox_token_edge::config::ProviderCredentials;

#[tokio::test]
async fn token_route_relays_minted_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("authorization", "Bearer sk.test-secret")
				.header("content-type", "application/json");
			then.status(201).header("content-type", "application/json").body(
				"{\"token\":\"tk.temporary\",\"expires\":\"2099-01-01T00:00:00.000Z\",\"usage\":\"tk\"}",
			);
		})
		.await;
	let before = OffsetDateTime::now_utc();
	let response =
		send(router_for(&server, complete_credentials()), request(Method::GET, "/api/token")).await;
	let after = OffsetDateTime::now_utc();

	assert_eq!(response.status, StatusCode::OK);
	response.assert_cors();

	let body = response.json();

	assert_eq!(body["token"], "tk.temporary");

	let expires = OffsetDateTime::parse(
		body["expires"].as_str().expect("expires should be a string."),
		&Rfc3339,
	)
	.expect("expires should be RFC 3339.");

	assert!(expires > before + Duration::minutes(59), "Expiry must be about an hour out.");
	assert!(expires <= after + Duration::hours(1), "Expiry must not exceed one hour.");

	mock.assert_async().await;
}

#[tokio::test]
async fn missing_private_token_skips_provider() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST);
			then.status(200).body("{\"token\":\"unused\"}");
		})
		.await;
	let credentials = ProviderCredentials { private_token: None, username: Some(USERNAME.into()) };
	let response = send(router_for(&server, credentials), request(Method::GET, "/api/token")).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(response.json(), serde_json::json!({ "error": "Mapbox private token not configured" }));
	response.assert_cors();

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn missing_username_skips_provider() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST);
			then.status(200).body("{\"token\":\"unused\"}");
		})
		.await;
	let credentials = ProviderCredentials {
		private_token: complete_credentials().private_token,
		username: None,
	};
	let response = send(router_for(&server, credentials), request(Method::GET, "/api/token")).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(response.json(), serde_json::json!({ "error": "Mapbox username not configured" }));
	response.assert_cors();

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn provider_rejection_returns_generic_failure() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"message\":\"Not Authorized - Invalid Token\"}");
		})
		.await;
	let response =
		send(router_for(&server, complete_credentials()), request(Method::GET, "/api/token")).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(response.json(), serde_json::json!({ "error": "Failed to create temporary token" }));
	assert!(!response.text().contains("Not Authorized"), "Provider detail must not leak.");
	response.assert_cors();

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn malformed_provider_body_returns_internal_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body("<html>oops</html>");
		})
		.await;
	let response =
		send(router_for(&server, complete_credentials()), request(Method::GET, "/api/token")).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(response.json(), serde_json::json!({ "error": "Internal server error" }));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unreachable_provider_returns_internal_error() {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Ephemeral bind should work.");
	let addr = listener.local_addr().expect("Listener should expose its address.");

	drop(listener);

	let app = mapbox_token_edge::server::router(issuer_for_base(
		&format!("http://{addr}/"),
		complete_credentials(),
	));
	let response = send(app, request(Method::GET, "/api/token")).await;

	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(response.json(), serde_json::json!({ "error": "Internal server error" }));
	response.assert_cors();
}

#[tokio::test]
async fn each_request_mints_independently() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body("{\"token\":\"tk.again\"}");
		})
		.await;
	let app = router_for(&server, complete_credentials());
	let (first, second) = tokio::join!(
		send(app.clone(), request(Method::GET, "/api/token")),
		send(app, request(Method::GET, "/api/token")),
	);

	assert_eq!(first.status, StatusCode::OK);
	assert_eq!(second.status, StatusCode::OK);

	mock.assert_calls_async(2).await;
}
