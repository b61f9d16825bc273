//! HTTP surface: the token route, CORS pre-flight responder, and CORS header decorator.
//!
//! | Method | Path | Behavior |
//! |---|---|---|
//! | `GET` | `/api/token` | `200 { token, expires }` or `500 { error }` |
//! | `OPTIONS` | `/api/*` | `200 OK` (plain text) |
//!
//! Every response for `/api` or anything beneath it carries the same permissive CORS headers,
//! including error and 404/405 responses.

// crates.io
use axum::{
	Json, Router,
	extract::{Request, State},
	http::{
		HeaderValue, StatusCode,
		header::{
			ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
			ACCESS_CONTROL_ALLOW_ORIGIN,
		},
	},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, options},
};
use tokio::{net::TcpListener, signal};
// self
use crate::{
	_prelude::*,
	config::Config,
	error::ConfigError,
	http::TokenHttpClient,
	issue::{IssuedToken, TokenIssuer},
};

/// Mount point of the API; the bare path and everything beneath it receive CORS headers.
pub const API_ROOT: &str = "/api";
/// Body returned for failures that must not leak provider or transport details.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";
/// Body returned when the provider rejects the mint request.
pub const REJECTED_ERROR_MESSAGE: &str = "Failed to create temporary token";

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// JSON error payload returned to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Caller-facing message.
	pub error: String,
}

/// Builds the application router around a shared issuer.
pub fn router<C>(issuer: Arc<TokenIssuer<C>>) -> Router
where
	C: TokenHttpClient,
{
	Router::new()
		.route("/api/token", get(issue_token::<C>).options(preflight))
		// The wildcard never matches an empty tail.
		.route("/api", options(preflight))
		.route("/api/", options(preflight))
		.route("/api/{*path}", options(preflight))
		.fallback(not_found)
		.layer(middleware::from_fn(cors_headers))
		.with_state(issuer)
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn serve<F>(config: Config, shutdown: F) -> Result<()>
where
	F: 'static + Send + Future<Output = ()>,
{
	let issuer = Arc::new(TokenIssuer::from_config(&config)?);
	let app = router(issuer);
	let listener = TcpListener::bind(config.listen_addr).await.map_err(Error::Server)?;

	tracing::info!(addr = %config.listen_addr, api = %config.api_base, "Token edge listening.");

	axum::serve(listener, app).with_graceful_shutdown(shutdown).await.map_err(Error::Server)?;

	tracing::info!("Token edge stopped.");

	Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			tracing::warn!(error = %e, "Ctrl-C handler unavailable.");

			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			},
			Err(e) => {
				tracing::warn!(error = %e, "SIGTERM handler unavailable.");

				std::future::pending::<()>().await;
			},
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down."),
		_ = terminate => tracing::info!("Received SIGTERM, shutting down."),
	}
}

/// Maps an issuance error to the message the caller is allowed to see.
pub fn caller_message(err: &Error) -> &'static str {
	match err {
		Error::Config(ConfigError::MissingPrivateToken) => "Mapbox private token not configured",
		Error::Config(ConfigError::MissingUsername) => "Mapbox username not configured",
		Error::Rejected { .. } => REJECTED_ERROR_MESSAGE,
		_ => GENERIC_ERROR_MESSAGE,
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		match &self {
			Error::Config(ConfigError::MissingPrivateToken | ConfigError::MissingUsername) => {
				tracing::warn!(error = %self, "Token request refused.");
			},
			// Provider body already logged by the issuer.
			Error::Rejected { .. } => {},
			_ => {
				tracing::error!(error = ?self, "Error creating temporary token.");
			},
		}

		let body = ErrorBody { error: caller_message(&self).to_owned() };

		(StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
	}
}

#[tracing::instrument(name = "mapbox_token_edge.request", skip_all)]
async fn issue_token<C>(State(issuer): State<Arc<TokenIssuer<C>>>) -> Result<Json<IssuedToken>>
where
	C: TokenHttpClient,
{
	Ok(Json(issuer.issue().await?))
}

async fn preflight() -> &'static str {
	"OK"
}

async fn not_found() -> StatusCode {
	StatusCode::NOT_FOUND
}

async fn cors_headers(request: Request, next: Next) -> Response {
	let decorate = is_api_path(request.uri().path());
	let mut response = next.run(request).await;

	if decorate {
		let headers = response.headers_mut();

		headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
		headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
		headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
	}

	response
}

fn is_api_path(path: &str) -> bool {
	path.strip_prefix(API_ROOT).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
