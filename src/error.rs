//! Crate-level error types shared by configuration, issuance, and transport layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error surfaced by the issuance pipeline.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Expiry instant could not be computed or encoded.
	#[error(transparent)]
	Expiry(#[from] ExpiryError),
	/// Listener could not bind or the HTTP server loop failed.
	#[error("HTTP server failed.")]
	Server(#[source] std::io::Error),

	/// Provider answered with a non-success status.
	#[error("Token endpoint rejected the request with HTTP {status}.")]
	Rejected {
		/// HTTP status code returned by the provider.
		status: u16,
	},
	/// Provider answered successfully but the body could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Configuration failures raised at startup or while resolving per-request credentials.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The secret Mapbox credential is not configured.
	#[error("Mapbox private token not configured")]
	MissingPrivateToken,
	/// The Mapbox account identifier is not configured.
	#[error("Mapbox username not configured")]
	MissingUsername,

	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider API base URL cannot be parsed or joined.
	#[error("Provider API URL is invalid.")]
	InvalidApiUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider API base URL uses an unsupported scheme.
	#[error("Provider API URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Listen address cannot be parsed.
	#[error("Listen address `{value}` is invalid.")]
	InvalidListenAddress {
		/// Raw host/port pair that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: std::net::AddrParseError,
	},
	/// Fixed scope list failed validation.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Mint request body could not be serialized.
	#[error("Mint request could not be serialized.")]
	RequestEncode(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(e: url::ParseError) -> Self {
		Self::InvalidApiUrl { source: e }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures while deriving the expiry instant sent to the provider.
#[derive(Debug, ThisError)]
pub enum ExpiryError {
	/// Adding the token lifetime overflowed the representable range.
	#[error("Expiry instant is out of range.")]
	Overflow,
	/// Sub-second truncation failed.
	#[error("Expiry instant could not be truncated to whole seconds.")]
	Truncate(#[from] time::error::ComponentRange),
	/// Expiry instant could not be rendered as RFC 3339.
	#[error("Expiry instant could not be formatted.")]
	Format(#[from] time::error::Format),
}
