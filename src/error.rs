//! Crate-level error types shared by the resolver, token acquirer, registry, and clients.

// self
use crate::{_prelude::*, auth::Scope};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Textual scope could not be parsed.
	#[error(transparent)]
	InvalidScope(#[from] crate::auth::ScopeParseError),

	/// HTTP verb has no scope mapping.
	#[error("HTTP method `{method}` does not map to a scope.")]
	InvalidMethod {
		/// The offending method string.
		method: String,
	},
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the {scope} scope with HTTP {status}.")]
	AuthenticationFailure {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Scope that was being requested.
		scope: Scope,
	},
	/// Token endpoint answered 2xx with a body that is not a token object.
	#[error("Token endpoint returned a malformed response for the {scope} scope.")]
	MalformedTokenResponse {
		/// Scope that was being requested.
		scope: Scope,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
	/// Transport failure (DNS, TCP, TLS, timeout) on the token endpoint or the API under test.
	#[error("Network error occurred while sending the request.")]
	NetworkFailure {
		/// Transport-specific failure.
		#[source]
		cause: BoxError,
	},
}
impl Error {
	/// Wraps a transport-specific failure inside [`Error::NetworkFailure`].
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::NetworkFailure { cause: Box::new(src) }
	}

	/// Returns the scope tied to a failed token exchange, if any.
	pub fn scope(&self) -> Option<Scope> {
		match self {
			Self::AuthenticationFailure { scope, .. } | Self::MalformedTokenResponse { scope, .. } =>
				Some(*scope),
			Self::Config(ConfigError::InvalidTokenHeader { scope, .. }) => Some(*scope),
			_ => None,
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("Base URL scheme `{scheme}` is not supported; expected http or https.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// Username is empty.
	#[error("Client username cannot be empty.")]
	MissingUsername,
	/// Required environment variable is unset.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Resolved request URL is not a valid HTTP URI.
	#[error("Request URI is invalid.")]
	InvalidRequestUri {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::http::uri::InvalidUri,
	},
	/// Issued token cannot be carried in an `Authorization` header.
	#[error("Token issued for the {scope} scope is not a valid header value.")]
	InvalidTokenHeader {
		/// Scope the token was issued for.
		scope: Scope,
		/// Underlying header validation failure.
		#[source]
		source: oauth2::http::header::InvalidHeaderValue,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
