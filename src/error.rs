//! Client-level error types shared across flows, codecs, and transports.

// self
use crate::{_prelude::*, auth::IdentifierError, obs::CallKind};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, body read).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response matched neither the success shape nor the provider's error envelope.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Provider answered with its error envelope or a non-zero `ret` code.
	#[error("QQ Connect rejected the {call} call with code {code}: {message}.")]
	Provider {
		/// Call that was rejected.
		call: CallKind,
		/// Provider error code, surfaced verbatim.
		code: i64,
		/// Provider error message, surfaced verbatim.
		message: String,
	},
	/// State echoed by the authorization redirect differs from the issued one.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}
impl Error {
	/// Returns the provider's numeric error code when the provider rejected the call.
	pub fn provider_code(&self) -> Option<i64> {
		match self {
			Self::Provider { code, .. } => Some(*code),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
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
	/// Application identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
	/// Application secret is empty.
	#[error("Application secret cannot be empty.")]
	EmptySecret,
	/// Redirect URI is empty.
	#[error("Redirect URI cannot be empty.")]
	EmptyRedirect,
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Redirect URI carries a fragment, which the provider never echoes back.
	#[error("Redirect URI must not contain a fragment: {uri}.")]
	RedirectHasFragment {
		/// Offending redirect URI.
		uri: String,
	},
	/// Redirect URI carries characters that would change the login URL's query when embedded.
	#[error("Redirect URI contains `{character}` and cannot be embedded in the login URL: {uri}.")]
	UnsafeRedirect {
		/// Offending redirect URI.
		uri: String,
		/// First offending character.
		character: char,
	},
	/// Endpoint cannot be derived from the supplied base URL.
	#[error("The {endpoint} endpoint cannot be derived from the base URL.")]
	InvalidEndpoint {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
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

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the {call} call.")]
	Network {
		/// Call that failed.
		call: CallKind,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request timed out before a full response was read.
	#[error("Request timed out during the {call} call.")]
	Timeout {
		/// Call that failed.
		call: CallKind,
		/// HTTP status code, when the timeout hit while reading the body.
		status: Option<u16>,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling QQ Connect.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a typed source.
	#[error("HTTP client error occurred during the {call} call: {message}.")]
	Other {
		/// Call that failed.
		call: CallKind,
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(call: CallKind, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { call, source: Box::new(src) }
	}
}

/// Response bodies that could not be mapped onto a typed result.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body carries no JSON object at all.
	#[error("The {call} response does not contain a JSON payload.")]
	MissingPayload {
		/// Call whose response failed to decode.
		call: CallKind,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Truncated body for diagnostics.
		body_preview: String,
	},
	/// JSON payload is malformed or lacks a required field.
	#[error("The {call} response contains malformed JSON.")]
	Json {
		/// Call whose response failed to decode.
		call: CallKind,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Payload decoded but matches neither the success shape nor the error envelope.
	#[error("The {call} response matches neither the success shape nor the error envelope.")]
	UnexpectedShape {
		/// Call whose response failed to decode.
		call: CallKind,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Truncated body for diagnostics.
		body_preview: String,
	},
	/// A field is present but cannot be interpreted.
	#[error("The {call} response carries an invalid `{field}` value: {value}.")]
	InvalidField {
		/// Call whose response failed to decode.
		call: CallKind,
		/// Field name as sent by the provider.
		field: &'static str,
		/// Raw field value.
		value: String,
	},
}
impl DecodeError {
	/// Call whose response failed to decode.
	pub fn call(&self) -> CallKind {
		match self {
			Self::MissingPayload { call, .. }
			| Self::Json { call, .. }
			| Self::UnexpectedShape { call, .. }
			| Self::InvalidField { call, .. } => *call,
		}
	}
}
