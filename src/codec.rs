//! Decoders for the provider's three response formats.
//!
//! - Token exchange success: `application/x-www-form-urlencoded`
//!   (`access_token=...&expires_in=...&refresh_token=...`).
//! - Token exchange failure and identity lookup: a JSON object inside a JSONP-style wrapper,
//!   `callback( {...} );`.
//! - Profile lookup: plain JSON.
//!
//! The callback payload is located by delimiters (first `{` through last `}`) rather than by
//! fixed wrapper offsets, so plain JSON and wrappers of any length decode the same way.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::DecodeError, obs::CallKind};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Provider error envelope carried by callback-wrapped responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
	/// Numeric provider error code.
	pub error: i64,
	/// Human-readable description.
	#[serde(default)]
	pub error_description: String,
}
impl ErrorEnvelope {
	/// Converts the envelope into the client error for `call`.
	pub fn into_error(self, call: CallKind) -> Error {
		Error::Provider { call, code: self.error, message: self.error_description }
	}
}

/// Raw response handed from the transport to the decoders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// Call that produced the response.
	pub call: CallKind,
	/// HTTP status code.
	pub status: Option<u16>,
	/// Full response body.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Creates a response record for `call`.
	pub fn new(call: CallKind, status: Option<u16>, body: impl Into<Vec<u8>>) -> Self {
		Self { call, status, body: body.into() }
	}

	/// Decodes the whole body as JSON.
	pub fn json<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		decode_json(self.call, self.status, &self.body)
	}

	/// Extracts the callback payload and decodes it as JSON.
	pub fn callback_json<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned,
	{
		let payload = unwrap_callback(&self.body).ok_or_else(|| DecodeError::MissingPayload {
			call: self.call,
			status: self.status,
			body_preview: self.preview(),
		})?;

		decode_json(self.call, self.status, payload)
	}

	/// Decodes the provider error envelope from a callback-wrapped body.
	pub fn error_envelope(&self) -> Result<ErrorEnvelope, DecodeError> {
		self.callback_json()
	}

	/// Parses the body as `application/x-www-form-urlencoded` pairs. Later duplicates win.
	pub fn form(&self) -> HashMap<String, String> {
		url::form_urlencoded::parse(&self.body).into_owned().collect()
	}

	/// Builds the decode error for a body that fits no known shape.
	pub fn unexpected_shape(&self) -> DecodeError {
		DecodeError::UnexpectedShape {
			call: self.call,
			status: self.status,
			body_preview: self.preview(),
		}
	}

	fn preview(&self) -> String {
		truncate_preview(&String::from_utf8_lossy(&self.body))
	}
}

/// Returns the JSON object embedded in a callback wrapper: the bytes from the first `{`
/// through the last `}`. Plain JSON objects are returned unchanged.
pub fn unwrap_callback(body: &[u8]) -> Option<&[u8]> {
	let start = body.iter().position(|byte| *byte == b'{')?;
	let end = body.iter().rposition(|byte| *byte == b'}')?;

	if end < start {
		return None;
	}

	Some(&body[start..=end])
}

fn decode_json<T>(call: CallKind, status: Option<u16>, bytes: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Json { call, source, status })
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}
