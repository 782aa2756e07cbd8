//! GET dispatch and transport error mapping shared by every provider call.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest,
	http::{Method, Request, header::ACCEPT},
};
// self
use crate::{
	_prelude::*,
	codec::RawResponse,
	error::{ConfigError, TransportError},
	http::{ConnectHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::CallKind,
};

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(
		&self,
		call: CallKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: CallKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(call, meta, *inner),
			other => map_generic_transport_error(call, other),
		}
	}
}

/// Mapping shared by every transport for the variants that do not carry a typed
/// transport error.
pub fn map_generic_transport_error<E>(call: CallKind, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { call, source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { call, message }.into(),
		_ => TransportError::Other { call, message: "Unrecognized HTTP client failure.".into() }
			.into(),
	}
}

/// Issues one GET to `url` and returns the full response, mapping transport failures
/// before any body is looked at.
pub(crate) async fn get<C, M>(
	http_client: &C,
	mapper: &M,
	call: CallKind,
	url: &Url,
) -> Result<RawResponse>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let slot = ResponseMetadataSlot::default();
	let handle = http_client.with_metadata(slot.clone());
	let request = build_get(url)?;
	let response = handle
		.call(request)
		.await
		.map_err(|err| mapper.map_transport_error(call, slot.take().as_ref(), err))?;
	let status = response.status().as_u16();

	Ok(RawResponse::new(call, Some(status), response.into_body()))
}

fn build_get(url: &Url) -> Result<HttpRequest, ConfigError> {
	Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, "*/*")
		.body(Vec::new())
		.map_err(ConfigError::from)
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(call: CallKind, meta: Option<&ResponseMetadata>, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout {
			call,
			status: meta.and_then(|value| value.status).or_else(|| reqwest_status(&err)),
		}
		.into();
	}

	TransportError::network(call, err).into()
}

#[cfg(feature = "reqwest")]
fn reqwest_status(err: &ReqwestError) -> Option<u16> {
	err.status().map(|code| code.as_u16())
}
