//! QQ Connect operations built on top of the shared transport.

pub mod login;
pub mod sign_in;

mod identity;
mod profile;
mod token;

pub use login::*;
pub use sign_in::*;

// self
use crate::{
	_prelude::*,
	codec::RawResponse,
	config::ConnectConfig,
	http::ConnectHttpClient,
	obs::{self, CallKind},
	transport::{self, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, transport::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestConnectClient = ConnectClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Client for one QQ Connect application.
///
/// The client owns the HTTP transport, the transport error mapper, and the validated
/// configuration. Every operation is independent: one request, one decode, no state carried
/// between calls. Clones share the transport.
#[derive(Clone)]
pub struct ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Application credentials and endpoints.
	pub config: ConnectConfig,
}
impl<C, M> ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ConnectConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { http_client: http_client.into(), transport_mapper: mapper.into(), config }
	}

	pub(crate) async fn get(&self, call: CallKind, url: &Url) -> Result<RawResponse> {
		transport::get(self.http_client.as_ref(), self.transport_mapper.as_ref(), call, url).await
	}
}
#[cfg(feature = "reqwest")]
impl ConnectClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new client backed by a default reqwest transport.
	pub fn new(config: ConnectConfig) -> Self {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConnectClient")
			.field("app_id", &self.config.app_id)
			.field("redirect_uri", &self.config.redirect_uri)
			.field("endpoints", &self.config.endpoints)
			.finish()
	}
}

/// Logs a failed call's cause at the level matching its kind.
pub(crate) fn log_failure(err: &Error) {
	match err {
		Error::Provider { call, code, message } => obs::log_provider_rejection(*call, *code, message),
		Error::Decode(decode) => obs::log_decode_failure(decode),
		_ => {},
	}
}
