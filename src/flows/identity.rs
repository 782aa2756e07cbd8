//! OpenID/UnionID resolution against the identity endpoint.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AppId, IdentitySet, OpenId, UnionId},
	codec::{ErrorEnvelope, RawResponse},
	error::DecodeError,
	flows::{self, ConnectClient},
	http::ConnectHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::TransportErrorMapper,
};

/// Success and error fields share one callback payload; absent fields decode as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IdentityPayload {
	client_id: String,
	openid: String,
	unionid: String,
	error: Option<i64>,
	error_description: String,
}

impl<C, M> ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Resolves an access token into the application id, OpenID, and UnionID it belongs to.
	pub async fn resolve_identity(&self, token: &AccessToken) -> Result<IdentitySet> {
		const KIND: CallKind = CallKind::ResolveIdentity;

		let span = CallSpan::new(KIND, "resolve_identity");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut url = self.config.endpoints.identity.clone();

				url.query_pairs_mut()
					.append_pair("access_token", token.expose())
					.append_pair("unionid", "1");

				let response = self.get(KIND, &url).await?;

				parse_identity_response(&response)
			})
			.await;

		if let Err(err) = &result {
			flows::log_failure(err);
		}

		obs::record_call_result(KIND, &result);

		result
	}
}

pub(crate) fn parse_identity_response(response: &RawResponse) -> Result<IdentitySet> {
	let payload: IdentityPayload = response.callback_json()?;

	if payload.openid.is_empty() {
		let Some(code) = payload.error else {
			return Err(response.unexpected_shape().into());
		};

		return Err(ErrorEnvelope { error: code, error_description: payload.error_description }
			.into_error(response.call));
	}

	let invalid = |field: &'static str, value: String| DecodeError::InvalidField {
		call: response.call,
		field,
		value,
	};
	let client_id = AppId::new(&payload.client_id)
		.map_err(|_| invalid("client_id", payload.client_id.clone()))?;
	let open_id =
		OpenId::new(&payload.openid).map_err(|_| invalid("openid", payload.openid.clone()))?;
	let union_id = if payload.unionid.is_empty() {
		None
	} else {
		Some(
			UnionId::new(&payload.unionid)
				.map_err(|_| invalid("unionid", payload.unionid.clone()))?,
		)
	};

	Ok(IdentitySet { client_id, open_id, union_id })
}
