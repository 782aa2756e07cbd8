//! `get_user_info` profile lookup. Unlike the OAuth endpoints this one answers in plain JSON
//! and reports failures through `ret`/`msg`.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, OpenId, ProfileInfo},
	codec::RawResponse,
	flows::{self, ConnectClient},
	http::ConnectHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::TransportErrorMapper,
};

impl<C, M> ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the profile of the user identified by `open_id`.
	pub async fn fetch_profile(
		&self,
		token: &AccessToken,
		open_id: &OpenId,
	) -> Result<ProfileInfo> {
		const KIND: CallKind = CallKind::FetchProfile;

		let span = CallSpan::new(KIND, "fetch_profile");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut url = self.config.endpoints.profile.clone();

				url.query_pairs_mut()
					.append_pair("access_token", token.expose())
					.append_pair("oauth_consumer_key", &self.config.app_id)
					.append_pair("openid", open_id);

				let response = self.get(KIND, &url).await?;

				parse_profile_response(&response)
			})
			.await;

		if let Err(err) = &result {
			flows::log_failure(err);
		}

		obs::record_call_result(KIND, &result);

		result
	}
}

pub(crate) fn parse_profile_response(response: &RawResponse) -> Result<ProfileInfo> {
	let profile: ProfileInfo = response.json()?;

	if !profile.is_success() {
		return Err(Error::Provider {
			call: response.call,
			code: profile.ret,
			message: profile.msg,
		});
	}

	Ok(profile)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::DecodeError;

	fn response(body: &str) -> RawResponse {
		RawResponse::new(CallKind::FetchProfile, Some(200), body)
	}

	#[test]
	fn zero_status_returns_profile() {
		let profile = parse_profile_response(&response(
			r#"{"ret":0,"msg":"","nickname":"Alice","gender":"女","figureurl_qq":"https://q.qlogo.cn/a"}"#,
		))
		.expect("Profile should decode.");

		assert_eq!(profile.nickname, "Alice");
		assert_eq!(profile.largest_avatar(), Some("https://q.qlogo.cn/a"));
	}

	#[test]
	fn non_zero_status_is_provider_error() {
		let err = parse_profile_response(&response(r#"{"ret":1,"msg":"token expired"}"#))
			.expect_err("Non-zero status must fail.");

		match err {
			Error::Provider { call, code, message } => {
				assert_eq!(call, CallKind::FetchProfile);
				assert_eq!(code, 1);
				assert_eq!(message, "token expired");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn wrapped_or_statusless_bodies_are_decode_errors() {
		let err = parse_profile_response(&response("callback( {\"ret\":0} );"))
			.expect_err("Wrapped body is not plain JSON.");

		assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));

		let err = parse_profile_response(&response("{}"))
			.expect_err("Missing status must not yield an empty profile.");

		assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
	}
}
