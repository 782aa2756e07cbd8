//! Token endpoint exchanges: authorization code and refresh token.
//!
//! Both grants hit the same endpoint with a GET query and share one response parser. A
//! success body is form-encoded (`access_token=...&expires_in=...&refresh_token=...`); any
//! body without a non-empty `access_token` is read as the callback-wrapped error envelope.
//! A non-empty `access_token` always succeeds; a lifetime that is not a positive integer is
//! dropped rather than failing the exchange.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RefreshToken, TokenGrant},
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
	/// Exchanges an authorization code for an access token.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		self.exchange_code_for_grant(code).await.map(|grant| grant.access_token)
	}

	/// Exchanges an authorization code for the full grant (access token, refresh token,
	/// lifetime).
	pub async fn exchange_code_for_grant(&self, code: &str) -> Result<TokenGrant> {
		const KIND: CallKind = CallKind::ExchangeCode;

		let span = CallSpan::new(KIND, "exchange_code_for_grant");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.token_url(&[
					("grant_type", "authorization_code"),
					("code", code),
					("redirect_uri", self.config.redirect_uri.as_str()),
				]);
				let response = self.get(KIND, &url).await?;

				parse_token_response(&response, OffsetDateTime::now_utc())
			})
			.await;

		if let Err(err) = &result {
			flows::log_failure(err);
		}

		obs::record_call_result(KIND, &result);

		result
	}

	/// Exchanges a refresh token for a new grant.
	pub async fn refresh_grant(&self, refresh_token: &RefreshToken) -> Result<TokenGrant> {
		const KIND: CallKind = CallKind::RefreshToken;

		let span = CallSpan::new(KIND, "refresh_grant");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.token_url(&[
					("grant_type", "refresh_token"),
					("refresh_token", refresh_token.expose()),
				]);
				let response = self.get(KIND, &url).await?;

				parse_token_response(&response, OffsetDateTime::now_utc())
			})
			.await;

		if let Err(err) = &result {
			flows::log_failure(err);
		}

		obs::record_call_result(KIND, &result);

		result
	}

	fn token_url(&self, params: &[(&str, &str)]) -> Url {
		let mut url = self.config.endpoints.token.clone();
		let mut pairs = url.query_pairs_mut();

		if let Some((key, value)) = params.first() {
			pairs.append_pair(key, value);
		}

		pairs.append_pair("client_id", &self.config.app_id);
		pairs.append_pair("client_secret", self.config.app_secret.expose());

		for (key, value) in params.iter().skip(1) {
			pairs.append_pair(key, value);
		}

		drop(pairs);

		url
	}
}

/// Maps a token endpoint response onto a grant or the provider's error.
pub(crate) fn parse_token_response(
	response: &RawResponse,
	issued_at: OffsetDateTime,
) -> Result<TokenGrant> {
	let mut form = response.form();
	let access_token = form.remove("access_token").filter(|value| !value.is_empty());
	let Some(access_token) = access_token else {
		return Err(response.error_envelope()?.into_error(response.call));
	};
	let refresh_token =
		form.remove("refresh_token").filter(|value| !value.is_empty()).map(RefreshToken::new);
	let expires_in = form
		.remove("expires_in")
		.filter(|value| !value.is_empty())
		.and_then(|value| parse_expires_in(response.call, &value));

	Ok(TokenGrant {
		access_token: AccessToken::new(access_token),
		refresh_token,
		expires_in,
		issued_at,
	})
}

fn parse_expires_in(call: CallKind, value: &str) -> Option<Duration> {
	match value.trim().parse::<i64>() {
		Ok(secs) if secs > 0 => Some(Duration::seconds(secs)),
		_ => {
			obs::log_ignored_field(call, "expires_in", value);

			None
		},
	}
}
