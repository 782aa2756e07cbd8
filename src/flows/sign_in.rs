//! Callback-handler helper chaining the three network operations.

// self
use crate::{
	_prelude::*,
	auth::{IdentitySet, ProfileInfo, TokenGrant},
	flows::ConnectClient,
	http::ConnectHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::TransportErrorMapper,
};

/// Everything learned about a user from one authorization code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignIn {
	/// Grant returned by the code exchange.
	pub grant: TokenGrant,
	/// Identifiers resolved from the access token.
	pub identity: IdentitySet,
	/// Profile of the signed-in user.
	pub profile: ProfileInfo,
}

impl<C, M> ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges `code`, resolves the identity, and fetches the profile, in that order.
	///
	/// The first failing step aborts the chain and its error is returned unchanged.
	pub async fn sign_in(&self, code: &str) -> Result<SignIn> {
		const KIND: CallKind = CallKind::SignIn;

		let span = CallSpan::new(KIND, "sign_in");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let grant = self.exchange_code_for_grant(code).await?;
				let identity = self.resolve_identity(&grant.access_token).await?;
				let profile = self.fetch_profile(&grant.access_token, &identity.open_id).await?;

				Ok(SignIn { grant, identity, profile })
			})
			.await;

		obs::record_call_result(KIND, &result);

		result
	}
}
