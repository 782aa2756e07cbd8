//! Token endpoint grant parsed from the form-encoded success body.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RefreshToken},
};

/// Access token plus the metadata QQ Connect returns with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Access token used by the identity and profile endpoints.
	pub access_token: AccessToken,
	/// Refresh token for `grant_type=refresh_token`, when supplied.
	pub refresh_token: Option<RefreshToken>,
	/// Lifetime reported by `expires_in`, when supplied.
	pub expires_in: Option<Duration>,
	/// Local time at which the grant was decoded.
	pub issued_at: OffsetDateTime,
}
impl TokenGrant {
	/// Instant after which the access token is no longer valid, when the lifetime is known.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_in.map(|lifetime| self.issued_at + lifetime)
	}

	/// Whether the access token is expired at `now`. Grants without a lifetime never expire
	/// locally; the provider remains the authority.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|deadline| now >= deadline)
	}
}
