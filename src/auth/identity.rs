//! Identifiers resolved from an access token.

// self
use crate::{
	_prelude::*,
	auth::{AppId, OpenId, UnionId},
};

/// Identifiers returned by the identity endpoint.
///
/// `open_id` is scoped to one application. `union_id` is shared by every application a
/// developer operates on the QQ Connect platform, so it is the identifier to key accounts
/// on when more than one application signs users in. The provider omits it for
/// applications without UnionID access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentitySet {
	/// Application the token was issued to.
	pub client_id: AppId,
	/// Application-scoped user identifier.
	pub open_id: OpenId,
	/// Platform-scoped user identifier.
	pub union_id: Option<UnionId>,
}
impl IdentitySet {
	/// UnionID when present, otherwise the OpenID.
	pub fn account_key(&self) -> &str {
		self.union_id.as_deref().unwrap_or(&self.open_id)
	}
}
