//! CSRF state round-tripped through the authorization redirect.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

const STATE_LEN: usize = 32;

/// Opaque value echoed back by the provider after login.
///
/// The client never stores it; callers keep it (session, signed cookie) between building the
/// login URL and handling the redirect, then call [`AuthorizationState::verify`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationState(String);
impl AuthorizationState {
	/// Wraps a caller-supplied state value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Generates a random 32-character alphanumeric state.
	pub fn generate() -> Self {
		Self(rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect())
	}

	/// Returns the state value.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Validates the `state` parameter returned by the authorization redirect.
	pub fn verify(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.0 { Ok(()) } else { Err(Error::StateMismatch) }
	}
}
impl AsRef<str> for AuthorizationState {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for AuthorizationState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthorizationState").field(&self.0).finish()
	}
}
impl Display for AuthorizationState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn generated_states_are_alphanumeric_and_distinct() {
		let first = AuthorizationState::generate();
		let second = AuthorizationState::generate();

		assert_eq!(first.as_str().len(), STATE_LEN);
		assert!(first.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}

	#[test]
	fn verify_errors_on_mismatch() {
		let state = AuthorizationState::new("expected");

		assert!(state.verify("expected").is_ok());

		let err = state.verify("other").expect_err("State mismatch should fail.");

		assert!(matches!(err, Error::StateMismatch));
	}
}
