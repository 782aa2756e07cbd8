//! Optional observability helpers for QQ Connect calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `qq_connect.call` with the `call` and
//!   `stage` (call site) fields, plus `warn` events for provider rejections.
//! - Enable `metrics` to increment the `qq_connect_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Provider calls observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
	/// Authorization code exchange against the token endpoint.
	ExchangeCode,
	/// Refresh token exchange against the token endpoint.
	RefreshToken,
	/// OpenID/UnionID lookup against the identity endpoint.
	ResolveIdentity,
	/// `get_user_info` lookup against the profile endpoint.
	FetchProfile,
	/// Composite code exchange + identity + profile helper.
	SignIn,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::ExchangeCode => "exchange_code",
			CallKind::RefreshToken => "refresh_token",
			CallKind::ResolveIdentity => "resolve_identity",
			CallKind::FetchProfile => "fetch_profile",
			CallKind::SignIn => "sign_in",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(CallKind::ExchangeCode.to_string(), "exchange_code");
		assert_eq!(CallKind::ResolveIdentity.as_str(), "resolve_identity");
		assert_eq!(CallOutcome::Failure.to_string(), "failure");
		assert_eq!(
			serde_json::to_string(&CallKind::FetchProfile).expect("CallKind should serialize."),
			"\"fetch_profile\""
		);
	}
}
