//! Authorization redirect URL construction.
//!
//! The URL embeds the application id, the configured redirect URI exactly as supplied at
//! construction, and the caller's state. No request is made and nothing is stored; callers
//! keep the state and compare it with the one echoed on the redirect.

// self
use crate::{
	_prelude::*, flows::ConnectClient, http::ConnectHttpClient, transport::TransportErrorMapper,
};

const SCOPE_DELIMITER: char = ',';

/// Page layout requested from the authorization endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginDisplay {
	#[default]
	/// Desktop layout.
	Pc,
	/// Mobile layout.
	Mobile,
}
impl LoginDisplay {
	/// Returns the provider's `display` parameter value.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoginDisplay::Pc => "pc",
			LoginDisplay::Mobile => "mobile",
		}
	}
}

/// Parameters for [`ConnectClient::login_url_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginRequest {
	/// Opaque CSRF state echoed back on the redirect.
	pub state: String,
	/// OpenAPI names to request consent for (for example `get_user_info`); empty means the
	/// provider default.
	pub scope: Vec<String>,
	/// Requested page layout; `None` leaves the provider default.
	pub display: Option<LoginDisplay>,
}
impl LoginRequest {
	/// Creates a request carrying only the state.
	pub fn new(state: impl Into<String>) -> Self {
		Self { state: state.into(), scope: Vec::new(), display: None }
	}

	/// Requests consent for the given APIs.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = scope.into_iter().map(Into::into).collect();

		self
	}

	/// Overrides the page layout.
	pub fn with_display(mut self, display: LoginDisplay) -> Self {
		self.display = Some(display);

		self
	}

	fn scope_param(&self) -> Option<String> {
		let mut buf = String::new();

		for value in self.scope.iter().filter(|value| !value.is_empty()) {
			if !buf.is_empty() {
				buf.push(SCOPE_DELIMITER);
			}

			buf.push_str(value);
		}

		if buf.is_empty() { None } else { Some(buf) }
	}
}

impl<C, M> ConnectClient<C, M>
where
	C: ?Sized + ConnectHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the URL users are sent to for login. Deterministic and side-effect free.
	pub fn login_url(&self, state: &str) -> String {
		self.login_url_with(&LoginRequest::new(state))
	}

	/// Builds the login URL with optional scope and display parameters.
	pub fn login_url_with(&self, request: &LoginRequest) -> String {
		let authorize = &self.config.endpoints.authorize;
		let separator = if authorize.query().is_some() { '&' } else { '?' };
		let mut url = format!(
			"{authorize}{separator}response_type=code&client_id={}&redirect_uri={}&state={}",
			self.config.app_id,
			self.config.redirect_uri,
			encode(&request.state),
		);

		if let Some(scope) = request.scope_param() {
			url.push_str("&scope=");
			url.push_str(&encode(&scope));
		}
		if let Some(display) = request.display {
			url.push_str("&display=");
			url.push_str(display.as_str());
		}

		url
	}
}

fn encode(value: &str) -> String {
	url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
