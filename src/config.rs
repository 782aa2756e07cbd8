//! Application credentials and endpoint set consumed by [`ConnectClient`](crate::flows::ConnectClient).
//!
//! Configuration is assembled programmatically through [`ConnectConfigBuilder`] and validated
//! once; every later call trusts it. The endpoint set defaults to `graph.qq.com` and can be
//! relocated wholesale (mock servers, egress proxies) with [`ConnectEndpoints::with_base`].

// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	auth::{AppId, AppSecret},
	error::ConfigError,
};

const DEFAULT_BASE: &str = "https://graph.qq.com/";
const AUTHORIZE_PATH: &str = "oauth2.0/authorize";
const TOKEN_PATH: &str = "oauth2.0/token";
const IDENTITY_PATH: &str = "oauth2.0/me";
const PROFILE_PATH: &str = "user/get_user_info";

/// Endpoint set used by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectEndpoints {
	/// Authorization endpoint users are redirected to.
	pub authorize: Url,
	/// Token endpoint for code and refresh exchanges.
	pub token: Url,
	/// Identity endpoint resolving OpenID/UnionID.
	pub identity: Url,
	/// `get_user_info` endpoint.
	pub profile: Url,
}
impl ConnectEndpoints {
	/// Derives all four endpoints from a base URL using the provider's path layout.
	pub fn with_base(base: &Url) -> Result<Self, ConfigError> {
		let join = |endpoint: &'static str, path: &str| {
			base.join(path).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
		};

		Ok(Self {
			authorize: join("authorize", AUTHORIZE_PATH)?,
			token: join("token", TOKEN_PATH)?,
			identity: join("identity", IDENTITY_PATH)?,
			profile: join("profile", PROFILE_PATH)?,
		})
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_endpoint("authorize", &self.authorize)?;
		validate_endpoint("token", &self.token)?;
		validate_endpoint("identity", &self.identity)?;
		validate_endpoint("profile", &self.profile)?;

		Ok(())
	}
}
impl Default for ConnectEndpoints {
	fn default() -> Self {
		let base = Url::parse(DEFAULT_BASE).expect("Default QQ Connect base URL must parse.");

		Self::with_base(&base).expect("Default QQ Connect endpoints must join.")
	}
}

/// Immutable client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectConfig {
	/// Application identifier.
	pub app_id: AppId,
	/// Application secret.
	pub app_secret: AppSecret,
	/// Redirect URI registered with the provider, kept exactly as supplied.
	pub redirect_uri: String,
	/// Endpoint set.
	pub endpoints: ConnectEndpoints,
}
impl ConnectConfig {
	/// Creates a builder seeded with the three required values.
	pub fn builder(
		app_id: AppId,
		app_secret: AppSecret,
		redirect_uri: impl Into<String>,
	) -> ConnectConfigBuilder {
		ConnectConfigBuilder::new(app_id, app_secret, redirect_uri)
	}

	/// Validates the three required values against the default endpoints.
	pub fn new(
		app_id: impl AsRef<str>,
		app_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Self::builder(AppId::new(app_id)?, AppSecret::new(app_secret), redirect_uri).build()
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.app_secret.is_empty() {
			return Err(ConfigError::EmptySecret);
		}

		validate_redirect(&self.redirect_uri)?;

		self.endpoints.validate()
	}
}

/// Builder for [`ConnectConfig`] values.
#[derive(Debug)]
pub struct ConnectConfigBuilder {
	/// Application identifier.
	pub app_id: AppId,
	/// Application secret.
	pub app_secret: AppSecret,
	/// Redirect URI registered with the provider.
	pub redirect_uri: String,
	/// Endpoint set; defaults to `graph.qq.com`.
	pub endpoints: ConnectEndpoints,
}
impl ConnectConfigBuilder {
	/// Creates a new builder with the default endpoint set.
	pub fn new(app_id: AppId, app_secret: AppSecret, redirect_uri: impl Into<String>) -> Self {
		Self {
			app_id,
			app_secret,
			redirect_uri: redirect_uri.into(),
			endpoints: ConnectEndpoints::default(),
		}
	}

	/// Overrides the endpoint set.
	pub fn endpoints(mut self, endpoints: ConnectEndpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ConnectConfig, ConfigError> {
		let config = ConnectConfig {
			app_id: self.app_id,
			app_secret: self.app_secret,
			redirect_uri: self.redirect_uri,
			endpoints: self.endpoints,
		};

		config.validate()?;

		Ok(config)
	}
}

fn validate_redirect(uri: &str) -> Result<(), ConfigError> {
	if uri.is_empty() {
		return Err(ConfigError::EmptyRedirect);
	}

	let parsed = Url::parse(uri).map_err(|source| ConfigError::InvalidRedirect { source })?;

	if parsed.fragment().is_some() {
		return Err(ConfigError::RedirectHasFragment { uri: uri.to_owned() });
	}
	// Embedded verbatim in the login URL query.
	if let Some(character) = uri.chars().find(|c| is_unsafe_redirect_char(*c)) {
		return Err(ConfigError::UnsafeRedirect { uri: uri.to_owned(), character });
	}

	Ok(())
}

fn is_unsafe_redirect_char(c: char) -> bool {
	matches!(c, '&' | '#' | '+' | '%') || c.is_whitespace() || !c.is_ascii() || c.is_ascii_control()
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() == "https" || is_loopback(url) {
		Ok(())
	} else {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.is_ok_and(|ip| ip.is_loopback()),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn app_id() -> AppId {
		AppId::new("101234567").expect("App identifier fixture should be valid.")
	}

	#[test]
	fn default_endpoints_point_at_graph_qq_com() {
		let endpoints = ConnectEndpoints::default();

		assert_eq!(endpoints.authorize.as_str(), "https://graph.qq.com/oauth2.0/authorize");
		assert_eq!(endpoints.token.as_str(), "https://graph.qq.com/oauth2.0/token");
		assert_eq!(endpoints.identity.as_str(), "https://graph.qq.com/oauth2.0/me");
		assert_eq!(endpoints.profile.as_str(), "https://graph.qq.com/user/get_user_info");
	}

	#[test]
	fn config_keeps_redirect_verbatim() {
		let config = ConnectConfig::new("101234567", "secret", "https://app.example.com")
			.expect("Configuration should build for valid values.");

		assert_eq!(config.redirect_uri, "https://app.example.com");
		assert_eq!(config.app_id.as_ref(), "101234567");
	}

	#[test]
	fn config_rejects_missing_values() {
		assert!(matches!(
			ConnectConfig::new("", "secret", "https://app.example.com/cb"),
			Err(ConfigError::InvalidIdentifier(_))
		));
		assert!(matches!(
			ConnectConfig::new("101234567", "", "https://app.example.com/cb"),
			Err(ConfigError::EmptySecret)
		));
		assert!(matches!(
			ConnectConfig::new("101234567", "secret", ""),
			Err(ConfigError::EmptyRedirect)
		));
		assert!(matches!(
			ConnectConfig::new("101234567", "secret", "/relative/cb"),
			Err(ConfigError::InvalidRedirect { .. })
		));
		assert!(matches!(
			ConnectConfig::new("101234567", "secret", "https://app.example.com/cb#top"),
			Err(ConfigError::RedirectHasFragment { .. })
		));
	}

	#[test]
	fn config_rejects_redirects_that_break_the_login_query() {
		for (uri, expected) in [
			("https://app.example.com/cb?from=qq&next=/home", '&'),
			("https://app.example.com/cb?next=%2Fhome", '%'),
			("https://app.example.com/cb?q=a+b", '+'),
			("https://app.example.com/c b", ' '),
			("https://app.example.com/回调", '回'),
		] {
			match ConnectConfig::new("101234567", "secret", uri) {
				Err(ConfigError::UnsafeRedirect { uri: rejected, character }) => {
					assert_eq!(rejected, uri);
					assert_eq!(character, expected);
				},
				other => panic!("Unexpected result for {uri}: {other:?}."),
			}
		}

		ConnectConfig::new("101234567", "secret", "https://app.example.com/cb?from=qq")
			.expect("A single query pair is safe to embed.");
	}

	#[test]
	fn endpoints_require_https_except_loopback() {
		let plain = Url::parse("http://graph.example.com/").expect("Base URL should parse.");
		let err = ConnectConfig::builder(app_id(), AppSecret::new("secret"), "https://a.example/cb")
			.endpoints(ConnectEndpoints::with_base(&plain).expect("Endpoints should join."))
			.build()
			.expect_err("Plain HTTP endpoints must be rejected.");

		assert!(matches!(err, ConfigError::InsecureEndpoint { endpoint: "authorize", .. }));

		for base in ["http://127.0.0.1:8080/", "http://localhost:8080/", "http://[::1]:8080/"] {
			let base = Url::parse(base).expect("Loopback base URL should parse.");

			ConnectConfig::builder(app_id(), AppSecret::new("secret"), "https://a.example/cb")
				.endpoints(ConnectEndpoints::with_base(&base).expect("Endpoints should join."))
				.build()
				.expect("Loopback endpoints should be accepted.");
		}
	}

	#[test]
	fn with_base_keeps_path_prefix() {
		let base = Url::parse("https://proxy.example.com/qq/").expect("Base URL should parse.");
		let endpoints = ConnectEndpoints::with_base(&base).expect("Endpoints should join.");

		assert_eq!(endpoints.token.as_str(), "https://proxy.example.com/qq/oauth2.0/token");
	}
}
