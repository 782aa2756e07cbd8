//! Typed async client for QQ Connect sign-in: login URLs, code exchange, OpenID/UnionID
//! resolution, and profile lookup over the provider's callback-wrapped wire format.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod codec;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AppId, AppSecret},
		config::{ConnectConfig, ConnectEndpoints},
		flows::ConnectClient,
		http::ReqwestHttpClient,
		transport::ReqwestTransportErrorMapper,
	};

	/// Application identifier used by the test fixtures.
	pub const TEST_APP_ID: &str = "101234567";
	/// Application secret used by the test fixtures.
	pub const TEST_APP_SECRET: &str = "test-app-secret";
	/// Redirect URI used by the test fixtures.
	pub const TEST_REDIRECT_URI: &str = "https://app.example.com/qq/callback";

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ConnectClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds the fixture configuration with every endpoint relocated under `base`.
	pub fn test_config(base: &str) -> ConnectConfig {
		let base = Url::parse(base).expect("Failed to parse test endpoint base URL.");
		let endpoints =
			ConnectEndpoints::with_base(&base).expect("Failed to relocate test endpoints.");

		ConnectConfig::builder(
			AppId::new(TEST_APP_ID).expect("Test app identifier should be valid."),
			AppSecret::new(TEST_APP_SECRET),
			TEST_REDIRECT_URI,
		)
		.endpoints(endpoints)
		.build()
		.expect("Failed to build test configuration.")
	}

	/// Constructs a [`ConnectClient`] whose endpoints live under `base`, using the reqwest
	/// transport shared across integration tests.
	pub fn build_reqwest_test_client(base: &str) -> ReqwestTestClient {
		ConnectClient::with_http_client(
			test_config(base),
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
