// crates.io
use httpmock::prelude::*;
// self
use qq_connect::{
	_preludet::*,
	auth::{AccessToken, OpenId},
	obs::CallKind,
};

const TOKEN_PATH: &str = "/oauth2.0/token";
const IDENTITY_PATH: &str = "/oauth2.0/me";
const PROFILE_PATH: &str = "/user/get_user_info";

#[tokio::test]
async fn resolve_identity_reads_wrapped_identifiers() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(IDENTITY_PATH)
				.query_param("access_token", "ABC123")
				.query_param("unionid", "1");
			then.status(200)
				.header("content-type", "application/x-javascript")
				.body("callback( {\"client_id\":\"X\",\"openid\":\"O1\",\"unionid\":\"U1\"} );\n");
		})
		.await;
	let identity = client
		.resolve_identity(&AccessToken::new("ABC123"))
		.await
		.expect("Identity lookup should succeed.");

	mock.assert_async().await;

	assert_eq!(identity.client_id.as_ref(), "X");
	assert_eq!(identity.open_id.as_ref(), "O1");
	assert_eq!(identity.union_id.as_deref(), Some("U1"));
}

#[tokio::test]
async fn resolve_identity_reports_error_envelope() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(IDENTITY_PATH);
			then.status(200).body(
				"callback( {\"error\":100016,\"error_description\":\"access token check failed\"} );\n",
			);
		})
		.await;
	let err = client
		.resolve_identity(&AccessToken::new("expired"))
		.await
		.expect_err("Expired tokens must not resolve.");

	mock.assert_async().await;

	match err {
		Error::Provider { call, code, message } => {
			assert_eq!(call, CallKind::ResolveIdentity);
			assert_eq!(code, 100016);
			assert_eq!(message, "access token check failed");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn fetch_profile_sends_consumer_key_and_open_id() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(PROFILE_PATH)
				.query_param("access_token", "ABC123")
				.query_param("oauth_consumer_key", TEST_APP_ID)
				.query_param("openid", "O1");
			then.status(200).header("content-type", "application/json").body(
				r#"{"ret":0,"msg":"","nickname":"Alice","gender":"女","province":"广东","city":"深圳","year":"1990","figureurl_qq_1":"https://q.qlogo.cn/40","figureurl_qq_2":"https://q.qlogo.cn/100","is_yellow_vip":"1","yellow_vip_level":"6"}"#,
			);
		})
		.await;
	let open_id = OpenId::new("O1").expect("Open identifier fixture should be valid.");
	let profile = client
		.fetch_profile(&AccessToken::new("ABC123"), &open_id)
		.await
		.expect("Profile lookup should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.nickname, "Alice");
	assert_eq!(profile.gender, "女");
	assert_eq!(profile.birth_year(), Some(1990));
	assert!(profile.is_yellow_vip());
	assert_eq!(profile.yellow_vip_level(), Some(6));
	assert_eq!(profile.largest_avatar(), Some("https://q.qlogo.cn/100"));
}

#[tokio::test]
async fn fetch_profile_reports_non_zero_status() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).body(r#"{"ret":1,"msg":"token expired"}"#);
		})
		.await;
	let open_id = OpenId::new("O1").expect("Open identifier fixture should be valid.");
	let err = client
		.fetch_profile(&AccessToken::new("expired"), &open_id)
		.await
		.expect_err("Non-zero status must fail.");

	mock.assert_async().await;

	match err {
		Error::Provider { call, code, message } => {
			assert_eq!(call, CallKind::FetchProfile);
			assert_eq!(code, 1);
			assert_eq!(message, "token expired");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn sign_in_chains_exchange_identity_and_profile() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(TOKEN_PATH).query_param("code", "auth-code");
			then.status(200).body("access_token=ABC123&expires_in=7776000&refresh_token=R1");
		})
		.await;
	let identity_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(IDENTITY_PATH).query_param("access_token", "ABC123");
			then.status(200)
				.body("callback( {\"client_id\":\"101234567\",\"openid\":\"O1\"} );\n");
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(PROFILE_PATH)
				.query_param("access_token", "ABC123")
				.query_param("openid", "O1");
			then.status(200).body(r#"{"ret":0,"msg":"","nickname":"Alice"}"#);
		})
		.await;
	let sign_in = client.sign_in("auth-code").await.expect("Sign-in should succeed.");

	token_mock.assert_async().await;
	identity_mock.assert_async().await;
	profile_mock.assert_async().await;

	assert_eq!(sign_in.grant.access_token.expose(), "ABC123");
	assert_eq!(sign_in.identity.client_id.as_ref(), TEST_APP_ID);
	assert_eq!(sign_in.identity.union_id, None);
	assert_eq!(sign_in.identity.account_key(), "O1");
	assert_eq!(sign_in.profile.nickname, "Alice");
}

#[tokio::test]
async fn sign_in_stops_at_first_failure() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(TOKEN_PATH);
			then.status(200)
				.body("callback({\"error\":100016,\"error_description\":\"invalid code\"});\n");
		})
		.await;
	let identity_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(IDENTITY_PATH);
			then.status(200).body("callback( {\"client_id\":\"X\",\"openid\":\"O1\"} );\n");
		})
		.await;
	let err = client.sign_in("stale").await.expect_err("Failed exchange must abort sign-in.");

	token_mock.assert_async().await;
	identity_mock.assert_calls_async(0).await;

	assert!(matches!(err, Error::Provider { call: CallKind::ExchangeCode, code: 100016, .. }));
}
