//! Builds a login URL and, when `QQ_AUTH_CODE` is set, completes the sign-in against the live
//! provider.
//!
//! Reads `QQ_APP_ID`, `QQ_APP_SECRET`, and `QQ_REDIRECT_URI` from the environment, falling back
//! to placeholder values that only work for the URL step. Completing the sign-in also needs
//! `QQ_ISSUED_STATE` (the state printed by an earlier run) and `QQ_STATE` (the one on the
//! redirect); a mismatch aborts before the code is exchanged.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use qq_connect::{
	auth::AuthorizationState,
	config::ConnectConfig,
	flows::{LoginDisplay, LoginRequest, ReqwestConnectClient},
};

fn env_or(key: &str, fallback: &str) -> String {
	env::var(key).unwrap_or_else(|_| fallback.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ConnectConfig::new(
		env_or("QQ_APP_ID", "101234567"),
		env_or("QQ_APP_SECRET", "demo-secret"),
		env_or("QQ_REDIRECT_URI", "https://app.example.com/qq/callback"),
	)?;
	let client = ReqwestConnectClient::new(config);
	let state = AuthorizationState::generate();
	let request = LoginRequest::new(state.as_str())
		.with_scope(["get_user_info"])
		.with_display(LoginDisplay::Pc);

	println!("Send your user to {}.", client.login_url_with(&request));
	println!("Keep state `{state}` to compare with the redirect.");

	let Ok(code) = env::var("QQ_AUTH_CODE") else {
		println!("Set QQ_AUTH_CODE, QQ_STATE, and QQ_ISSUED_STATE to finish the sign-in.");

		return Ok(());
	};
	// The state issued before the redirect and the one the redirect carried back.
	let issued = AuthorizationState::new(
		env::var("QQ_ISSUED_STATE")
			.map_err(|_| eyre!("QQ_ISSUED_STATE is required when QQ_AUTH_CODE is set."))?,
	);
	let returned_state = env::var("QQ_STATE")
		.map_err(|_| eyre!("QQ_STATE is required when QQ_AUTH_CODE is set."))?;

	issued.verify(&returned_state)?;

	let sign_in = client.sign_in(&code).await?;

	println!(
		"Signed in {} (account key {}).",
		sign_in.profile.nickname,
		sign_in.identity.account_key()
	);

	if let Some(expires_at) = sign_in.grant.expires_at() {
		println!("Access token expires at {expires_at}.");
	}

	Ok(())
}
