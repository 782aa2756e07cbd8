//! `get_user_info` profile record.

// self
use crate::_prelude::*;

/// Flat profile record returned by the profile endpoint.
///
/// The provider sends every flag as a string (`"0"` / `"1"`); the raw values are kept as
/// received and the typed accessors interpret them. `ret` is required so that a body missing
/// the status code fails to decode instead of passing as a blank profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
	/// Status code; `0` on success.
	pub ret: i64,
	/// Status message; empty on success.
	#[serde(default)]
	pub msg: String,
	/// Display nickname.
	#[serde(default)]
	pub nickname: String,
	/// Avatar type marker.
	#[serde(default, rename = "figureurl_type")]
	pub figure_url_type: String,
	/// 30×30 space avatar.
	#[serde(default, rename = "figureurl")]
	pub figure_url: String,
	/// 50×50 space avatar.
	#[serde(default, rename = "figureurl_1")]
	pub figure_url_1: String,
	/// 100×100 space avatar.
	#[serde(default, rename = "figureurl_2")]
	pub figure_url_2: String,
	/// 640×640 QQ avatar.
	#[serde(default, rename = "figureurl_qq")]
	pub figure_url_qq: String,
	/// 40×40 QQ avatar.
	#[serde(default, rename = "figureurl_qq_1")]
	pub figure_url_qq_1: String,
	/// 100×100 QQ avatar; may be empty.
	#[serde(default, rename = "figureurl_qq_2")]
	pub figure_url_qq_2: String,
	/// Gender label; the provider reports `男` when unset.
	#[serde(default)]
	pub gender: String,
	/// Numeric gender code.
	#[serde(default)]
	pub gender_type: i64,
	/// Province.
	#[serde(default)]
	pub province: String,
	/// City.
	#[serde(default)]
	pub city: String,
	/// Birth year as sent by the provider.
	#[serde(default)]
	pub year: String,
	/// Constellation label.
	#[serde(default)]
	pub constellation: String,
	/// Yellow diamond membership flag.
	#[serde(default)]
	pub is_yellow_vip: String,
	/// Annual yellow diamond membership flag.
	#[serde(default)]
	pub is_yellow_year_vip: String,
	/// Yellow diamond level.
	#[serde(default)]
	pub yellow_vip_level: String,
	/// VIP flag.
	#[serde(default)]
	pub vip: String,
	/// VIP level.
	#[serde(default)]
	pub level: String,
	/// Undocumented provider flag.
	#[serde(default)]
	pub is_lost: i64,
}
impl ProfileInfo {
	/// Whether the provider reported success.
	pub fn is_success(&self) -> bool {
		self.ret == 0
	}

	/// Whether the user holds a yellow diamond membership.
	pub fn is_yellow_vip(&self) -> bool {
		flag(&self.is_yellow_vip)
	}

	/// Whether the yellow diamond membership is annual.
	pub fn is_yellow_year_vip(&self) -> bool {
		flag(&self.is_yellow_year_vip)
	}

	/// Whether the user is a VIP.
	pub fn is_vip(&self) -> bool {
		flag(&self.vip)
	}

	/// Yellow diamond level, when present and numeric.
	pub fn yellow_vip_level(&self) -> Option<u32> {
		self.yellow_vip_level.trim().parse().ok()
	}

	/// Birth year, when present and numeric.
	pub fn birth_year(&self) -> Option<i32> {
		self.year.trim().parse().ok()
	}

	/// Highest-resolution avatar the provider returned.
	pub fn largest_avatar(&self) -> Option<&str> {
		[
			&self.figure_url_qq,
			&self.figure_url_qq_2,
			&self.figure_url_2,
			&self.figure_url_1,
			&self.figure_url_qq_1,
			&self.figure_url,
		]
		.into_iter()
		.map(String::as_str)
		.find(|url| !url.is_empty())
	}
}

fn flag(raw: &str) -> bool {
	raw.trim() == "1"
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const SAMPLE: &str = r#"{
		"ret": 0,
		"msg": "",
		"is_lost": 0,
		"nickname": "Alice",
		"gender": "女",
		"gender_type": 2,
		"province": "广东",
		"city": "深圳",
		"year": "1995",
		"constellation": "",
		"figureurl": "http://qzapp.qlogo.cn/qzapp/101234567/4B2F/30",
		"figureurl_1": "http://qzapp.qlogo.cn/qzapp/101234567/4B2F/50",
		"figureurl_2": "http://qzapp.qlogo.cn/qzapp/101234567/4B2F/100",
		"figureurl_qq_1": "http://thirdqq.qlogo.cn/g?b=oidb&k=x&s=40",
		"figureurl_qq_2": "",
		"figureurl_qq": "",
		"figureurl_type": "1",
		"is_yellow_vip": "1",
		"vip": "0",
		"yellow_vip_level": "6",
		"level": "0",
		"is_yellow_year_vip": "0"
	}"#;

	#[test]
	fn accessors_interpret_string_flags() {
		let profile: ProfileInfo =
			serde_json::from_str(SAMPLE).expect("Profile sample should deserialize.");

		assert!(profile.is_success());
		assert_eq!(profile.nickname, "Alice");
		assert!(profile.is_yellow_vip());
		assert!(!profile.is_yellow_year_vip());
		assert!(!profile.is_vip());
		assert_eq!(profile.yellow_vip_level(), Some(6));
		assert_eq!(profile.birth_year(), Some(1995));
		assert_eq!(
			profile.largest_avatar(),
			Some("http://qzapp.qlogo.cn/qzapp/101234567/4B2F/100")
		);
	}

	#[test]
	fn missing_status_code_is_rejected() {
		assert!(serde_json::from_str::<ProfileInfo>(r#"{"nickname":"Alice"}"#).is_err());

		let blank: ProfileInfo =
			serde_json::from_str(r#"{"ret":0}"#).expect("Bare status should deserialize.");

		assert_eq!(blank.largest_avatar(), None);
		assert_eq!(blank.birth_year(), None);
	}
}
