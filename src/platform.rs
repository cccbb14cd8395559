//! Host platform labels injected into every signed request.

// self
use crate::_prelude::*;

/// Platform label reported to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	/// Native app on iOS.
	Ios,
	/// Native app on Android.
	Android,
	/// Native app on any other OS.
	App,
	/// WeChat mini program.
	Wx,
	/// Alipay mini program.
	Alipay,
	/// Baidu mini program.
	Baidu,
	/// QQ mini program.
	Qq,
	/// Toutiao mini program.
	Toutiao,
	/// Quick app.
	Kuai,
	/// Unknown host. Signed requests carry no platform parameter.
	#[default]
	Undefined,
}
impl Platform {
	/// Maps a build target (`app-plus`, `mp-weixin`, ...) and, for native apps, the device OS
	/// onto a platform label.
	pub fn from_build_target(target: &str, device_os: Option<&str>) -> Self {
		match target {
			"app-plus" => match device_os.map(str::to_ascii_lowercase).as_deref() {
				Some("ios") => Self::Ios,
				Some("android") => Self::Android,
				_ => Self::App,
			},
			"mp-weixin" => Self::Wx,
			"mp-alipay" => Self::Alipay,
			"mp-baidu" => Self::Baidu,
			"mp-qq" => Self::Qq,
			"mp-toutiao" => Self::Toutiao,
			"quickapp-webview" => Self::Kuai,
			_ => Self::Undefined,
		}
	}

	/// Returns the wire label; `None` for [`Platform::Undefined`].
	pub const fn label(self) -> Option<&'static str> {
		match self {
			Self::Ios => Some("ios"),
			Self::Android => Some("android"),
			Self::App => Some("app"),
			Self::Wx => Some("wx"),
			Self::Alipay => Some("alipay"),
			Self::Baidu => Some("baidu"),
			Self::Qq => Some("qq"),
			Self::Toutiao => Some("toutiao"),
			Self::Kuai => Some("kuai"),
			Self::Undefined => None,
		}
	}
}
impl Display for Platform {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.label().unwrap_or("undefined"))
	}
}

/// Source of the current platform label.
pub trait PlatformDetector
where
	Self: Send + Sync,
{
	/// Returns the platform the process is running on.
	fn current_platform(&self) -> Platform;
}

/// Detector that always reports the same platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticPlatform(pub Platform);
impl PlatformDetector for StaticPlatform {
	fn current_platform(&self) -> Platform {
		self.0
	}
}

/// Detector that reads the build target from an environment variable and the device OS from
/// the compilation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvPlatform {
	/// Environment variable holding the build target.
	pub variable: String,
}
impl EnvPlatform {
	/// Default environment variable name.
	pub const DEFAULT_VARIABLE: &'static str = "APP_PLATFORM";

	/// Creates a detector reading `variable`.
	pub fn new(variable: impl Into<String>) -> Self {
		Self { variable: variable.into() }
	}
}
impl Default for EnvPlatform {
	fn default() -> Self {
		Self::new(Self::DEFAULT_VARIABLE)
	}
}
impl PlatformDetector for EnvPlatform {
	fn current_platform(&self) -> Platform {
		std::env::var(&self.variable)
			.map(|target| Platform::from_build_target(&target, Some(std::env::consts::OS)))
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn build_targets_map_to_labels() {
		assert_eq!(Platform::from_build_target("app-plus", Some("iOS")), Platform::Ios);
		assert_eq!(Platform::from_build_target("app-plus", Some("android")), Platform::Android);
		assert_eq!(Platform::from_build_target("app-plus", Some("linux")), Platform::App);
		assert_eq!(Platform::from_build_target("app-plus", None), Platform::App);
		assert_eq!(Platform::from_build_target("mp-weixin", None), Platform::Wx);
		assert_eq!(Platform::from_build_target("quickapp-webview", None), Platform::Kuai);
		assert_eq!(Platform::from_build_target("h5", None), Platform::Undefined);
	}

	#[test]
	fn undefined_has_no_label() {
		assert_eq!(Platform::Undefined.label(), None);
		assert_eq!(Platform::Toutiao.label(), Some("toutiao"));
		assert_eq!(Platform::Undefined.to_string(), "undefined");
	}

	#[test]
	fn env_detector_without_variable_is_undefined() {
		let detector = EnvPlatform::new("CALLGATE_TEST_PLATFORM_UNSET");

		assert_eq!(detector.current_platform(), Platform::Undefined);
	}

	#[test]
	fn serde_uses_wire_labels() {
		assert_eq!(
			serde_json::to_string(&Platform::Alipay).expect("Platform should serialize."),
			"\"alipay\""
		);
	}
}
