//! Client credentials and protocol version used when signing requests.

// self
use crate::{_prelude::*, error::ConfigError, secret::ApiSecret};

/// Credentials and version injected into every signed request.
///
/// Field names follow the backend's JSON convention (`apikey`, `apiSecret`, `version`). Missing
/// credentials deserialize as empty and are rejected by [`validate`](Self::validate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Public API key sent with every request.
	#[serde(default)]
	pub apikey: String,
	/// Shared secret used only for signing; never sent.
	#[serde(default, rename = "apiSecret")]
	pub api_secret: ApiSecret,
	/// Protocol version; defaults to `1.0`.
	#[serde(default = "ClientConfig::default_version")]
	pub version: String,
}
impl ClientConfig {
	/// Version sent when none is configured.
	pub const DEFAULT_VERSION: &'static str = "1.0";

	/// Creates a config with the default version.
	pub fn new(apikey: impl Into<String>, api_secret: impl Into<ApiSecret>) -> Self {
		Self {
			apikey: apikey.into(),
			api_secret: api_secret.into(),
			version: Self::default_version(),
		}
	}

	/// Overrides the protocol version.
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();

		self
	}

	/// Parses a JSON document and validates it.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let config: Self = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::Malformed { source })?;

		config.validate()?;

		Ok(config)
	}

	/// Rejects configs without an API key or secret.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.apikey.trim().is_empty() {
			return Err(ConfigError::MissingApiKey);
		}
		if self.api_secret.is_empty() {
			return Err(ConfigError::MissingApiSecret);
		}

		Ok(())
	}

	fn default_version() -> String {
		Self::DEFAULT_VERSION.into()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn json_uses_backend_field_names() {
		let config = ClientConfig::from_json(r#"{"apikey":"K","apiSecret":"S"}"#)
			.expect("Config with credentials should parse.");

		assert_eq!(config.apikey, "K");
		assert_eq!(config.api_secret.expose(), "S");
		assert_eq!(config.version, ClientConfig::DEFAULT_VERSION);
	}

	#[test]
	fn missing_credentials_are_config_errors() {
		assert!(matches!(
			ClientConfig::from_json(r#"{"apiSecret":"S"}"#),
			Err(ConfigError::MissingApiKey)
		));
		assert!(matches!(
			ClientConfig::new("K", "").validate(),
			Err(ConfigError::MissingApiSecret)
		));
	}

	#[test]
	fn malformed_document_reports_field_path() {
		let err = ClientConfig::from_json(r#"{"apikey":"K","apiSecret":"S","version":2}"#)
			.expect_err("Numeric version should be rejected.");

		match err {
			ConfigError::Malformed { source } => assert_eq!(source.path().to_string(), "version"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}
}
