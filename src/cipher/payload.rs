//! Post-decrypt classification of recovered plaintext.

// self
use crate::{_prelude::*, error::CipherError};

/// Plaintext recovered by [`decrypt`](crate::cipher::decrypt).
#[derive(Clone, Debug, PartialEq)]
pub enum Decrypted {
	/// Plain text that does not look like JSON.
	Text(String),
	/// JSON object or array re-hydrated from text starting with `{` or `[`.
	Structured(serde_json::Value),
}
impl Decrypted {
	/// Returns the text, if the payload was not classified as JSON.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Decrypted::Text(text) => Some(text),
			Decrypted::Structured(_) => None,
		}
	}

	/// Returns the JSON value, if the payload was classified as JSON.
	pub fn as_structured(&self) -> Option<&serde_json::Value> {
		match self {
			Decrypted::Text(_) => None,
			Decrypted::Structured(value) => Some(value),
		}
	}

	/// Converts into a JSON value; text becomes a JSON string.
	pub fn into_value(self) -> serde_json::Value {
		match self {
			Decrypted::Text(text) => serde_json::Value::String(text),
			Decrypted::Structured(value) => value,
		}
	}
}

/// Classifies decrypted text by its first character.
///
/// Text starting with `{` or `[` is parsed as JSON; if that fails the payload is reported as
/// [`CipherError::MalformedStructure`] rather than silently returned as text. Anything else is
/// returned unchanged.
pub fn classify(text: String) -> Result<Decrypted, CipherError> {
	match text.chars().next() {
		Some('{' | '[') => serde_json::from_str(&text)
			.map(Decrypted::Structured)
			.map_err(|source| CipherError::MalformedStructure { source }),
		_ => Ok(Decrypted::Text(text)),
	}
}
