// crates.io
use serde_json::json;
// self
use callgate::{
	cipher::{self, Decrypted, SymmetricCipher},
	error::CipherError,
};

const KEY: &str = "0123456789abcdef";
const IV: &str = "fedcba9876543210";

#[test]
fn hello_world_round_trips() {
	let sealed = cipher::encrypt("hello world", KEY, IV).expect("Valid material should encrypt.");
	let opened = cipher::decrypt(&sealed, KEY, IV).expect("Round trip should decrypt.");

	assert_eq!(opened.as_text(), Some("hello world"));
}

#[test]
fn json_plaintext_comes_back_structured() {
	let sealed = cipher::encrypt(r#"{"x":1}"#, KEY, IV).expect("Valid material should encrypt.");
	let opened = cipher::decrypt(&sealed, KEY, IV).expect("Round trip should decrypt.");

	assert_eq!(opened, Decrypted::Structured(json!({ "x": 1 })));
	assert_eq!(opened.into_value()["x"], json!(1));
}

#[test]
fn raw_text_decrypt_skips_classification() {
	let cipher = SymmetricCipher::new(KEY, IV).expect("Cipher fixture should build.");
	let sealed = cipher.encrypt("[oops").expect("Valid material should encrypt.");

	assert!(matches!(cipher.decrypt(&sealed), Err(CipherError::MalformedStructure { .. })));
	assert_eq!(cipher.decrypt_text(&sealed).expect("Raw decrypt should succeed."), "[oops");
}

#[test]
fn encrypt_value_serializes_first() {
	let cipher = SymmetricCipher::new(KEY, IV).expect("Cipher fixture should build.");
	let sealed =
		cipher.encrypt_value(&json!(["a", 1, null])).expect("JSON value should encrypt.");

	assert_eq!(
		cipher.decrypt(&sealed).expect("Round trip should decrypt.").as_structured(),
		Some(&json!(["a", 1, null]))
	);
}

#[test]
fn invalid_material_is_a_usage_error() {
	assert!(matches!(
		cipher::encrypt("x", "too-short", IV),
		Err(CipherError::InvalidKeyLength { len: 9 })
	));
	assert!(matches!(
		cipher::decrypt("AAAA", KEY, "short-iv"),
		Err(CipherError::InvalidIvLength { len: 8 })
	));
}
