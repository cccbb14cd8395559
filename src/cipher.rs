//! AES-CBC payload encryption with PKCS#7 padding and base64 transport encoding.
//!
//! Decryption is two steps: the cipher recovers UTF-8 text, then [`classify`] decides whether
//! that text is JSON. Callers that never want the JSON sniffing use
//! [`SymmetricCipher::decrypt_text`].

pub mod material;
pub mod payload;

pub use material::*;
pub use payload::*;

// crates.io
use aes::{
	Aes128, Aes192, Aes256,
	cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::CipherError,
	obs::{OpKind, OpSpan},
};

/// Encrypts `plaintext` with a key/IV given as UTF-8 strings.
pub fn encrypt(plaintext: &str, key: &str, iv: &str) -> Result<String, CipherError> {
	SymmetricCipher::new(key, iv)?.encrypt(plaintext)
}

/// Decrypts base64 `ciphertext` with a key/IV given as UTF-8 strings, re-hydrating JSON.
pub fn decrypt(ciphertext: &str, key: &str, iv: &str) -> Result<Decrypted, CipherError> {
	SymmetricCipher::new(key, iv)?.decrypt(ciphertext)
}

/// AES-CBC cipher bound to one key/IV pair.
#[derive(Clone, Debug)]
pub struct SymmetricCipher {
	material: CipherMaterial,
}
impl SymmetricCipher {
	/// Creates a cipher from UTF-8 key and IV strings.
	pub fn new(key: &str, iv: &str) -> Result<Self, CipherError> {
		Ok(Self { material: CipherMaterial::new(key, iv)? })
	}

	/// Creates a cipher from pre-validated material.
	pub fn with_material(material: CipherMaterial) -> Self {
		Self { material }
	}

	/// Key/IV material in use.
	pub fn material(&self) -> &CipherMaterial {
		&self.material
	}

	/// Encrypts UTF-8 text and returns standard base64.
	pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
		let span = OpSpan::open(OpKind::Encrypt, "encrypt");
		let _entered = span.enter();
		let result = self.seal(plaintext.as_bytes()).map(|sealed| STANDARD.encode(sealed));

		span.close_with(&result);

		result
	}

	/// Serializes `value` to JSON, then encrypts it.
	pub fn encrypt_value<T>(&self, value: &T) -> Result<String, CipherError>
	where
		T: ?Sized + Serialize,
	{
		let json =
			serde_json::to_string(value).map_err(|source| CipherError::Serialize { source })?;

		self.encrypt(&json)
	}

	/// Decrypts base64 ciphertext and classifies the recovered text.
	pub fn decrypt(&self, ciphertext: &str) -> Result<Decrypted, CipherError> {
		self.decrypt_text(ciphertext).and_then(classify)
	}

	/// Decrypts base64 ciphertext to text without JSON classification.
	pub fn decrypt_text(&self, ciphertext: &str) -> Result<String, CipherError> {
		let span = OpSpan::open(OpKind::Decrypt, "decrypt_text");
		let _entered = span.enter();
		let result = STANDARD
			.decode(ciphertext.trim())
			.map_err(CipherError::from)
			.and_then(|bytes| self.open(&bytes))
			.and_then(|plain| String::from_utf8(plain).map_err(CipherError::from));

		span.close_with(&result);

		result
	}

	/// Decrypts base64 ciphertext and decodes the JSON plaintext into `T`.
	pub fn decrypt_as<T>(&self, ciphertext: &str) -> Result<T, CipherError>
	where
		T: DeserializeOwned,
	{
		let text = self.decrypt_text(ciphertext)?;
		let mut de = serde_json::Deserializer::from_str(&text);

		serde_path_to_error::deserialize(&mut de).map_err(|source| CipherError::Decode { source })
	}

	fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
		let (key, iv) = (self.material.key(), self.material.iv());

		match self.material.variant() {
			AesVariant::Aes128 => seal_with::<cbc::Encryptor<Aes128>>(key, iv, plaintext),
			AesVariant::Aes192 => seal_with::<cbc::Encryptor<Aes192>>(key, iv, plaintext),
			AesVariant::Aes256 => seal_with::<cbc::Encryptor<Aes256>>(key, iv, plaintext),
		}
	}

	fn open(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
		let (key, iv) = (self.material.key(), self.material.iv());

		match self.material.variant() {
			AesVariant::Aes128 => open_with::<cbc::Decryptor<Aes128>>(key, iv, ciphertext),
			AesVariant::Aes192 => open_with::<cbc::Decryptor<Aes192>>(key, iv, ciphertext),
			AesVariant::Aes256 => open_with::<cbc::Decryptor<Aes256>>(key, iv, ciphertext),
		}
	}
}

fn seal_with<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
where
	E: KeyIvInit + BlockEncryptMut,
{
	let encryptor = E::new_from_slices(key, iv)
		.map_err(|_| CipherError::InvalidKeyLength { len: key.len() })?;

	Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn open_with<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>
where
	D: KeyIvInit + BlockDecryptMut,
{
	let decryptor = D::new_from_slices(key, iv)
		.map_err(|_| CipherError::InvalidKeyLength { len: key.len() })?;

	decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).map_err(|_| CipherError::Padding)
}
