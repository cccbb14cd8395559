//! Key and IV material for the AES-CBC cipher.

// self
use crate::{_prelude::*, error::CipherError};

/// AES block size in bytes; also the required IV length.
pub const BLOCK_SIZE: usize = 16;

/// AES variant selected by the key length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AesVariant {
	/// 16-byte key.
	Aes128,
	/// 24-byte key.
	Aes192,
	/// 32-byte key.
	Aes256,
}
impl AesVariant {
	/// Picks the variant for a key of `len` bytes.
	pub fn for_key_len(len: usize) -> Result<Self, CipherError> {
		match len {
			16 => Ok(Self::Aes128),
			24 => Ok(Self::Aes192),
			32 => Ok(Self::Aes256),
			_ => Err(CipherError::InvalidKeyLength { len }),
		}
	}
}

/// Validated key + IV pair. Both are taken verbatim from the caller's UTF-8 strings.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherMaterial {
	variant: AesVariant,
	key: Vec<u8>,
	iv: [u8; BLOCK_SIZE],
}
impl CipherMaterial {
	/// Builds material from the UTF-8 bytes of `key` and `iv`.
	pub fn new(key: &str, iv: &str) -> Result<Self, CipherError> {
		Self::from_bytes(key.as_bytes(), iv.as_bytes())
	}

	/// Builds material from raw bytes.
	pub fn from_bytes(key: &[u8], iv: &[u8]) -> Result<Self, CipherError> {
		let variant = AesVariant::for_key_len(key.len())?;
		let iv = <[u8; BLOCK_SIZE]>::try_from(iv)
			.map_err(|_| CipherError::InvalidIvLength { len: iv.len() })?;

		Ok(Self { variant, key: key.to_vec(), iv })
	}

	/// AES variant implied by the key length.
	pub fn variant(&self) -> AesVariant {
		self.variant
	}

	pub(crate) fn key(&self) -> &[u8] {
		&self.key
	}

	pub(crate) fn iv(&self) -> &[u8] {
		&self.iv
	}
}
impl Debug for CipherMaterial {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CipherMaterial")
			.field("variant", &self.variant)
			.field("key", &"<redacted>")
			.field("iv", &"<redacted>")
			.finish()
	}
}
