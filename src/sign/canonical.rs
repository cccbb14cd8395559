//! Canonical string construction and the keyed MD5 signature derived from it.
//!
//! The canonical string is the signing input shared with the backend, so its format is
//! bit-exact: drop `sign` and blank values, order keys byte-wise ascending, then join
//! `key=encode(value)` pairs with `&`, where `encode` leaves the same characters unescaped as
//! JavaScript's `encodeURIComponent`. The signature is the upper-case hex MD5 digest of
//! `canonical + "&key=" + secret`.

// crates.io
use md5::{Digest, Md5};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
// self
use crate::{
	_prelude::*,
	sign::{ParamValue, ParameterSet},
};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

/// Name of the parameter carrying the signature. Never part of the signing input.
pub const SIGN_FIELD: &str = "sign";

/// Upper-case hex MD5 signature.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);
impl Signature {
	/// Returns the hex string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Signature {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Signature> for String {
	fn from(value: Signature) -> Self {
		value.0
	}
}
impl From<Signature> for ParamValue {
	fn from(value: Signature) -> Self {
		ParamValue::Text(value.0)
	}
}
impl PartialEq<str> for Signature {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}
impl PartialEq<&str> for Signature {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}
impl Debug for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Signature({})", self.0)
	}
}
impl Display for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Returns true if the entry is left out of the canonical string.
pub fn is_excluded(key: &str, value: &ParamValue) -> bool {
	key == SIGN_FIELD || value.is_blank()
}

/// Builds the canonical string for `params`.
///
/// The result depends only on the filtered key/value pairs, never on how the set was built.
pub fn canonicalize(params: &ParameterSet) -> String {
	// `ParameterSet` iterates in byte-wise ascending key order.
	params
		.iter()
		.filter(|(key, value)| !is_excluded(key, value))
		.map(|(key, value)| {
			format!("{key}={}", percent_encoding::utf8_percent_encode(&value.render(), COMPONENT))
		})
		.collect::<Vec<_>>()
		.join("&")
}

/// Signs `params` with `secret`.
pub fn sign(params: &ParameterSet, secret: &str) -> Signature {
	sign_canonical(&canonicalize(params), secret)
}

/// Signs an already canonicalized string with `secret`.
pub fn sign_canonical(canonical: &str, secret: &str) -> Signature {
	let mut hasher = Md5::new();

	hasher.update(canonical.as_bytes());
	hasher.update(b"&key=");
	hasher.update(secret.as_bytes());

	Signature(hex::encode_upper(hasher.finalize()))
}

/// Returns true if `signature` matches the one computed for `params` (ignoring any `sign`
/// entry inside `params`).
pub fn verify(params: &ParameterSet, secret: &str, signature: &str) -> bool {
	sign(params, secret) == signature
}
