//! Random nonces drawn from an alphabet without visually ambiguous characters.

// crates.io
use rand::Rng;

/// Characters a nonce is drawn from (no `0/O/o`, `1/I/l/L`, `9/g/q`, `U/u/V/v`).
pub const NONCE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTWXYZabcdefhijkmnprstwxyz2345678";
/// Default nonce length.
pub const DEFAULT_NONCE_LEN: usize = 6;

/// Generates a nonce of `len` characters from [`NONCE_ALPHABET`].
pub fn random_nonce(len: usize) -> String {
	let mut rng = rand::rng();

	(0..len).map(|_| char::from(NONCE_ALPHABET[rng.random_range(0..NONCE_ALPHABET.len())])).collect()
}
