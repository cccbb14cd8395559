//! Crate-level error types shared across gates, signers, ciphers, and request builders.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Cipher misuse or malformed ciphertext.
	#[error(transparent)]
	Cipher(#[from] CipherError),
	/// Bounded or cancelled token wait gave up.
	#[error(transparent)]
	Wait(#[from] WaitError),
	/// Transport failure reported by the caller-supplied transport.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `apikey` is missing or empty.
	#[error("Client configuration is missing the apikey.")]
	MissingApiKey,
	/// `apiSecret` is missing or empty.
	#[error("Client configuration is missing the apiSecret.")]
	MissingApiSecret,
	/// Nonce length must be at least one character.
	#[error("Nonce length must be positive.")]
	ZeroNonceLength,
	/// Client configuration document could not be parsed.
	#[error("Client configuration is malformed.")]
	Malformed {
		/// Structured parsing failure, including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Cipher usage and decoding failures. None of these are retried.
#[derive(Debug, ThisError)]
pub enum CipherError {
	/// Key length does not select an AES variant.
	#[error("Cipher key must be 16, 24, or 32 bytes, got {len}.")]
	InvalidKeyLength {
		/// Byte length of the supplied key.
		len: usize,
	},
	/// IV length does not match the AES block size.
	#[error("Cipher IV must be 16 bytes, got {len}.")]
	InvalidIvLength {
		/// Byte length of the supplied IV.
		len: usize,
	},
	/// Ciphertext is not valid base64.
	#[error("Ciphertext is not valid base64.")]
	Base64(#[from] base64::DecodeError),
	/// Ciphertext length or PKCS#7 padding is invalid.
	#[error("Ciphertext has invalid length or padding.")]
	Padding,
	/// Recovered plaintext is not UTF-8.
	#[error("Decrypted payload is not valid UTF-8.")]
	Utf8(#[from] std::string::FromUtf8Error),
	/// Plaintext looked like JSON (leading `{` or `[`) but did not parse.
	#[error("Decrypted payload starts like JSON but is malformed.")]
	MalformedStructure {
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// Value could not be serialized before encryption.
	#[error("Payload could not be serialized to JSON.")]
	Serialize {
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// Decrypted JSON does not match the requested type.
	#[error("Decrypted payload does not match the requested type.")]
	Decode {
		/// Structured decoding failure, including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Reasons a token wait stops without a token.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum WaitError {
	/// The configured poll budget ran out.
	#[error("No auth token appeared after {attempts} polls.")]
	TimedOut {
		/// Number of polls performed.
		attempts: u32,
	},
	/// The caller cancelled the wait.
	#[error("Token wait was cancelled.")]
	Cancelled,
}

/// Transport-level failures surfaced by [`RequestTransport`](crate::transport::RequestTransport)
/// implementations.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying client reported a network failure.
	#[error("Network error occurred while sending the signed request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the signed request.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
