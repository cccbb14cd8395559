//! Optional observability for gates, token waits, ciphers, and request builders.
//!
//! Every operation opens an [`OpSpan`], which counts the attempt and is closed with exactly one
//! [`OpOutcome`].
//!
//! # Feature Flags
//!
//! - `tracing`: debug-level `callgate.op` spans with `op`, `stage`, and `outcome` fields. Gate
//!   attempts also carry `edge` and `window_ms`.
//! - `metrics`: the [`OP_TOTAL`] counter labeled by `op` + `outcome`, and the
//!   [`TOKEN_WAIT_POLLS`] histogram fed by every settled token wait.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operation kinds observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Throttle gate attempt.
	Throttle,
	/// Debounce gate attempt.
	Debounce,
	/// Waiting for an auth token to appear.
	TokenWait,
	/// Symmetric encryption.
	Encrypt,
	/// Symmetric decryption.
	Decrypt,
	/// Signed parameter construction.
	BuildRequest,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Throttle => "throttle",
			OpKind::Debounce => "debounce",
			OpKind::TokenWait => "token_wait",
			OpKind::Encrypt => "encrypt",
			OpKind::Decrypt => "decrypt",
			OpKind::BuildRequest => "build_request",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Attempt swallowed by an active gate window.
	Suppressed,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
			OpOutcome::Suppressed => "suppressed",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
