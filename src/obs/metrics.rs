// self
use crate::obs::{OpKind, OpOutcome};

/// Counter incremented once per operation outcome, labeled by `op` and `outcome`.
pub const OP_TOTAL: &str = "callgate_op_total";
/// Histogram of slot checks a token wait performed before it settled.
pub const TOKEN_WAIT_POLLS: &str = "callgate_token_wait_polls";

/// Counts `outcome` for `kind` on the global recorder (no-op without the `metrics` feature).
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(OP_TOTAL, "op" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how many slot checks a settled token wait took.
pub fn record_wait_polls(polls: u32) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(TOKEN_WAIT_POLLS).record(f64::from(polls));
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = polls;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_accept_every_label() {
		for kind in [
			OpKind::Throttle,
			OpKind::Debounce,
			OpKind::TokenWait,
			OpKind::Encrypt,
			OpKind::Decrypt,
			OpKind::BuildRequest,
		] {
			record_op_outcome(kind, OpOutcome::Suppressed);
		}

		record_wait_polls(3);

		assert!(OP_TOTAL.starts_with("callgate_") && TOKEN_WAIT_POLLS.starts_with("callgate_"));
	}
}
