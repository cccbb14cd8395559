// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for a single gate.
#[derive(Debug, Default)]
pub struct GateMetrics {
	attempts: AtomicU64,
	invocations: AtomicU64,
	suppressed: AtomicU64,
}
impl GateMetrics {
	/// Returns the total number of attempts made against the gate.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of actions that actually ran (leading or trailing).
	pub fn invocations(&self) -> u64 {
		self.invocations.load(Ordering::Relaxed)
	}

	/// Returns the number of attempts dropped by an active window or pending timer.
	pub fn suppressed(&self) -> u64 {
		self.suppressed.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_invocation(&self) {
		self.invocations.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_suppressed(&self) {
		self.suppressed.fetch_add(1, Ordering::Relaxed);
	}
}
