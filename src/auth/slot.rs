//! Read-only token slot contract and the in-process implementation.

// std
use std::sync::OnceLock;
// self
use crate::{_prelude::*, secret::AuthToken};

/// Process-wide slot holding the current auth token, populated by an external auth flow.
///
/// Waiters only observe the slot; they never create or invalidate tokens.
pub trait TokenSlot
where
	Self: Send + Sync,
{
	/// Returns the current token, if one has been published.
	fn current_token(&self) -> Option<AuthToken>;
}

/// Thread-safe in-memory slot for tests, demos, and hosts that publish tokens in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenSlot(Arc<RwLock<Option<AuthToken>>>);
impl MemoryTokenSlot {
	/// Returns the process-wide slot shared by every caller of this function.
	pub fn global() -> &'static MemoryTokenSlot {
		static GLOBAL: OnceLock<MemoryTokenSlot> = OnceLock::new();

		GLOBAL.get_or_init(MemoryTokenSlot::default)
	}

	/// Publishes (or replaces) the current token.
	pub fn set(&self, token: impl Into<AuthToken>) {
		*self.0.write() = Some(token.into());
	}

	/// Removes the current token and returns it.
	pub fn clear(&self) -> Option<AuthToken> {
		self.0.write().take()
	}
}
impl TokenSlot for MemoryTokenSlot {
	fn current_token(&self) -> Option<AuthToken> {
		self.0.read().as_ref().filter(|token| !token.is_empty()).cloned()
	}
}
