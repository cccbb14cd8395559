//! Polling waiter that resolves once an auth token has been published.

// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::{
	_prelude::*,
	auth::TokenSlot,
	error::WaitError,
	obs::{self, OpKind, OpSpan},
	secret::AuthToken,
};

/// Polling cadence and budget for a [`TokenWaiter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
	/// Delay between two slot checks.
	pub poll_interval: Duration,
	/// Maximum number of slot checks; `None` waits forever.
	pub max_attempts: Option<u32>,
}
impl WaitPolicy {
	const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

	/// Overrides the poll interval.
	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;

		self
	}

	/// Bounds the wait to `attempts` slot checks.
	///
	/// The slot is always checked at least once, so `0` is treated as `1`.
	pub fn with_max_attempts(mut self, attempts: u32) -> Self {
		self.max_attempts = Some(attempts.max(1));

		self
	}
}
impl Default for WaitPolicy {
	fn default() -> Self {
		Self { poll_interval: Self::DEFAULT_POLL_INTERVAL, max_attempts: None }
	}
}

/// Resolves to the current auth token, polling the slot until one appears.
///
/// Every call runs its own poll loop; concurrent callers do not share a wait. With the default
/// policy the wait is unbounded and never fails.
#[derive(Clone)]
pub struct TokenWaiter {
	slot: Arc<dyn TokenSlot>,
	policy: WaitPolicy,
}
impl TokenWaiter {
	/// Creates a waiter over the provided slot with the default policy.
	pub fn new(slot: Arc<dyn TokenSlot>) -> Self {
		Self { slot, policy: WaitPolicy::default() }
	}

	/// Replaces the wait policy.
	pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Active wait policy.
	pub fn policy(&self) -> WaitPolicy {
		self.policy
	}

	/// Waits until the slot holds a token.
	///
	/// Only fails with [`WaitError::TimedOut`] when the policy bounds the number of polls.
	pub async fn resolve_token(&self) -> Result<AuthToken, WaitError> {
		self.poll(None).await
	}

	/// Same as [`resolve_token`](Self::resolve_token) but stops with [`WaitError::Cancelled`]
	/// once `cancel` fires.
	pub async fn resolve_token_with(
		&self,
		cancel: &CancellationToken,
	) -> Result<AuthToken, WaitError> {
		self.poll(Some(cancel)).await
	}

	async fn poll(&self, cancel: Option<&CancellationToken>) -> Result<AuthToken, WaitError> {
		let span = OpSpan::open(OpKind::TokenWait, "resolve_token");
		let result = span
			.instrument(async move {
				let mut attempts = 0_u32;

				loop {
					if cancel.is_some_and(CancellationToken::is_cancelled) {
						return Err(WaitError::Cancelled);
					}

					attempts = attempts.saturating_add(1);

					if let Some(token) = self.slot.current_token() {
						obs::record_wait_polls(attempts);
						obs::trace_event!(attempts, "auth token resolved");

						return Ok(token);
					}
					if self.policy.max_attempts.is_some_and(|max| attempts >= max) {
						obs::record_wait_polls(attempts);

						return Err(WaitError::TimedOut { attempts });
					}

					let delay = tokio::time::sleep(self.policy.poll_interval);

					match cancel {
						Some(cancel) =>
							if cancel.run_until_cancelled(delay).await.is_none() {
								return Err(WaitError::Cancelled);
							},
						None => delay.await,
					}
				}
			})
			.await;

		span.close_with(&result);

		result
	}
}
impl Debug for TokenWaiter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenWaiter").field("policy", &self.policy).finish()
	}
}
