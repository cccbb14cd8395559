//! Execution-rate gates that suppress or collapse repeated triggers.
//!
//! [`RateGate`] is a throttle: one invocation per window, on the leading or trailing edge.
//! [`DebounceGate`] collapses a burst into a single invocation once the burst goes quiet.
//!
//! Both gates arm their timers on the ambient Tokio runtime, so `attempt*` must be called from
//! inside one. Actions always run with the gate lock released; an action may call back into
//! its own gate. Dropping a gate aborts its pending timer.

pub mod debounce;
mod metrics;
pub mod throttle;

pub use debounce::DebounceGate;
pub use metrics::GateMetrics;
pub use throttle::RateGate;

// crates.io
use tokio::task::JoinHandle;
// self
use crate::_prelude::*;

/// Default window used by both gates.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Boxed callback invoked by a gate.
pub type GateAction = Box<dyn FnOnce() + Send + 'static>;

/// Which edge of the window fires the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
	/// Fire immediately, then suppress for the window.
	Leading,
	/// Fire once the window elapses.
	Trailing,
}
impl Edge {
	/// Returns the snake_case label used in serde and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Leading => "leading",
			Self::Trailing => "trailing",
		}
	}
}

/// Per-gate defaults used by `attempt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateOptions {
	/// Suppression (throttle) or quiescence (debounce) window.
	pub window: Duration,
	/// Edge that fires the action.
	pub edge: Edge,
}
impl GateOptions {
	/// Creates options for the provided window + edge.
	pub const fn new(window: Duration, edge: Edge) -> Self {
		Self { window, edge }
	}

	/// Overrides the window.
	pub fn with_window(mut self, window: Duration) -> Self {
		self.window = window;

		self
	}

	/// Overrides the edge.
	pub fn with_edge(mut self, edge: Edge) -> Self {
		self.edge = edge;

		self
	}
}

/// What a single gate attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateOutcome {
	/// The action ran synchronously inside the attempt.
	Invoked,
	/// The action was (re)scheduled to run when the timer fires.
	Scheduled,
	/// The attempt was dropped by an active window or pending timer.
	Suppressed,
}

/// Mutable state owned by a single gate instance.
///
/// `active` means a window is open (throttle) or a timer is pending (debounce). Each armed
/// timer carries the generation it was armed under; a timer whose generation is stale never
/// touches the state.
#[derive(Debug, Default)]
pub struct GateState {
	active: bool,
	generation: u64,
	pending: Option<JoinHandle<()>>,
}
impl GateState {
	/// Returns true while a window is open or a timer is pending.
	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Returns true if a timer is armed and has not finished.
	pub fn has_pending_timer(&self) -> bool {
		self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
	}

	/// Aborts the pending timer (if any) and bumps the generation.
	fn disarm(&mut self) -> u64 {
		if let Some(handle) = self.pending.take() {
			handle.abort();
		}

		self.generation = self.generation.wrapping_add(1);

		self.generation
	}

	/// Clears the active flag if `generation` is still current. Returns whether it was.
	fn settle(&mut self, generation: u64) -> bool {
		if self.generation != generation {
			return false;
		}

		self.active = false;
		self.pending = None;

		true
	}

	fn reset(&mut self) {
		self.disarm();

		self.active = false;
	}
}

type SharedState = Arc<Mutex<GateState>>;

/// Arms a timer on the ambient runtime. When it fires and `generation` is still current, the
/// gate settles and `on_fire` runs with the lock released.
fn arm_timer(
	state: &SharedState,
	generation: u64,
	window: Duration,
	on_fire: Option<GateAction>,
) -> JoinHandle<()> {
	let state = state.clone();

	tokio::spawn(async move {
		tokio::time::sleep(window).await;

		let current = state.lock().settle(generation);

		if current && let Some(action) = on_fire {
			action();
		}
	})
}

fn boxed<F>(action: F) -> GateAction
where
	F: 'static + Send + FnOnce(),
{
	Box::new(action)
}
