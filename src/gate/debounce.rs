//! Burst-collapsing debounce.

// self
use crate::{
	_prelude::*,
	gate::{
		self, DEFAULT_WINDOW, Edge, GateAction, GateMetrics, GateOptions, GateOutcome,
		SharedState,
	},
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Debounce gate: a burst of attempts yields exactly one action.
///
/// Every attempt cancels the timer armed by the previous one, so only the last attempt of a
/// burst survives. In [`Edge::Trailing`] mode the surviving action runs once the gate has been
/// quiet for the window. In [`Edge::Leading`] mode the first attempt of a burst runs
/// immediately; the timer then only marks the end of the burst and no trailing call is made.
#[derive(Debug)]
pub struct DebounceGate {
	state: SharedState,
	options: GateOptions,
	metrics: Arc<GateMetrics>,
}
impl DebounceGate {
	/// Creates a gate with the provided defaults.
	pub fn with_options(options: GateOptions) -> Self {
		Self { state: Default::default(), options, metrics: Default::default() }
	}

	/// Creates a trailing-edge gate with the provided quiescence window.
	pub fn with_window(window: Duration) -> Self {
		Self::with_options(GateOptions::new(window, Edge::Trailing))
	}

	/// Defaults applied by [`attempt`](Self::attempt).
	pub fn options(&self) -> GateOptions {
		self.options
	}

	/// Attempts to run `action` using the gate defaults.
	pub fn attempt<F>(&self, action: F) -> GateOutcome
	where
		F: 'static + Send + FnOnce(),
	{
		self.attempt_inner(Some(gate::boxed(action)), self.options.window, self.options.edge)
	}

	/// Attempts to run `action` with a per-call window and edge.
	pub fn attempt_with<F>(&self, action: F, window: Duration, edge: Edge) -> GateOutcome
	where
		F: 'static + Send + FnOnce(),
	{
		self.attempt_inner(Some(gate::boxed(action)), window, edge)
	}

	/// Restarts the quiescence window without an action.
	pub fn attempt_noop(&self) -> GateOutcome {
		self.attempt_inner(None, self.options.window, self.options.edge)
	}

	/// Returns true while a timer is pending.
	pub fn is_pending(&self) -> bool {
		self.state.lock().is_active()
	}

	/// Drops the pending action (if any) and returns the gate to idle.
	pub fn cancel(&self) {
		self.state.lock().reset();
	}

	/// Counters for this gate.
	pub fn metrics(&self) -> &GateMetrics {
		&self.metrics
	}

	fn attempt_inner(
		&self,
		action: Option<GateAction>,
		window: Duration,
		edge: Edge,
	) -> GateOutcome {
		let span = OpSpan::gate(OpKind::Debounce, edge, window);
		let _entered = span.enter();

		self.metrics.record_attempt();

		let mut state = self.state.lock();
		let was_pending = state.is_active();
		let generation = state.disarm();

		state.active = true;

		let outcome = match edge {
			Edge::Trailing => {
				let on_fire = action.map(|action| self.counted(action));

				state.pending = Some(gate::arm_timer(&self.state, generation, window, on_fire));

				GateOutcome::Scheduled
			},
			Edge::Leading => {
				state.pending = Some(gate::arm_timer(&self.state, generation, window, None));

				drop(state);

				if was_pending {
					GateOutcome::Suppressed
				} else {
					if let Some(action) = action {
						self.metrics.record_invocation();
						action();
					}

					GateOutcome::Invoked
				}
			},
		};

		if was_pending {
			self.metrics.record_suppressed();
			span.close(OpOutcome::Suppressed);
			obs::trace_event!("debounce superseded");
		} else {
			span.close(OpOutcome::Success);
		}

		outcome
	}

	fn counted(&self, action: GateAction) -> GateAction {
		let metrics = self.metrics.clone();

		gate::boxed(move || {
			metrics.record_invocation();
			action();
		})
	}
}
impl Default for DebounceGate {
	fn default() -> Self {
		Self::with_options(GateOptions::new(DEFAULT_WINDOW, Edge::Trailing))
	}
}
impl Drop for DebounceGate {
	fn drop(&mut self) {
		self.state.lock().reset();
	}
}
