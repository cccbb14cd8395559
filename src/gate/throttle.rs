//! Leading/trailing-edge throttle.

// self
use crate::{
	_prelude::*,
	gate::{
		self, DEFAULT_WINDOW, Edge, GateAction, GateMetrics, GateOptions, GateOutcome,
		SharedState,
	},
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Throttle gate: at most one action per window.
///
/// The first attempt while the gate is idle opens a window. In [`Edge::Leading`] mode the
/// action runs immediately; in [`Edge::Trailing`] mode it runs when the window closes. Every
/// attempt made while the window is open is dropped, not queued. Only the window timer clears
/// the active flag.
#[derive(Debug)]
pub struct RateGate {
	state: SharedState,
	options: GateOptions,
	metrics: Arc<GateMetrics>,
}
impl RateGate {
	/// Creates a gate with the provided defaults.
	pub fn with_options(options: GateOptions) -> Self {
		Self { state: Default::default(), options, metrics: Default::default() }
	}

	/// Creates a leading-edge gate with the provided window.
	pub fn with_window(window: Duration) -> Self {
		Self::with_options(GateOptions::new(window, Edge::Leading))
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

	/// Opens a window without an action. Consumes the window like a real attempt.
	pub fn attempt_noop(&self) -> GateOutcome {
		self.attempt_inner(None, self.options.window, self.options.edge)
	}

	/// Returns true while a window is open.
	pub fn is_active(&self) -> bool {
		self.state.lock().is_active()
	}

	/// Aborts the open window (and any trailing action) and returns the gate to idle.
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
		let span = OpSpan::gate(OpKind::Throttle, edge, window);
		let _entered = span.enter();

		self.metrics.record_attempt();

		let mut state = self.state.lock();

		if state.is_active() {
			drop(state);
			self.metrics.record_suppressed();
			span.close(OpOutcome::Suppressed);
			obs::trace_event!("throttle attempt suppressed");

			return GateOutcome::Suppressed;
		}

		let generation = state.disarm();

		state.active = true;

		let outcome = match edge {
			Edge::Leading => {
				state.pending = Some(gate::arm_timer(&self.state, generation, window, None));

				drop(state);

				if let Some(action) = action {
					self.metrics.record_invocation();
					action();
				}

				GateOutcome::Invoked
			},
			Edge::Trailing => {
				let on_fire = action.map(|action| self.counted(action));

				state.pending = Some(gate::arm_timer(&self.state, generation, window, on_fire));

				GateOutcome::Scheduled
			},
		};

		span.close(OpOutcome::Success);

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
impl Default for RateGate {
	fn default() -> Self {
		Self::with_options(GateOptions::new(DEFAULT_WINDOW, Edge::Leading))
	}
}
impl Drop for RateGate {
	fn drop(&mut self) {
		self.state.lock().reset();
	}
}
