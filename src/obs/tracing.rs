// std
use std::marker::PhantomData;
// self
use crate::{
	_prelude::*,
	gate::Edge,
	obs::{self, OpKind, OpOutcome},
};

/// Future returned by [`OpSpan::instrument`]; the bare future when tracing is disabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`OpSpan::instrument`]; the bare future when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// One observed operation.
///
/// Opening counts an `attempt` on `callgate_op_total`. [`close`](Self::close) stamps the final
/// outcome on the `callgate.op` span's `outcome` field and counts it as well; close each span
/// once.
#[derive(Clone, Debug)]
pub struct OpSpan {
	kind: OpKind,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Opens a span for `kind` at `stage`.
	pub fn open(kind: OpKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!(
				"callgate.op",
				op = kind.as_str(),
				stage,
				outcome = tracing::field::Empty
			);

			Self::started(kind, span)
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self::started(kind)
		}
	}

	/// Opens a gate attempt span tagged with the effective edge and window.
	pub fn gate(kind: OpKind, edge: Edge, window: Duration) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!(
				"callgate.op",
				op = kind.as_str(),
				stage = "attempt",
				edge = edge.as_str(),
				window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
				outcome = tracing::field::Empty
			);

			Self::started(kind, span)
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (edge, window);

			Self::started(kind)
		}
	}

	fn started(kind: OpKind, #[cfg(feature = "tracing")] span: tracing::Span) -> Self {
		obs::record_op_outcome(kind, OpOutcome::Attempt);

		Self {
			kind,
			#[cfg(feature = "tracing")]
			span,
		}
	}

	/// Operation kind this span observes.
	pub fn kind(&self) -> OpKind {
		self.kind
	}

	/// Records the final outcome.
	pub fn close(&self, outcome: OpOutcome) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome.as_str());
		}

		obs::record_op_outcome(self.kind, outcome);
	}

	/// Closes as `success` or `failure` depending on `result`.
	pub fn close_with<T, E>(&self, result: &Result<T, E>) {
		self.close(if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure });
	}

	/// Enters the span for a synchronous section.
	pub fn enter(&self) -> EnteredOp<'_> {
		EnteredOp {
			#[cfg(feature = "tracing")]
			_entered: self.span.enter(),
			_op: PhantomData,
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Guard returned by [`OpSpan::enter`]; the span is exited on drop.
pub struct EnteredOp<'a> {
	#[cfg(feature = "tracing")]
	_entered: tracing::span::Entered<'a>,
	_op: PhantomData<&'a OpSpan>,
}
impl Debug for EnteredOp<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("EnteredOp(..)")
	}
}

/// Emits a debug event inside the current span when tracing is enabled.
macro_rules! trace_event {
	($($arg:tt)*) => {
		#[cfg(feature = "tracing")]
		{
			tracing::debug!($($arg)*);
		}
	};
}
pub(crate) use trace_event;
