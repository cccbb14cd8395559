// std
use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use parking_lot::Mutex;
use tokio::time::{self, Instant};
// self
use callgate::gate::{DebounceGate, Edge, GateOptions, GateOutcome, RateGate};

fn ms(value: u64) -> Duration {
	Duration::from_millis(value)
}

/// Sleeps until `offset` after `start` on the (paused) Tokio clock.
async fn at(start: Instant, offset: u64) {
	time::sleep_until(start + ms(offset)).await;
}

#[tokio::test(start_paused = true)]
async fn throttle_leading_allows_one_call_per_window() {
	let gate = RateGate::with_window(ms(100));
	let fired_at = Arc::new(Mutex::new(Vec::new()));
	let start = Instant::now();
	let mut outcomes = Vec::new();

	for offset in [0, 10, 20, 30, 110] {
		at(start, offset).await;

		let fired_at = fired_at.clone();

		outcomes.push(gate.attempt(move || fired_at.lock().push(start.elapsed())));
	}

	assert_eq!(
		outcomes,
		[
			GateOutcome::Invoked,
			GateOutcome::Suppressed,
			GateOutcome::Suppressed,
			GateOutcome::Suppressed,
			GateOutcome::Invoked,
		]
	);

	let fired_at = fired_at.lock().clone();

	assert_eq!(fired_at.len(), 2);
	assert_eq!(fired_at[0], Duration::ZERO);
	assert!(fired_at[1] >= ms(110) && fired_at[1] <= ms(111));
	assert_eq!(gate.metrics().attempts(), 5);
	assert_eq!(gate.metrics().suppressed(), 3);
}

#[tokio::test(start_paused = true)]
async fn throttle_per_call_window_and_edge_override_defaults() {
	let gate = RateGate::default();
	let hits = Arc::new(AtomicUsize::new(0));
	let hits_ref = hits.clone();

	assert_eq!(gate.options().window, ms(500));
	assert_eq!(gate.options().edge, Edge::Leading);
	assert_eq!(
		gate.attempt_with(
			move || {
				hits_ref.fetch_add(1, Ordering::SeqCst);
			},
			ms(20),
			Edge::Trailing,
		),
		GateOutcome::Scheduled
	);

	time::sleep(ms(25)).await;

	assert_eq!(hits.load(Ordering::SeqCst), 1);
	assert!(!gate.is_active());
}

#[tokio::test(start_paused = true)]
async fn debounce_trailing_fires_once_after_quiescence() {
	let gate = DebounceGate::with_window(ms(100));
	let fired_at = Arc::new(Mutex::new(Vec::new()));
	let start = Instant::now();

	for offset in [0, 50, 90] {
		at(start, offset).await;

		let fired_at = fired_at.clone();

		gate.attempt(move || fired_at.lock().push(start.elapsed()));
	}

	at(start, 189).await;

	assert!(fired_at.lock().is_empty(), "Action must not fire before the burst ends.");

	at(start, 400).await;

	let fired_at = fired_at.lock().clone();

	assert_eq!(fired_at.len(), 1);
	assert!(fired_at[0] >= ms(190) && fired_at[0] <= ms(191));
}

#[tokio::test(start_paused = true)]
async fn debounce_leading_fires_first_call_immediately() {
	let gate = DebounceGate::with_options(GateOptions::new(ms(100), Edge::Leading));
	let hits = Arc::new(AtomicUsize::new(0));
	let start = Instant::now();

	for offset in [0, 30, 60, 90] {
		at(start, offset).await;

		let hits_ref = hits.clone();

		gate.attempt(move || {
			hits_ref.fetch_add(1, Ordering::SeqCst);
		});

		if offset == 0 {
			assert_eq!(hits.load(Ordering::SeqCst), 1, "Leading call must be synchronous.");
		}
	}

	at(start, 500).await;

	assert_eq!(hits.load(Ordering::SeqCst), 1, "Leading mode never makes a trailing call.");
	assert!(!gate.is_pending());
}

#[tokio::test(start_paused = true)]
async fn gates_wrap_async_work_through_spawned_tasks() {
	let gate = Arc::new(DebounceGate::with_window(ms(50)));
	let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

	for i in 0..5 {
		let tx = tx.clone();

		gate.attempt(move || {
			tokio::spawn(async move {
				let _ = tx.send(i);
			});
		});
	}

	drop(tx);

	let mut received = Vec::new();

	while let Some(value) = rx.recv().await {
		received.push(value);
	}

	assert_eq!(received, [4]);
}
