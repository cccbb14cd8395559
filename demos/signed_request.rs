//! Builds a token-gated signed request, debounced behind a burst of triggers, and round-trips an
//! encrypted payload.

// std
use std::{sync::Arc, time::Duration};
// crates.io
use color_eyre::Result;
// self
use callgate::{
	auth::{MemoryTokenSlot, TokenWaiter},
	cipher::SymmetricCipher,
	gate::DebounceGate,
	platform::EnvPlatform,
	request::{ClientConfig, RequestParameterBuilder},
	sign::ParameterSet,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::from_json(r#"{"apikey":"demo-key","apiSecret":"demo-secret"}"#)?;
	let slot = MemoryTokenSlot::default();
	let builder = Arc::new(
		RequestParameterBuilder::new(Arc::new(EnvPlatform::default()))
			.with_token_waiter(TokenWaiter::new(Arc::new(slot.clone()))),
	);
	let gate = DebounceGate::with_window(Duration::from_millis(200));
	let (tx, rx) = tokio::sync::oneshot::channel();
	let mut tx = Some(tx);

	// Only the last of these clicks survives the debounce.
	for page in 1..=3 {
		let builder = builder.clone();
		let config = config.clone();
		let tx = tx.take_if(|_| page == 3);

		gate.attempt(move || {
			tokio::spawn(async move {
				let data = ParameterSet::new().with("page", page).with("keyword", "rust");
				let request = builder.build(data, true, &config).await;

				if let Some(tx) = tx {
					let _ = tx.send(request);
				}
			});
		});
	}

	// An external login flow publishes the token a little later.
	tokio::time::sleep(Duration::from_millis(300)).await;
	slot.set("session-token");

	let request = rx.await??;

	println!("signed parameters: {}", serde_json::to_string_pretty(&request)?);

	let cipher = SymmetricCipher::new("0123456789abcdef", "fedcba9876543210")?;
	let sealed = cipher.encrypt_value(request.params())?;

	println!("encrypted: {sealed}");
	println!("decrypted: {:?}", cipher.decrypt(&sealed)?);

	Ok(())
}
