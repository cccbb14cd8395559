// std
use std::{sync::Arc, time::Duration};
// crates.io
use parking_lot::Mutex;
use tokio::time::{self, Instant};
// self
use callgate::{
	auth::{MemoryTokenSlot, TokenSlot, TokenWaiter, WaitPolicy},
	error::{Error, TransportError, WaitError},
	platform::{Platform, StaticPlatform},
	request::{ClientConfig, NONCE_ALPHABET, RequestParameterBuilder, SignedRequest},
	sign::{self, ParamValue, ParameterSet, SIGN_FIELD},
	transport::{RequestTransport, TransportFuture},
};

/// Transport that records requests and attaches the current token, like a real HTTP client.
#[derive(Default)]
struct RecordingTransport {
	slot: MemoryTokenSlot,
	sent: Mutex<Vec<(SignedRequest, Option<String>)>>,
	fail: bool,
}
impl RequestTransport for RecordingTransport {
	type Response = usize;

	fn send(&self, request: SignedRequest) -> TransportFuture<'_, Self::Response> {
		Box::pin(async move {
			if self.fail {
				return Err(TransportError::network(std::io::Error::other("offline")));
			}

			let token = self.slot.current_token().map(|token| token.expose().to_owned());
			let mut sent = self.sent.lock();

			sent.push((request, token));

			Ok(sent.len())
		})
	}
}

fn builder(platform: Platform) -> RequestParameterBuilder {
	RequestParameterBuilder::new(Arc::new(StaticPlatform(platform)))
}

fn text<'a>(request: &'a SignedRequest, key: &str) -> Option<&'a str> {
	request.get(key).and_then(ParamValue::as_str)
}

#[tokio::test]
async fn unauthenticated_build_signs_merged_parameters() {
	let config = ClientConfig::new("K", "S");
	let request = builder(Platform::Android)
		.build(ParameterSet::new().with("foo", "bar"), false, &config)
		.await
		.expect("Valid config should build.");

	assert_eq!(text(&request, "apikey"), Some("K"));
	assert_eq!(text(&request, "foo"), Some("bar"));
	assert_eq!(text(&request, "version"), Some("1.0"));
	assert_eq!(text(&request, "platform"), Some("android"));

	let nonce = text(&request, "nonce").expect("Nonce should be injected.");

	assert_eq!(nonce.len(), 6);
	assert!(nonce.bytes().all(|byte| NONCE_ALPHABET.contains(&byte)));

	let mut unsigned = request.params().clone();

	unsigned.remove(SIGN_FIELD);

	assert_eq!(request.signature(), &sign::sign(&unsigned, "S"));
	assert_eq!(text(&request, SIGN_FIELD), Some(request.signature().as_str()));
	assert!(sign::verify(request.params(), "S", request.signature().as_str()));
}

#[tokio::test]
async fn json_data_round_trips_into_signed_request() {
	let config = ClientConfig::from_json(r#"{"apikey":"K","apiSecret":"S","version":"2.1"}"#)
		.expect("Config fixture should parse.");
	let data: ParameterSet = serde_json::from_str(r#"{"page":2,"keyword":"","note":null}"#)
		.expect("Data fixture should parse.");
	let request = builder(Platform::Wx)
		.with_nonce_len(12)
		.build(data, false, &config)
		.await
		.expect("Valid config should build.");
	let canonical = sign::canonicalize(request.params());

	assert!(canonical.contains("page=2"));
	assert!(canonical.contains("version=2.1"));
	assert!(!canonical.contains("keyword="));
	assert!(!canonical.contains("note="));
	assert_eq!(text(&request, "nonce").map(str::len), Some(12));

	let wire = serde_json::to_value(&request).expect("Signed request should serialize.");

	assert_eq!(wire["sign"], serde_json::Value::String(request.signature().to_string()));
	assert_eq!(wire["page"], serde_json::json!(2));
}

#[tokio::test(start_paused = true)]
async fn authenticated_build_waits_for_token() {
	let slot = MemoryTokenSlot::default();
	let builder =
		builder(Platform::Ios).with_token_waiter(TokenWaiter::new(Arc::new(slot.clone())));
	let config = ClientConfig::new("K", "S");
	let publisher = slot.clone();

	tokio::spawn(async move {
		time::sleep(Duration::from_millis(250)).await;
		publisher.set("T");
	});

	let start = Instant::now();
	let request = builder
		.build(ParameterSet::new().with("foo", "bar"), true, &config)
		.await
		.expect("Build should resolve once the token appears.");

	assert!(start.elapsed() >= Duration::from_millis(250));
	assert!(request.get("token").is_none(), "Token travels beside the parameters.");
}

#[tokio::test(start_paused = true)]
async fn bounded_wait_surfaces_as_wait_error() {
	let slot = MemoryTokenSlot::default();
	let waiter = TokenWaiter::new(Arc::new(slot))
		.with_policy(WaitPolicy::default().with_max_attempts(2));
	let err = builder(Platform::Ios)
		.with_token_waiter(waiter)
		.build(ParameterSet::new(), true, &ClientConfig::new("K", "S"))
		.await
		.expect_err("Empty slot with a budget should fail.");

	assert!(matches!(err, Error::Wait(WaitError::TimedOut { attempts: 2 })));
}

#[tokio::test]
async fn send_hands_request_to_transport() {
	let transport = RecordingTransport::default();

	transport.slot.set("T");

	let builder = builder(Platform::Baidu)
		.with_token_waiter(TokenWaiter::new(Arc::new(transport.slot.clone())));
	let config = ClientConfig::new("K", "S");
	let count = builder
		.send(&transport, ParameterSet::new().with("foo", "bar"), true, &config)
		.await
		.expect("Recording transport should accept the request.");

	assert_eq!(count, 1);

	let sent = transport.sent.lock();
	let (request, token) = &sent[0];

	assert_eq!(token.as_deref(), Some("T"));
	assert_eq!(text(request, "platform"), Some("baidu"));
}

#[tokio::test]
async fn transport_failures_surface() {
	let transport = RecordingTransport { fail: true, ..Default::default() };
	let err = builder(Platform::Qq)
		.send(&transport, ParameterSet::new(), false, &ClientConfig::new("K", "S"))
		.await
		.expect_err("Failing transport should surface its error.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}
