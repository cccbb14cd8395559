//! Orchestrates token gating, default injection, and signing for a single call.

// self
use crate::{
	_prelude::*,
	auth::{MemoryTokenSlot, TokenWaiter},
	error::ConfigError,
	obs::{self, OpKind, OpSpan},
	platform::PlatformDetector,
	request::{ClientConfig, DEFAULT_NONCE_LEN, random_nonce},
	sign::{self, ParamValue, ParameterSet, SIGN_FIELD, Signature},
	transport::RequestTransport,
};

/// Parameter set plus its computed `sign` entry, ready for a transport.
///
/// Produced once by [`RequestParameterBuilder::build`] and consumed once by a transport.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignedRequest {
	params: ParameterSet,
	#[serde(skip)]
	signature: Signature,
}
impl SignedRequest {
	/// All parameters, including `sign`.
	pub fn params(&self) -> &ParameterSet {
		&self.params
	}

	/// Looks up a single parameter.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.params.get(key)
	}

	/// The computed signature.
	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	/// Consumes the request, returning the full parameter map (including `sign`).
	pub fn into_params(self) -> ParameterSet {
		self.params
	}
}

/// Builds signed parameter sets.
///
/// Every request gets `apikey`, `version`, `timestamp` (epoch milliseconds), `platform`, and
/// `nonce`. Caller data is merged over those defaults, then `sign` is computed over the result.
/// Requests that need authentication first wait for a token through the builder's
/// [`TokenWaiter`], which watches [`MemoryTokenSlot::global`] unless another one is attached. The
/// token itself travels through the transport, not the parameter set.
#[derive(Clone)]
pub struct RequestParameterBuilder {
	platform: Arc<dyn PlatformDetector>,
	waiter: TokenWaiter,
	nonce_len: usize,
}
impl RequestParameterBuilder {
	/// Creates a builder reporting the detector's platform and waiting on the process-wide
	/// token slot.
	pub fn new(platform: Arc<dyn PlatformDetector>) -> Self {
		let waiter = TokenWaiter::new(Arc::new(MemoryTokenSlot::global().clone()));

		Self { platform, waiter, nonce_len: DEFAULT_NONCE_LEN }
	}

	/// Replaces the waiter used by requests that require authentication.
	pub fn with_token_waiter(mut self, waiter: TokenWaiter) -> Self {
		self.waiter = waiter;

		self
	}

	/// Overrides the nonce length (defaults to 6).
	pub fn with_nonce_len(mut self, len: usize) -> Self {
		self.nonce_len = len;

		self
	}

	/// Builds the default parameters injected into every request.
	pub fn defaults(&self, config: &ClientConfig) -> ParameterSet {
		ParameterSet::new()
			.with("apikey", config.apikey.as_str())
			.with("version", config.version.as_str())
			.with("timestamp", now_millis())
			.with("platform", self.platform.current_platform().label())
			.with("nonce", random_nonce(self.nonce_len))
	}

	/// Builds a signed request for `data`.
	///
	/// Fails only on configuration problems, or when a bounded/cancelled token wait gives up.
	pub async fn build(
		&self,
		data: ParameterSet,
		requires_auth: bool,
		config: &ClientConfig,
	) -> Result<SignedRequest> {
		let span = OpSpan::open(OpKind::BuildRequest, "build");
		let result: Result<SignedRequest> = span
			.instrument(async move {
				config.validate()?;

				if self.nonce_len == 0 {
					return Err(ConfigError::ZeroNonceLength.into());
				}
				if requires_auth {
					self.waiter.resolve_token().await?;
				}

				let mut params = self.defaults(config);

				params.merge(data);

				let signature = sign::sign(&params, config.api_secret.expose());

				params.insert(SIGN_FIELD, signature.clone());

				obs::trace_event!(param_count = params.len(), "request signed");

				Ok(SignedRequest { params, signature })
			})
			.await;

		span.close_with(&result);

		result
	}

	/// Builds a signed request and hands it to `transport`.
	pub async fn send<T>(
		&self,
		transport: &T,
		data: ParameterSet,
		requires_auth: bool,
		config: &ClientConfig,
	) -> Result<T::Response>
	where
		T: ?Sized + RequestTransport,
	{
		let request = self.build(data, requires_auth, config).await?;

		Ok(transport.send(request).await?)
	}
}
impl Debug for RequestParameterBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestParameterBuilder")
			.field("platform", &self.platform.current_platform())
			.field("waiter", &self.waiter)
			.field("nonce_len", &self.nonce_len)
			.finish()
	}
}

fn now_millis() -> i64 {
	let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

	i64::try_from(millis).unwrap_or(i64::MAX)
}
