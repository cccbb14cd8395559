//! Transport contract for handing signed requests to an HTTP client.
//!
//! The crate never performs network calls itself; callers plug in whatever client they use.

// self
use crate::{_prelude::*, error::TransportError, request::SignedRequest};

/// Boxed future returned by [`RequestTransport::send`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Consumes a [`SignedRequest`] and performs the actual network call.
pub trait RequestTransport
where
	Self: Send + Sync,
{
	/// Response type produced by the transport.
	type Response;

	/// Sends the request. The request is consumed; it is never reused.
	fn send(&self, request: SignedRequest) -> TransportFuture<'_, Self::Response>;
}
