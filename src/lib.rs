//! Client-side call gating for signed APIs: throttle and debounce gates, token-gated request
//! builders, canonical MD5 signing, and AES-CBC payload ciphers.
//!
//! Typical flow: a caller hands parameters to [`request::RequestParameterBuilder`], which
//! optionally waits for an auth token ([`auth::TokenWaiter`]), injects defaults, and signs the
//! result ([`sign::sign`]). The [`request::SignedRequest`] then goes to a caller-supplied
//! [`transport::RequestTransport`]. [`gate::RateGate`] and [`gate::DebounceGate`] wrap any
//! callback, including calls into the builder.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cipher;
pub mod error;
pub mod gate;
pub mod obs;
pub mod platform;
pub mod request;
pub mod secret;
pub mod sign;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::Result;
}

#[cfg(test)] use color_eyre as _;
