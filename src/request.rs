//! Signed request construction: client configuration, nonces, and the parameter builder.

pub mod builder;
pub mod config;
pub mod nonce;

pub use builder::*;
pub use config::*;
pub use nonce::*;
