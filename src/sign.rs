//! Parameter sets, canonical serialization, and keyed MD5 signatures.

pub mod canonical;
pub mod params;

pub use canonical::*;
pub use params::*;
