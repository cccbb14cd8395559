//! Auth-token slot contracts and the waiter that gates calls on a token being present.

pub mod slot;
pub mod waiter;

pub use slot::*;
pub use waiter::*;
