//! Minimal reactive layer: signals, subscriptions and ownership scopes.
//!
//! Effects re-run exactly when the signal they watch changes. Everything is
//! single-threaded and synchronous; subscribers run inside `set`.

mod scope;
mod signal;

pub use scope::Scope;
pub use signal::{Signal, Subscription};
