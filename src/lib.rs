//! # Pullhooks
//!
//! Write effect and subscription handlers as pull streams.
//!
//! Callback-style frameworks hand an effect a payload and a `done` callback,
//! and hand a subscription a `send` function and a `done` callback. Pull
//! streams work the other way round: a consumer asks for each value when it
//! is ready for it, which gives backpressure and ordering for free. This
//! crate bridges the two.
//!
//! ## Layers
//!
//! - [`stream`] - the pull protocol: readers ([`stream::Source`]), transform
//!   stages ([`stream::Through`]), sinks ([`stream::Sink`]) and the
//!   [`pull`](stream::pull) composition chain.
//! - [`adapter`] - one-shot source, `done`-reporting sink and named-action
//!   send stage.
//! - [`hooks`] - [`wrap_effects`](hooks::wrap_effects) and
//!   [`wrap_subscriptions`](hooks::wrap_subscriptions), plus the
//!   [`hooks`](hooks::hooks) builder.
//!
//! ## Quick Example
//!
//! ```rust
//! use pullhooks::adapter::{Reply, SendAdapter};
//! use pullhooks::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Debug)]
//! struct State {
//!     greeting: String,
//! }
//!
//! // An effect that greets the payload and reports the greeting.
//! let effect = wrap_effects(|state: &State, _prev: &State, _send: SendAdapter<String, String>| {
//!     let greeting = state.greeting.clone();
//!     map(move |name: String| format!("{}, {}!", greeting, name))
//! });
//!
//! let state = State { greeting: "hello".to_string() };
//! let prev = State { greeting: String::new() };
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let out = Arc::clone(&seen);
//!
//! effect.call(
//!     "world".to_string(),
//!     &state,
//!     &prev,
//!     |_: &str, _: String, _: Reply<String, String>| {},
//!     move |res: Result<String, String>| out.lock().unwrap().push(res),
//! );
//!
//! assert_eq!(*seen.lock().unwrap(), vec![Ok("hello, world!".to_string())]);
//! ```
//!
//! ## Cancellation
//!
//! The protocol has a clean-stop signal ([`stream::End::Clean`]), but the
//! `done`-reporting sink never sends it upstream: once a pipeline starts,
//! only its producer can end it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod adapter;
pub mod error;
pub mod hooks;
pub mod stream;
pub mod testing;

// Re-exports
pub use error::ConfigError;
pub use hooks::{hooks, wrap_effects, wrap_subscriptions, HookOptions, Hooks};
pub use stream::{End, Step};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{create_send, create_sink, create_source};
    pub use crate::error::ConfigError;
    pub use crate::hooks::{hooks, wrap_effects, wrap_subscriptions, HookOptions, Hooks};
    pub use crate::stream::prelude::*;
}
