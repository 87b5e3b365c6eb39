//! The pull-stream protocol.
//!
//! A pull stream is lazy: nothing happens until a consumer asks for the next
//! value. Every request carries an optional termination signal, and every
//! answer is delivered through a single-shot continuation. Because a consumer
//! only asks again once the previous answer has been fully handled, the
//! protocol gives backpressure for free.
//!
//! # Roles
//!
//! - [`Source`] - a reader that answers pulls with a value or a termination.
//! - [`Through`] - wraps an upstream reader into a new reader.
//! - [`Sink`] - drives a reader until it terminates.
//!
//! # Example
//!
//! ```rust
//! use pullhooks::stream::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let out = Arc::clone(&seen);
//!
//! pull(values::<_, String>(vec![1, 2, 3]))
//!     .through(map(|n: i32| n * 10))
//!     .sink(collect(move |result: Result<Vec<i32>, String>| {
//!         *out.lock().unwrap() = result.unwrap();
//!     }));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![10, 20, 30]);
//! ```
//!
//! # Termination
//!
//! A pull that carries `Some(end)` asks the source to stop; the source
//! answers with that same `end`. [`End::Clean`] means "no error, just
//! stop" and [`End::Error`] carries a failure. Once a reader has answered
//! with a termination, every later pull terminates too.

mod drain;
mod into_stream;
mod pipeline;
pub mod prelude;
mod sinks;
mod sources;
mod throughs;

use std::fmt;

pub use drain::{drain, Drain, Flow};
pub use into_stream::{into_stream, IntoStream};
pub use pipeline::{pull, Pipeline};
pub use sinks::{collect, Collect};
pub use sources::{empty, fail, from_fn, values, Empty, Fail, FromFn, Values};
pub use throughs::{map, Map};

/// Out-of-band termination signal carried by a pull or by its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum End<E> {
    /// Stop without an error.
    Clean,
    /// Stop because of an error.
    Error(E),
}

impl<E> End<E> {
    /// Returns true for a clean stop.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Returns the error, if this termination carries one.
    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Clean => None,
            Self::Error(e) => Some(e),
        }
    }
}

impl<E: fmt::Display> fmt::Display for End<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "stream ended"),
            Self::Error(e) => write!(f, "stream failed: {}", e),
        }
    }
}

/// The answer to one pull: a value or a termination.
pub type Step<T, E> = Result<T, End<E>>;

/// Single-shot continuation that receives the answer to one pull.
pub type Callback<T, E> = Box<dyn FnOnce(Step<T, E>) + Send + 'static>;

/// A reader: answers each pull by calling its callback exactly once.
///
/// The callback may be invoked before `pull` returns or later, from any
/// thread. Callers never issue a second pull before the first one has been
/// answered.
pub trait Source<T, E>: Send + 'static {
    /// Request the next value, or pass `Some(end)` to terminate the source.
    ///
    /// A source receiving `Some(end)` must answer `Err(end)` unchanged.
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>);
}

/// A type-erased reader.
pub type BoxSource<T, E> = Box<dyn Source<T, E>>;

impl<T, E, S> Source<T, E> for Box<S>
where
    S: Source<T, E> + ?Sized,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>) {
        (**self).pull(end, cb)
    }
}

/// Extension methods available on every [`Source`].
pub trait SourceExt<T, E>: Source<T, E> + Sized {
    /// Erase the concrete source type.
    fn boxed(self) -> BoxSource<T, E> {
        Box::new(self)
    }

    /// Start a composition chain with this source at its head.
    fn pipe(self) -> Pipeline<T, E> {
        pull(self)
    }
}

impl<T, E, S: Source<T, E>> SourceExt<T, E> for S {}

/// A transform stage: wraps an upstream reader into a downstream reader.
///
/// Implemented for any `FnOnce(BoxSource<T, E>) -> impl Source<U, E>`.
pub trait Through<T, U, E>: Send + 'static {
    /// Wrap `read`, returning the reader downstream stages pull from.
    fn wrap(self, read: BoxSource<T, E>) -> BoxSource<U, E>;
}

impl<T, U, E, F, R> Through<T, U, E> for F
where
    F: FnOnce(BoxSource<T, E>) -> R + Send + 'static,
    R: Source<U, E>,
{
    fn wrap(self, read: BoxSource<T, E>) -> BoxSource<U, E> {
        Box::new(self(read))
    }
}

/// A consumer that drives a reader.
///
/// Without a sink nothing upstream runs.
pub trait Sink<T, E> {
    /// Start pulling from `read`.
    fn drain(self, read: BoxSource<T, E>);
}
