//! Testing utilities for code built on pull-stream hooks.
//!
//! # Examples
//!
//! ## Recording `done` calls
//!
//! ```rust
//! use pullhooks::adapter::create_sink;
//! use pullhooks::assert_done;
//! use pullhooks::stream::prelude::*;
//! use pullhooks::testing::Recorder;
//!
//! let recorder = Recorder::<&str, String>::new();
//! pull(values(vec!["a", "b"])).sink(create_sink(recorder.done()));
//!
//! assert_done!(recorder, [Ok("a"), Ok("b")]);
//! ```
//!
//! ## Answering dispatches later
//!
//! ```rust
//! use pullhooks::adapter::{create_send, create_sink};
//! use pullhooks::stream::prelude::*;
//! use pullhooks::testing::{PendingDispatch, Recorder};
//!
//! let pending = PendingDispatch::<i32, String>::new();
//! let recorder = Recorder::new();
//!
//! pull(values(vec![1]))
//!     .through(create_send(pending.dispatch()).action("double"))
//!     .sink(create_sink(recorder.done()));
//! assert!(recorder.is_empty());
//!
//! let (action, payload, reply) = pending.pop().unwrap();
//! assert_eq!(action, "double");
//! reply.ok(payload * 2);
//! assert_eq!(recorder.calls(), vec![Ok(2)]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::adapter::Reply;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records every call made to a `done` callback, in order.
///
/// Clones share the same record.
pub struct Recorder<T, E> {
    calls: Arc<Mutex<Vec<Result<T, E>>>>,
}

impl<T, E> Recorder<T, E> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A `done` callback that appends to this recorder.
    pub fn done(&self) -> impl FnMut(Result<T, E>) + Send + 'static
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let calls = Arc::clone(&self.calls);
        move |result| lock(&calls).push(result)
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns true if `done` was never called.
    pub fn is_empty(&self) -> bool {
        lock(&self.calls).is_empty()
    }

    /// Remove and return every recorded call.
    pub fn take(&self) -> Vec<Result<T, E>> {
        std::mem::take(&mut *lock(&self.calls))
    }

    /// A copy of every recorded call.
    pub fn calls(&self) -> Vec<Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        lock(&self.calls).clone()
    }
}

impl<T, E> Default for Recorder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Recorder<T, E> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Recorder<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("calls", &*lock(&self.calls))
            .finish()
    }
}

/// A dispatch function that parks every request until the test answers it.
///
/// Lets tests resolve replies after the pull that caused them has returned,
/// or from another thread.
pub struct PendingDispatch<T, E> {
    queue: Arc<Mutex<VecDeque<(String, T, Reply<T, E>)>>>,
}

impl<T, E> PendingDispatch<T, E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// A dispatch function that enqueues `(action, payload, reply)`.
    pub fn dispatch(&self) -> impl Fn(&str, T, Reply<T, E>) + Send + Sync + 'static
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let queue = Arc::clone(&self.queue);
        move |action: &str, payload: T, reply: Reply<T, E>| {
            lock(&queue).push_back((action.to_string(), payload, reply))
        }
    }

    /// Take the oldest parked request.
    pub fn pop(&self) -> Option<(String, T, Reply<T, E>)> {
        lock(&self.queue).pop_front()
    }

    /// Number of parked requests.
    pub fn len(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Returns true if nothing is parked.
    pub fn is_empty(&self) -> bool {
        lock(&self.queue).is_empty()
    }
}

impl<T, E> Default for PendingDispatch<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for PendingDispatch<T, E> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<T, E> fmt::Debug for PendingDispatch<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDispatch")
            .field("parked", &self.len())
            .finish()
    }
}

/// Assert the exact sequence of calls a [`Recorder`] has seen.
///
/// # Example
///
/// ```rust
/// use pullhooks::assert_done;
/// use pullhooks::testing::Recorder;
///
/// let recorder = Recorder::<i32, String>::new();
/// let mut done = recorder.done();
/// done(Ok(1));
/// done(Err("boom".to_string()));
///
/// assert_done!(recorder, [Ok(1), Err("boom".to_string())]);
/// ```
#[macro_export]
macro_rules! assert_done {
    ($recorder:expr, [$($call:expr),* $(,)?]) => {
        assert_eq!($recorder.calls(), vec![$($call),*]);
    };
}
