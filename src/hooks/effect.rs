//! Effect wrapping.

use std::fmt;
use std::marker::PhantomData;

use crate::adapter::{create_send, create_sink, create_source, Dispatch, SendAdapter};
use crate::stream::{pull, Through};

/// An effect handler backed by a user-supplied transform stage.
///
/// Created by [`wrap_effects`]; invoked through
/// [`call`](WrappedEffect::call).
pub struct WrappedEffect<F, St, A, E> {
    cb: F,
    _phantom: PhantomData<fn(&St, A) -> E>,
}

impl<F, St, A, E> fmt::Debug for WrappedEffect<F, St, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedEffect")
            .field("cb", &"<function>")
            .finish()
    }
}

/// Wrap a stage-producing function as an effect handler.
///
/// `cb` receives the current state, the previous state and a
/// [`SendAdapter`], and returns the stage the effect's payload flows
/// through. The payload is delivered as a single value, so `done` is called
/// at most once per invocation: with the stage's value, or with its error.
///
/// ```rust
/// use pullhooks::adapter::{Reply, SendAdapter};
/// use pullhooks::hooks::wrap_effects;
/// use pullhooks::stream::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let effect = wrap_effects(|state: &i32, _prev: &i32, _send: SendAdapter<i32, String>| {
///     let step = *state;
///     map(move |n: i32| n + step)
/// });
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let out = Arc::clone(&seen);
/// effect.call(
///     1,
///     &10,
///     &0,
///     |_: &str, _: i32, _: Reply<i32, String>| {},
///     move |res: Result<i32, String>| out.lock().unwrap().push(res),
/// );
///
/// assert_eq!(*seen.lock().unwrap(), vec![Ok(11)]);
/// ```
pub fn wrap_effects<F, St, A, E, Th>(cb: F) -> WrappedEffect<F, St, A, E>
where
    F: Fn(&St, &St, SendAdapter<A, E>) -> Th,
{
    WrappedEffect {
        cb,
        _phantom: PhantomData,
    }
}

impl<F, St, A, E> WrappedEffect<F, St, A, E> {
    /// Run the effect for one payload: build the send adapter, obtain the
    /// stage from `state` and `prev`, and drive `data` through it into
    /// `done`.
    pub fn call<T, U, Th, D, Done>(&self, data: T, state: &St, prev: &St, send: D, done: Done)
    where
        F: Fn(&St, &St, SendAdapter<A, E>) -> Th,
        Th: Through<T, U, E>,
        D: Dispatch<A, E>,
        Done: FnMut(Result<U, E>) + Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        E: Send + 'static,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!("invoking wrapped effect");

        let send = create_send(send);
        let through = (self.cb)(state, prev, send);
        let source = create_source::<T, E>(data);
        let sink = create_sink(done);
        pull(source).through(through).sink(sink);
    }
}
