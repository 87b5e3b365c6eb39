//! Subscription wrapping.

use std::fmt;
use std::marker::PhantomData;

use crate::adapter::{create_send, create_sink, Dispatch, SendAdapter};
use crate::stream::{pull, Source};

/// A subscription handler backed by a user-supplied reader.
///
/// Created by [`wrap_subscriptions`]; invoked through
/// [`call`](WrappedSubscription::call).
pub struct WrappedSubscription<F, A, E> {
    cb: F,
    _phantom: PhantomData<fn(A) -> E>,
}

impl<F, A, E> fmt::Debug for WrappedSubscription<F, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedSubscription")
            .field("cb", &"<function>")
            .finish()
    }
}

/// Wrap a reader-producing function as a subscription handler.
///
/// `cb` receives a [`SendAdapter`] bound to the framework's dispatch function
/// and returns the subscription's reader. Each value the reader produces is
/// reported to `done`, for as long as the reader keeps producing.
///
/// ```rust
/// use pullhooks::adapter::{Reply, SendAdapter};
/// use pullhooks::hooks::wrap_subscriptions;
/// use pullhooks::stream::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let subscription = wrap_subscriptions(|_send: SendAdapter<i32, String>| values(vec![1, 2, 3]));
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let out = Arc::clone(&seen);
/// subscription.call(
///     |_: &str, _: i32, _: Reply<i32, String>| {},
///     move |res: Result<i32, String>| out.lock().unwrap().push(res),
/// );
///
/// assert_eq!(*seen.lock().unwrap(), vec![Ok(1), Ok(2), Ok(3)]);
/// ```
pub fn wrap_subscriptions<F, A, E, S>(cb: F) -> WrappedSubscription<F, A, E>
where
    F: Fn(SendAdapter<A, E>) -> S,
{
    WrappedSubscription {
        cb,
        _phantom: PhantomData,
    }
}

impl<F, A, E> WrappedSubscription<F, A, E> {
    /// Start the subscription: build the send adapter, obtain the reader and
    /// drive it into `done`.
    pub fn call<T, S, D, Done>(&self, send: D, done: Done)
    where
        F: Fn(SendAdapter<A, E>) -> S,
        S: Source<T, E>,
        D: Dispatch<A, E>,
        Done: FnMut(Result<T, E>) + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!("starting wrapped subscription");

        let send = create_send(send);
        let source = (self.cb)(send);
        let sink = create_sink(done);
        pull(source).sink(sink);
    }
}
