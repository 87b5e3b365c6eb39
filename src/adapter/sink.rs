//! Completion-callback sink adapter.

use std::fmt;

use crate::stream::{drain, BoxSource, End, Flow, Sink, Step};

/// A sink reporting every value and the first error to a `done` callback.
///
/// Created by [`create_sink`].
pub struct DoneSink<D> {
    done: D,
}

impl<D> fmt::Debug for DoneSink<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoneSink").field("done", &"<function>").finish()
    }
}

/// Turn a completion callback into a sink.
///
/// Each value is reported as `done(Ok(value))` and followed by another pull.
/// An error is reported once as `done(Err(error))` and ends the drive. A
/// clean end finishes silently: `done` is not called, even when no value was
/// ever produced.
///
/// The sink never tells its reader to stop; it only reacts to terminations
/// coming from upstream.
///
/// ```rust
/// use pullhooks::adapter::create_sink;
/// use pullhooks::stream::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let calls = Arc::new(Mutex::new(Vec::new()));
/// let seen = Arc::clone(&calls);
///
/// pull(values::<_, String>(vec!["a", "b"]))
///     .sink(create_sink(move |res: Result<&str, String>| seen.lock().unwrap().push(res)));
///
/// assert_eq!(*calls.lock().unwrap(), vec![Ok("a"), Ok("b")]);
/// ```
pub fn create_sink<T, E, D>(done: D) -> DoneSink<D>
where
    D: FnMut(Result<T, E>) + Send + 'static,
{
    DoneSink { done }
}

impl<T, E, D> Sink<T, E> for DoneSink<D>
where
    T: Send + 'static,
    E: Send + 'static,
    D: FnMut(Result<T, E>) + Send + 'static,
{
    fn drain(self, read: BoxSource<T, E>) {
        let mut done = self.done;
        drain(move |step: Step<T, E>| match step {
            Ok(value) => {
                done(Ok(value));
                Flow::Continue
            }
            Err(End::Clean) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("pull stream ended cleanly");
                Flow::Stop
            }
            Err(End::Error(e)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("pull stream failed, reporting to done");
                done(Err(e));
                Flow::Stop
            }
        })
        .drain(read)
    }
}
