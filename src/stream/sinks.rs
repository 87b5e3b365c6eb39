//! Basic sinks.

use std::fmt;

use crate::stream::{drain, BoxSource, End, Flow, Sink, Step};

/// A sink gathering every value.
///
/// Created by [`collect`].
pub struct Collect<D> {
    done: D,
}

impl<D> fmt::Debug for Collect<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collect").field("done", &"<function>").finish()
    }
}

/// Gather values until the reader terminates, then report once.
///
/// A clean end reports `Ok(values)`; an error reports `Err(error)` and the
/// values gathered so far are dropped.
pub fn collect<T, E, D>(done: D) -> Collect<D>
where
    D: FnOnce(Result<Vec<T>, E>) + Send + 'static,
{
    Collect { done }
}

impl<T, E, D> Sink<T, E> for Collect<D>
where
    T: Send + 'static,
    E: Send + 'static,
    D: FnOnce(Result<Vec<T>, E>) + Send + 'static,
{
    fn drain(self, read: BoxSource<T, E>) {
        let mut done = Some(self.done);
        let mut items = Vec::new();
        drain(move |step: Step<T, E>| {
            match step {
                Ok(item) => {
                    items.push(item);
                    return Flow::Continue;
                }
                Err(end) => {
                    if let Some(done) = done.take() {
                        match end {
                            End::Clean => done(Ok(std::mem::take(&mut items))),
                            End::Error(e) => done(Err(e)),
                        }
                    }
                }
            }
            Flow::Stop
        })
        .drain(read)
    }
}
