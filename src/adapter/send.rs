//! Send adapter: named-action dispatch as a transform stage.

use std::fmt;
use std::sync::Arc;

use crate::stream::{BoxSource, Callback, End, Source, Through};

/// A callback-style dispatch function.
///
/// Implemented for every `Fn(&str, T, Reply<T, E>)`. The implementation must
/// resolve the [`Reply`] exactly once, either before returning or later from
/// any thread.
pub trait Dispatch<T, E>: Send + Sync + 'static {
    /// Dispatch `payload` under `action` and answer through `reply`.
    fn dispatch(&self, action: &str, payload: T, reply: Reply<T, E>);
}

impl<T, E, F> Dispatch<T, E> for F
where
    F: Fn(&str, T, Reply<T, E>) + Send + Sync + 'static,
{
    fn dispatch(&self, action: &str, payload: T, reply: Reply<T, E>) {
        self(action, payload, reply)
    }
}

/// Single-shot answer handle for one dispatched action.
///
/// Resolving the reply answers the pull that triggered the dispatch. A reply
/// dropped without being resolved leaves that pull unanswered, which stalls
/// the pipeline.
pub struct Reply<T, E> {
    cb: Option<Callback<T, E>>,
    action: Arc<str>,
}

impl<T, E> fmt::Debug for Reply<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply")
            .field("action", &self.action)
            .field("resolved", &self.cb.is_none())
            .finish()
    }
}

impl<T, E> Reply<T, E> {
    pub(crate) fn new(cb: Callback<T, E>, action: Arc<str>) -> Self {
        Self {
            cb: Some(cb),
            action,
        }
    }

    /// The action this reply answers.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Answer with a result: `Ok` becomes the next value downstream, `Err`
    /// terminates the pipeline with that error.
    pub fn resolve(mut self, result: Result<T, E>) {
        if let Some(cb) = self.cb.take() {
            cb(result.map_err(End::Error))
        }
    }

    /// Answer with a value.
    pub fn ok(self, value: T) {
        self.resolve(Ok(value))
    }

    /// Answer with an error.
    pub fn err(self, error: E) {
        self.resolve(Err(error))
    }
}

impl<T, E> Drop for Reply<T, E> {
    fn drop(&mut self) {
        if self.cb.is_some() {
            #[cfg(feature = "tracing")]
            tracing::warn!(action = %self.action, "reply dropped without an answer; pipeline stalled");
        }
    }
}

/// Factory of send stages bound to one dispatch function.
///
/// Created by [`create_send`]. Cloning is cheap and shares the dispatch
/// function.
pub struct SendAdapter<T, E> {
    send: Arc<dyn Dispatch<T, E>>,
}

impl<T, E> Clone for SendAdapter<T, E> {
    fn clone(&self) -> Self {
        Self {
            send: Arc::clone(&self.send),
        }
    }
}

impl<T, E> fmt::Debug for SendAdapter<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendAdapter")
            .field("send", &"<function>")
            .finish()
    }
}

/// Bind a dispatch function, producing a factory of send stages.
///
/// ```rust
/// use pullhooks::adapter::{create_send, create_sink, Reply};
/// use pullhooks::stream::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let send = create_send(|action: &str, payload: String, reply: Reply<String, String>| {
///     reply.ok(format!("{}:{}", action, payload))
/// });
///
/// let out = Arc::new(Mutex::new(Vec::new()));
/// let seen = Arc::clone(&out);
/// pull(values(vec!["hey".to_string()]))
///     .through(send.action("greet"))
///     .sink(create_sink(move |res| seen.lock().unwrap().push(res)));
///
/// assert_eq!(*out.lock().unwrap(), vec![Ok("greet:hey".to_string())]);
/// ```
pub fn create_send<T, E, D>(send: D) -> SendAdapter<T, E>
where
    D: Dispatch<T, E>,
{
    SendAdapter {
        send: Arc::new(send),
    }
}

impl<T, E> SendAdapter<T, E> {
    /// A stage dispatching every value it pulls under `action`.
    pub fn action(&self, action: impl Into<String>) -> SendThrough<T, E> {
        SendThrough {
            send: Arc::clone(&self.send),
            action: Arc::from(action.into()),
        }
    }
}

/// A transform stage that hands each value to the dispatch function and
/// lets the dispatch reply answer the pull.
///
/// Created by [`SendAdapter::action`]. Terminations from upstream pass
/// through without dispatching.
pub struct SendThrough<T, E> {
    send: Arc<dyn Dispatch<T, E>>,
    action: Arc<str>,
}

impl<T, E> fmt::Debug for SendThrough<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendThrough")
            .field("action", &self.action)
            .finish()
    }
}

impl<T, E> Through<T, T, E> for SendThrough<T, E>
where
    T: 'static,
    E: 'static,
{
    fn wrap(self, read: BoxSource<T, E>) -> BoxSource<T, E> {
        Box::new(SendReader {
            read,
            send: self.send,
            action: self.action,
        })
    }
}

struct SendReader<T, E> {
    read: BoxSource<T, E>,
    send: Arc<dyn Dispatch<T, E>>,
    action: Arc<str>,
}

impl<T, E> Source<T, E> for SendReader<T, E>
where
    T: 'static,
    E: 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>) {
        let send = Arc::clone(&self.send);
        let action = Arc::clone(&self.action);
        self.read.pull(
            end,
            Box::new(move |step| match step {
                Err(end) => cb(Err(end)),
                Ok(value) => {
                    let reply = Reply::new(cb, Arc::clone(&action));
                    send.dispatch(&action, value, reply)
                }
            }),
        );
    }
}
