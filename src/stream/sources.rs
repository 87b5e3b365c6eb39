//! Basic readers.

use std::fmt;
use std::marker::PhantomData;

use crate::stream::{Callback, End, Source};

/// A reader built from a closure.
///
/// Created by [`from_fn`].
pub struct FromFn<F> {
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

/// Build a reader from a function of `(end, cb)`.
///
/// The function is responsible for honouring the protocol: answer a
/// termination with that same termination, and call `cb` exactly once per
/// pull.
///
/// ```rust
/// use pullhooks::stream::prelude::*;
///
/// let mut sent = false;
/// let mut once = from_fn(move |end: Option<End<()>>, cb: Callback<&'static str, ()>| {
///     if let Some(end) = end {
///         return cb(Err(end));
///     }
///     if sent {
///         return cb(Err(End::Clean));
///     }
///     sent = true;
///     cb(Ok("hey!"))
/// });
///
/// once.pull(None, Box::new(|step| assert_eq!(step, Ok("hey!"))));
/// once.pull(None, Box::new(|step| assert_eq!(step, Err(End::Clean))));
/// ```
pub fn from_fn<T, E, F>(f: F) -> FromFn<F>
where
    F: FnMut(Option<End<E>>, Callback<T, E>) + Send + 'static,
{
    FromFn { f }
}

impl<T, E, F> Source<T, E> for FromFn<F>
where
    F: FnMut(Option<End<E>>, Callback<T, E>) + Send + 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>) {
        (self.f)(end, cb)
    }
}

/// A reader over the items of an iterator.
///
/// Created by [`values`].
pub struct Values<I, E> {
    items: Option<I>,
    _phantom: PhantomData<fn() -> E>,
}

impl<I, E> fmt::Debug for Values<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values")
            .field("exhausted", &self.items.is_none())
            .finish()
    }
}

/// Yield each item in turn, then end cleanly.
pub fn values<I, E>(items: I) -> Values<I::IntoIter, E>
where
    I: IntoIterator,
{
    Values {
        items: Some(items.into_iter()),
        _phantom: PhantomData,
    }
}

impl<I, E> Source<I::Item, E> for Values<I, E>
where
    I: Iterator + Send + 'static,
    E: 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<I::Item, E>) {
        if let Some(end) = end {
            self.items = None;
            return cb(Err(end));
        }
        match self.items.as_mut().and_then(Iterator::next) {
            Some(item) => cb(Ok(item)),
            None => {
                self.items = None;
                cb(Err(End::Clean))
            }
        }
    }
}

/// A reader that ends on its first pull.
///
/// Created by [`empty`].
pub struct Empty<T, E> {
    _phantom: PhantomData<fn() -> (T, E)>,
}

impl<T, E> fmt::Debug for Empty<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Empty").finish()
    }
}

/// A reader with no values.
pub fn empty<T, E>() -> Empty<T, E> {
    Empty {
        _phantom: PhantomData,
    }
}

impl<T, E> Source<T, E> for Empty<T, E>
where
    T: 'static,
    E: 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>) {
        cb(Err(end.unwrap_or(End::Clean)))
    }
}

/// A reader that fails on its first pull and ends cleanly afterwards.
///
/// Created by [`fail`].
pub struct Fail<T, E> {
    error: Option<E>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, E: fmt::Debug> fmt::Debug for Fail<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fail").field("error", &self.error).finish()
    }
}

/// A reader whose first answer is `error`.
pub fn fail<T, E>(error: E) -> Fail<T, E> {
    Fail {
        error: Some(error),
        _phantom: PhantomData,
    }
}

impl<T, E> Source<T, E> for Fail<T, E>
where
    T: 'static,
    E: Send + 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>) {
        if let Some(end) = end {
            self.error = None;
            return cb(Err(end));
        }
        match self.error.take() {
            Some(error) => cb(Err(End::Error(error))),
            None => cb(Err(End::Clean)),
        }
    }
}
