//! Basic transform stages.

use std::fmt;
use std::sync::Arc;

use crate::stream::{BoxSource, Callback, End, Source, Through};

/// A stage applying a function to every value.
///
/// Created by [`map`].
pub struct Map<F> {
    f: Arc<F>,
}

impl<F> fmt::Debug for Map<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("f", &"<function>").finish()
    }
}

/// Transform each value with `f`; terminations pass through untouched.
pub fn map<T, U, F>(f: F) -> Map<F>
where
    F: Fn(T) -> U + Send + Sync + 'static,
{
    Map { f: Arc::new(f) }
}

impl<T, U, E, F> Through<T, U, E> for Map<F>
where
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    fn wrap(self, read: BoxSource<T, E>) -> BoxSource<U, E> {
        Box::new(MapReader { read, f: self.f })
    }
}

struct MapReader<T, E, F> {
    read: BoxSource<T, E>,
    f: Arc<F>,
}

impl<T, U, E, F> Source<U, E> for MapReader<T, E, F>
where
    T: 'static,
    U: 'static,
    E: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<U, E>) {
        let f = Arc::clone(&self.f);
        self.read.pull(end, Box::new(move |step| cb(step.map(|v| f(v)))));
    }
}
