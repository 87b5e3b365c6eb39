//! Left-to-right composition of source, through stages and sink.

use std::fmt;

use crate::stream::{BoxSource, Sink, Source, Through};

/// A reader under construction.
///
/// Each [`through`](Pipeline::through) wraps the current reader; the chain
/// only starts moving once a sink is attached with [`sink`](Pipeline::sink).
pub struct Pipeline<T, E> {
    read: BoxSource<T, E>,
}

impl<T, E> fmt::Debug for Pipeline<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("read", &"<source>").finish()
    }
}

/// Begin a pipeline at `source`.
///
/// ```rust
/// use pullhooks::stream::prelude::*;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let total = Arc::new(AtomicI32::new(0));
/// let sum = Arc::clone(&total);
/// pull(values::<_, ()>(vec![1, 2, 3]))
///     .through(map(|n: i32| n + 1))
///     .sink(drain(move |step: Step<i32, ()>| match step {
///         Ok(n) => {
///             sum.fetch_add(n, Ordering::SeqCst);
///             Flow::Continue
///         }
///         Err(_) => Flow::Stop,
///     }));
/// assert_eq!(total.load(Ordering::SeqCst), 9);
/// ```
pub fn pull<T, E, S>(source: S) -> Pipeline<T, E>
where
    S: Source<T, E>,
{
    Pipeline {
        read: Box::new(source),
    }
}

impl<T, E> Pipeline<T, E> {
    /// Wrap the current reader with a transform stage.
    pub fn through<U, Th>(self, stage: Th) -> Pipeline<U, E>
    where
        Th: Through<T, U, E>,
    {
        Pipeline {
            read: stage.wrap(self.read),
        }
    }

    /// Drive the composed reader with `sink`.
    pub fn sink<S>(self, sink: S)
    where
        S: Sink<T, E>,
    {
        sink.drain(self.read)
    }

    /// Finish composition without a sink, yielding the composed reader.
    pub fn into_source(self) -> BoxSource<T, E> {
        self.read
    }
}
