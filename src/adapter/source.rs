//! One-shot source adapter.

use std::fmt;
use std::marker::PhantomData;

use crate::stream::{Callback, End, Source};

/// A reader holding a single value.
///
/// Created by [`create_source`]. The first plain pull yields the value,
/// every later pull ends cleanly.
pub struct Once<T, E> {
    value: Option<T>,
    _phantom: PhantomData<fn() -> E>,
}

impl<T: fmt::Debug, E> fmt::Debug for Once<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once").field("value", &self.value).finish()
    }
}

/// Wrap `value` as a one-shot reader.
///
/// ```rust
/// use pullhooks::adapter::create_source;
/// use pullhooks::stream::prelude::*;
///
/// let mut source = create_source::<_, ()>("hey");
/// source.pull(None, Box::new(|step| assert_eq!(step, Ok("hey"))));
/// source.pull(None, Box::new(|step| assert_eq!(step, Err(End::Clean))));
/// source.pull(None, Box::new(|step| assert_eq!(step, Err(End::Clean))));
/// ```
pub fn create_source<T, E>(value: T) -> Once<T, E> {
    Once {
        value: Some(value),
        _phantom: PhantomData,
    }
}

impl<T, E> Source<T, E> for Once<T, E>
where
    T: Send + 'static,
    E: 'static,
{
    fn pull(&mut self, end: Option<End<E>>, cb: Callback<T, E>) {
        if let Some(end) = end {
            // A terminated reader stays terminated.
            self.value = None;
            return cb(Err(end));
        }
        match self.value.take() {
            Some(value) => cb(Ok(value)),
            None => cb(Err(End::Clean)),
        }
    }
}
