//! Bridge from a reader to a [`futures::Stream`].

use std::fmt;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};

use futures::Stream;

use crate::stream::{BoxSource, End, Source, Step};

/// A [`Stream`] that pulls from a reader on demand.
///
/// Created by [`into_stream`]. Each `poll_next` with no answer outstanding
/// issues exactly one pull, so the reader is never asked for more than the
/// consumer polls for.
pub struct IntoStream<T, E> {
    read: BoxSource<T, E>,
    answer: Arc<Mutex<Answer<T, E>>>,
    waiting: bool,
    finished: bool,
}

struct Answer<T, E> {
    step: Option<Step<T, E>>,
    waker: Option<Waker>,
}

impl<T, E> fmt::Debug for IntoStream<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoStream")
            .field("waiting", &self.waiting)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Expose `read` as a stream of `Result<T, E>`.
///
/// A clean end finishes the stream. An error is yielded once as `Err` and
/// then the stream finishes.
///
/// ```rust
/// use futures::StreamExt;
/// use pullhooks::stream::prelude::*;
///
/// # tokio_test::block_on(async {
/// let items: Vec<Result<i32, String>> = into_stream(values(vec![1, 2])).collect().await;
/// assert_eq!(items, vec![Ok(1), Ok(2)]);
/// # });
/// ```
pub fn into_stream<T, E, S>(read: S) -> IntoStream<T, E>
where
    S: Source<T, E>,
{
    IntoStream {
        read: Box::new(read),
        answer: Arc::new(Mutex::new(Answer {
            step: None,
            waker: None,
        })),
        waiting: false,
        finished: false,
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T, E> Stream for IntoStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        if !this.waiting {
            this.waiting = true;
            lock(&this.answer).waker = Some(cx.waker().clone());
            let answer = Arc::clone(&this.answer);
            this.read.pull(
                None,
                Box::new(move |step| {
                    let waker = {
                        let mut answer = lock(&answer);
                        answer.step = Some(step);
                        answer.waker.take()
                    };
                    if let Some(waker) = waker {
                        waker.wake();
                    }
                }),
            );
        }

        let mut answer = lock(&this.answer);
        match answer.step.take() {
            Some(step) => {
                this.waiting = false;
                match step {
                    Ok(item) => Poll::Ready(Some(Ok(item))),
                    Err(End::Clean) => {
                        this.finished = true;
                        Poll::Ready(None)
                    }
                    Err(End::Error(e)) => {
                        this.finished = true;
                        Poll::Ready(Some(Err(e)))
                    }
                }
            }
            None => {
                answer.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
