//! The sink driver.
//!
//! Pulls one value at a time, hands each answer to a step handler, and pulls
//! again only after the handler has returned. Answers that arrive before the
//! pull returns are looped on instead of recursed into, so a long
//! synchronous source runs in constant stack. Answers that arrive later,
//! from any thread, resume the loop where they land.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::stream::{BoxSource, Sink, Step};

/// What the driver does after handling a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Pull the next value.
    Continue,
    /// Stop pulling. Nothing is sent upstream.
    Stop,
}

/// A sink that feeds every answer to a step handler.
///
/// Created by [`drain`].
pub struct Drain<F> {
    on_step: F,
}

impl<F> fmt::Debug for Drain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain").field("on_step", &"<function>").finish()
    }
}

/// Build a sink from a step handler.
///
/// The handler sees every answer, values and terminations alike. Returning
/// [`Flow::Stop`] ends the drive; a termination ends it regardless.
pub fn drain<T, E, F>(on_step: F) -> Drain<F>
where
    F: FnMut(Step<T, E>) -> Flow + Send + 'static,
{
    Drain { on_step }
}

impl<T, E, F> Sink<T, E> for Drain<F>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnMut(Step<T, E>) -> Flow + Send + 'static,
{
    fn drain(self, read: BoxSource<T, E>) {
        let driver = Arc::new(Driver {
            read: Mutex::new(read),
            slot: Mutex::new(Slot {
                pulling: false,
                ready: None,
            }),
            on_step: Mutex::new(self.on_step),
        });
        Driver::run(driver);
    }
}

struct Slot<T, E> {
    pulling: bool,
    ready: Option<Step<T, E>>,
}

struct Driver<T, E, F> {
    read: Mutex<BoxSource<T, E>>,
    slot: Mutex<Slot<T, E>>,
    on_step: Mutex<F>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T, E, F> Driver<T, E, F>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnMut(Step<T, E>) -> Flow + Send + 'static,
{
    fn run(this: Arc<Self>) {
        loop {
            lock(&this.slot).pulling = true;

            let answer = Arc::clone(&this);
            lock(&this.read).pull(None, Box::new(move |step| Self::deliver(answer, step)));

            let ready = {
                let mut slot = lock(&this.slot);
                slot.pulling = false;
                slot.ready.take()
            };

            match ready {
                Some(step) => {
                    if this.handle(step) == Flow::Stop {
                        return;
                    }
                }
                // The answer has not arrived yet; whoever delivers it resumes.
                None => return,
            }
        }
    }

    fn deliver(this: Arc<Self>, step: Step<T, E>) {
        {
            let mut slot = lock(&this.slot);
            if slot.pulling {
                slot.ready = Some(step);
                return;
            }
        }
        if this.handle(step) == Flow::Continue {
            Self::run(this);
        }
    }

    fn handle(&self, step: Step<T, E>) -> Flow {
        let terminal = step.is_err();
        let flow = {
            let mut on_step = lock(&self.on_step);
            (*on_step)(step)
        };
        if terminal {
            Flow::Stop
        } else {
            flow
        }
    }
}
