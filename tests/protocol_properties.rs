//! Property-based tests for the pull protocol and the adapters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use pullhooks::adapter::{create_send, create_sink, create_source, Reply};
use pullhooks::stream::prelude::*;
use pullhooks::testing::Recorder;

fn record<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<Step<T, String>>>>, Callback<T, String>) {
    let out = Arc::new(Mutex::new(Vec::new()));
    let slot = Arc::clone(&out);
    (out, Box::new(move |step| slot.lock().unwrap().push(step)))
}

proptest! {
    #[test]
    fn source_yields_value_once_then_ends(value in any::<i64>(), extra in 0usize..16) {
        let mut source = create_source::<_, String>(value);

        let (first, cb) = record();
        source.pull(None, cb);
        prop_assert_eq!(first.lock().unwrap().clone(), vec![Ok(value)]);

        for _ in 0..extra {
            let (later, cb) = record();
            source.pull(None, cb);
            prop_assert_eq!(later.lock().unwrap().clone(), vec![Err(End::Clean)]);
        }
    }

    #[test]
    fn sink_reports_every_value_in_order(items in prop::collection::vec(any::<i32>(), 0..64)) {
        let recorder = Recorder::<i32, String>::new();
        pull(values(items.clone())).sink(create_sink(recorder.done()));

        let expected: Vec<Result<i32, String>> = items.into_iter().map(Ok).collect();
        prop_assert_eq!(recorder.calls(), expected);
    }

    #[test]
    fn sink_stops_at_first_error(
        items in prop::collection::vec(any::<u8>(), 0..32),
        fail_at in 0usize..40,
    ) {
        let mut position = 0usize;
        let mut source = values::<_, String>(items.clone());
        let failing = from_fn(move |end: Option<End<String>>, cb: Callback<u8, String>| {
            if end.is_none() && position == fail_at {
                position += 1;
                return cb(Err(End::Error(format!("failed at {}", fail_at))));
            }
            position += 1;
            source.pull(end, cb)
        });

        let recorder = Recorder::new();
        pull(failing).sink(create_sink(recorder.done()));
        let calls = recorder.calls();

        if fail_at < items.len() {
            prop_assert_eq!(calls.len(), fail_at + 1);
            prop_assert_eq!(calls.last().cloned(), Some(Err(format!("failed at {}", fail_at))));
        } else if fail_at == items.len() {
            // The failure replaces the clean end.
            prop_assert_eq!(calls.len(), items.len() + 1);
        } else {
            prop_assert_eq!(calls.len(), items.len());
            prop_assert!(calls.iter().all(Result::is_ok));
        }
    }

    #[test]
    fn send_dispatches_each_value_once(items in prop::collection::vec(any::<i16>(), 0..32)) {
        let dispatches = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&dispatches);
        let send = create_send(move |_: &str, n: i16, reply: Reply<i16, String>| {
            counter.fetch_add(1, Ordering::SeqCst);
            reply.ok(n.wrapping_neg())
        });

        let recorder = Recorder::new();
        pull(values(items.clone()))
            .through(send.action("negate"))
            .sink(create_sink(recorder.done()));

        prop_assert_eq!(dispatches.load(Ordering::SeqCst), items.len());
        let expected: Vec<Result<i16, String>> =
            items.into_iter().map(|n| Ok(n.wrapping_neg())).collect();
        prop_assert_eq!(recorder.calls(), expected);
    }

    #[test]
    fn send_reply_is_passed_through_verbatim(reply_ok in any::<bool>(), value in any::<u32>()) {
        let send = create_send(move |_: &str, n: u32, reply: Reply<u32, String>| {
            if reply_ok {
                reply.ok(n)
            } else {
                reply.err(format!("rejected {}", n))
            }
        });

        let recorder = Recorder::new();
        pull(create_source(value))
            .through(send.action("check"))
            .sink(create_sink(recorder.done()));

        let expected = if reply_ok { Ok(value) } else { Err(format!("rejected {}", value)) };
        prop_assert_eq!(recorder.calls(), vec![expected]);
    }
}
