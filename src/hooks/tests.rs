//! Tests for hook assembly and the effect/subscription wrappers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::adapter::{create_source, Reply, SendAdapter};
use crate::stream::prelude::*;
use crate::testing::{PendingDispatch, Recorder};

fn noop_send<T>(_: &str, _: T, _: Reply<T, String>) {}

mod options_tests {
    use super::*;

    #[test]
    fn default_enables_both_hooks() {
        let all = hooks(None);
        assert_eq!(all.names(), vec![WRAP_EFFECTS, WRAP_SUBSCRIPTIONS]);
        assert!(all.effects().is_some());
        assert!(all.subscriptions().is_some());
        assert_eq!(all.len(), 2);
        assert_eq!(hooks(Some(HookOptions::default())), all);
    }

    #[test]
    fn disabling_subscriptions_removes_only_that_key() {
        let only_effects = hooks(Some(HookOptions::default().with_subscriptions(false)));
        assert_eq!(only_effects.names(), vec![WRAP_EFFECTS]);
        assert_eq!(only_effects.get(WRAP_SUBSCRIPTIONS), None);
        assert_eq!(only_effects.get(WRAP_EFFECTS), Some(Hook::Effects));
    }

    #[test]
    fn disabling_effects_removes_only_that_key() {
        let only_subscriptions = hooks(Some(HookOptions::default().with_effects(false)));
        assert_eq!(only_subscriptions.names(), vec![WRAP_SUBSCRIPTIONS]);
        assert!(only_subscriptions.effects().is_none());
        assert!(only_subscriptions.contains(WRAP_SUBSCRIPTIONS));
    }

    #[test]
    fn disabling_both_leaves_nothing() {
        let none = hooks(Some(HookOptions {
            effects: false,
            subscriptions: false,
        }));
        assert!(none.is_empty());
        assert_eq!(none.len(), 0);
    }

    #[test]
    fn hook_names_round_trip() {
        for hook in [Hook::Effects, Hook::Subscriptions] {
            assert_eq!(Hook::from_name(hook.name()), Some(hook));
            assert_eq!(hook.to_string(), hook.name());
        }
        assert_eq!(Hook::from_name("wrapReducers"), None);
    }

    #[cfg(feature = "serde")]
    mod value_tests {
        use super::*;
        use crate::error::ConfigError;
        use serde_json::json;

        #[test]
        fn non_objects_are_rejected() {
            let cases = [
                (json!(123), "number"),
                (json!("opts"), "string"),
                (json!(true), "boolean"),
                (json!([1, 2]), "array"),
            ];
            for (value, kind) in cases {
                assert_eq!(
                    hooks_from_value(&value),
                    Err(ConfigError::not_an_object(kind))
                );
            }
        }

        #[test]
        fn null_and_objects_are_accepted() {
            assert_eq!(hooks_from_value(&json!(null)), Ok(hooks(None)));
            assert_eq!(hooks_from_value(&json!({})), Ok(hooks(None)));
            assert_eq!(
                hooks_from_value(&json!({ "subscriptions": false, "extra": 1 }))
                    .map(|h| h.names()),
                Ok(vec![WRAP_EFFECTS])
            );
        }

        #[test]
        fn only_literal_false_disables() {
            let opts = HookOptions::from_value(&json!({ "effects": 0, "subscriptions": null }));
            assert_eq!(opts, Ok(HookOptions::default()));
        }

        #[test]
        fn typed_options_deserialize_with_defaults() {
            let opts: HookOptions = serde_json::from_value(json!({ "effects": false })).unwrap();
            assert_eq!(opts, HookOptions::default().with_effects(false));
        }
    }
}

mod subscription_tests {
    use super::*;

    #[test]
    fn reports_single_value_once() {
        let subscription = wrap_subscriptions(|_send: SendAdapter<String, String>| {
            create_source::<_, String>("hey!")
        });

        let recorder = Recorder::new();
        subscription.call(noop_send::<String>, recorder.done());

        assert_eq!(recorder.calls(), vec![Ok("hey!")]);
    }

    #[test]
    fn reports_error_once() {
        let subscription = wrap_subscriptions(|_send: SendAdapter<String, String>| {
            fail::<&str, _>("oh no!".to_string())
        });

        let recorder = Recorder::new();
        subscription.call(noop_send::<String>, recorder.done());

        assert_eq!(recorder.calls(), vec![Err("oh no!".to_string())]);
    }

    #[test]
    fn streams_every_produced_value() {
        let subscription =
            wrap_subscriptions(|_send: SendAdapter<i32, String>| values(vec![1, 2, 3]));

        let recorder = Recorder::new();
        subscription.call(noop_send::<i32>, recorder.done());

        assert_eq!(recorder.calls(), vec![Ok(1), Ok(2), Ok(3)]);
    }

    #[test]
    fn send_stage_round_trips_through_dispatch() {
        let subscription = wrap_subscriptions(|send: SendAdapter<String, String>| {
            pull(values(vec!["tick".to_string()]))
                .through(send.action("clock"))
                .into_source()
        });

        let dispatch = |action: &str, payload: String, reply: Reply<String, String>| {
            reply.ok(format!("{}:{}", action, payload))
        };
        let recorder = Recorder::new();
        subscription.call(dispatch, recorder.done());

        assert_eq!(recorder.calls(), vec![Ok("clock:tick".to_string())]);
    }

    #[test]
    fn handler_is_reusable_with_fresh_state() {
        let starts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&starts);
        let subscription = wrap_subscriptions(move |_send: SendAdapter<i32, String>| {
            counter.fetch_add(1, Ordering::SeqCst);
            create_source::<_, String>(7)
        });

        for _ in 0..2 {
            let recorder = Recorder::new();
            subscription.call(noop_send::<i32>, recorder.done());
            assert_eq!(recorder.calls(), vec![Ok(7)]);
        }
        assert_eq!(starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn through_hook_handle() {
        let all = hooks(None);
        let subscription = all
            .subscriptions()
            .unwrap()
            .wrap(|_send: SendAdapter<i32, String>| values(vec![9]));

        let recorder = Recorder::new();
        subscription.call(noop_send::<i32>, recorder.done());
        assert_eq!(recorder.calls(), vec![Ok(9)]);
    }
}

mod effect_tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct State {
        foo: String,
    }

    fn state() -> State {
        State {
            foo: "bar".to_string(),
        }
    }

    #[test]
    fn transform_sees_state_and_reports_once() {
        let saw_state = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&saw_state);

        let effect = wrap_effects(
            move |state: &State, _prev: &State, _send: SendAdapter<String, String>| {
                let flag = Arc::clone(&flag);
                let expected = state.clone();
                move |mut read: BoxSource<&'static str, String>| {
                    let mut called = false;
                    from_fn(move |end: Option<End<String>>, cb: Callback<&'static str, String>| {
                        let flag = Arc::clone(&flag);
                        let expected = expected.clone();
                        let already = called;
                        called = true;
                        read.pull(
                            end,
                            Box::new(move |step| match step {
                                Err(end) => cb(Err(end)),
                                Ok(_) if already => cb(Err(End::Clean)),
                                Ok(_) => {
                                    flag.store(expected.foo == "bar", Ordering::SeqCst);
                                    cb(Ok("oi"))
                                }
                            }),
                        )
                    })
                }
            },
        );

        let current = state();
        let recorder = Recorder::new();
        effect.call("hey", &current, &state(), noop_send::<String>, recorder.done());

        assert_eq!(recorder.calls(), vec![Ok("oi")]);
        assert!(saw_state.load(Ordering::SeqCst));
    }

    #[test]
    fn callback_receives_the_exact_state_objects() {
        let current = state();
        let prev = State {
            foo: "before".to_string(),
        };
        let current_addr = &current as *const State as usize;
        let prev_addr = &prev as *const State as usize;

        let effect = wrap_effects(
            move |state: &State, prev: &State, _send: SendAdapter<i32, String>| {
                assert_eq!(state as *const State as usize, current_addr);
                assert_eq!(prev as *const State as usize, prev_addr);
                map(|n: i32| n)
            },
        );

        let recorder = Recorder::new();
        effect.call(1, &current, &prev, noop_send::<i32>, recorder.done());
        assert_eq!(recorder.calls(), vec![Ok(1)]);
    }

    #[test]
    fn error_from_stage_reaches_done() {
        let effect = wrap_effects(|_: &State, _: &State, _send: SendAdapter<i32, String>| {
            |mut read: BoxSource<i32, String>| {
                from_fn(move |end: Option<End<String>>, cb: Callback<i32, String>| {
                    read.pull(
                        end,
                        Box::new(move |step| match step {
                            Ok(n) => cb(Err(End::Error(format!("refused {}", n)))),
                            Err(end) => cb(Err(end)),
                        }),
                    )
                })
            }
        });

        let recorder = Recorder::new();
        effect.call(3, &state(), &state(), noop_send::<i32>, recorder.done());
        assert_eq!(recorder.calls(), vec![Err("refused 3".to_string())]);
    }

    #[test]
    fn send_stage_dispatches_payload() {
        let effect = wrap_effects(|_: &State, _: &State, send: SendAdapter<String, String>| {
            send.action("save")
        });

        let pending = PendingDispatch::<String, String>::new();
        let recorder = Recorder::new();
        effect.call(
            "payload".to_string(),
            &state(),
            &state(),
            pending.dispatch(),
            recorder.done(),
        );
        assert!(recorder.is_empty());

        let (action, payload, reply) = pending.pop().unwrap();
        assert_eq!((action.as_str(), payload.as_str()), ("save", "payload"));
        reply.ok("saved".to_string());

        assert_eq!(recorder.calls(), vec![Ok("saved".to_string())]);
    }

    #[test]
    fn send_failure_reaches_done() {
        let effect = wrap_effects(|_: &State, _: &State, send: SendAdapter<i32, String>| {
            send.action("explode")
        });

        let dispatch = |_: &str, _: i32, reply: Reply<i32, String>| reply.err("boom".to_string());
        let recorder = Recorder::new();
        effect.call(1, &state(), &state(), dispatch, recorder.done());

        assert_eq!(recorder.calls(), vec![Err("boom".to_string())]);
    }

    #[test]
    fn payload_flows_through_stage_once() {
        let effect = wrap_effects(|_: &State, _: &State, _send: SendAdapter<i32, String>| {
            map(|n: i32| n * 100)
        });

        let recorder = Recorder::new();
        effect.call(2, &state(), &state(), noop_send::<i32>, recorder.done());
        assert_eq!(recorder.calls(), vec![Ok(200)]);
    }

    #[test]
    fn through_hook_handle() {
        let all = hooks(None);
        let effect = all
            .effects()
            .unwrap()
            .wrap(|_: &State, _: &State, _send: SendAdapter<i32, String>| map(|n: i32| n + 1));

        let recorder = Recorder::new();
        effect.call(1, &state(), &state(), noop_send::<i32>, recorder.done());
        assert_eq!(recorder.calls(), vec![Ok(2)]);
    }
}
