//! Ordering, short-circuit and removal behavior of `trigger`.

use chime::{Args, EventRegistry, Flow, args, testing::Transcript};
use std::sync::{Arc, Mutex};

#[test]
fn test_listener_receives_arguments_once() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let registry = EventRegistry::<Args>::new();
    let sink = received.clone();
    registry.on("event", move |args: &Args| {
        let name = args.get::<&str>(0).copied().unwrap_or_default();
        let count = args.get::<u32>(1).copied().unwrap_or_default();
        sink.lock().unwrap().push((name, count));
    });

    assert!(registry.trigger("event", &args!["World", 3_u32]).unwrap());
    assert_eq!(*received.lock().unwrap(), vec![("World", 3)]);
}

#[test]
fn test_remove_all_then_trigger_runs_nothing() {
    let out = Transcript::new();
    let registry = EventRegistry::<Args>::new();
    registry.on("event", out.writer("event"));

    assert!(registry.remove_all_listeners("event"));
    assert!(registry.fire("event").unwrap());
    assert_eq!(out.contents(), "");
}

#[test]
fn test_same_priority_keeps_registration_order() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    registry.on_with_priority("event", out.writer("This "), 20);
    registry.on_with_priority("event", out.writer("is a "), 20);
    registry.on_with_priority("event", out.writer("event handler!"), 20);

    registry.fire("event").unwrap();
    assert_eq!(out.contents(), "This is a event handler!");
}

#[test]
fn test_lower_priority_runs_first() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    registry.on_with_priority("event", out.writer("is a "), 20);
    registry.on_with_priority("event", out.writer("This "), 10);
    registry.on_with_priority("event", out.writer("event handler!"), 30);

    registry.fire("event").unwrap();
    assert_eq!(out.contents(), "This is a event handler!");
}

#[test]
fn test_negative_priorities_sort_before_default() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    registry.on("event", out.writer("b"));
    registry.on_with_priority("event", out.writer("a"), -1);
    registry.on_with_priority("event", out.writer("c"), i32::MAX);

    registry.fire("event").unwrap();
    assert_eq!(out.contents(), "abc");
}

#[test]
fn test_returning_false_stops_dispatch() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    let log = out.clone();
    registry.on("event", move |_| {
        log.write("A");
        false
    });
    registry.on("event", out.writer("B"));

    assert!(!registry.fire("event").unwrap());
    assert_eq!(out.contents(), "A");
}

#[test]
fn test_only_boolean_false_stops() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    let log = out.clone();
    registry.on("event", move |_| {
        log.write("A");
        None::<bool>
    });
    registry.on("event", |_| true);
    registry.on("event", |_| Flow::Continue);
    registry.on("event", out.writer("B"));

    assert!(registry.fire("event").unwrap());
    assert_eq!(out.contents(), "AB");
}

#[test]
fn test_unknown_event_is_empty_and_succeeds() {
    let registry = EventRegistry::<Args>::new();
    assert!(registry.listeners("missing").is_empty());
    assert!(registry.trigger("missing", &args![]).unwrap());
    assert!(!registry.off("missing", None));
}

#[test]
fn test_listeners_order_is_idempotent() {
    let registry = EventRegistry::<()>::new();
    let c = registry.on_with_priority("event", |_| (), 30);
    let a = registry.on_with_priority("event", |_| (), 10);
    let b = registry.on_with_priority("event", |_| (), 20);

    let first = registry.listeners("event");
    assert_eq!(first, vec![a, b, c]);
    assert_eq!(registry.listeners("event"), first);
    assert_eq!(registry.listeners("event"), first);
}

#[test]
fn test_off_matches_identity_not_body() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    let first = registry.on("event", out.writer("x"));
    let twin: chime::Listener<()> = chime::Listener::new(out.writer("x"));

    assert!(!registry.off("event", Some(&twin)));
    assert!(registry.off("event", Some(&first)));
    assert!(!registry.has_listeners("event"));
}

#[test]
fn test_listener_error_propagates_and_aborts() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    registry.on_with_priority("event", out.writer("A"), 1);
    registry.on_with_priority(
        "event",
        |_| Err::<(), _>(std::io::Error::other("disk on fire")),
        2,
    );
    registry.on_with_priority("event", out.writer("C"), 3);

    let err = registry.fire("event").unwrap_err();
    assert_eq!(err.to_string(), "disk on fire");
    assert!(err.downcast_ref::<std::io::Error>().is_some());
    assert_eq!(out.contents(), "A");
    assert_eq!(registry.listener_count("event"), 3);
}

#[test]
fn test_removal_during_dispatch_applies_to_next_trigger() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    let late = registry.on_with_priority("event", out.writer("late "), 2);

    let (inner, log) = (registry.clone(), out.clone());
    registry.on_with_priority(
        "event",
        move |_| {
            log.write("early ");
            inner.off("event", Some(&late));
        },
        1,
    );

    registry.fire("event").unwrap();
    registry.fire("event").unwrap();
    assert_eq!(out.contents(), "early late early ");
}

#[test]
fn test_registration_during_dispatch_applies_to_next_trigger() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    let (inner, log) = (registry.clone(), out.clone());
    registry.once("event", move |_| {
        inner.on("event", log.writer("added "));
    });

    registry.fire("event").unwrap();
    assert_eq!(out.contents(), "");
    registry.fire("event").unwrap();
    assert_eq!(out.contents(), "added ");
}

#[test]
fn test_nested_trigger_of_other_event() {
    let out = Transcript::new();
    let registry = EventRegistry::<()>::new();
    registry.on("inner", out.writer("inner "));
    let (inner, log) = (registry.clone(), out.clone());
    registry.on("outer", move |_| {
        log.write("outer ");
        inner.fire("inner")
    });

    assert!(registry.fire("outer").unwrap());
    assert_eq!(out.contents(), "outer inner ");
}
