//! A process-wide registry shared through a static.

use chime::{Args, EventRegistry, args};
use lazy_static::lazy_static;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

lazy_static! {
    static ref EVENTS: EventRegistry<Args> = EventRegistry::new();
}

#[test]
fn test_static_registry_dispatches() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let listener = EVENTS.on("global.tick", move |args: &Args| {
        let step = args.get::<usize>(0).copied().unwrap_or(1);
        counter.fetch_add(step, Ordering::SeqCst);
    });

    assert!(EVENTS.trigger("global.tick", &args![5_usize]).unwrap());
    assert!(EVENTS.fire("global.tick").unwrap());
    assert_eq!(seen.load(Ordering::SeqCst), 6);
    assert!(EVENTS.off("global.tick", Some(&listener)));
}

#[test]
fn test_static_registry_from_many_threads() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let sink = order.clone();
    EVENTS.on("global.work", move |args: &Args| {
        if let Some(id) = args.get::<usize>(0) {
            sink.lock().unwrap().push(*id);
        }
    });

    std::thread::scope(|scope| {
        for id in 0..4_usize {
            scope.spawn(move || EVENTS.trigger("global.work", &args![id]).unwrap());
        }
    });

    let mut seen = order.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert!(EVENTS.remove_all_listeners("global.work"));
}
