#![allow(dead_code)]

use chime::{Args, EventRegistry, MethodTable};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Receiver type for the instance method defined in [`fixture_methods`].
pub struct Fixture {
    pub calls: AtomicUsize,
}

impl Fixture {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// `Fixture::on_event` needs a receiver, `Fixture::on_static` does not.
pub fn fixture_methods(static_calls: Arc<AtomicUsize>) -> MethodTable<Args> {
    let mut table = MethodTable::new();
    table
        .define_instance("Fixture", "on_event", |fixture: &Fixture, _: &Args| {
            fixture.calls.fetch_add(1, Ordering::SeqCst);
        })
        .define_static("Fixture", "on_static", move |_: &Args| {
            static_calls.fetch_add(1, Ordering::SeqCst);
        });
    table
}

pub fn registry_with_fixture(static_calls: Arc<AtomicUsize>) -> EventRegistry<Args> {
    EventRegistry::builder()
        .methods(fixture_methods(static_calls))
        .build()
}
