//! One-shot listeners.

use crate::registry::{EventRegistry, Shared};
use chime_core::{BoxError, Flow, Handler, Listener};
use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

/// Wrapper that removes itself from its event before running the inner
/// listener.
///
/// Removal happens first, so a listener that triggers its own event again
/// does not see the wrapper a second time. The `fired` flag covers the
/// remaining case: an outer trigger whose snapshot still holds the wrapper
/// after a nested trigger already consumed it.
pub(crate) struct OnceListener<A> {
    event: String,
    listener: Listener<A>,
    registry: Weak<Shared<A>>,
    this: Weak<OnceListener<A>>,
    fired: AtomicBool,
}

impl<A: 'static> OnceListener<A> {
    pub(crate) fn wrap(
        registry: &EventRegistry<A>,
        event: &str,
        listener: Listener<A>,
    ) -> Listener<A> {
        let wrapper = Arc::new_cyclic(|this| OnceListener {
            event: event.to_owned(),
            listener,
            registry: registry.downgrade(),
            this: this.clone(),
            fired: AtomicBool::new(false),
        });
        Listener::from_arc(wrapper)
    }
}

impl<A: 'static> Handler<A> for OnceListener<A> {
    fn call(&self, args: &A) -> Result<Flow, BoxError> {
        if self.fired.swap(true, Ordering::AcqRel) {
            return Ok(Flow::Continue);
        }
        let registry = EventRegistry::upgrade(&self.registry);
        if let (Some(registry), Some(this)) = (registry, self.this.upgrade()) {
            registry.off(&self.event, Some(&Listener::from_arc(this)));
        }
        self.listener.call(args)
    }
}
