//! The event source capability.
//!
//! Any type that owns an [`EventRegistry`] becomes an event source by
//! implementing one method. Every other operation is provided and delegates
//! to the registry.
//!
//! ```rust
//! use chime::{Args, EventRegistry, EventSource, args};
//!
//! struct Door {
//!     events: EventRegistry,
//! }
//!
//! impl EventSource for Door {
//!     fn events(&self) -> &EventRegistry {
//!         &self.events
//!     }
//! }
//!
//! let door = Door { events: EventRegistry::new() };
//! door.on("open", |args: &Args| args.get::<bool>(0).copied().unwrap_or(true));
//! assert!(!door.trigger("open", &args![false]).unwrap());
//! ```

use chime_core::{Args, BoxError, IntoFlow, InvalidHandlerError, Listener};
use chime_std::{Callable, EventRegistry};

/// A type that exposes an event registry.
pub trait EventSource<A: 'static = Args> {
    /// The registry backing this source.
    fn events(&self) -> &EventRegistry<A>;

    /// Register a closure at the default priority.
    fn on<F, R>(&self, event: &str, f: F) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.events().on(event, f)
    }

    /// Register a closure at `priority`.
    fn on_with_priority<F, R>(&self, event: &str, f: F, priority: i32) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.events().on_with_priority(event, f, priority)
    }

    /// Register any callable form, validating it first.
    fn register(
        &self,
        event: &str,
        handler: impl Into<Callable<A>>,
        priority: i32,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        self.events().register(event, handler, priority)
    }

    /// Listeners of `event` in dispatch order.
    fn listeners(&self, event: &str) -> Vec<Listener<A>> {
        self.events().listeners(event)
    }

    /// Trigger `event` with `args`.
    fn trigger(&self, event: &str, args: &A) -> Result<bool, BoxError> {
        self.events().trigger(event, args)
    }

    /// Trigger `event` with empty arguments.
    fn fire(&self, event: &str) -> Result<bool, BoxError>
    where
        A: Default,
    {
        self.events().fire(event)
    }

    /// Remove one listener, or all of them with `None`.
    fn off(&self, event: &str, listener: Option<&Listener<A>>) -> bool {
        self.events().off(event, listener)
    }

    /// Remove every listener of `event`.
    fn remove_all_listeners(&self, event: &str) -> bool {
        self.events().remove_all_listeners(event)
    }

    /// Register a one-shot closure at the default priority.
    fn once<F, R>(&self, event: &str, f: F) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.events().once(event, f)
    }

    /// Alias of [`once`](Self::once).
    fn one<F, R>(&self, event: &str, f: F) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.once(event, f)
    }

    /// Register any callable form as a one-shot listener.
    fn register_once(
        &self,
        event: &str,
        handler: impl Into<Callable<A>>,
        priority: i32,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        self.events().register_once(event, handler, priority)
    }
}

impl<A: 'static> EventSource<A> for EventRegistry<A> {
    fn events(&self) -> &EventRegistry<A> {
        self
    }
}
