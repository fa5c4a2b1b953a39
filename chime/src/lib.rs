//! # chime - Priority-Ordered Event Registry
//!
//! `chime` is a synchronous, in-process publish/subscribe primitive. Listeners
//! are registered against event names with an integer priority, run in
//! ascending priority order (registration order breaks ties), and can stop
//! the rest of the chain by returning `false`.
//!
//! ## Quick Start
//!
//! ```rust
//! use chime::{Args, EventRegistry, args};
//!
//! let events = EventRegistry::<Args>::new();
//!
//! events.on_with_priority("greet", |args: &Args| {
//!     println!("Hello {}!", args.get::<&str>(0).copied().unwrap_or("nobody"));
//! }, 20);
//! events.on_with_priority("greet", |_: &Args| false, 10);
//!
//! // The priority 10 listener returns `false`, so nothing is printed.
//! assert!(!events.trigger("greet", &args!["World"]).unwrap());
//! ```
//!
//! ## Operations
//!
//! | Operation | Methods |
//! |-----------|---------|
//! | register  | [`EventRegistry::on`], [`EventRegistry::on_with_priority`], [`EventRegistry::register`] |
//! | listeners | [`EventRegistry::listeners`] |
//! | trigger   | [`EventRegistry::trigger`], [`EventRegistry::fire`] |
//! | off       | [`EventRegistry::off`], [`EventRegistry::remove_all_listeners`] |
//! | once      | [`EventRegistry::once`], [`EventRegistry::once_with_priority`], [`EventRegistry::register_once`] |
//!
//! Types that own a registry can expose the same operations by implementing
//! [`EventSource`].
//!
//! ## Threading
//!
//! Dispatch happens on the caller's thread. Listeners may call back into the
//! registry (register, remove, trigger); each trigger works on its own
//! snapshot of the listener list.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod source;

pub use chime_core::{
    // Arguments
    Args,
    // Error types
    BoxError,
    // Flow control
    Flow,
    // Handler
    Handler,
    IntoFlow,
    InvalidHandlerError,
    Listener,
    args,
};

pub use chime_std::{
    // Named handlers
    callable::{Callable, MethodTable, PATH_SEPARATOR},
    // Registry
    registry::{DEFAULT_PRIORITY, EventRegistry, EventRegistryBuilder},
    testing,
};

pub use source::EventSource;
