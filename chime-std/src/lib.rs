//! # chime-std
//!
//! Standard implementation of the Chime event registry.
//!
//! This crate provides:
//! - **Registry**: [`EventRegistry`], priority-ordered listeners per event name
//! - **One-shot listeners**: [`EventRegistry::once`] and friends
//! - **Named handlers**: [`Callable`] and [`MethodTable`]
//! - **Testing helpers**: [`testing`]
//!
//! # Features
//!
//! - `tracing` (default): structured logs for registration, removal and
//!   short-circuited dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use chime_core;
pub use chime_core::{
    Args, BoxError, Flow, Handler, IntoFlow, InvalidHandlerError, Listener, args,
};

// Modules
pub mod callable;
mod once;
pub mod registry;
pub mod testing;

pub use callable::{Callable, MethodTable};
pub use registry::{DEFAULT_PRIORITY, EventRegistry, EventRegistryBuilder};
