//! # chime-core
//!
//! Core traits for the Chime event registry.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only writes listeners and does not need the registry itself from
//! `chime-std`.
//!
//! # Building Blocks
//!
//! ## [`Handler`]
//!
//! The invocable unit. Any `Fn(&A) -> R` closure is a handler as long as its
//! return value converts via [`IntoFlow`]. Handlers are synchronous and run on
//! the caller's thread.
//!
//! ## [`Listener`]
//!
//! A registered handler. It is a shared handle: registration hands it back to
//! the caller, and removal finds it again by identity.
//!
//! ## [`Flow`]
//!
//! The dispatch decision produced by each listener. Returning `false` (or
//! [`Flow::Stop`]) ends the chain for the current trigger.
//!
//! ## [`Args`]
//!
//! The default, dynamically typed argument list passed to every listener of a
//! trigger.
//!
//! # Error Types
//!
//! - [`InvalidHandlerError`] - Registration-time rejection of a handler
//! - [`BoxError`] - Carrier for errors raised by listener bodies

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod error;
mod flow;
mod handler;

// Re-exports
pub use args::Args;
pub use error::{BoxError, InvalidHandlerError};
pub use flow::{Flow, IntoFlow};
pub use handler::{Handler, Listener};
