//! Error types for Chime.
//!
//! The registry reports exactly one error of its own:
//!
//! - [`InvalidHandlerError`] - A handler was rejected at registration time
//!
//! Errors raised by listener bodies are not Chime errors. They travel as a
//! [`BoxError`] and come back out of `trigger` exactly as the listener
//! produced them.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A handler could not be installed.
///
/// Registration either succeeds completely or installs nothing, so a caller
/// receiving this error can fix the handler and register again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidHandlerError {
    /// The named handler does not resolve to anything invocable.
    #[error("handler `{handler}` is not callable")]
    NotCallable {
        /// The name as supplied by the caller.
        handler: String,
    },

    /// A method that needs a receiver was referenced without one.
    #[error("`{class}::{method}` is an instance method and cannot be called statically")]
    NotStatic {
        /// Class the method was looked up on.
        class: String,
        /// Method name.
        method: String,
    },

    /// The receiver supplied for binding is not of the method's receiver type.
    #[error("receiver does not match the receiver type of `{class}::{method}`")]
    ReceiverMismatch {
        /// Class the method was looked up on.
        class: String,
        /// Method name.
        method: String,
    },
}

impl InvalidHandlerError {
    /// Shorthand for [`InvalidHandlerError::NotCallable`].
    pub fn not_callable(handler: impl Into<String>) -> Self {
        Self::NotCallable {
            handler: handler.into(),
        }
    }
}
