//! Flow control for the dispatch chain.

use crate::error::BoxError;

/// Whether dispatch continues after a listener has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the next listener.
    Continue,
    /// Skip every remaining listener for this trigger.
    Stop,
}

impl Flow {
    /// Returns `true` for [`Flow::Stop`].
    pub fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

/// Trait for converting a listener's return value into a [`Flow`].
///
/// # Default Implementations
///
/// - `()` → Continue
/// - `bool` → `false` = Stop, `true` = Continue
/// - `Flow` → As is
/// - `Option<T>` → `None` = Continue, otherwise delegates to `T`
/// - `Result<T, E>` → Delegates to inner `T` or propagates the error
///
/// Only an explicit `false` (or [`Flow::Stop`]) short-circuits dispatch;
/// there is no notion of a "falsy" value.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a listener",
    label = "missing `IntoFlow` implementation",
    note = "Listeners return `()`, `bool`, `Flow`, `Option<_>` or `Result<_, _>`."
)]
pub trait IntoFlow {
    /// Convert the output into a dispatch decision or a listener error.
    fn into_flow(self) -> Result<Flow, BoxError>;
}

impl IntoFlow for () {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(Flow::Continue)
    }
}

impl IntoFlow for bool {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(if self { Flow::Continue } else { Flow::Stop })
    }
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(self)
    }
}

impl<T: IntoFlow> IntoFlow for Option<T> {
    fn into_flow(self) -> Result<Flow, BoxError> {
        match self {
            Some(t) => t.into_flow(),
            None => Ok(Flow::Continue),
        }
    }
}

impl<T, E> IntoFlow for Result<T, E>
where
    T: IntoFlow,
    E: Into<BoxError>,
{
    fn into_flow(self) -> Result<Flow, BoxError> {
        match self {
            Ok(t) => t.into_flow(),
            Err(e) => Err(e.into()),
        }
    }
}
