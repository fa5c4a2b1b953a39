//! # Handlers and Listener Handles
//!
//! A [`Handler`] is anything that can run when an event fires. Closures taking
//! `&A` get the trait for free, so a closure whose argument type does not
//! match the registry's argument type is rejected by the compiler instead of
//! failing at trigger time.
//!
//! A [`Listener`] is the registered form of a handler: a shared handle whose
//! equality is the identity of the allocation behind it. Clones of one handle
//! compare equal; two closures with the same body built separately do not.

use crate::{
    error::BoxError,
    flow::{Flow, IntoFlow},
};
use std::{fmt, sync::Arc};

/// Something that can be invoked when an event is triggered.
///
/// Dispatch is synchronous: `call` runs to completion on the caller's thread
/// before the next listener is considered.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle arguments of type `{A}`",
    label = "missing `Handler<{A}>` implementation",
    note = "Handlers are closures `Fn(&{A}) -> R` where `R: IntoFlow`, or types implementing `call`."
)]
pub trait Handler<A>: Send + Sync + 'static {
    /// Runs the handler with the trigger's arguments.
    fn call(&self, args: &A) -> Result<Flow, BoxError>;
}

// Blanket impl for closures
impl<F, A, R> Handler<A> for F
where
    F: Fn(&A) -> R + Send + Sync + 'static,
    R: IntoFlow,
{
    fn call(&self, args: &A) -> Result<Flow, BoxError> {
        (self)(args).into_flow()
    }
}

/// A registered handler.
///
/// Cheap to clone. Used both to invoke the handler and, through its
/// identity, to remove it again.
pub struct Listener<A> {
    inner: Arc<dyn Handler<A>>,
}

impl<A: 'static> Listener<A> {
    /// Wraps a closure.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::from_handler(f)
    }

    /// Wraps any [`Handler`] implementation.
    pub fn from_handler<H: Handler<A>>(handler: H) -> Self {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// Wraps an already shared handler without reallocating.
    ///
    /// Listeners built from clones of the same `Arc` are equal.
    pub fn from_arc<H: Handler<A>>(handler: Arc<H>) -> Self {
        Self { inner: handler }
    }
}

impl<A: 'static> Listener<A> {
    /// Invokes the handler.
    pub fn call(&self, args: &A) -> Result<Flow, BoxError> {
        self.inner.call(args)
    }

    /// Returns `true` if both handles point at the same handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl<A: 'static> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: 'static> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A: 'static> Eq for Listener<A> {}

impl<A: 'static> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
