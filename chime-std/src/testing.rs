//! Testing utilities for Chime.
//!
//! This module provides small helpers for asserting on what listeners did.
//!
//! # Features
//!
//! - [`Transcript`]: Collects text written by listeners, in call order
//! - [`CallCounter`]: Counts how often a listener ran

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Transcript
// ============================================================================

/// A shared text buffer listeners write into.
///
/// Asserting on the transcript checks both which listeners ran and in what
/// order.
///
/// # Example
///
/// ```rust
/// use chime_std::{EventRegistry, testing::Transcript};
///
/// let out = Transcript::new();
/// let events = EventRegistry::<()>::new();
/// events.on_with_priority("event", out.writer("world"), 20);
/// events.on_with_priority("event", out.writer("hello "), 10);
///
/// events.fire("event").unwrap();
/// assert_eq!(out.contents(), "hello world");
/// ```
#[derive(Clone, Default)]
pub struct Transcript {
    text: Arc<Mutex<String>>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text.
    pub fn write(&self, text: &str) {
        self.text.lock().push_str(text);
    }

    /// A listener closure that appends `text` every time it runs.
    pub fn writer<A: 'static>(&self, text: &'static str) -> impl Fn(&A) + Send + Sync + use<A> {
        let transcript = self.clone();
        move |_| transcript.write(text)
    }

    /// A copy of everything written so far.
    pub fn contents(&self) -> String {
        self.text.lock().clone()
    }

    /// Clear the transcript.
    pub fn clear(&self) {
        self.text.lock().clear();
    }
}

// ============================================================================
// Call Counter
// ============================================================================

/// Counts listener invocations.
#[derive(Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// A listener closure that records a call every time it runs.
    pub fn listener<A: 'static>(&self) -> impl Fn(&A) + Send + Sync + use<A> {
        let counter = self.clone();
        move |_| counter.hit()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
