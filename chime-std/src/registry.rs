//! Priority-ordered event registry.
//!
//! The registry maps event names to buckets of listeners. Each bucket keeps
//! its entries in registration order and only re-sorts lazily, when an
//! ordered view is actually needed, so registration stays a plain push.
//!
//! Dispatch works on a snapshot: the listener list for a trigger is cloned
//! out under the lock and the lock is released before any listener runs.
//! Listeners can therefore register, remove or trigger events on the same
//! registry; such changes apply to the next trigger, not the running one.

use crate::{
    callable::{Callable, MethodTable},
    once::OnceListener,
};
use chime_core::{Args, BoxError, Flow, IntoFlow, InvalidHandlerError, Listener};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

/// Priority used when none is given. Lower values run earlier.
pub const DEFAULT_PRIORITY: i32 = 100;

struct ListenerEntry<A> {
    listener: Listener<A>,
    priority: i32,
    sequence: u64,
}

/// Listeners of one event name plus the validity bit of their order.
struct EventBucket<A> {
    entries: Vec<ListenerEntry<A>>,
    sorted: bool,
}

impl<A: 'static> EventBucket<A> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            sorted: true,
        }
    }

    fn push(&mut self, entry: ListenerEntry<A>) {
        // A single entry is trivially ordered.
        if !self.entries.is_empty() {
            self.sorted = false;
        }
        self.entries.push(entry);
    }

    fn uniform_priority(&self) -> bool {
        match self.entries.split_first() {
            Some((first, rest)) => rest.iter().all(|e| e.priority == first.priority),
            None => true,
        }
    }

    /// Restores `(priority, sequence)` order. Returns `true` if a sort ran.
    fn ensure_sorted(&mut self) -> bool {
        // Entries only ever get appended, so equal priorities are already in
        // sequence order.
        if self.sorted || self.uniform_priority() {
            self.sorted = true;
            return false;
        }
        self.entries.sort_by_key(|e| (e.priority, e.sequence));
        self.sorted = true;
        true
    }

    fn remove(&mut self, listener: &Listener<A>) -> Option<ListenerEntry<A>> {
        let index = self.entries.iter().position(|e| e.listener == *listener)?;
        // `Vec::remove` keeps the relative order, so `sorted` stays valid.
        Some(self.entries.remove(index))
    }
}

struct State<A> {
    buckets: HashMap<String, EventBucket<A>>,
    next_sequence: u64,
}

pub(crate) struct Shared<A> {
    state: Mutex<State<A>>,
    default_priority: i32,
    methods: Option<MethodTable<A>>,
}

/// An in-process publish/subscribe registry.
///
/// Cloning is cheap and yields another handle to the same listeners.
///
/// # Example
/// ```
/// use chime_std::{Args, EventRegistry, args};
///
/// let events = EventRegistry::<Args>::new();
/// events.on("hello", |_: &Args| print!("Hello "));
/// events.on("hello", |args: &Args| {
///     print!("{}!", args.get::<&str>(0).copied().unwrap_or("nobody"))
/// });
///
/// assert!(events.trigger("hello", &args!["World"]).unwrap());
/// ```
pub struct EventRegistry<A = Args> {
    shared: Arc<Shared<A>>,
}

impl<A> Clone for EventRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: 'static> Default for EventRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> EventRegistry<A> {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a registry.
    pub fn builder() -> EventRegistryBuilder<A> {
        EventRegistryBuilder::new()
    }

    /// Priority applied by [`on`](Self::on) and [`once`](Self::once).
    pub fn default_priority(&self) -> i32 {
        self.shared.default_priority
    }

    /// The method table named handlers are resolved against, if any.
    pub fn methods(&self) -> Option<&MethodTable<A>> {
        self.shared.methods.as_ref()
    }

    pub(crate) fn downgrade(&self) -> Weak<Shared<A>> {
        Arc::downgrade(&self.shared)
    }

    pub(crate) fn upgrade(shared: &Weak<Shared<A>>) -> Option<Self> {
        shared.upgrade().map(|shared| Self { shared })
    }

    /// Register a handler for `event`.
    ///
    /// Named handlers are resolved against the registry's method table first;
    /// a handler that does not resolve is rejected and nothing is installed.
    /// Returns the installed listener, which can later be passed to
    /// [`off`](Self::off).
    pub fn register(
        &self,
        event: &str,
        handler: impl Into<Callable<A>>,
        priority: i32,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        let listener = self.resolve(event, handler.into())?;
        self.insert(event, listener.clone(), priority);
        Ok(listener)
    }

    /// Register a closure at the default priority.
    pub fn on<F, R>(&self, event: &str, f: F) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.on_with_priority(event, f, self.shared.default_priority)
    }

    /// Register a closure at `priority`.
    pub fn on_with_priority<F, R>(&self, event: &str, f: F, priority: i32) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        let listener = Listener::new(f);
        self.insert(event, listener.clone(), priority);
        listener
    }

    /// Register a handler that runs on the next trigger of `event` only.
    ///
    /// The returned value is the handler as given, not the wrapper that is
    /// actually installed; passing it to [`off`](Self::off) does not cancel
    /// the pending registration. Use [`remove_all_listeners`](Self::remove_all_listeners)
    /// for that.
    pub fn register_once(
        &self,
        event: &str,
        handler: impl Into<Callable<A>>,
        priority: i32,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        let listener = self.resolve(event, handler.into())?;
        let wrapper = OnceListener::wrap(self, event, listener.clone());
        self.insert(event, wrapper, priority);
        Ok(listener)
    }

    /// Register a one-shot closure at the default priority.
    ///
    /// See [`register_once`](Self::register_once) for the meaning of the
    /// returned listener.
    pub fn once<F, R>(&self, event: &str, f: F) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.once_with_priority(event, f, self.shared.default_priority)
    }

    /// Register a one-shot closure at `priority`.
    pub fn once_with_priority<F, R>(&self, event: &str, f: F, priority: i32) -> Listener<A>
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        let listener = Listener::new(f);
        let wrapper = OnceListener::wrap(self, event, listener.clone());
        self.insert(event, wrapper, priority);
        listener
    }

    fn resolve(
        &self,
        event: &str,
        handler: Callable<A>,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        handler.resolve(self.methods()).inspect_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(event, error = %err, "rejected invalid handler");
            #[cfg(not(feature = "tracing"))]
            let _ = (event, err);
        })
    }

    fn insert(&self, event: &str, listener: Listener<A>, priority: i32) {
        let mut state = self.shared.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state
            .buckets
            .entry(event.to_owned())
            .or_insert_with(EventBucket::new)
            .push(ListenerEntry {
                listener,
                priority,
                sequence,
            });

        #[cfg(feature = "tracing")]
        tracing::trace!(event, priority, sequence, "listener registered");
    }

    /// Listeners of `event` in dispatch order.
    ///
    /// The result is a snapshot; later registrations or removals do not
    /// change it. Unknown events yield an empty list.
    pub fn listeners(&self, event: &str) -> Vec<Listener<A>> {
        let mut state = self.shared.state.lock();
        let Some(bucket) = state.buckets.get_mut(event) else {
            return Vec::new();
        };
        if bucket.ensure_sorted() {
            #[cfg(feature = "tracing")]
            tracing::trace!(event, listeners = bucket.entries.len(), "bucket re-sorted");
        }
        bucket.entries.iter().map(|e| e.listener.clone()).collect()
    }

    /// Trigger `event`, passing `args` to every listener in order.
    ///
    /// Returns `Ok(false)` if a listener stopped the chain, `Ok(true)` if
    /// every listener ran (including when there are none). An error from a
    /// listener aborts the remaining dispatch and is returned unchanged.
    pub fn trigger(&self, event: &str, args: &A) -> Result<bool, BoxError> {
        for listener in self.listeners(event) {
            match listener.call(args) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(event, "dispatch stopped by listener");
                    return Ok(false);
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(event, error = %err, "listener failed");
                    return Err(err);
                }
            }
        }
        Ok(true)
    }

    /// Trigger `event` with empty arguments.
    pub fn fire(&self, event: &str) -> Result<bool, BoxError>
    where
        A: Default,
    {
        self.trigger(event, &A::default())
    }

    /// Remove listeners of `event`.
    ///
    /// With `None`, the whole event is dropped and the result tells whether
    /// it had any listeners. With a listener, the first entry matching it in
    /// dispatch order is removed and the result tells whether one was found.
    pub fn off(&self, event: &str, listener: Option<&Listener<A>>) -> bool {
        // Removed listeners are dropped only after the lock is released, so
        // captured state whose `Drop` calls back into the registry is safe.
        let mut state = self.shared.state.lock();
        let Some(listener) = listener else {
            let removed = state.buckets.remove(event);
            drop(state);
            if removed.is_some() {
                #[cfg(feature = "tracing")]
                tracing::debug!(event, "all listeners removed");
            }
            return removed.is_some();
        };

        let Some(bucket) = state.buckets.get_mut(event) else {
            return false;
        };
        bucket.ensure_sorted();
        let Some(removed) = bucket.remove(listener) else {
            return false;
        };
        if bucket.entries.is_empty() {
            state.buckets.remove(event);
        }
        drop(state);
        drop(removed);

        #[cfg(feature = "tracing")]
        tracing::debug!(event, "listener removed");
        true
    }

    /// Remove every listener of `event`. Same as `off(event, None)`.
    pub fn remove_all_listeners(&self, event: &str) -> bool {
        self.off(event, None)
    }

    /// Returns `true` if `event` has at least one listener.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.shared.state.lock().buckets.contains_key(event)
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.shared
            .state
            .lock()
            .buckets
            .get(event)
            .map_or(0, |bucket| bucket.entries.len())
    }

    /// Names of all events with listeners, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.shared.state.lock().buckets.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Builder for constructing an [`EventRegistry`].
///
/// # Example
/// ```
/// use chime_std::{EventRegistry, MethodTable};
///
/// let mut table = MethodTable::<String>::new();
/// table.define_static("Log", "write", |line: &String| println!("{line}"));
///
/// let registry = EventRegistry::<String>::builder()
///     .default_priority(0)
///     .methods(table)
///     .build();
///
/// assert_eq!(registry.default_priority(), 0);
/// assert!(registry.register("log", "Log::write", 10).is_ok());
/// assert!(registry.trigger("log", &"ready".to_owned()).unwrap());
/// ```
pub struct EventRegistryBuilder<A = Args> {
    default_priority: i32,
    methods: Option<MethodTable<A>>,
}

impl<A: 'static> EventRegistryBuilder<A> {
    /// Create a builder with the default settings.
    pub fn new() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            methods: None,
        }
    }

    /// Set the priority used when none is given.
    pub fn default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Set the table named handlers are resolved against.
    pub fn methods(mut self, methods: MethodTable<A>) -> Self {
        self.methods = Some(methods);
        self
    }

    /// Build the registry.
    pub fn build(self) -> EventRegistry<A> {
        EventRegistry {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    buckets: HashMap::new(),
                    next_sequence: 0,
                }),
                default_priority: self.default_priority,
                methods: self.methods,
            }),
        }
    }
}

impl<A: 'static> Default for EventRegistryBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
