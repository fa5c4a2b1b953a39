//! Dynamic argument lists.

use std::{
    any::Any,
    fmt,
    sync::Arc,
};

/// An ordered list of type-erased trigger arguments.
///
/// This is the default argument type of a registry. Listeners read
/// positional values back with [`Args::get`]:
///
/// ```rust
/// use chime_core::{Args, args};
///
/// let args = args!["World", 3_u32];
/// assert_eq!(args.get::<&str>(0), Some(&"World"));
/// assert_eq!(args.get::<u32>(1), Some(&3));
/// assert_eq!(args.get::<u32>(0), None);
/// ```
#[derive(Clone, Default)]
pub struct Args {
    values: Vec<Arc<dyn Any + Send + Sync>>,
}

impl Args {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(Arc::new(value));
    }

    /// Appends a value, builder style.
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Returns the argument at `index` if it exists and is a `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("len", &self.values.len())
            .finish()
    }
}

/// Builds an [`Args`] list from a comma separated list of values.
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+
    };
}
