//! Named handler forms.
//!
//! Besides closures, a handler can be referenced by name: a `(class, method)`
//! pair or a `"Class::method"` path, both looked up in a [`MethodTable`]
//! when they are registered. The table knows which methods need a receiver,
//! so a receiver-bound method referenced without one is rejected up front
//! instead of failing later inside a dispatch loop.

use chime_core::{BoxError, Flow, IntoFlow, InvalidHandlerError, Listener};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

/// Separator between class and method in a handler path.
pub const PATH_SEPARATOR: &str = "::";

/// Anything the registry can turn into a [`Listener`].
pub enum Callable<A> {
    /// An already built listener. Always valid.
    Listener(Listener<A>),
    /// A method referenced without a receiver.
    Static {
        /// Class name.
        class: String,
        /// Method name.
        method: String,
    },
    /// A `"Class::method"` path, same meaning as [`Callable::Static`].
    Path(String),
}

impl<A: 'static> Callable<A> {
    /// Resolves the callable against an optional method table.
    ///
    /// Named forms fail with [`InvalidHandlerError::NotCallable`] when there
    /// is no table to look them up in.
    pub fn resolve(
        self,
        methods: Option<&MethodTable<A>>,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        match (self, methods) {
            (Callable::Listener(listener), _) => Ok(listener),
            (Callable::Static { class, method }, Some(table)) => {
                table.resolve_static(&class, &method)
            }
            (Callable::Path(path), Some(table)) => table.resolve_path(&path),
            (Callable::Static { class, method }, None) => Err(InvalidHandlerError::not_callable(
                format!("{class}{PATH_SEPARATOR}{method}"),
            )),
            (Callable::Path(path), None) => Err(InvalidHandlerError::not_callable(path)),
        }
    }
}

impl<A: 'static> From<Listener<A>> for Callable<A> {
    fn from(listener: Listener<A>) -> Self {
        Callable::Listener(listener)
    }
}

impl<A: 'static> From<&Listener<A>> for Callable<A> {
    fn from(listener: &Listener<A>) -> Self {
        Callable::Listener(listener.clone())
    }
}

impl<A> From<(&str, &str)> for Callable<A> {
    fn from((class, method): (&str, &str)) -> Self {
        Callable::Static {
            class: class.to_owned(),
            method: method.to_owned(),
        }
    }
}

impl<A> From<&str> for Callable<A> {
    fn from(path: &str) -> Self {
        Callable::Path(path.to_owned())
    }
}

impl<A> From<String> for Callable<A> {
    fn from(path: String) -> Self {
        Callable::Path(path)
    }
}

type InstanceFn<A> =
    Arc<dyn Fn(&(dyn Any + Send + Sync), &A) -> Result<Flow, BoxError> + Send + Sync>;

enum Method<A> {
    Static(Listener<A>),
    Instance {
        receiver: TypeId,
        call: InstanceFn<A>,
    },
}

/// A catalogue of named methods, grouped by class.
///
/// # Example
/// ```
/// use chime_std::callable::MethodTable;
///
/// struct Greeter {
///     name: &'static str,
/// }
///
/// let mut table = MethodTable::<String>::new();
/// table
///     .define_static("Log", "write", |line: &String| println!("{line}"))
///     .define_instance("Greeter", "greet", |greeter: &Greeter, line: &String| {
///         println!("{}: {line}", greeter.name)
///     });
///
/// assert!(table.resolve_path("Log::write").is_ok());
/// assert!(table.resolve_static("Greeter", "greet").is_err());
/// ```
pub struct MethodTable<A> {
    classes: HashMap<String, HashMap<String, Method<A>>>,
}

impl<A: 'static> MethodTable<A> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Define a method that runs without a receiver.
    ///
    /// Redefining a method replaces it.
    pub fn define_static<F, R>(&mut self, class: &str, method: &str, f: F) -> &mut Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.insert(class, method, Method::Static(Listener::new(f)))
    }

    /// Define a method that needs a receiver of type `T`.
    pub fn define_instance<T, F, R>(&mut self, class: &str, method: &str, f: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&T, &A) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        let (class_name, method_name) = (class.to_owned(), method.to_owned());
        let call: InstanceFn<A> = Arc::new(
            move |receiver: &(dyn Any + Send + Sync), args: &A| match receiver.downcast_ref::<T>() {
                Some(receiver) => f(receiver, args).into_flow(),
                None => Err(InvalidHandlerError::ReceiverMismatch {
                    class: class_name.clone(),
                    method: method_name.clone(),
                }
                .into()),
            },
        );
        self.insert(
            class,
            method,
            Method::Instance {
                receiver: TypeId::of::<T>(),
                call,
            },
        )
    }

    fn insert(&mut self, class: &str, method: &str, entry: Method<A>) -> &mut Self {
        self.classes
            .entry(class.to_owned())
            .or_default()
            .insert(method.to_owned(), entry);
        self
    }

    fn lookup(&self, class: &str, method: &str) -> Result<&Method<A>, InvalidHandlerError> {
        self.classes
            .get(class)
            .and_then(|methods| methods.get(method))
            .ok_or_else(|| {
                InvalidHandlerError::not_callable(format!("{class}{PATH_SEPARATOR}{method}"))
            })
    }

    /// Resolve a method referenced without a receiver.
    ///
    /// Every call for the same static method returns the same listener, so
    /// two references to it compare equal.
    pub fn resolve_static(
        &self,
        class: &str,
        method: &str,
    ) -> Result<Listener<A>, InvalidHandlerError> {
        match self.lookup(class, method)? {
            Method::Static(listener) => Ok(listener.clone()),
            Method::Instance { .. } => Err(InvalidHandlerError::NotStatic {
                class: class.to_owned(),
                method: method.to_owned(),
            }),
        }
    }

    /// Resolve a `"Class::method"` path.
    pub fn resolve_path(&self, path: &str) -> Result<Listener<A>, InvalidHandlerError> {
        match path.split_once(PATH_SEPARATOR) {
            Some((class, method)) if !class.is_empty() && !method.is_empty() => {
                self.resolve_static(class, method)
            }
            _ => Err(InvalidHandlerError::not_callable(path)),
        }
    }

    /// Bind a method to a receiver.
    ///
    /// Static methods may be reached through a receiver too; the receiver is
    /// then ignored and the shared static listener is returned.
    pub fn bind<T>(
        &self,
        receiver: Arc<T>,
        class: &str,
        method: &str,
    ) -> Result<Listener<A>, InvalidHandlerError>
    where
        T: Any + Send + Sync,
    {
        match self.lookup(class, method)? {
            Method::Static(listener) => Ok(listener.clone()),
            Method::Instance { receiver: expected, .. } if *expected != TypeId::of::<T>() => {
                Err(InvalidHandlerError::ReceiverMismatch {
                    class: class.to_owned(),
                    method: method.to_owned(),
                })
            }
            Method::Instance { call, .. } => {
                let call = Arc::clone(call);
                Ok(Listener::new(move |args| {
                    let receiver: &(dyn Any + Send + Sync) = &*receiver;
                    call(receiver, args)
                }))
            }
        }
    }

    /// Returns `true` if the class defines the method.
    pub fn contains(&self, class: &str, method: &str) -> bool {
        self.lookup(class, method).is_ok()
    }
}

impl<A: 'static> Default for MethodTable<A> {
    fn default() -> Self {
        Self::new()
    }
}
