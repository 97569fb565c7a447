//! Type-erased values for argument capture and configured returns.
//!
//! Spies must capture "an arbitrary, unbounded, heterogeneously-typed
//! argument list" verbatim. [`Value`] is the dynamic value type that makes
//! this expressible in Rust: cheaply clonable, `Send + Sync`, and
//! downcastable back to the concrete type when a test wants to look inside.
//!
//! # Example
//!
//! ```rust
//! use spies::value::Value;
//!
//! let v = Value::new(42_i32);
//!
//! assert!(v.is::<i32>());
//! assert_eq!(v.downcast_ref::<i32>(), Some(&42));
//! assert!(v.equals(&42_i32));
//! assert!(!v.equals(&"42"));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A clonable, type-erased value.
///
/// Used for captured arguments and configured return values. Cloning is
/// cheap (an `Arc` bump); the wrapped value itself is never cloned.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a concrete value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the wrapped value as `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Check whether the wrapped value has concrete type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Compare against a concrete expected value.
    ///
    /// Returns `false` on a type mismatch rather than panicking, so
    /// assertions read naturally:
    ///
    /// ```rust
    /// use spies::value::Value;
    ///
    /// assert!(Value::new("hi").equals(&"hi"));
    /// assert!(!Value::new("hi").equals(&1_i32));
    /// ```
    #[must_use]
    pub fn equals<T: Any + PartialEq>(&self, expected: &T) -> bool {
        self.downcast_ref::<T>() == Some(expected)
    }

    /// The type name captured when the value was wrapped.
    ///
    /// Diagnostic only; the exact string is unspecified, per
    /// [`std::any::type_name`].
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name)
            .finish()
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// # Example
///
/// ```rust
/// use spies::{values, value::Value};
///
/// let args = values![1_i32, "two", 3.0_f64];
///
/// assert_eq!(args.len(), 3);
/// assert!(args[1].equals(&"two"));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        Vec::<$crate::value::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        vec![$($crate::value::Value::new($v)),+]
    };
}
