//! Target containers whose members can be spied on.
//!
//! Rust has no free-form property reassignment, so the spied-upon
//! "object" is modeled as a mapping from member name to [`Callable`].
//! The [`SpyTarget`] trait is the seam: anything exposing get/set/remove
//! for named callables can be spied on, and [`TargetMap`] is the provided
//! implementation.
//!
//! # Example
//!
//! ```rust
//! use spies::target::{callable, SpyTarget, TargetMap};
//! use spies::{values, value::Value};
//!
//! let target = TargetMap::shared();
//! target.set_member("add", callable(|args| {
//!     let a = args[0].downcast_ref::<i32>().copied().unwrap_or(0);
//!     let b = args[1].downcast_ref::<i32>().copied().unwrap_or(0);
//!     Some(Value::new(a + b))
//! }));
//!
//! let sum = target.invoke("add", &values![2_i32, 3_i32]).unwrap();
//! assert!(sum.unwrap().equals(&5_i32));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::value::Value;

/// A container member: a callable taking an argument list and optionally
/// returning a value.
///
/// `Arc`-wrapped so the same function object can live on a container and
/// be held free-standing by a spy handle at the same time.
pub type Callable = Arc<dyn Fn(&[Value]) -> Option<Value> + Send + Sync>;

/// Wrap a closure into a [`Callable`].
///
/// ```rust
/// use spies::target::callable;
/// use spies::value::Value;
///
/// let f = callable(|_args| Some(Value::new(42_i32)));
/// assert!(f(&[]).unwrap().equals(&42_i32));
/// ```
pub fn callable<F>(f: F) -> Callable
where
    F: Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A container that exposes named, reassignable callable members.
///
/// This is the explicit getter/setter contract a spy needs: read the
/// current member (to remember the original), overwrite it (to install the
/// recorder), and remove it (to restore a member that did not previously
/// exist).
pub trait SpyTarget {
    /// Get the member currently installed under `name`, if any.
    fn member(&self, name: &str) -> Option<Callable>;

    /// Install or overwrite the member under `name`.
    fn set_member(&self, name: &str, function: Callable);

    /// Remove the member under `name`, returning what was installed.
    fn remove_member(&self, name: &str) -> Option<Callable>;
}

/// The provided [`SpyTarget`] implementation: a name-to-callable map with
/// interior mutability.
///
/// Spies hold a non-owning `Arc` reference to the map, so the usual way to
/// create one is [`TargetMap::shared`].
#[derive(Default)]
pub struct TargetMap {
    members: Mutex<HashMap<String, Callable>>,
}

impl TargetMap {
    /// Create an empty target map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, `Arc`-wrapped target map.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Invoke the member installed under `name` with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMember`] if no member is installed under
    /// `name`.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Option<Value>> {
        // Clone the Arc out before calling so the map lock is not held
        // across the member body.
        let function = self
            .member(name)
            .ok_or_else(|| Error::missing_member(name))?;
        Ok(function(args))
    }

    /// Check whether a member is installed under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.lock().contains_key(name)
    }

    /// The names of all installed members, in no particular order.
    #[must_use]
    pub fn member_names(&self) -> Vec<String> {
        self.members.lock().keys().cloned().collect()
    }

    /// The number of installed members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    /// Check whether no members are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.lock().is_empty()
    }
}

impl SpyTarget for TargetMap {
    fn member(&self, name: &str) -> Option<Callable> {
        self.members.lock().get(name).cloned()
    }

    fn set_member(&self, name: &str, function: Callable) {
        self.members.lock().insert(name.to_string(), function);
    }

    fn remove_member(&self, name: &str) -> Option<Callable> {
        self.members.lock().remove(name)
    }
}

impl std::fmt::Debug for TargetMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.member_names();
        names.sort();
        f.debug_struct("TargetMap").field("members", &names).finish()
    }
}
