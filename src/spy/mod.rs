//! Spy factory and handle types.
//!
//! This module provides the factory operations that install a recording
//! replacement on a target and hand back a [`SpyHandle`] for inspection
//! and lifecycle control:
//!
//! - [`spy_on`] / [`spy_detached`] - observe a member
//! - [`stub`] / [`stub_detached`] - same recorder, stubbing vocabulary
//!
//! # Spying on a container member
//!
//! ```rust
//! use spies::prelude::*;
//! use spies::values;
//!
//! let target = TargetMap::shared();
//! target.set_member("save", callable(|_| None));
//!
//! let spy = spy_on(&target, "save", None);
//! target.invoke("save", &values!["record"]).unwrap();
//!
//! assert!(spy.was_invoked());
//! ```
//!
//! # Spying without a container
//!
//! ```rust
//! use spies::prelude::*;
//! use spies::values;
//!
//! let spy = spy_detached("fetch", Some(Value::new("cached")));
//! let result = spy.call(&values!["key"]);
//!
//! assert!(result.unwrap().equals(&"cached"));
//! assert!(spy.captured_argument(1).unwrap().equals(&"key"));
//! ```

mod handle;

pub use handle::{SpyHandle, StubHandle};

use std::sync::Arc;

use crate::target::{SpyTarget, TargetMap};
use crate::value::Value;

/// Install a recording replacement for `member` on `target`.
///
/// The member's current value (possibly absent) is remembered as the
/// original; the returned handle starts with `was_invoked() == false` and
/// no captured arguments. Construction and installation are one step -
/// there is no uninstalled handle state.
///
/// Every invocation of the replacement returns a clone of `return_value`
/// (or nothing if `None`).
pub fn spy_on<T>(target: &Arc<T>, member: &str, return_value: Option<Value>) -> SpyHandle
where
    T: SpyTarget + Send + Sync + 'static,
{
    // Arc<T> coerces to Arc<dyn SpyTarget + Send + Sync> at the argument.
    SpyHandle::install(Arc::<T>::clone(target), member, return_value)
}

/// Install a recording replacement with no caller-supplied container.
///
/// A fresh empty [`TargetMap`] is synthesized internally and the
/// replacement installed onto it, so the handle behaves exactly like one
/// from [`spy_on`]; invoke the replacement through
/// [`SpyHandle::call`] or [`SpyHandle::replacement_fn`].
pub fn spy_detached(member: &str, return_value: Option<Value>) -> SpyHandle {
    SpyHandle::install(TargetMap::shared(), member, return_value)
}

/// Stub out `member` on `target`.
///
/// Identical to [`spy_on`] in recording, return-value, and restore
/// mechanics; the returned [`StubHandle`] additionally exposes restore as
/// [`StubHandle::remove_stub`] for call sites that conceptually stub a
/// method out rather than observe it.
pub fn stub<T>(target: &Arc<T>, member: &str, return_value: Option<Value>) -> StubHandle
where
    T: SpyTarget + Send + Sync + 'static,
{
    StubHandle::from_spy(spy_on(target, member, return_value))
}

/// Stub with no caller-supplied container. See [`spy_detached`].
pub fn stub_detached(member: &str, return_value: Option<Value>) -> StubHandle {
    StubHandle::from_spy(spy_detached(member, return_value))
}
