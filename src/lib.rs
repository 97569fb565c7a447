//! # spies 🕵️
//!
//! > Minimal test spies and stubs for Rust
//!
//! **spies** lets a test replace a named member of a target container with a
//! recording stand-in, check whether and how it was invoked, optionally have
//! it return a configured value, and restore the original afterwards.
//!
//! ## Quick Start
//!
//! ```rust
//! use spies::prelude::*;
//! use spies::values;
//!
//! let target = TargetMap::shared();
//! target.set_member("greet", callable(|_args| Some(Value::new("hello"))));
//!
//! let spy = spy_on(&target, "greet", Some(Value::new("stubbed")));
//!
//! let result = target.invoke("greet", &values!["world"]).unwrap();
//!
//! assert!(spy.was_invoked());
//! assert!(result.unwrap().equals(&"stubbed"));
//! assert!(spy.captured_argument(1).unwrap().equals(&"world"));
//!
//! spy.stop_spying();
//! let result = target.invoke("greet", &[]).unwrap();
//! assert!(result.unwrap().equals(&"hello"));
//! ```
//!
//! ## Features
//!
//! - 🕵️ **Spies** - Record invocations and the latest argument list
//! - 🔇 **Stubs** - Same recorder, stubbing vocabulary (`remove_stub`)
//! - 🎁 **Configured returns** - Fixed return value per spy
//! - 📦 **Detached mode** - Spy on a bare callable, no real container needed
//! - ♻️ **Restore** - Put the original member back when done

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod spy;
pub mod target;
pub mod value;

/// Prelude for convenient imports
///
/// ```rust
/// use spies::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::spy::{spy_detached, spy_on, stub, stub_detached, SpyHandle, StubHandle};
    pub use crate::target::{callable, Callable, SpyTarget, TargetMap};
    pub use crate::value::Value;
}

// Re-exports
pub use error::{Error, Result};
pub use spy::{spy_detached, spy_on, stub, stub_detached, SpyHandle, StubHandle};
pub use target::{callable, Callable, SpyTarget, TargetMap};
pub use value::Value;
