//! Error definitions
//!
//! This module provides error types for spies.
//!
//! The crate deliberately keeps its happy paths infallible: creating a spy,
//! resetting it, and restoring the original member never fail. The one
//! recoverable error is invoking a member a target does not have.

use thiserror::Error;

/// Main error type for spies
#[derive(Error, Debug)]
pub enum Error {
    /// No member with the given name is installed on the target.
    #[error("no member named `{0}` is installed on the target")]
    MissingMember(String),
}

impl Error {
    /// Create a missing-member error.
    #[must_use]
    pub fn missing_member(name: impl Into<String>) -> Self {
        Self::MissingMember(name.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
