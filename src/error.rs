//! Error types for hook configuration.
//!
//! Stream failures are not represented here: they travel through the pull
//! protocol as [`End::Error`](crate::stream::End::Error) carrying the
//! caller's own error type, and surface at the `done` callback unchanged.

use std::fmt;

/// Error returned when hook options cannot be read.
///
/// # Examples
///
/// ```rust
/// use pullhooks::ConfigError;
///
/// let err = ConfigError::not_an_object("number");
/// assert_eq!(
///     err.to_string(),
///     "hook options should be an object or omitted, found number"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options value was neither an object nor omitted.
    NotAnObject {
        /// The kind of value that was supplied instead.
        found: &'static str,
    },
}

impl ConfigError {
    /// Create a `NotAnObject` error.
    pub fn not_an_object(found: &'static str) -> Self {
        Self::NotAnObject { found }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject { found } => write!(
                f,
                "hook options should be an object or omitted, found {}",
                found
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
