//! # Error Types
//!
//! This module defines the error type shared by every optimizer in the crate.
//! Structural problems with an instance or a configuration are reported as
//! specific variants; failures inside the island worker pool are fatal to the
//! run that hit them and are reported rather than dropped.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use tspalg::error::{Result, TspError};
//!
//! fn needs_cities(n: usize) -> Result<()> {
//!     if n == 0 {
//!         return Err(TspError::EmptyInstance);
//!     }
//!     Ok(())
//! }
//!
//! assert!(needs_cities(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use tspalg::error::{OptionExt, TspError};
//!
//! fn shortest(lengths: &[f64]) -> tspalg::error::Result<f64> {
//!     lengths
//!         .iter()
//!         .copied()
//!         .reduce(f64::min)
//!         .ok_or_else_tsp(|| TspError::EmptyInstance)
//! }
//!
//! assert_eq!(shortest(&[3.0, 1.0]).unwrap(), 1.0);
//! ```

use thiserror::Error;

/// Represents errors that can occur while constructing or improving tours.
#[derive(Error, Debug)]
pub enum TspError {
    /// The coordinate set contains no cities.
    #[error("Empty instance: the coordinate set contains no cities")]
    EmptyInstance,

    /// A tour is not a permutation of the instance's city ids.
    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    /// An option value makes the run structurally impossible.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A selection was requested from a population with no members.
    #[error("Empty population: nothing to select from")]
    EmptyPopulation,

    /// An island task failed or panicked during an epoch.
    #[error("Island {island} failed: {message}")]
    Island { island: usize, message: String },

    /// The epoch barrier completed without a report from every island.
    #[error("Missing island report: expected {expected}, received {received}")]
    MissingIslandReport { expected: usize, received: usize },

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for tour operations.
pub type Result<T> = std::result::Result<T, TspError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` into a `Result<T>` using `err_fn` for `None`.
    fn ok_or_else_tsp<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TspError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_tsp<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TspError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert!(matches!(
            none.ok_or_else_tsp(|| TspError::EmptyInstance),
            Err(TspError::EmptyInstance)
        ));
        assert_eq!(Some(3).ok_or_else_tsp(|| TspError::EmptyInstance).unwrap(), 3);
    }

    #[test]
    fn test_display() {
        let err = TspError::MissingIslandReport {
            expected: 4,
            received: 3,
        };
        assert_eq!(
            err.to_string(),
            "Missing island report: expected 4, received 3"
        );
        let err = TspError::Island {
            island: 2,
            message: "panicked".to_string(),
        };
        assert_eq!(err.to_string(), "Island 2 failed: panicked");
    }
}
