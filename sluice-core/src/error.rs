// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for sluice pipelines.
//!
//! Operators only fail at construction time, when a parameter can never work
//! (a zero chunk size, a zero rate). Once a stage is running it never reports an
//! error downstream: cancellation is silent, and fallible transforms carry their
//! failures as `Result` items.
//!
//! # Examples
//!
//! ```
//! use sluice_core::{Result, SluiceError};
//!
//! fn check_size(size: usize) -> Result<()> {
//!     if size == 0 {
//!         return Err(SluiceError::invalid_config("chunk", "size must be at least 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_size(0).is_err());
//! ```

/// Root error type for sluice operations.
#[derive(Debug, thiserror::Error)]
pub enum SluiceError {
    /// An operator was constructed with parameters it cannot honour.
    #[error("Invalid configuration for {operator}: {reason}")]
    InvalidConfig {
        /// Operator that rejected the parameters
        operator: &'static str,
        /// What was wrong with them
        reason: String,
    },

    /// Error produced by user code, e.g. a fallible transform.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Several errors collected while draining a stream of results.
    #[error("Multiple errors occurred: {count} errors")]
    MultipleErrors {
        /// Number of errors that occurred
        count: usize,
        /// The individual errors
        errors: Vec<SluiceError>,
    },
}

impl SluiceError {
    /// Create an invalid-configuration error for `operator`.
    pub fn invalid_config(operator: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            operator,
            reason: reason.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Aggregate user errors into a single `MultipleErrors`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sluice_core::SluiceError;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("division by zero")]
    /// struct DivideByZero;
    ///
    /// let err = SluiceError::from_user_errors(vec![DivideByZero, DivideByZero]);
    /// assert!(matches!(err, SluiceError::MultipleErrors { count: 2, .. }));
    /// ```
    pub fn from_user_errors<E>(errors: Vec<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let count = errors.len();
        let errors = errors.into_iter().map(Self::user_error).collect();
        Self::MultipleErrors { count, errors }
    }

    /// Whether this error was raised while constructing an operator.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Specialized `Result` for sluice operations.
pub type Result<T> = std::result::Result<T, SluiceError>;
