// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the lull coordination primitives
//!
//! Lifecycle transitions (a timer already stopped, a gate already released) are
//! ordinary state and never show up here. What does show up is what a caller can
//! act on: rejected configuration, a failing user action, or work that was
//! cancelled before it could produce a value.
//!
//! # Examples
//!
//! ```
//! use lull_core::{LullError, Result};
//!
//! fn validate(limit: usize) -> Result<usize> {
//!     if limit == 0 {
//!         return Err(LullError::invalid_config("queue limit must be >= 1"));
//!     }
//!     Ok(limit)
//! }
//!
//! assert!(validate(0).is_err());
//! ```

/// Root error type for all lull operations
#[derive(Debug, thiserror::Error)]
pub enum LullError {
    /// A constructor received a configuration it cannot honor
    #[error("Invalid configuration: {context}")]
    InvalidConfig {
        /// What was wrong with the configuration
        context: String,
    },

    /// Custom error from user code
    ///
    /// This wraps errors produced by user-provided actions and units of work,
    /// allowing them to be propagated to whoever awaits the result.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The unit of work observed its cancellation signal and gave up
    #[error("Cancelled: {context}")]
    Cancelled {
        /// Which operation was cancelled
        context: String,
    },

    /// A spawned unit of work panicked instead of returning
    #[error("Task panicked: {context}")]
    TaskPanicked {
        /// Panic payload, when it was a string
        context: String,
    },
}

impl LullError {
    /// Create an invalid configuration error with the given context
    pub fn invalid_config(context: impl Into<String>) -> Self {
        Self::InvalidConfig {
            context: context.into(),
        }
    }

    /// Create a cancellation error with the given context
    pub fn cancelled(context: impl Into<String>) -> Self {
        Self::Cancelled {
            context: context.into(),
        }
    }

    /// Create a task panic error with the given context
    pub fn task_panicked(context: impl Into<String>) -> Self {
        Self::TaskPanicked {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// True for [`LullError::Cancelled`]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Specialized Result type for lull operations
///
/// # Examples
///
/// ```
/// use lull_core::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, LullError>;

impl Clone for LullError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidConfig { context } => Self::InvalidConfig {
                context: context.clone(),
            },
            // The boxed source cannot be cloned, keep its message
            Self::UserError(e) => Self::UserError(e.to_string().into()),
            Self::Cancelled { context } => Self::Cancelled {
                context: context.clone(),
            },
            Self::TaskPanicked { context } => Self::TaskPanicked {
                context: context.clone(),
            },
        }
    }
}
