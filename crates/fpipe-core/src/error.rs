//! Error kinds raised by sequences, stages and the assertion helpers.
//!
//! Errors are carried *inside* the sequence (`Item = Result<T>`) so that a
//! failure while pulling an element travels through every enclosing stage
//! unchanged and surfaces at the terminal consumer, which stops right there.

use thiserror::Error;

/// Result alias used by every sequence element and terminal in this crate.
pub type Result<T> = std::result::Result<T, FpError>;

/// Everything that can abort a pipeline.
#[derive(Error, Debug)]
pub enum FpError {
    /// `assert_equal` saw two different values.
    #[error("AssertionError: {actual} !== {expected}")]
    NotEqual {
        /// Rendering of the value that was produced.
        actual: String,
        /// Rendering of the value that was expected.
        expected: String,
    },

    /// `assert_true` saw `false`.
    #[error("AssertionError")]
    Assertion,

    /// A source or element did not have the expected shape (e.g. a null element
    /// reaching `assert_each_not_null`).
    #[error("TypeError: {0}")]
    Type(String),

    /// Reading from the underlying input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline launched by [`crate::all`] panicked or was cancelled.
    #[error("pipeline task failed: {0}")]
    Join(String),
}

impl FpError {
    /// Shorthand for a [`FpError::Type`] with the given message.
    #[must_use]
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::Type(msg.into())
    }

    /// Whether this is one of the assertion kinds.
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::NotEqual { .. } | Self::Assertion)
    }
}
