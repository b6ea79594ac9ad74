//! Error types for MetaNet operations.
//!
//! This module defines [`MetanetError`], the error type used by the
//! application layer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The process runner never returns `MetanetError`; it folds every
//!   failure into an [`ExecutionResult`](crate::shell::ExecutionResult)
//! - Use `MetanetError` where a caller needs to branch on the failure
//! - Use `anyhow::Error` (via `MetanetError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for MetaNet operations.
#[derive(Debug, Error)]
pub enum MetanetError {
    /// The named program could not be found or started.
    #[error("Could not start {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    /// A prompt needs an answer but no terminal is attached.
    #[error("Cannot ask '{prompt}' without an interactive terminal")]
    NotInteractive { prompt: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for MetaNet operations.
pub type Result<T> = std::result::Result<T, MetanetError>;
