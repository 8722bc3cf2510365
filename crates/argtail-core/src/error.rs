//! Error types and error code constants for argtail.
//!
//! This module provides a unified error type (`ArgtailError`) that bridges
//! domain-specific errors from the engine and the driver into a common format
//! suitable for text and JSON output.
//!
//! ## Error Code Mapping
//!
//! Exit codes:
//! - `2`: Invalid arguments (bad input from caller, no Go files found)
//! - `3`: Parse errors (a file is not well-formed Go)
//! - `4`: Apply errors (reading, checkout-for-edit or write-back failed)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! ## Design
//!
//! - **Unified type**: `ArgtailError` is the single error type for CLI output
//! - **Bridging**: `impl From<X> for ArgtailError` bridges domain errors
//! - **Code mapping**: `OutputErrorCode` provides stable integer codes

use std::fmt;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller.
    InvalidArguments = 2,
    /// A source file could not be parsed.
    ParseError = 3,
    /// Reading, checking out or writing a file failed.
    ApplyError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum ArgtailError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The file is not syntactically well-formed Go.
    #[error("failed to parse {file}:{line}:{col}: {message}")]
    ParseFailed {
        file: String,
        line: u32,
        col: u32,
        message: String,
    },

    /// The file could not be read.
    #[error("failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    /// The checkout-for-edit command failed or timed out.
    #[error("failed to check out {path} for edit: {message}")]
    CheckoutFailed { path: String, message: String },

    /// The rewritten text could not be written back.
    #[error("failed to write back {path}: {message}")]
    WriteFailed { path: String, message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&ArgtailError> for OutputErrorCode {
    fn from(err: &ArgtailError) -> Self {
        match err {
            ArgtailError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            ArgtailError::ParseFailed { .. } => OutputErrorCode::ParseError,
            ArgtailError::ReadFailed { .. } => OutputErrorCode::ApplyError,
            ArgtailError::CheckoutFailed { .. } => OutputErrorCode::ApplyError,
            ArgtailError::WriteFailed { .. } => OutputErrorCode::ApplyError,
            ArgtailError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<ArgtailError> for OutputErrorCode {
    fn from(err: ArgtailError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl ArgtailError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        ArgtailError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ArgtailError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }

    /// Stable snake_case name of the error kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgtailError::InvalidArguments { .. } => "invalid_arguments",
            ArgtailError::ParseFailed { .. } => "parse_failed",
            ArgtailError::ReadFailed { .. } => "read_failed",
            ArgtailError::CheckoutFailed { .. } => "checkout_failed",
            ArgtailError::WriteFailed { .. } => "write_failed",
            ArgtailError::InternalError { .. } => "internal_error",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
