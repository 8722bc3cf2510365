//! Error bridge implementations for engine and driver errors.
//!
//! Conversions from the Go engine's and the write-back layer's error types
//! to the unified `ArgtailError` type.
//!
//! These bridges live in the root crate rather than `argtail-core` because
//! they depend on `argtail-go`, which core does not know about. Both
//! `FixError` and `ArgtailError` are foreign here, so that bridge is a plain
//! function; `ApplyError` is local and gets a `From` impl.

use argtail_core::error::ArgtailError;
use argtail_go::FixError;

use crate::apply::ApplyError;

// ============================================================================
// Bridge: FixError -> ArgtailError
// ============================================================================

/// Convert an engine error into the unified error type.
pub(crate) fn from_fix_error(err: FixError) -> ArgtailError {
    match err {
        FixError::Structural {
            file,
            line,
            col,
            message,
            ..
        } => ArgtailError::ParseFailed {
            file,
            line,
            col,
            message,
        },
        // Every file that reaches insertion calls Parse somewhere, so a
        // target function without the statement is a defect.
        FixError::InsertionPointNotFound { .. } => ArgtailError::InternalError {
            message: err.to_string(),
        },
    }
}

// ============================================================================
// Bridge: ApplyError -> ArgtailError
// ============================================================================

impl From<ApplyError> for ArgtailError {
    fn from(err: ApplyError) -> Self {
        let path = err.path().display().to_string();
        let message = err.to_string();
        match err {
            ApplyError::Spawn { .. } | ApplyError::Exited { .. } | ApplyError::TimedOut { .. } => {
                ArgtailError::CheckoutFailed { path, message }
            }
            ApplyError::Write { .. } => ArgtailError::WriteFailed { path, message },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
