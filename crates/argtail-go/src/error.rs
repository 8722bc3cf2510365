//! Error types for the fix operation.
//!
//! Only conditions that stop a file from being processed are errors. The
//! expected "nothing to do" outcomes are values of
//! [`SkipReason`](crate::ops::fix::SkipReason).

use std::str::Utf8Error;

use argtail_core::text::byte_offset_to_position;
use argtail_go_cst::{error_position, prettify_error, ParserError};
use thiserror::Error;

/// Errors that can occur while fixing a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    /// The source is not syntactically well-formed Go. Fatal for the file.
    #[error("{file}:{line}:{col}: {message}")]
    Structural {
        file: String,
        line: u32,
        col: u32,
        message: String,
        /// Annotated source excerpt around the error.
        snippet: String,
    },

    /// The target function has no statement calling the flag-parsing
    /// function, although the file calls it somewhere else.
    #[error("no {call}() statement in the body of the target function")]
    InsertionPointNotFound { call: String },
}

impl FixError {
    /// Build a structural error from a parser error.
    pub fn structural(file: &str, source: &str, err: &ParserError) -> Self {
        let (line, col) = error_position(err, source);
        FixError::Structural {
            file: file.to_string(),
            line,
            col,
            message: err.message(),
            snippet: prettify_error(err, source, file),
        }
    }

    /// Build a structural error for a source that is not valid UTF-8.
    pub fn encoding(file: &str, bytes: &[u8], err: &Utf8Error) -> Self {
        let (line, col) = byte_offset_to_position(bytes, err.valid_up_to());
        let message = "invalid UTF-8 encoding".to_string();
        FixError::Structural {
            file: file.to_string(),
            line,
            col,
            snippet: format!("error: {}\n --> {}:{}:{}", message, file, line, col),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtail_go_cst::parse_source_file;

    #[test]
    fn structural_error_reports_position() {
        let source = "package main\n\nfunc main() {\n\tflag.Parse(\n}\n";
        let err = parse_source_file(source).unwrap_err();
        let fix_err = FixError::structural("bad.go", source, &err);
        match &fix_err {
            FixError::Structural {
                file,
                line,
                snippet,
                ..
            } => {
                assert_eq!(file, "bad.go");
                assert_eq!(*line, 5);
                assert!(snippet.contains("bad.go"), "{}", snippet);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(fix_err.to_string().starts_with("bad.go:5:"));
    }

    #[test]
    #[allow(invalid_from_utf8)]
    fn invalid_utf8_is_structural() {
        let bytes = b"package main\n\nvar s = \"\xff\"\n";
        let utf8_err = std::str::from_utf8(bytes).unwrap_err();
        let err = FixError::encoding("bad.go", bytes, &utf8_err);
        assert_eq!(err.to_string(), "bad.go:3:10: invalid UTF-8 encoding");
    }

    #[test]
    fn insertion_point_display() {
        let err = FixError::InsertionPointNotFound {
            call: "flag.Parse".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no flag.Parse() statement in the body of the target function"
        );
    }
}
