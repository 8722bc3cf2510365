//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same input -> same output (field order, array ordering)
//! 3. **Absent vs null:** Absent field means "not applicable"
//! 4. **Versioned:** Schema version in response enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{ArgtailError, OutputErrorCode};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

/// A source location (1-indexed line and column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path as given on the command line.
    pub file: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, bytes).
    pub col: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        Location {
            file: file.into(),
            line,
            col,
        }
    }
}

// ============================================================================
// Per-file Reports
// ============================================================================

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// The guard was inserted (or would be, in dry-run mode).
    Rewritten,
    /// Nothing to do; the file was left untouched.
    Skipped,
    /// The file could not be processed.
    Failed,
}

impl FileOutcome {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOutcome::Rewritten => "rewritten",
            FileOutcome::Skipped => "skipped",
            FileOutcome::Failed => "failed",
        }
    }
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// File path as given on the command line (or found while walking).
    pub path: String,
    /// Outcome for the file.
    pub outcome: FileOutcome,
    /// Stable reason code for skips and failures (e.g. `no_parse_calls`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Line of the flag-parsing statement the guard follows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Unified diff of the rewrite (dry-run only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileReport {
    /// A rewritten file. `line` is the line of the statement the guard follows.
    pub fn rewritten(path: impl Into<String>, line: Option<u32>) -> Self {
        FileReport {
            path: path.into(),
            outcome: FileOutcome::Rewritten,
            reason: None,
            message: None,
            line,
            diff: None,
        }
    }

    /// A file that needed no change.
    pub fn skipped(
        path: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FileReport {
            path: path.into(),
            outcome: FileOutcome::Skipped,
            reason: Some(reason.into()),
            message: Some(message.into()),
            line: None,
            diff: None,
        }
    }

    /// A file that failed.
    pub fn failed(path: impl Into<String>, err: &ArgtailError) -> Self {
        let line = match err {
            ArgtailError::ParseFailed { line, .. } => Some(*line),
            _ => None,
        };
        FileReport {
            path: path.into(),
            outcome: FileOutcome::Failed,
            reason: Some(err.kind().to_string()),
            message: Some(err.to_string()),
            line,
            diff: None,
        }
    }

    /// Attach a unified diff.
    pub fn with_diff(mut self, diff: impl Into<String>) -> Self {
        self.diff = Some(diff.into());
        self
    }
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Files rewritten.
    pub rewritten: usize,
    /// Files skipped.
    pub skipped: usize,
    /// Files that failed.
    pub failed: usize,
}

impl Summary {
    /// Tally a list of reports.
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Summary::default();
        for report in reports {
            match report.outcome {
                FileOutcome::Rewritten => summary.rewritten += 1,
                FileOutcome::Skipped => summary.skipped += 1,
                FileOutcome::Failed => summary.failed += 1,
            }
        }
        summary
    }

    /// Total number of files seen.
    pub fn total(&self) -> usize {
        self.rewritten + self.skipped + self.failed
    }
}

/// Response for a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    /// Status: "ok" when no file failed, "error" otherwise.
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Whether files were left untouched.
    pub dry_run: bool,
    /// Per-file reports in input order.
    pub files: Vec<FileReport>,
    /// Outcome counts.
    pub summary: Summary,
}

impl RunResponse {
    /// Build a response from per-file reports.
    pub fn new(files: Vec<FileReport>, dry_run: bool) -> Self {
        let summary = Summary::from_reports(&files);
        let status = if summary.failed == 0 { "ok" } else { "error" };
        RunResponse {
            status: status.to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            dry_run,
            files,
            summary,
        }
    }
}

// ============================================================================
// Error Responses
// ============================================================================

/// Error details for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Stable error kind.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Where the error occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl ErrorInfo {
    /// Create from an ArgtailError.
    pub fn from_error(err: &ArgtailError) -> Self {
        let location = match err {
            ArgtailError::ParseFailed {
                file, line, col, ..
            } => Some(Location::new(file.clone(), *line, *col)),
            _ => None,
        };
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            kind: err.kind().to_string(),
            message: err.to_string(),
            location,
        }
    }
}

/// Response emitted when a run aborts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from an ArgtailError.
    pub fn from_error(err: &ArgtailError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_first_field() {
        let response = RunResponse::new(vec![FileReport::rewritten("main.go", Some(12))], false);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with(r#"{"status":"ok""#), "got: {}", json);
    }

    #[test]
    fn failed_file_makes_status_error() {
        let err = ArgtailError::ParseFailed {
            file: "bad.go".to_string(),
            line: 2,
            col: 1,
            message: "expected 'package'".to_string(),
        };
        let response = RunResponse::new(
            vec![
                FileReport::skipped("a.go", "no_parse_calls", "no flag parse calls found"),
                FileReport::failed("bad.go", &err),
            ],
            true,
        );
        assert_eq!(response.status, "error");
        assert_eq!(
            response.summary,
            Summary {
                rewritten: 0,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(response.files[1].line, Some(2));
        assert_eq!(response.files[1].reason.as_deref(), Some("parse_failed"));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let report = FileReport::rewritten("main.go", None);
        let value = serde_json::to_value(&report).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("outcome").unwrap(), "rewritten");
        assert!(!obj.contains_key("reason"));
        assert!(!obj.contains_key("line"));
        assert!(!obj.contains_key("diff"));
    }

    #[test]
    fn summary_total() {
        let summary = Summary {
            rewritten: 2,
            skipped: 3,
            failed: 1,
        };
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn error_response_carries_code_and_location() {
        let err = ArgtailError::ParseFailed {
            file: "x.go".to_string(),
            line: 4,
            col: 9,
            message: "expected operand".to_string(),
        };
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.status, "error");
        assert_eq!(response.error.code, 3);
        assert_eq!(response.error.location, Some(Location::new("x.go", 4, 9)));
    }

    #[test]
    fn emit_response_writes_trailing_newline() {
        let mut buf = Vec::new();
        emit_response(&RunResponse::new(vec![], false), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"schema_version\": \"1\""));
    }
}
