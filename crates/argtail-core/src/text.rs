//! Text position utilities for byte offsets, spans and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor and compiler conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count bytes, which is what `go vet` and `gofmt -l` report

use serde::{Deserialize, Serialize};

// ============================================================================
// Span
// ============================================================================

/// A half-open byte range `[start, end)` into UTF-8 source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span. `end` is clamped so that it is never before `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start,
            end: end.max(start),
        }
    }

    /// An empty span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains a byte offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ============================================================================
// Byte-based Conversions
// ============================================================================

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds content length, returns the position at end of content.
pub fn byte_offset_to_position(content: &[u8], offset: usize) -> (u32, u32) {
    let head = &content[..offset.min(content.len())];
    let line = memchr::memchr_iter(b'\n', head).count() as u32 + 1;
    let line_start = memchr::memrchr(b'\n', head).map_or(0, |i| i + 1);
    (line, (head.len() - line_start) as u32 + 1)
}

// ============================================================================
// Layout helpers
// ============================================================================

/// Returns the indentation that a run of leading trivia leaves on its last line.
///
/// `"\n\t// note\n\t\t"` yields `Some("\t\t")`. Returns `None` when the trivia
/// does not contain a line break or when the text after the last break is not
/// pure horizontal whitespace.
pub fn trailing_line_indent(trivia: &str) -> Option<&str> {
    let idx = trivia.rfind('\n')?;
    let rest = &trivia[idx + 1..];
    if rest.bytes().all(|b| b == b' ' || b == b'\t') {
        Some(rest)
    } else {
        None
    }
}

/// Detect the newline convention used by `content`: `"\r\n"` when the first
/// line break is preceded by a carriage return, `"\n"` otherwise.
pub fn detect_newline(content: &str) -> &'static str {
    match content.find('\n') {
        Some(idx) if idx > 0 && content.as_bytes()[idx - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
