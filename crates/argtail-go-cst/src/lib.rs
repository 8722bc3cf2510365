// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A Go parser and Concrete Syntax Tree (CST) library.
//!
//! The tree is lossless: every token keeps the whitespace and comments that
//! precede it, so printing an unmodified tree reproduces the input exactly.
//! Edits are made by mutating nodes in place and printing again.
//!
//! # Overview
//!
//! - **Parsing**: [`parse_source_file`], plus [`parse_expression`] and
//!   [`parse_statement`] for fragments.
//! - **Code Generation**: convert a tree back to source with [`Codegen`].
//! - **Traversal**: [`visitor::Visitor`] and the `walk_*` functions.
//!
//! # Quick Start
//!
//! ```
//! use argtail_go_cst::{parse_source_file, Codegen};
//!
//! let source = "package main\n\nfunc main() {\n\tflag.Parse()\n}\n";
//! let file = parse_source_file(source).expect("parse error");
//! assert_eq!(file.to_source(), source);
//! ```

use std::cmp::min;

use argtail_core::text::byte_offset_to_position;

// ============================================================================
// Public modules and re-exports
// ============================================================================

pub mod nodes;
pub use nodes::*;

pub mod parser;
pub use parser::{parse_expression, parse_source_file, parse_statement, ParserError, Result};

pub mod tokenizer;
pub use tokenizer::{tokenize, TokError, TokType, Token};

/// Visitor infrastructure and collectors.
pub mod visitor;
pub use visitor::{ImportCollector, ImportInfo, SelectorFinder, VisitResult, Visitor};

// ============================================================================
// Error formatting
// ============================================================================

/// Returns the byte offset of the beginning of line `n` (1-indexed).
fn bol_offset(source: &str, n: i64) -> usize {
    if n <= 1 {
        return 0;
    }
    source
        .match_indices('\n')
        .nth((n - 2) as usize)
        .map(|(index, _)| index + 1)
        .unwrap_or_else(|| source.len())
}

/// 1-based line and column of a parser error.
pub fn error_position(err: &ParserError, source: &str) -> (u32, u32) {
    byte_offset_to_position(source.as_bytes(), err.offset())
}

/// Formats a parser error as an annotated source snippet.
///
/// `label` names the input, usually the file path.
///
/// ```
/// use argtail_go_cst::{parse_source_file, prettify_error};
///
/// let source = "package main\n\nfunc main() {\n\tx := \n}\n";
/// let err = parse_source_file(source).unwrap_err();
/// let formatted = prettify_error(&err, source, "main.go");
/// assert!(formatted.contains("main.go"));
/// ```
pub fn prettify_error(err: &ParserError, source: &str, label: &str) -> String {
    use annotate_snippets::{Level, Renderer, Snippet};

    let offset = min(err.offset(), source.len());
    let (line, _) = byte_offset_to_position(source.as_bytes(), offset);
    let context = 1i64;
    let line = i64::from(line);

    let line_start = (line - context).max(1);
    let start_offset = bol_offset(source, line - context);
    let end_offset = bol_offset(source, line + context + 1);
    let snippet = &source[start_offset..end_offset];

    let start = offset - start_offset;
    let end = min(start + 1, snippet.len()).max(start);
    let message = err.message();

    let rendered = Renderer::plain()
        .render(
            Level::Error.title(label).snippet(
                Snippet::source(snippet)
                    .line_start(line_start as usize)
                    .fold(false)
                    .annotation(Level::Error.span(start..end).label(&message)),
            ),
        )
        .to_string();
    rendered
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bol_offset_first_line() {
        assert_eq!(0, bol_offset("hello", 1));
        assert_eq!(0, bol_offset("hello", 0));
        assert_eq!(0, bol_offset("hello\nhello", 1));
    }

    #[test]
    fn bol_offset_later_lines() {
        assert_eq!(6, bol_offset("hello\nhello", 2));
        assert_eq!(12, bol_offset("hello\nhello\nhello", 3));
        assert_eq!(5, bol_offset("hello", 3));
    }

    #[test]
    fn prettify_points_at_the_error() {
        let source = "package main\n\nfunc main() {\n\tx := 1 y\n}\n";
        let err = parse_source_file(source).unwrap_err();
        assert_eq!(error_position(&err, source), (4, 9));
        let formatted = prettify_error(&err, source, "main.go");
        assert!(formatted.contains("main.go"), "{}", formatted);
        assert!(formatted.contains("x := 1 y"), "{}", formatted);
        assert!(formatted.contains("expected ';'"), "{}", formatted);
    }

    #[test]
    fn prettify_error_at_end_of_input() {
        let source = "package main\n\nfunc main() {\n";
        let err = parse_source_file(source).unwrap_err();
        let formatted = prettify_error(&err, source, "eof.go");
        assert!(formatted.contains("found EOF"), "{}", formatted);
    }

    #[test]
    fn prettify_tokenizer_error() {
        let source = "package main\n\nvar s = \"open\n";
        let err = parse_source_file(source).unwrap_err();
        let formatted = prettify_error(&err, source, "str.go");
        assert!(formatted.contains("newline in string"), "{}", formatted);
    }

    #[test]
    fn roundtrip_through_lib_api() {
        let source = "package main\r\n\r\nfunc main() {\r\n\tflag.Parse() // go\r\n}\r\n";
        let file = parse_source_file(source).unwrap();
        assert_eq!(file.default_newline, "\r\n");
        assert_eq!(file.to_source(), source);
    }
}
