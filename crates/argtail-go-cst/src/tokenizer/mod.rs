// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Go tokenizer with lossless trivia and automatic semicolon insertion.
//!
//! Every token owns the whitespace and comments that precede it (`leading`),
//! so concatenating `leading + text` over the whole stream, followed by the
//! trivia of the end-of-file token, reproduces the input exactly.
//!
//! Semicolons that Go inserts at line ends are emitted as *virtual* tokens:
//! kind [`TokType::Semi`] with empty text. They are placed before the line
//! break, which keeps a trailing `// comment` attached to the statement it
//! follows.

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use argtail_core::text::Span;
use thiserror::Error;

/// The 25 Go keywords.
pub const KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Operators and punctuation, longest first so the first prefix match wins.
const OPERATORS: [&str; 48] = [
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "~", "+", "-", "*", "/", "%", "&",
    "|", "^", "<", ">", "=", "!", "(", ")", "[", "]", "{", "}", ",", ";", ".", ":",
];

/// Kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokType {
    Ident,
    Keyword,
    Int,
    Float,
    Imag,
    Rune,
    String,
    Op,
    /// Explicit `;` or a virtual semicolon (empty text).
    Semi,
    EndOfFile,
}

impl TokType {
    /// True for literal kinds (`BasicLit` in the tree).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokType::Int | TokType::Float | TokType::Imag | TokType::Rune | TokType::String
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokError {
    #[error("string literal not terminated")]
    UnterminatedString { offset: usize },
    #[error("raw string literal not terminated")]
    UnterminatedRawString { offset: usize },
    #[error("rune literal not terminated")]
    UnterminatedRune { offset: usize },
    #[error("empty rune literal or unescaped ' in rune literal")]
    EmptyRune { offset: usize },
    #[error("comment not terminated")]
    UnterminatedComment { offset: usize },
    #[error("newline in string")]
    NewlineInString { offset: usize },
    #[error("newline in rune literal")]
    NewlineInRune { offset: usize },
    #[error("invalid character {ch:?}")]
    InvalidCharacter { ch: char, offset: usize },
}

impl TokError {
    /// Byte offset where the problem was detected.
    pub fn offset(&self) -> usize {
        match self {
            TokError::UnterminatedString { offset }
            | TokError::UnterminatedRawString { offset }
            | TokError::UnterminatedRune { offset }
            | TokError::EmptyRune { offset }
            | TokError::UnterminatedComment { offset }
            | TokError::NewlineInString { offset }
            | TokError::NewlineInRune { offset }
            | TokError::InvalidCharacter { offset, .. } => *offset,
        }
    }
}

/// A token together with the trivia that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokType,
    /// Whitespace and comments before the token.
    pub leading: Cow<'a, str>,
    /// Token text; empty for virtual semicolons and end of file.
    pub text: Cow<'a, str>,
    /// Position in the source, `None` for synthesized tokens.
    pub span: Option<Span>,
}

impl<'a> Token<'a> {
    /// Build a token that does not come from the source text.
    pub fn synthesized(
        kind: TokType,
        leading: impl Into<Cow<'a, str>>,
        text: impl Into<Cow<'a, str>>,
    ) -> Self {
        Token {
            kind,
            leading: leading.into(),
            text: text.into(),
            span: None,
        }
    }

    /// A synthesized virtual semicolon.
    pub fn virtual_semi() -> Self {
        Token::synthesized(TokType::Semi, "", "")
    }

    /// True for a semicolon inserted at a line end.
    pub fn is_virtual_semi(&self) -> bool {
        self.kind == TokType::Semi && self.text.is_empty()
    }

    /// True if this is the operator or keyword `s`.
    pub fn is(&self, s: &str) -> bool {
        matches!(self.kind, TokType::Op | TokType::Keyword | TokType::Semi) && self.text == s
    }

    /// Start offset in the source, if the token came from it.
    pub fn start(&self) -> Option<usize> {
        self.span.map(|s| s.start)
    }
}

/// Streaming tokenizer state.
pub struct TokState<'a> {
    src: &'a str,
    pos: usize,
    needs_semi: bool,
    done: bool,
}

impl<'a> TokState<'a> {
    pub fn new(src: &'a str) -> Self {
        TokState {
            src,
            pos: 0,
            needs_semi: false,
            done: false,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn byte_at(&self, idx: usize) -> Option<u8> {
        self.src.as_bytes().get(idx).copied()
    }

    fn virtual_semi(&mut self, trivia_start: usize) -> Token<'a> {
        self.needs_semi = false;
        Token {
            kind: TokType::Semi,
            leading: Cow::Borrowed(&self.src[trivia_start..self.pos]),
            text: Cow::Borrowed(""),
            span: Some(Span::empty(self.pos)),
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>, TokError> {
        let trivia_start = self.pos;
        loop {
            match self.peek_byte() {
                None => {
                    if self.needs_semi {
                        return Ok(self.virtual_semi(trivia_start));
                    }
                    self.done = true;
                    return Ok(Token {
                        kind: TokType::EndOfFile,
                        leading: Cow::Borrowed(&self.src[trivia_start..]),
                        text: Cow::Borrowed(""),
                        span: Some(Span::empty(self.pos)),
                    });
                }
                Some(b'\n') => {
                    if self.needs_semi {
                        return Ok(self.virtual_semi(trivia_start));
                    }
                    self.pos += 1;
                }
                Some(b'\r') if self.needs_semi && self.byte_at(self.pos + 1) == Some(b'\n') => {
                    return Ok(self.virtual_semi(trivia_start));
                }
                Some(b' ' | b'\t' | b'\r') => self.pos += 1,
                Some(0xEF) if self.pos == 0 && self.src.starts_with('\u{feff}') => {
                    self.pos += '\u{feff}'.len_utf8();
                }
                Some(b'/') if self.byte_at(self.pos + 1) == Some(b'/') => {
                    let mut end = memchr::memchr(b'\n', &self.src.as_bytes()[self.pos..])
                        .map_or(self.src.len(), |i| self.pos + i);
                    if end < self.src.len() && self.byte_at(end - 1) == Some(b'\r') {
                        end -= 1;
                    }
                    self.pos = end;
                }
                Some(b'/') if self.byte_at(self.pos + 1) == Some(b'*') => {
                    let comment_start = self.pos;
                    let body = &self.src[comment_start + 2..];
                    let end = body
                        .find("*/")
                        .map(|i| comment_start + 2 + i + 2)
                        .ok_or(TokError::UnterminatedComment {
                            offset: comment_start,
                        })?;
                    let spans_lines = self.src[comment_start..end].contains('\n');
                    if self.needs_semi && spans_lines {
                        return Ok(self.virtual_semi(trivia_start));
                    }
                    self.pos = end;
                }
                Some(_) => break,
            }
        }

        let leading = &self.src[trivia_start..self.pos];
        let start = self.pos;
        let kind = self.scan_significant()?;
        let text = &self.src[start..self.pos];

        self.needs_semi = match kind {
            TokType::Ident
            | TokType::Int
            | TokType::Float
            | TokType::Imag
            | TokType::Rune
            | TokType::String => true,
            TokType::Keyword => {
                matches!(text, "break" | "continue" | "fallthrough" | "return")
            }
            TokType::Op => matches!(text, "++" | "--" | ")" | "]" | "}"),
            TokType::Semi | TokType::EndOfFile => false,
        };

        Ok(Token {
            kind,
            leading: Cow::Borrowed(leading),
            text: Cow::Borrowed(text),
            span: Some(Span::new(start, self.pos)),
        })
    }

    fn scan_significant(&mut self) -> Result<TokType, TokError> {
        let start = self.pos;
        let rest = &self.src[start..];
        let ch = match rest.chars().next() {
            Some(ch) => ch,
            None => return Ok(TokType::EndOfFile),
        };

        if is_letter(ch) {
            let len = rest
                .char_indices()
                .find(|&(_, c)| !is_letter(c) && !c.is_numeric())
                .map_or(rest.len(), |(i, _)| i);
            self.pos += len;
            let word = &rest[..len];
            return Ok(if KEYWORDS.contains(&word) {
                TokType::Keyword
            } else {
                TokType::Ident
            });
        }

        let next_is_digit = self.byte_at(start + 1).is_some_and(|b| b.is_ascii_digit());
        if ch.is_ascii_digit() || (ch == '.' && next_is_digit) {
            return Ok(self.scan_number());
        }

        match ch {
            '"' => return self.scan_string(),
            '`' => return self.scan_raw_string(),
            '\'' => return self.scan_rune(),
            _ => {}
        }

        for op in OPERATORS {
            if rest.starts_with(op) {
                self.pos += op.len();
                return Ok(if op == ";" { TokType::Semi } else { TokType::Op });
            }
        }

        Err(TokError::InvalidCharacter { ch, offset: start })
    }

    fn scan_number(&mut self) -> TokType {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let hex = bytes.get(start) == Some(&b'0')
            && matches!(bytes.get(start + 1), Some(b'x' | b'X'));
        let mut is_float = false;
        let mut i = start;
        while let Some(&b) = bytes.get(i) {
            match b {
                b'0'..=b'9' | b'_' => i += 1,
                b'.' => {
                    is_float = true;
                    i += 1;
                }
                b'e' | b'E' if !hex => {
                    is_float = true;
                    i += 1;
                    if matches!(bytes.get(i), Some(b'+' | b'-')) {
                        i += 1;
                    }
                }
                b'p' | b'P' if hex => {
                    is_float = true;
                    i += 1;
                    if matches!(bytes.get(i), Some(b'+' | b'-')) {
                        i += 1;
                    }
                }
                b if b.is_ascii_alphanumeric() => i += 1,
                _ => break,
            }
        }
        self.pos = i;
        let text = &self.src[start..i];
        if text.ends_with('i') {
            TokType::Imag
        } else if is_float {
            TokType::Float
        } else {
            TokType::Int
        }
    }

    fn scan_string(&mut self) -> Result<TokType, TokError> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut i = start + 1;
        loop {
            match bytes.get(i) {
                None => return Err(TokError::UnterminatedString { offset: start }),
                Some(b'\n') => return Err(TokError::NewlineInString { offset: i }),
                Some(b'\\') => i += 2,
                Some(b'"') => {
                    self.pos = i + 1;
                    return Ok(TokType::String);
                }
                Some(_) => i += 1,
            }
        }
    }

    fn scan_raw_string(&mut self) -> Result<TokType, TokError> {
        let start = self.pos;
        match memchr::memchr(b'`', &self.src.as_bytes()[start + 1..]) {
            Some(i) => {
                self.pos = start + 1 + i + 1;
                Ok(TokType::String)
            }
            None => Err(TokError::UnterminatedRawString { offset: start }),
        }
    }

    fn scan_rune(&mut self) -> Result<TokType, TokError> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        if bytes.get(start + 1) == Some(&b'\'') {
            return Err(TokError::EmptyRune { offset: start });
        }
        let mut i = start + 1;
        loop {
            match bytes.get(i) {
                None => return Err(TokError::UnterminatedRune { offset: start }),
                Some(b'\n') => return Err(TokError::NewlineInRune { offset: i }),
                Some(b'\\') => i += 2,
                Some(b'\'') => {
                    self.pos = i + 1;
                    return Ok(TokType::Rune);
                }
                Some(_) => i += 1,
            }
        }
    }
}

impl<'a> Iterator for TokState<'a> {
    type Item = Result<Token<'a>, TokError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

fn is_letter(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

/// Tokenize a whole source file. The last token is always
/// [`TokType::EndOfFile`].
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, TokError> {
    TokState::new(text).collect()
}
