// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::tokenizer::TokError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("tokenizer error: {0}")]
    Tokenizer(#[from] TokError),
    #[error("syntax error: {message}")]
    Syntax { message: String, offset: usize },
}

impl ParserError {
    pub(crate) fn syntax(message: impl Into<String>, offset: usize) -> Self {
        ParserError::Syntax {
            message: message.into(),
            offset,
        }
    }

    /// Byte offset of the error in the source text.
    pub fn offset(&self) -> usize {
        match self {
            ParserError::Tokenizer(e) => e.offset(),
            ParserError::Syntax { offset, .. } => *offset,
        }
    }

    /// The message without the error-kind prefix.
    pub fn message(&self) -> String {
        match self {
            ParserError::Tokenizer(e) => e.to_string(),
            ParserError::Syntax { message, .. } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;
