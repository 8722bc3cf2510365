// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Code generation traits shared by all CST nodes.
//!
//! Printing is a pre-order walk that emits, for every token, its leading
//! trivia followed by its text. Nodes own no whitespace of their own, so an
//! unmodified tree prints back to exactly the text it was parsed from.

use crate::tokenizer::Token;

/// Accumulates generated source text.
#[derive(Debug, Default)]
pub struct CodegenState {
    pub tokens: String,
}

impl CodegenState {
    pub fn add_token(&mut self, tok: &str) {
        self.tokens.push_str(tok);
    }
}

impl std::fmt::Display for CodegenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens)
    }
}

pub trait Codegen<'a> {
    fn codegen(&self, state: &mut CodegenState);

    /// Render this node (and everything below it) as source text.
    fn to_source(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.tokens
    }
}

impl<'a> Codegen<'a> for Token<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_token(&self.leading);
        state.add_token(&self.text);
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Option<T> {
    fn codegen(&self, state: &mut CodegenState) {
        if let Some(s) = self {
            s.codegen(state);
        }
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Vec<T> {
    fn codegen(&self, state: &mut CodegenState) {
        for item in self {
            item.codegen(state);
        }
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Box<T> {
    fn codegen(&self, state: &mut CodegenState) {
        self.as_ref().codegen(state);
    }
}

/// An element of a comma-separated list with its trailing comma, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Punct<'a, T> {
    pub value: T,
    pub comma: Option<Token<'a>>,
}

impl<'a, T> Punct<'a, T> {
    pub fn new(value: T, comma: Option<Token<'a>>) -> Self {
        Punct { value, comma }
    }

    /// A list element with no trailing comma.
    pub fn last(value: T) -> Self {
        Punct { value, comma: None }
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Punct<'a, T> {
    fn codegen(&self, state: &mut CodegenState) {
        self.value.codegen(state);
        self.comma.codegen(state);
    }
}
