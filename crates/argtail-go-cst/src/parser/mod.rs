// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recursive-descent parser producing the lossless CST.
//!
//! The parser consumes the token stream front to back and moves each token
//! into the node that owns it, so no trivia is ever dropped. Composite
//! literals follow Go's restriction in control clauses: while parsing the
//! header of `if`, `for` or `switch`, `T{` is not a literal unless the type
//! is parenthesized or syntactically unambiguous (`[]T{`, `map[K]V{`).

mod errors;
mod expression;
mod statement;

use std::borrow::Cow;
use std::collections::VecDeque;

use argtail_core::text::detect_newline;

pub use errors::{ParserError, Result};

use crate::nodes::{
    Decl, Expr, FuncDecl, GenDecl, GenDeclBody, Ident, ImportSpec, Punct, SourceFile, Spec,
    SpecLine, Statement, TopDecl, TypeSpec, ValueSpec,
};
use crate::nodes::expression::BasicLit;
use crate::tokenizer::{tokenize, TokType, Token};

static EOF_TOKEN: Token<'static> = Token {
    kind: TokType::EndOfFile,
    leading: Cow::Borrowed(""),
    text: Cow::Borrowed(""),
    span: None,
};

pub(crate) struct Parser<'a> {
    toks: VecDeque<Token<'a>>,
    /// < 0 while parsing a control clause header; composite literals of
    /// named types are not allowed there.
    expr_lev: i32,
    src_len: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Result<Self> {
        Ok(Parser {
            toks: tokenize(text)?.into(),
            expr_lev: 0,
            src_len: text.len(),
        })
    }

    // ------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token<'a> {
        self.toks.front().unwrap_or(&EOF_TOKEN)
    }

    fn peek_at(&self, n: usize) -> &Token<'a> {
        self.toks.get(n).unwrap_or(&EOF_TOKEN)
    }

    fn at(&self, s: &str) -> bool {
        self.peek().is(s)
    }

    fn at_kind(&self, kind: TokType) -> bool {
        self.peek().kind == kind
    }

    fn at_semi(&self) -> bool {
        self.at_kind(TokType::Semi)
    }

    fn at_eof(&self) -> bool {
        self.at_kind(TokType::EndOfFile)
    }

    fn bump(&mut self) -> Token<'a> {
        self.toks.pop_front().unwrap_or_else(|| EOF_TOKEN.clone())
    }

    fn bump_if(&mut self, s: &str) -> Option<Token<'a>> {
        if self.at(s) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn offset_here(&self) -> usize {
        self.peek().start().unwrap_or(self.src_len)
    }

    fn describe(tok: &Token<'_>) -> String {
        match tok.kind {
            TokType::EndOfFile => "EOF".to_string(),
            TokType::Semi if tok.text.is_empty() => "newline".to_string(),
            _ => format!("'{}'", tok.text),
        }
    }

    fn error_expected(&self, what: &str) -> ParserError {
        ParserError::syntax(
            format!("expected {}, found {}", what, Self::describe(self.peek())),
            self.offset_here(),
        )
    }

    fn expect(&mut self, s: &str) -> Result<Token<'a>> {
        if self.at(s) {
            Ok(self.bump())
        } else {
            Err(self.error_expected(&format!("'{}'", s)))
        }
    }

    fn expect_ident(&mut self) -> Result<Ident<'a>> {
        if self.at_kind(TokType::Ident) {
            Ok(Ident::new(self.bump()))
        } else {
            Err(self.error_expected("identifier"))
        }
    }

    /// Semicolon terminating an item in a list closed by `close`. The
    /// semicolon may be omitted right before the closing token.
    fn semi_before(&mut self, close: &str, what: &str) -> Result<Option<Token<'a>>> {
        if self.at_semi() {
            Ok(Some(self.bump()))
        } else if self.at(close) {
            Ok(None)
        } else {
            Err(self.error_expected(&format!("';' after {}", what)))
        }
    }

    /// Index of the `]` matching the `[` at lookahead position `open`.
    fn matching_bracket(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, tok) in self.toks.iter().enumerate().skip(open) {
            if tok.kind != TokType::Op {
                continue;
            }
            match tok.text.as_ref() {
                "[" | "(" | "{" => depth += 1,
                "]" | ")" | "}" => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Source file and declarations
    // ------------------------------------------------------------------

    pub(crate) fn parse_source_file(&mut self, text: &str) -> Result<SourceFile<'a>> {
        let package_kw = self.expect("package")?;
        let name = self.expect_ident()?;
        let semi = self.top_level_semi("package clause")?;

        let mut decls = Vec::new();
        while !self.at_eof() {
            let decl = if self.at("func") {
                Decl::Func(Box::new(self.parse_func_decl()?))
            } else if self.at("import") || self.at("const") || self.at("var") || self.at("type")
            {
                Decl::Gen(self.parse_gen_decl()?)
            } else if self.at_semi() {
                return Err(self.error_expected("declaration"));
            } else {
                return Err(ParserError::syntax(
                    format!(
                        "non-declaration statement outside function body, found {}",
                        Self::describe(self.peek())
                    ),
                    self.offset_here(),
                ));
            };
            let semi = self.top_level_semi("top level declaration")?;
            decls.push(TopDecl { decl, semi });
        }

        let eof = self.bump();
        Ok(SourceFile {
            package_kw,
            name,
            semi,
            decls,
            eof,
            default_newline: detect_newline(text),
        })
    }

    fn top_level_semi(&mut self, what: &str) -> Result<Option<Token<'a>>> {
        if self.at_semi() {
            Ok(Some(self.bump()))
        } else if self.at_eof() {
            Ok(None)
        } else {
            Err(self.error_expected(&format!("';' after {}", what)))
        }
    }

    pub(crate) fn parse_gen_decl(&mut self) -> Result<GenDecl<'a>> {
        let kw = self.bump();
        let keyword = kw.text.to_string();
        let body = if self.at("(") {
            let lparen = self.bump();
            let mut specs = Vec::new();
            while !self.at(")") {
                if self.at_eof() {
                    return Err(self.error_expected("')'"));
                }
                let spec = self.parse_spec(&keyword)?;
                let semi = self.semi_before(")", "declaration")?;
                specs.push(SpecLine { spec, semi });
            }
            let rparen = self.expect(")")?;
            GenDeclBody::Group {
                lparen,
                specs,
                rparen,
            }
        } else {
            GenDeclBody::Single(self.parse_spec(&keyword)?)
        };
        Ok(GenDecl { kw, body })
    }

    fn parse_spec(&mut self, keyword: &str) -> Result<Spec<'a>> {
        match keyword {
            "import" => {
                let name = if self.at_kind(TokType::Ident) || self.at(".") {
                    Some(self.bump())
                } else {
                    None
                };
                if !self.at_kind(TokType::String) {
                    return Err(self.error_expected("import path"));
                }
                let path = BasicLit::new(self.bump());
                Ok(Spec::Import(ImportSpec { name, path }))
            }
            "type" => {
                let name = self.expect_ident()?;
                let type_params = if self.at("[") && self.looks_like_type_params() {
                    Some(self.parse_field_list("[", "]")?)
                } else {
                    None
                };
                let assign = self.bump_if("=");
                let ty = self.parse_type()?;
                Ok(Spec::Type(TypeSpec {
                    name,
                    type_params,
                    assign,
                    ty,
                }))
            }
            _ => {
                let names = self.parse_ident_list()?;
                let ty = if self.at("=") || self.at_semi() || self.at(")") || self.at_eof() {
                    None
                } else {
                    Some(self.parse_type()?)
                };
                let eq = self.bump_if("=");
                let values = if eq.is_some() {
                    self.parse_expr_list()?
                } else {
                    Vec::new()
                };
                Ok(Spec::Value(ValueSpec {
                    names,
                    ty,
                    eq,
                    values,
                }))
            }
        }
    }

    /// `type T[` starts a type parameter list rather than an array type when
    /// the bracket holds `name constraint` or `name, ...`.
    fn looks_like_type_params(&self) -> bool {
        if self.peek_at(1).kind != TokType::Ident {
            return false;
        }
        let after = self.peek_at(2);
        match after.kind {
            TokType::Ident | TokType::Keyword => true,
            TokType::Op => matches!(after.text.as_ref(), "," | "~" | "*" | "["),
            _ => false,
        }
    }

    fn parse_ident_list(&mut self) -> Result<Vec<Punct<'a, Ident<'a>>>> {
        let mut names = Vec::new();
        loop {
            let name = self.expect_ident()?;
            let comma = self.bump_if(",");
            let more = comma.is_some();
            names.push(Punct::new(name, comma));
            if !more {
                return Ok(names);
            }
        }
    }

    pub(crate) fn parse_func_decl(&mut self) -> Result<FuncDecl<'a>> {
        let func_kw = self.expect("func")?;
        let recv = if self.at("(") {
            Some(self.parse_field_list("(", ")")?)
        } else {
            None
        };
        let name = self.expect_ident()?;
        let type_params = if self.at("[") {
            Some(self.parse_field_list("[", "]")?)
        } else {
            None
        };
        let params = self.parse_field_list("(", ")")?;
        let results = self.parse_results()?;
        let body = if self.at("{") {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(FuncDecl {
            func_kw,
            recv,
            name,
            type_params,
            params,
            results,
            body,
        })
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Parse a complete Go source file.
pub fn parse_source_file(text: &str) -> Result<SourceFile<'_>> {
    let mut parser = Parser::new(text)?;
    parser.parse_source_file(text)
}

/// Parse a single expression.
pub fn parse_expression(text: &str) -> Result<Expr<'_>> {
    let mut parser = Parser::new(text)?;
    let expr = parser.parse_expr()?;
    parser.finish_fragment()?;
    Ok(expr)
}

/// Parse a single statement (without its terminating semicolon).
pub fn parse_statement(text: &str) -> Result<Statement<'_>> {
    let mut parser = Parser::new(text)?;
    let stmt = parser.parse_stmt()?;
    let semi = if parser.at_semi() {
        Some(parser.bump())
    } else {
        None
    };
    parser.finish_fragment()?;
    Ok(Statement::new(stmt, semi))
}

impl<'a> Parser<'a> {
    fn finish_fragment(&mut self) -> Result<()> {
        if self.at_semi() && self.peek().text.is_empty() {
            self.bump();
        }
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.error_expected("end of input"))
        }
    }
}
