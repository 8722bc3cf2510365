// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement and block parsing.

use super::{Parser, ParserError, Result};
use crate::nodes::{
    AssignStmt, Block, BranchStmt, CaseClause, DeferStmt, ElseBody, ElseClause, Expr, ForHeader,
    ForStmt, GoStmt, IfStmt, IncDecStmt, LabeledStmt, Punct, RangeClause, ReturnStmt, SelectStmt,
    SendStmt, Statement, Stmt, SwitchStmt,
};
use crate::tokenizer::{TokType, Token};

const ASSIGN_OPS: &[&str] = &[
    "=", ":=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", "&^=",
];

/// A simple statement, or a range clause when parsing a `for` header.
#[allow(clippy::large_enum_variant)]
enum Simple<'a> {
    Stmt(Stmt<'a>),
    Range(RangeClause<'a>),
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_block(&mut self) -> Result<Block<'a>> {
        let lbrace = self.expect("{")?;
        let saved = self.expr_lev;
        self.expr_lev = 0;
        let stmts = self.parse_stmt_list();
        self.expr_lev = saved;
        let stmts = stmts?;
        let rbrace = self.expect("}")?;
        Ok(Block {
            lbrace,
            stmts,
            rbrace,
        })
    }

    fn parse_stmt_list(&mut self) -> Result<Vec<Statement<'a>>> {
        let mut stmts = Vec::new();
        while !self.at("}") && !self.at("case") && !self.at("default") && !self.at_eof() {
            if self.at_semi() {
                let semi = self.bump();
                stmts.push(Statement::new(Stmt::Empty, Some(semi)));
                continue;
            }
            let stmt = self.parse_stmt()?;
            let semi = self.semi_before("}", "statement")?;
            stmts.push(Statement::new(stmt, semi));
        }
        Ok(stmts)
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt<'a>> {
        let tok = self.peek();
        match (tok.kind, tok.text.as_ref()) {
            (TokType::Keyword, "var" | "const" | "type") => {
                Ok(Stmt::Decl(Box::new(self.parse_gen_decl()?)))
            }
            (TokType::Keyword, "go") => {
                let go_kw = self.bump();
                let call = self.parse_expr()?;
                Ok(Stmt::Go(Box::new(GoStmt { go_kw, call })))
            }
            (TokType::Keyword, "defer") => {
                let defer_kw = self.bump();
                let call = self.parse_expr()?;
                Ok(Stmt::Defer(Box::new(DeferStmt { defer_kw, call })))
            }
            (TokType::Keyword, "return") => {
                let return_kw = self.bump();
                let results = if self.at_semi() || self.at("}") {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                Ok(Stmt::Return(Box::new(ReturnStmt { return_kw, results })))
            }
            (TokType::Keyword, "break" | "continue" | "goto") => {
                let kw = self.bump();
                let label = if self.at_kind(TokType::Ident) {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                Ok(Stmt::Branch(Box::new(BranchStmt { kw, label })))
            }
            (TokType::Keyword, "fallthrough") => {
                let kw = self.bump();
                Ok(Stmt::Branch(Box::new(BranchStmt { kw, label: None })))
            }
            (TokType::Op, "{") => Ok(Stmt::Block(self.parse_block()?)),
            (TokType::Keyword, "if") => Ok(Stmt::If(Box::new(self.parse_if()?))),
            (TokType::Keyword, "switch") => Ok(Stmt::Switch(Box::new(self.parse_switch()?))),
            (TokType::Keyword, "select") => Ok(Stmt::Select(Box::new(self.parse_select()?))),
            (TokType::Keyword, "for") => Ok(Stmt::For(Box::new(self.parse_for()?))),
            _ => match self.parse_simple(true, false)? {
                Simple::Stmt(stmt) => Ok(stmt),
                Simple::Range(_) => Err(self.error_expected("statement")),
            },
        }
    }

    fn parse_simple_stmt(&mut self) -> Result<Stmt<'a>> {
        match self.parse_simple(false, false)? {
            Simple::Stmt(stmt) => Ok(stmt),
            Simple::Range(_) => Err(self.error_expected("simple statement")),
        }
    }

    fn parse_simple(&mut self, allow_label: bool, allow_range: bool) -> Result<Simple<'a>> {
        let mut lhs = self.parse_expr_list()?;

        if self.at_kind(TokType::Op) && ASSIGN_OPS.contains(&self.peek().text.as_ref()) {
            let op = self.bump();
            if allow_range && self.at("range") && (op.text == "=" || op.text == ":=") {
                let range_kw = self.bump();
                let expr = self.parse_expr()?;
                return Ok(Simple::Range(RangeClause {
                    lhs,
                    op: Some(op),
                    range_kw,
                    expr,
                }));
            }
            let rhs = self.parse_expr_list()?;
            return Ok(Simple::Stmt(Stmt::Assign(Box::new(AssignStmt {
                lhs,
                op,
                rhs,
            }))));
        }

        if allow_label
            && self.at(":")
            && lhs.len() == 1
            && lhs[0].comma.is_none()
            && lhs[0].value.as_ident().is_some()
        {
            let label = match lhs.pop() {
                Some(Punct {
                    value: Expr::Ident(label),
                    ..
                }) => label,
                _ => return Err(self.error_expected("label")),
            };
            let colon = self.bump();
            let stmt = if self.at("}") {
                Stmt::Empty
            } else {
                self.parse_stmt()?
            };
            return Ok(Simple::Stmt(Stmt::Labeled(Box::new(LabeledStmt {
                label,
                colon,
                stmt,
            }))));
        }

        let expr = self.single_expr(lhs)?;
        if self.at("<-") {
            let arrow = self.bump();
            let value = self.parse_expr()?;
            return Ok(Simple::Stmt(Stmt::Send(Box::new(SendStmt {
                chan: expr,
                arrow,
                value,
            }))));
        }
        if self.at("++") || self.at("--") {
            let op = self.bump();
            return Ok(Simple::Stmt(Stmt::IncDec(Box::new(IncDecStmt { expr, op }))));
        }
        Ok(Simple::Stmt(Stmt::Expr(expr)))
    }

    fn single_expr(&self, mut list: Vec<Punct<'a, Expr<'a>>>) -> Result<Expr<'a>> {
        if list.len() == 1 && list[0].comma.is_none() {
            if let Some(only) = list.pop() {
                return Ok(only.value);
            }
        }
        Err(self.error_expected("':=' or '=' or ','"))
    }

    fn expect_semi(&mut self) -> Result<Token<'a>> {
        if self.at_semi() {
            Ok(self.bump())
        } else {
            Err(self.error_expected("';'"))
        }
    }

    // ------------------------------------------------------------------
    // if
    // ------------------------------------------------------------------

    fn parse_if(&mut self) -> Result<IfStmt<'a>> {
        let if_kw = self.expect("if")?;
        let saved = self.expr_lev;
        self.expr_lev = -1;
        let header = self.parse_if_header();
        self.expr_lev = saved;
        let (init, cond) = header?;

        let body = self.parse_block()?;
        let else_clause = if self.at("else") {
            let else_kw = self.bump();
            let body = if self.at("if") {
                ElseBody::If(Box::new(self.parse_if()?))
            } else if self.at("{") {
                ElseBody::Block(self.parse_block()?)
            } else {
                return Err(self.error_expected("'if' or '{'"));
            };
            Some(ElseClause { else_kw, body })
        } else {
            None
        };

        Ok(IfStmt {
            if_kw,
            init,
            cond,
            body,
            else_clause,
        })
    }

    fn parse_if_header(&mut self) -> Result<(Option<Statement<'a>>, Expr<'a>)> {
        if self.at("{") {
            return Err(self.error_expected("condition"));
        }
        let first = if self.at_semi() {
            Stmt::Empty
        } else {
            self.parse_simple_stmt()?
        };
        if self.at_semi() {
            let semi = self.bump();
            if self.at("{") {
                return Err(self.error_expected("condition"));
            }
            let cond = self.parse_expr()?;
            return Ok((Some(Statement::new(first, Some(semi))), cond));
        }
        match first {
            Stmt::Expr(cond) => Ok((None, cond)),
            _ => Err(ParserError::syntax(
                "expected condition, found simple statement",
                self.offset_here(),
            )),
        }
    }

    // ------------------------------------------------------------------
    // switch and select
    // ------------------------------------------------------------------

    fn parse_switch(&mut self) -> Result<SwitchStmt<'a>> {
        let switch_kw = self.expect("switch")?;
        let saved = self.expr_lev;
        self.expr_lev = -1;
        let header = self.parse_switch_header();
        self.expr_lev = saved;
        let (init, tag) = header?;

        let lbrace = self.expect("{")?;
        let clauses = self.parse_case_clauses(false)?;
        let rbrace = self.expect("}")?;
        Ok(SwitchStmt {
            switch_kw,
            init,
            tag,
            lbrace,
            clauses,
            rbrace,
        })
    }

    fn parse_switch_header(&mut self) -> Result<(Option<Statement<'a>>, Option<Stmt<'a>>)> {
        if self.at("{") {
            return Ok((None, None));
        }
        let first = if self.at_semi() {
            Stmt::Empty
        } else {
            self.parse_simple_stmt()?
        };
        if self.at_semi() {
            let semi = self.bump();
            let tag = if self.at("{") {
                None
            } else {
                Some(self.parse_simple_stmt()?)
            };
            return Ok((Some(Statement::new(first, Some(semi))), tag));
        }
        Ok((None, Some(first)))
    }

    fn parse_select(&mut self) -> Result<SelectStmt<'a>> {
        let select_kw = self.expect("select")?;
        let lbrace = self.expect("{")?;
        let clauses = self.parse_case_clauses(true)?;
        let rbrace = self.expect("}")?;
        Ok(SelectStmt {
            select_kw,
            lbrace,
            clauses,
            rbrace,
        })
    }

    fn parse_case_clauses(&mut self, select: bool) -> Result<Vec<CaseClause<'a>>> {
        let mut clauses = Vec::new();
        while self.at("case") || self.at("default") {
            let kw = self.bump();
            let (exprs, comm) = if kw.text == "default" {
                (Vec::new(), None)
            } else if select {
                (Vec::new(), Some(self.parse_simple_stmt()?))
            } else {
                (self.parse_expr_list()?, None)
            };
            let colon = self.expect(":")?;
            let body = self.parse_stmt_list()?;
            clauses.push(CaseClause {
                kw,
                exprs,
                comm,
                colon,
                body,
            });
        }
        if !self.at("}") {
            return Err(self.error_expected("'case' or 'default' or '}'"));
        }
        Ok(clauses)
    }

    // ------------------------------------------------------------------
    // for
    // ------------------------------------------------------------------

    fn parse_for(&mut self) -> Result<ForStmt<'a>> {
        let for_kw = self.expect("for")?;
        let saved = self.expr_lev;
        self.expr_lev = -1;
        let header = self.parse_for_header();
        self.expr_lev = saved;
        let header = header?;
        let body = self.parse_block()?;
        Ok(ForStmt {
            for_kw,
            header,
            body,
        })
    }

    fn parse_for_header(&mut self) -> Result<ForHeader<'a>> {
        if self.at("{") {
            return Ok(ForHeader::Infinite);
        }
        if self.at("range") {
            let range_kw = self.bump();
            let expr = self.parse_expr()?;
            return Ok(ForHeader::Range(RangeClause {
                lhs: Vec::new(),
                op: None,
                range_kw,
                expr,
            }));
        }

        let init = if self.at_semi() {
            None
        } else {
            match self.parse_simple(false, true)? {
                Simple::Range(range) => return Ok(ForHeader::Range(range)),
                Simple::Stmt(stmt) => Some(stmt),
            }
        };

        if self.at_semi() {
            let semi1 = self.bump();
            let cond = if self.at_semi() {
                None
            } else {
                Some(self.parse_expr()?)
            };
            let semi2 = self.expect_semi()?;
            let post = if self.at("{") {
                None
            } else {
                Some(self.parse_simple_stmt()?)
            };
            return Ok(ForHeader::Clause {
                init,
                semi1,
                cond,
                semi2,
                post,
            });
        }

        match init {
            Some(Stmt::Expr(cond)) => Ok(ForHeader::Cond(cond)),
            _ => Err(self.error_expected("for loop condition")),
        }
    }
}
