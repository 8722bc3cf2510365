// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement nodes.

use crate::nodes::decl::GenDecl;
use crate::nodes::expression::{Expr, Ident};
use crate::nodes::traits::{Codegen, CodegenState, Punct};
use crate::tokenizer::Token;

/// A statement in a block together with its terminating semicolon.
///
/// The semicolon is usually virtual (inserted at the line end); it is absent
/// for the last statement before a closing `}` on the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    pub stmt: Stmt<'a>,
    pub semi: Option<Token<'a>>,
}

impl<'a> Statement<'a> {
    pub fn new(stmt: Stmt<'a>, semi: Option<Token<'a>>) -> Self {
        Statement { stmt, semi }
    }

    /// The first token of the statement, `None` for an empty statement.
    pub fn first_token(&self) -> Option<&Token<'a>> {
        self.stmt.first_token()
    }

    pub fn first_token_mut(&mut self) -> Option<&mut Token<'a>> {
        self.stmt.first_token_mut()
    }
}

impl<'a> Codegen<'a> for Statement<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.stmt.codegen(state);
        self.semi.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt<'a> {
    Decl(Box<GenDecl<'a>>),
    Labeled(Box<LabeledStmt<'a>>),
    Expr(Expr<'a>),
    Send(Box<SendStmt<'a>>),
    IncDec(Box<IncDecStmt<'a>>),
    Assign(Box<AssignStmt<'a>>),
    Go(Box<GoStmt<'a>>),
    Defer(Box<DeferStmt<'a>>),
    Return(Box<ReturnStmt<'a>>),
    Branch(Box<BranchStmt<'a>>),
    Block(Block<'a>),
    If(Box<IfStmt<'a>>),
    Switch(Box<SwitchStmt<'a>>),
    Select(Box<SelectStmt<'a>>),
    For(Box<ForStmt<'a>>),
    Empty,
}

impl<'a> Stmt<'a> {
    pub fn first_token(&self) -> Option<&Token<'a>> {
        Some(match self {
            Stmt::Decl(d) => &d.kw,
            Stmt::Labeled(s) => &s.label.tok,
            Stmt::Expr(e) => e.first_token(),
            Stmt::Send(s) => s.chan.first_token(),
            Stmt::IncDec(s) => s.expr.first_token(),
            Stmt::Assign(s) => s.lhs.first()?.value.first_token(),
            Stmt::Go(s) => &s.go_kw,
            Stmt::Defer(s) => &s.defer_kw,
            Stmt::Return(s) => &s.return_kw,
            Stmt::Branch(s) => &s.kw,
            Stmt::Block(b) => &b.lbrace,
            Stmt::If(s) => &s.if_kw,
            Stmt::Switch(s) => &s.switch_kw,
            Stmt::Select(s) => &s.select_kw,
            Stmt::For(s) => &s.for_kw,
            Stmt::Empty => return None,
        })
    }

    pub fn first_token_mut(&mut self) -> Option<&mut Token<'a>> {
        Some(match self {
            Stmt::Decl(d) => &mut d.kw,
            Stmt::Labeled(s) => &mut s.label.tok,
            Stmt::Expr(e) => e.first_token_mut(),
            Stmt::Send(s) => s.chan.first_token_mut(),
            Stmt::IncDec(s) => s.expr.first_token_mut(),
            Stmt::Assign(s) => s.lhs.first_mut()?.value.first_token_mut(),
            Stmt::Go(s) => &mut s.go_kw,
            Stmt::Defer(s) => &mut s.defer_kw,
            Stmt::Return(s) => &mut s.return_kw,
            Stmt::Branch(s) => &mut s.kw,
            Stmt::Block(b) => &mut b.lbrace,
            Stmt::If(s) => &mut s.if_kw,
            Stmt::Switch(s) => &mut s.switch_kw,
            Stmt::Select(s) => &mut s.select_kw,
            Stmt::For(s) => &mut s.for_kw,
            Stmt::Empty => return None,
        })
    }
}

impl<'a> Codegen<'a> for Stmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Stmt::Decl(d) => d.codegen(state),
            Stmt::Labeled(s) => s.codegen(state),
            Stmt::Expr(e) => e.codegen(state),
            Stmt::Send(s) => s.codegen(state),
            Stmt::IncDec(s) => s.codegen(state),
            Stmt::Assign(s) => s.codegen(state),
            Stmt::Go(s) => s.codegen(state),
            Stmt::Defer(s) => s.codegen(state),
            Stmt::Return(s) => s.codegen(state),
            Stmt::Branch(s) => s.codegen(state),
            Stmt::Block(b) => b.codegen(state),
            Stmt::If(s) => s.codegen(state),
            Stmt::Switch(s) => s.codegen(state),
            Stmt::Select(s) => s.codegen(state),
            Stmt::For(s) => s.codegen(state),
            Stmt::Empty => {}
        }
    }
}

// ============================================================================
// Blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub lbrace: Token<'a>,
    pub stmts: Vec<Statement<'a>>,
    pub rbrace: Token<'a>,
}

impl<'a> Codegen<'a> for Block<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.lbrace.codegen(state);
        self.stmts.codegen(state);
        self.rbrace.codegen(state);
    }
}

// ============================================================================
// Simple statements
// ============================================================================

/// `label: stmt`; the inner statement is [`Stmt::Empty`] for a label right
/// before a closing brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledStmt<'a> {
    pub label: Ident<'a>,
    pub colon: Token<'a>,
    pub stmt: Stmt<'a>,
}

impl<'a> Codegen<'a> for LabeledStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.label.codegen(state);
        self.colon.codegen(state);
        self.stmt.codegen(state);
    }
}

/// `ch <- v`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendStmt<'a> {
    pub chan: Expr<'a>,
    pub arrow: Token<'a>,
    pub value: Expr<'a>,
}

impl<'a> Codegen<'a> for SendStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.chan.codegen(state);
        self.arrow.codegen(state);
        self.value.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncDecStmt<'a> {
    pub expr: Expr<'a>,
    pub op: Token<'a>,
}

impl<'a> Codegen<'a> for IncDecStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.expr.codegen(state);
        self.op.codegen(state);
    }
}

/// `lhs op rhs` for `=`, `:=` and the compound assignment operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStmt<'a> {
    pub lhs: Vec<Punct<'a, Expr<'a>>>,
    pub op: Token<'a>,
    pub rhs: Vec<Punct<'a, Expr<'a>>>,
}

impl<'a> Codegen<'a> for AssignStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.lhs.codegen(state);
        self.op.codegen(state);
        self.rhs.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoStmt<'a> {
    pub go_kw: Token<'a>,
    pub call: Expr<'a>,
}

impl<'a> Codegen<'a> for GoStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.go_kw.codegen(state);
        self.call.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferStmt<'a> {
    pub defer_kw: Token<'a>,
    pub call: Expr<'a>,
}

impl<'a> Codegen<'a> for DeferStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.defer_kw.codegen(state);
        self.call.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt<'a> {
    pub return_kw: Token<'a>,
    pub results: Vec<Punct<'a, Expr<'a>>>,
}

impl<'a> Codegen<'a> for ReturnStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.return_kw.codegen(state);
        self.results.codegen(state);
    }
}

/// `break`, `continue`, `goto` or `fallthrough`, with an optional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStmt<'a> {
    pub kw: Token<'a>,
    pub label: Option<Ident<'a>>,
}

impl<'a> Codegen<'a> for BranchStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.kw.codegen(state);
        self.label.codegen(state);
    }
}

// ============================================================================
// Compound statements
// ============================================================================

/// `if init; cond { body } else ...`
///
/// `init` carries its own `;` in [`Statement::semi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt<'a> {
    pub if_kw: Token<'a>,
    pub init: Option<Statement<'a>>,
    pub cond: Expr<'a>,
    pub body: Block<'a>,
    pub else_clause: Option<ElseClause<'a>>,
}

impl<'a> Codegen<'a> for IfStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.if_kw.codegen(state);
        self.init.codegen(state);
        self.cond.codegen(state);
        self.body.codegen(state);
        self.else_clause.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseClause<'a> {
    pub else_kw: Token<'a>,
    pub body: ElseBody<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElseBody<'a> {
    If(Box<IfStmt<'a>>),
    Block(Block<'a>),
}

impl<'a> Codegen<'a> for ElseClause<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.else_kw.codegen(state);
        match &self.body {
            ElseBody::If(i) => i.codegen(state),
            ElseBody::Block(b) => b.codegen(state),
        }
    }
}

/// Expression switch or type switch. For a type switch `tag` holds the
/// guard (`v := x.(type)` or `x.(type)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStmt<'a> {
    pub switch_kw: Token<'a>,
    pub init: Option<Statement<'a>>,
    pub tag: Option<Stmt<'a>>,
    pub lbrace: Token<'a>,
    pub clauses: Vec<CaseClause<'a>>,
    pub rbrace: Token<'a>,
}

impl<'a> Codegen<'a> for SwitchStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.switch_kw.codegen(state);
        self.init.codegen(state);
        self.tag.codegen(state);
        self.lbrace.codegen(state);
        self.clauses.codegen(state);
        self.rbrace.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStmt<'a> {
    pub select_kw: Token<'a>,
    pub lbrace: Token<'a>,
    pub clauses: Vec<CaseClause<'a>>,
    pub rbrace: Token<'a>,
}

impl<'a> Codegen<'a> for SelectStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.select_kw.codegen(state);
        self.lbrace.codegen(state);
        self.clauses.codegen(state);
        self.rbrace.codegen(state);
    }
}

/// `case a, b:` / `default:` in a switch, or `case v := <-ch:` in a select.
///
/// Switch clauses fill `exprs`; select clauses fill `comm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseClause<'a> {
    pub kw: Token<'a>,
    pub exprs: Vec<Punct<'a, Expr<'a>>>,
    pub comm: Option<Stmt<'a>>,
    pub colon: Token<'a>,
    pub body: Vec<Statement<'a>>,
}

impl<'a> CaseClause<'a> {
    pub fn is_default(&self) -> bool {
        self.kw.text == "default"
    }
}

impl<'a> Codegen<'a> for CaseClause<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.kw.codegen(state);
        self.exprs.codegen(state);
        self.comm.codegen(state);
        self.colon.codegen(state);
        self.body.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStmt<'a> {
    pub for_kw: Token<'a>,
    pub header: ForHeader<'a>,
    pub body: Block<'a>,
}

impl<'a> Codegen<'a> for ForStmt<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.for_kw.codegen(state);
        self.header.codegen(state);
        self.body.codegen(state);
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForHeader<'a> {
    /// `for { }`
    Infinite,
    /// `for cond { }`
    Cond(Expr<'a>),
    /// `for init; cond; post { }`
    Clause {
        init: Option<Stmt<'a>>,
        semi1: Token<'a>,
        cond: Option<Expr<'a>>,
        semi2: Token<'a>,
        post: Option<Stmt<'a>>,
    },
    Range(RangeClause<'a>),
}

impl<'a> Codegen<'a> for ForHeader<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            ForHeader::Infinite => {}
            ForHeader::Cond(e) => e.codegen(state),
            ForHeader::Clause {
                init,
                semi1,
                cond,
                semi2,
                post,
            } => {
                init.codegen(state);
                semi1.codegen(state);
                cond.codegen(state);
                semi2.codegen(state);
                post.codegen(state);
            }
            ForHeader::Range(r) => r.codegen(state),
        }
    }
}

/// `k, v := range x`, `k = range x` or `range x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeClause<'a> {
    pub lhs: Vec<Punct<'a, Expr<'a>>>,
    pub op: Option<Token<'a>>,
    pub range_kw: Token<'a>,
    pub expr: Expr<'a>,
}

impl<'a> Codegen<'a> for RangeClause<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.lhs.codegen(state);
        self.op.codegen(state);
        self.range_kw.codegen(state);
        self.expr.codegen(state);
    }
}
