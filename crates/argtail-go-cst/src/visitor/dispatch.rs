// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions driving a [`Visitor`] over the CST.
//!
//! Every `walk_*` function calls the matching `visit_*` hook, descends into
//! children in source order unless told otherwise, then calls `leave_*`.
//! A `Stop` from any hook unwinds the whole walk.

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    BasicLit, Block, CallExpr, CaseClause, CompositeLit, Decl, ElseBody, Expr, Field, FieldList,
    ForHeader, ForStmt, FuncDecl, FuncLit, FuncType, GenDecl, Ident, IfStmt, ImportSpec,
    InterfaceElemKind, Punct, Results, SelectStmt, SelectorExpr, SourceFile, Spec, Statement, Stmt,
    SwitchStmt, TypeSpec, ValueSpec,
};

macro_rules! walk_or_stop {
    ($e:expr) => {
        if $e == VisitResult::Stop {
            return VisitResult::Stop;
        }
    };
}

// ============================================================================
// Source file and declarations
// ============================================================================

/// Walk a [`SourceFile`], the root of the tree.
pub fn walk_source_file<'a, V: Visitor<'a>>(visitor: &mut V, node: &SourceFile<'a>) -> VisitResult {
    match visitor.visit_source_file(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_ident(visitor, &node.name));
            for top in &node.decls {
                walk_or_stop!(walk_decl(visitor, &top.decl));
            }
        }
    }
    visitor.leave_source_file(node);
    VisitResult::Continue
}

pub fn walk_decl<'a, V: Visitor<'a>>(visitor: &mut V, node: &Decl<'a>) -> VisitResult {
    match node {
        Decl::Gen(g) => walk_gen_decl(visitor, g),
        Decl::Func(f) => walk_func_decl(visitor, f),
    }
}

pub fn walk_gen_decl<'a, V: Visitor<'a>>(visitor: &mut V, node: &GenDecl<'a>) -> VisitResult {
    match visitor.visit_gen_decl(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for spec in node.specs() {
                walk_or_stop!(walk_spec(visitor, spec));
            }
        }
    }
    visitor.leave_gen_decl(node);
    VisitResult::Continue
}

pub fn walk_spec<'a, V: Visitor<'a>>(visitor: &mut V, node: &Spec<'a>) -> VisitResult {
    match node {
        Spec::Import(s) => walk_import_spec(visitor, s),
        Spec::Value(s) => walk_value_spec(visitor, s),
        Spec::Type(s) => walk_type_spec(visitor, s),
    }
}

pub fn walk_import_spec<'a, V: Visitor<'a>>(visitor: &mut V, node: &ImportSpec<'a>) -> VisitResult {
    match visitor.visit_import_spec(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_basic_lit(visitor, &node.path));
        }
    }
    visitor.leave_import_spec(node);
    VisitResult::Continue
}

pub fn walk_value_spec<'a, V: Visitor<'a>>(visitor: &mut V, node: &ValueSpec<'a>) -> VisitResult {
    match visitor.visit_value_spec(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_idents(visitor, &node.names));
            if let Some(ty) = &node.ty {
                walk_or_stop!(walk_expr(visitor, ty));
            }
            walk_or_stop!(walk_exprs(visitor, &node.values));
        }
    }
    visitor.leave_value_spec(node);
    VisitResult::Continue
}

pub fn walk_type_spec<'a, V: Visitor<'a>>(visitor: &mut V, node: &TypeSpec<'a>) -> VisitResult {
    match visitor.visit_type_spec(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_ident(visitor, &node.name));
            if let Some(params) = &node.type_params {
                walk_or_stop!(walk_field_list(visitor, params));
            }
            walk_or_stop!(walk_expr(visitor, &node.ty));
        }
    }
    visitor.leave_type_spec(node);
    VisitResult::Continue
}

/// Walk a [`FuncDecl`]: receiver, name, type parameters, signature, body.
pub fn walk_func_decl<'a, V: Visitor<'a>>(visitor: &mut V, node: &FuncDecl<'a>) -> VisitResult {
    match visitor.visit_func_decl(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(recv) = &node.recv {
                walk_or_stop!(walk_field_list(visitor, recv));
            }
            walk_or_stop!(walk_ident(visitor, &node.name));
            if let Some(params) = &node.type_params {
                walk_or_stop!(walk_field_list(visitor, params));
            }
            walk_or_stop!(walk_field_list(visitor, &node.params));
            if let Some(results) = &node.results {
                walk_or_stop!(walk_results(visitor, results));
            }
            if let Some(body) = &node.body {
                walk_or_stop!(walk_block(visitor, body));
            }
        }
    }
    visitor.leave_func_decl(node);
    VisitResult::Continue
}

// ============================================================================
// Signatures
// ============================================================================

pub fn walk_field_list<'a, V: Visitor<'a>>(visitor: &mut V, node: &FieldList<'a>) -> VisitResult {
    match visitor.visit_field_list(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for field in &node.fields {
                walk_or_stop!(walk_field(visitor, &field.value));
            }
        }
    }
    visitor.leave_field_list(node);
    VisitResult::Continue
}

pub fn walk_field<'a, V: Visitor<'a>>(visitor: &mut V, node: &Field<'a>) -> VisitResult {
    match visitor.visit_field(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_idents(visitor, &node.names));
            walk_or_stop!(walk_expr(visitor, &node.ty));
        }
    }
    visitor.leave_field(node);
    VisitResult::Continue
}

pub fn walk_results<'a, V: Visitor<'a>>(visitor: &mut V, node: &Results<'a>) -> VisitResult {
    match node {
        Results::Single(ty) => walk_expr(visitor, ty),
        Results::List(list) => walk_field_list(visitor, list),
    }
}

fn walk_func_type<'a, V: Visitor<'a>>(visitor: &mut V, node: &FuncType<'a>) -> VisitResult {
    walk_or_stop!(walk_field_list(visitor, &node.params));
    if let Some(results) = &node.results {
        walk_or_stop!(walk_results(visitor, results));
    }
    VisitResult::Continue
}

// ============================================================================
// Statements
// ============================================================================

pub fn walk_block<'a, V: Visitor<'a>>(visitor: &mut V, node: &Block<'a>) -> VisitResult {
    match visitor.visit_block(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_statements(visitor, &node.stmts));
        }
    }
    visitor.leave_block(node);
    VisitResult::Continue
}

pub fn walk_statement<'a, V: Visitor<'a>>(visitor: &mut V, node: &Statement<'a>) -> VisitResult {
    match visitor.visit_statement(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_stmt(visitor, &node.stmt));
        }
    }
    visitor.leave_statement(node);
    VisitResult::Continue
}

fn walk_statements<'a, V: Visitor<'a>>(visitor: &mut V, stmts: &[Statement<'a>]) -> VisitResult {
    for stmt in stmts {
        walk_or_stop!(walk_statement(visitor, stmt));
    }
    VisitResult::Continue
}

/// Walk a [`Stmt`], dispatching on its variant.
pub fn walk_stmt<'a, V: Visitor<'a>>(visitor: &mut V, node: &Stmt<'a>) -> VisitResult {
    match visitor.visit_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                Stmt::Decl(d) => walk_gen_decl(visitor, d),
                Stmt::Labeled(s) => {
                    walk_or_stop!(walk_ident(visitor, &s.label));
                    walk_stmt(visitor, &s.stmt)
                }
                Stmt::Expr(e) => walk_expr(visitor, e),
                Stmt::Send(s) => {
                    walk_or_stop!(walk_expr(visitor, &s.chan));
                    walk_expr(visitor, &s.value)
                }
                Stmt::IncDec(s) => walk_expr(visitor, &s.expr),
                Stmt::Assign(s) => {
                    walk_or_stop!(walk_exprs(visitor, &s.lhs));
                    walk_exprs(visitor, &s.rhs)
                }
                Stmt::Go(s) => walk_expr(visitor, &s.call),
                Stmt::Defer(s) => walk_expr(visitor, &s.call),
                Stmt::Return(s) => walk_exprs(visitor, &s.results),
                Stmt::Branch(s) => match &s.label {
                    Some(label) => walk_ident(visitor, label),
                    None => VisitResult::Continue,
                },
                Stmt::Block(b) => walk_block(visitor, b),
                Stmt::If(s) => walk_if(visitor, s),
                Stmt::Switch(s) => walk_switch(visitor, s),
                Stmt::Select(s) => walk_select(visitor, s),
                Stmt::For(s) => walk_for(visitor, s),
                Stmt::Empty => VisitResult::Continue,
            };
            walk_or_stop!(inner);
        }
    }
    visitor.leave_stmt(node);
    VisitResult::Continue
}

pub fn walk_if<'a, V: Visitor<'a>>(visitor: &mut V, node: &IfStmt<'a>) -> VisitResult {
    match visitor.visit_if_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(init) = &node.init {
                walk_or_stop!(walk_statement(visitor, init));
            }
            walk_or_stop!(walk_expr(visitor, &node.cond));
            walk_or_stop!(walk_block(visitor, &node.body));
            if let Some(else_clause) = &node.else_clause {
                walk_or_stop!(match &else_clause.body {
                    ElseBody::If(nested) => walk_if(visitor, nested),
                    ElseBody::Block(block) => walk_block(visitor, block),
                });
            }
        }
    }
    visitor.leave_if_stmt(node);
    VisitResult::Continue
}

pub fn walk_switch<'a, V: Visitor<'a>>(visitor: &mut V, node: &SwitchStmt<'a>) -> VisitResult {
    match visitor.visit_switch_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(init) = &node.init {
                walk_or_stop!(walk_statement(visitor, init));
            }
            if let Some(tag) = &node.tag {
                walk_or_stop!(walk_stmt(visitor, tag));
            }
            for clause in &node.clauses {
                walk_or_stop!(walk_case_clause(visitor, clause));
            }
        }
    }
    visitor.leave_switch_stmt(node);
    VisitResult::Continue
}

pub fn walk_select<'a, V: Visitor<'a>>(visitor: &mut V, node: &SelectStmt<'a>) -> VisitResult {
    match visitor.visit_select_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for clause in &node.clauses {
                walk_or_stop!(walk_case_clause(visitor, clause));
            }
        }
    }
    visitor.leave_select_stmt(node);
    VisitResult::Continue
}

pub fn walk_case_clause<'a, V: Visitor<'a>>(visitor: &mut V, node: &CaseClause<'a>) -> VisitResult {
    match visitor.visit_case_clause(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_exprs(visitor, &node.exprs));
            if let Some(comm) = &node.comm {
                walk_or_stop!(walk_stmt(visitor, comm));
            }
            walk_or_stop!(walk_statements(visitor, &node.body));
        }
    }
    visitor.leave_case_clause(node);
    VisitResult::Continue
}

pub fn walk_for<'a, V: Visitor<'a>>(visitor: &mut V, node: &ForStmt<'a>) -> VisitResult {
    match visitor.visit_for_stmt(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            match &node.header {
                ForHeader::Infinite => {}
                ForHeader::Cond(cond) => walk_or_stop!(walk_expr(visitor, cond)),
                ForHeader::Clause {
                    init, cond, post, ..
                } => {
                    if let Some(init) = init {
                        walk_or_stop!(walk_stmt(visitor, init));
                    }
                    if let Some(cond) = cond {
                        walk_or_stop!(walk_expr(visitor, cond));
                    }
                    if let Some(post) = post {
                        walk_or_stop!(walk_stmt(visitor, post));
                    }
                }
                ForHeader::Range(range) => {
                    walk_or_stop!(walk_exprs(visitor, &range.lhs));
                    walk_or_stop!(walk_expr(visitor, &range.expr));
                }
            }
            walk_or_stop!(walk_block(visitor, &node.body));
        }
    }
    visitor.leave_for_stmt(node);
    VisitResult::Continue
}

// ============================================================================
// Expressions
// ============================================================================

/// Walk an [`Expr`], dispatching on its variant.
pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, node: &Expr<'a>) -> VisitResult {
    match visitor.visit_expr(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner = match node {
                Expr::Ident(n) => walk_ident(visitor, n),
                Expr::BasicLit(n) => walk_basic_lit(visitor, n),
                Expr::CompositeLit(n) => walk_composite_lit(visitor, n),
                Expr::FuncLit(n) => walk_func_lit(visitor, n),
                Expr::Paren(n) => walk_expr(visitor, &n.expr),
                Expr::Selector(n) => walk_selector(visitor, n),
                Expr::Index(n) => {
                    walk_or_stop!(walk_expr(visitor, &n.value));
                    walk_exprs(visitor, &n.indices)
                }
                Expr::Slice(n) => {
                    walk_or_stop!(walk_expr(visitor, &n.value));
                    for part in [&n.low, &n.high, &n.max].into_iter().flatten() {
                        walk_or_stop!(walk_expr(visitor, part));
                    }
                    VisitResult::Continue
                }
                Expr::TypeAssert(n) => {
                    walk_or_stop!(walk_expr(visitor, &n.value));
                    match &n.ty {
                        Some(ty) => walk_expr(visitor, ty),
                        None => VisitResult::Continue,
                    }
                }
                Expr::Call(n) => walk_call(visitor, n),
                Expr::Star(n) => walk_expr(visitor, &n.expr),
                Expr::Unary(n) => walk_expr(visitor, &n.expr),
                Expr::Binary(n) => {
                    walk_or_stop!(walk_expr(visitor, &n.left));
                    walk_expr(visitor, &n.right)
                }
                Expr::KeyValue(n) => {
                    walk_or_stop!(walk_expr(visitor, &n.key));
                    walk_expr(visitor, &n.value)
                }
                Expr::Ellipsis(n) => match &n.elt {
                    Some(elt) => walk_expr(visitor, elt),
                    None => VisitResult::Continue,
                },
                Expr::ArrayType(n) => {
                    if let Some(len) = &n.len {
                        walk_or_stop!(walk_expr(visitor, len));
                    }
                    walk_expr(visitor, &n.elem)
                }
                Expr::StructType(n) => {
                    for field in &n.fields {
                        walk_or_stop!(walk_idents(visitor, &field.names));
                        walk_or_stop!(walk_expr(visitor, &field.ty));
                        if let Some(tag) = &field.tag {
                            walk_or_stop!(walk_basic_lit(visitor, tag));
                        }
                    }
                    VisitResult::Continue
                }
                Expr::FuncType(n) => walk_func_type(visitor, n),
                Expr::InterfaceType(n) => {
                    for elem in &n.elems {
                        match &elem.kind {
                            InterfaceElemKind::Method {
                                name,
                                params,
                                results,
                            } => {
                                walk_or_stop!(walk_ident(visitor, name));
                                walk_or_stop!(walk_field_list(visitor, params));
                                if let Some(results) = results {
                                    walk_or_stop!(walk_results(visitor, results));
                                }
                            }
                            InterfaceElemKind::Embedded(e) => walk_or_stop!(walk_expr(visitor, e)),
                        }
                    }
                    VisitResult::Continue
                }
                Expr::MapType(n) => {
                    walk_or_stop!(walk_expr(visitor, &n.key));
                    walk_expr(visitor, &n.value)
                }
                Expr::ChanType(n) => walk_expr(visitor, &n.elem),
            };
            walk_or_stop!(inner);
        }
    }
    visitor.leave_expr(node);
    VisitResult::Continue
}

fn walk_exprs<'a, V: Visitor<'a>>(visitor: &mut V, exprs: &[Punct<'a, Expr<'a>>]) -> VisitResult {
    for expr in exprs {
        walk_or_stop!(walk_expr(visitor, &expr.value));
    }
    VisitResult::Continue
}

fn walk_idents<'a, V: Visitor<'a>>(visitor: &mut V, idents: &[Punct<'a, Ident<'a>>]) -> VisitResult {
    for ident in idents {
        walk_or_stop!(walk_ident(visitor, &ident.value));
    }
    VisitResult::Continue
}

pub fn walk_ident<'a, V: Visitor<'a>>(visitor: &mut V, node: &Ident<'a>) -> VisitResult {
    if visitor.visit_ident(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_ident(node);
    VisitResult::Continue
}

pub fn walk_basic_lit<'a, V: Visitor<'a>>(visitor: &mut V, node: &BasicLit<'a>) -> VisitResult {
    if visitor.visit_basic_lit(node) == VisitResult::Stop {
        return VisitResult::Stop;
    }
    visitor.leave_basic_lit(node);
    VisitResult::Continue
}

/// Walk a [`SelectorExpr`]: the base expression, then the member name.
pub fn walk_selector<'a, V: Visitor<'a>>(visitor: &mut V, node: &SelectorExpr<'a>) -> VisitResult {
    match visitor.visit_selector(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_expr(visitor, &node.value));
            walk_or_stop!(walk_ident(visitor, &node.attr));
        }
    }
    visitor.leave_selector(node);
    VisitResult::Continue
}

pub fn walk_call<'a, V: Visitor<'a>>(visitor: &mut V, node: &CallExpr<'a>) -> VisitResult {
    match visitor.visit_call(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_expr(visitor, &node.func));
            walk_or_stop!(walk_exprs(visitor, &node.args));
        }
    }
    visitor.leave_call(node);
    VisitResult::Continue
}

pub fn walk_composite_lit<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &CompositeLit<'a>,
) -> VisitResult {
    match visitor.visit_composite_lit(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(ty) = &node.ty {
                walk_or_stop!(walk_expr(visitor, ty));
            }
            walk_or_stop!(walk_exprs(visitor, &node.elts));
        }
    }
    visitor.leave_composite_lit(node);
    VisitResult::Continue
}

pub fn walk_func_lit<'a, V: Visitor<'a>>(visitor: &mut V, node: &FuncLit<'a>) -> VisitResult {
    match visitor.visit_func_lit(node) {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_or_stop!(walk_func_type(visitor, &node.ty));
            walk_or_stop!(walk_block(visitor, &node.body));
        }
    }
    visitor.leave_func_lit(node);
    VisitResult::Continue
}
