// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definition for CST traversal.

use crate::nodes::{
    // Source file and declarations
    FuncDecl, GenDecl, ImportSpec, SourceFile, TypeSpec, ValueSpec,
    // Statements
    Block, CaseClause, ForStmt, IfStmt, SelectStmt, Statement, Stmt, SwitchStmt,
    // Expressions
    BasicLit, CallExpr, CompositeLit, Expr, FuncLit, Ident, SelectorExpr,
    // Signatures
    Field, FieldList,
};

/// Result of visiting a node; controls how the walker proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children. `leave_*` is called afterwards.
    #[default]
    Continue,

    /// Skip children, continue with siblings. `leave_*` is still called.
    SkipChildren,

    /// Stop traversal entirely. No further `visit_*` or `leave_*` calls.
    Stop,
}

/// Generates `visit_*` / `leave_*` pairs with no-op defaults.
///
/// ```ignore
/// visitor_methods! {
///     call: CallExpr<'a>,
/// }
/// ```
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited, even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Immutable visitor for CST traversal.
///
/// `visit_*` runs pre-order, `leave_*` post-order, and children are visited
/// in source order. Nodes without a dedicated hook are still traversed; their
/// children reach the visitor through the hooks below.
///
/// ```ignore
/// struct CallCounter {
///     count: usize,
/// }
///
/// impl<'a> Visitor<'a> for CallCounter {
///     fn visit_call(&mut self, _node: &CallExpr<'a>) -> VisitResult {
///         self.count += 1;
///         VisitResult::Continue
///     }
/// }
/// ```
pub trait Visitor<'a> {
    // Source file and declarations
    visitor_methods! {
        source_file: SourceFile<'a>,
        gen_decl: GenDecl<'a>,
        import_spec: ImportSpec<'a>,
        value_spec: ValueSpec<'a>,
        type_spec: TypeSpec<'a>,
        func_decl: FuncDecl<'a>,
    }

    // Statements
    visitor_methods! {
        block: Block<'a>,
        statement: Statement<'a>,
        stmt: Stmt<'a>,
        if_stmt: IfStmt<'a>,
        switch_stmt: SwitchStmt<'a>,
        select_stmt: SelectStmt<'a>,
        case_clause: CaseClause<'a>,
        for_stmt: ForStmt<'a>,
    }

    // Expressions
    visitor_methods! {
        expr: Expr<'a>,
        ident: Ident<'a>,
        basic_lit: BasicLit<'a>,
        selector: SelectorExpr<'a>,
        call: CallExpr<'a>,
        composite_lit: CompositeLit<'a>,
        func_lit: FuncLit<'a>,
    }

    // Signatures
    visitor_methods! {
        field_list: FieldList<'a>,
        field: Field<'a>,
    }
}
