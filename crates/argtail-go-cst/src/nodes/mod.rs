// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

pub mod decl;
pub mod expression;
pub mod statement;
pub mod traits;

pub use decl::{
    Decl, FuncDecl, GenDecl, GenDeclBody, ImportSpec, SourceFile, Spec, SpecLine, TopDecl,
    TypeSpec, ValueSpec,
};
pub use expression::{
    ArrayType, BasicLit, BinaryExpr, CallExpr, ChanType, CompositeLit, EllipsisExpr, Expr, Field,
    FieldDecl, FieldList, FuncLit, FuncType, Ident, IndexExpr, InterfaceElem, InterfaceElemKind,
    InterfaceType, KeyValueExpr, MapType, ParenExpr, Results, SelectorExpr, SliceExpr, StarExpr,
    StructType, TypeAssertExpr, UnaryExpr,
};
pub use statement::{
    AssignStmt, Block, BranchStmt, CaseClause, DeferStmt, ElseBody, ElseClause, ForHeader,
    ForStmt, GoStmt, IfStmt, IncDecStmt, LabeledStmt, RangeClause, ReturnStmt, SelectStmt,
    SendStmt, Statement, Stmt, SwitchStmt,
};
pub use traits::{Codegen, CodegenState, Punct};
