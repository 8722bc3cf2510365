// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression and type nodes.
//!
//! Go types are expressions syntactically (`[]T`, `map[K]V`, `*T` and
//! `pkg.T` all appear in expression position), so they share the [`Expr`]
//! enum.

use crate::nodes::statement::Block;
use crate::nodes::traits::{Codegen, CodegenState, Punct};
use crate::tokenizer::{TokType, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<'a> {
    Ident(Ident<'a>),
    BasicLit(BasicLit<'a>),
    CompositeLit(Box<CompositeLit<'a>>),
    FuncLit(Box<FuncLit<'a>>),
    Paren(Box<ParenExpr<'a>>),
    Selector(Box<SelectorExpr<'a>>),
    Index(Box<IndexExpr<'a>>),
    Slice(Box<SliceExpr<'a>>),
    TypeAssert(Box<TypeAssertExpr<'a>>),
    Call(Box<CallExpr<'a>>),
    Star(Box<StarExpr<'a>>),
    Unary(Box<UnaryExpr<'a>>),
    Binary(Box<BinaryExpr<'a>>),
    KeyValue(Box<KeyValueExpr<'a>>),
    Ellipsis(Box<EllipsisExpr<'a>>),
    ArrayType(Box<ArrayType<'a>>),
    StructType(Box<StructType<'a>>),
    FuncType(Box<FuncType<'a>>),
    InterfaceType(Box<InterfaceType<'a>>),
    MapType(Box<MapType<'a>>),
    ChanType(Box<ChanType<'a>>),
}

impl<'a> Expr<'a> {
    /// The identifier, if this expression is a bare name.
    pub fn as_ident(&self) -> Option<&Ident<'a>> {
        match self {
            Expr::Ident(id) => Some(id),
            _ => None,
        }
    }

    /// The first token of this expression in source order.
    pub fn first_token(&self) -> &Token<'a> {
        match self {
            Expr::Ident(n) => &n.tok,
            Expr::BasicLit(n) => &n.tok,
            Expr::CompositeLit(n) => match &n.ty {
                Some(ty) => ty.first_token(),
                None => &n.lbrace,
            },
            Expr::FuncLit(n) => &n.ty.func_kw,
            Expr::Paren(n) => &n.lparen,
            Expr::Selector(n) => n.value.first_token(),
            Expr::Index(n) => n.value.first_token(),
            Expr::Slice(n) => n.value.first_token(),
            Expr::TypeAssert(n) => n.value.first_token(),
            Expr::Call(n) => n.func.first_token(),
            Expr::Star(n) => &n.star,
            Expr::Unary(n) => &n.op,
            Expr::Binary(n) => n.left.first_token(),
            Expr::KeyValue(n) => n.key.first_token(),
            Expr::Ellipsis(n) => &n.ellipsis,
            Expr::ArrayType(n) => &n.lbracket,
            Expr::StructType(n) => &n.struct_kw,
            Expr::FuncType(n) => &n.func_kw,
            Expr::InterfaceType(n) => &n.interface_kw,
            Expr::MapType(n) => &n.map_kw,
            Expr::ChanType(n) => match &n.arrow_before {
                Some(arrow) => arrow,
                None => &n.chan_kw,
            },
        }
    }

    /// Mutable access to the first token, used to adjust leading trivia.
    pub fn first_token_mut(&mut self) -> &mut Token<'a> {
        match self {
            Expr::Ident(n) => &mut n.tok,
            Expr::BasicLit(n) => &mut n.tok,
            Expr::CompositeLit(n) => match &mut n.ty {
                Some(ty) => ty.first_token_mut(),
                None => &mut n.lbrace,
            },
            Expr::FuncLit(n) => &mut n.ty.func_kw,
            Expr::Paren(n) => &mut n.lparen,
            Expr::Selector(n) => n.value.first_token_mut(),
            Expr::Index(n) => n.value.first_token_mut(),
            Expr::Slice(n) => n.value.first_token_mut(),
            Expr::TypeAssert(n) => n.value.first_token_mut(),
            Expr::Call(n) => n.func.first_token_mut(),
            Expr::Star(n) => &mut n.star,
            Expr::Unary(n) => &mut n.op,
            Expr::Binary(n) => n.left.first_token_mut(),
            Expr::KeyValue(n) => n.key.first_token_mut(),
            Expr::Ellipsis(n) => &mut n.ellipsis,
            Expr::ArrayType(n) => &mut n.lbracket,
            Expr::StructType(n) => &mut n.struct_kw,
            Expr::FuncType(n) => &mut n.func_kw,
            Expr::InterfaceType(n) => &mut n.interface_kw,
            Expr::MapType(n) => &mut n.map_kw,
            Expr::ChanType(n) => match &mut n.arrow_before {
                Some(arrow) => arrow,
                None => &mut n.chan_kw,
            },
        }
    }
}

impl<'a> Codegen<'a> for Expr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Expr::Ident(n) => n.codegen(state),
            Expr::BasicLit(n) => n.codegen(state),
            Expr::CompositeLit(n) => n.codegen(state),
            Expr::FuncLit(n) => n.codegen(state),
            Expr::Paren(n) => n.codegen(state),
            Expr::Selector(n) => n.codegen(state),
            Expr::Index(n) => n.codegen(state),
            Expr::Slice(n) => n.codegen(state),
            Expr::TypeAssert(n) => n.codegen(state),
            Expr::Call(n) => n.codegen(state),
            Expr::Star(n) => n.codegen(state),
            Expr::Unary(n) => n.codegen(state),
            Expr::Binary(n) => n.codegen(state),
            Expr::KeyValue(n) => n.codegen(state),
            Expr::Ellipsis(n) => n.codegen(state),
            Expr::ArrayType(n) => n.codegen(state),
            Expr::StructType(n) => n.codegen(state),
            Expr::FuncType(n) => n.codegen(state),
            Expr::InterfaceType(n) => n.codegen(state),
            Expr::MapType(n) => n.codegen(state),
            Expr::ChanType(n) => n.codegen(state),
        }
    }
}

// ============================================================================
// Operands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident<'a> {
    pub tok: Token<'a>,
}

impl<'a> Ident<'a> {
    pub fn new(tok: Token<'a>) -> Self {
        Ident { tok }
    }

    /// A synthesized identifier with no leading trivia.
    pub fn synthesized(name: impl Into<std::borrow::Cow<'a, str>>) -> Self {
        Ident {
            tok: Token::synthesized(TokType::Ident, "", name),
        }
    }

    pub fn name(&self) -> &str {
        &self.tok.text
    }
}

impl<'a> Codegen<'a> for Ident<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.tok.codegen(state);
    }
}

/// Integer, float, imaginary, rune or string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit<'a> {
    pub tok: Token<'a>,
}

impl<'a> BasicLit<'a> {
    pub fn new(tok: Token<'a>) -> Self {
        BasicLit { tok }
    }

    pub fn kind(&self) -> TokType {
        self.tok.kind
    }

    /// Literal text as written, including quotes for strings.
    pub fn raw(&self) -> &str {
        &self.tok.text
    }

    /// The contents of a string literal without quotes and with common
    /// escapes resolved. Returns `None` for non-string literals.
    pub fn string_value(&self) -> Option<String> {
        if self.tok.kind != TokType::String {
            return None;
        }
        let raw = self.raw();
        if let Some(inner) = raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
            return Some(inner.replace('\r', ""));
        }
        let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
        Some(out)
    }
}

impl<'a> Codegen<'a> for BasicLit<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.tok.codegen(state);
    }
}

/// `T{a, b}` or, inside another composite literal, an elided `{a, b}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLit<'a> {
    pub ty: Option<Expr<'a>>,
    pub lbrace: Token<'a>,
    pub elts: Vec<Punct<'a, Expr<'a>>>,
    pub rbrace: Token<'a>,
}

impl<'a> Codegen<'a> for CompositeLit<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.ty.codegen(state);
        self.lbrace.codegen(state);
        self.elts.codegen(state);
        self.rbrace.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncLit<'a> {
    pub ty: FuncType<'a>,
    pub body: Block<'a>,
}

impl<'a> Codegen<'a> for FuncLit<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.ty.codegen(state);
        self.body.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenExpr<'a> {
    pub lparen: Token<'a>,
    pub expr: Expr<'a>,
    pub rparen: Token<'a>,
}

impl<'a> Codegen<'a> for ParenExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.lparen.codegen(state);
        self.expr.codegen(state);
        self.rparen.codegen(state);
    }
}

// ============================================================================
// Primary expressions
// ============================================================================

/// `value.attr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorExpr<'a> {
    pub value: Expr<'a>,
    pub dot: Token<'a>,
    pub attr: Ident<'a>,
}

impl<'a> Codegen<'a> for SelectorExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.value.codegen(state);
        self.dot.codegen(state);
        self.attr.codegen(state);
    }
}

/// `value[i]`, or `value[T1, T2]` for a generic instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexExpr<'a> {
    pub value: Expr<'a>,
    pub lbracket: Token<'a>,
    pub indices: Vec<Punct<'a, Expr<'a>>>,
    pub rbracket: Token<'a>,
}

impl<'a> Codegen<'a> for IndexExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.value.codegen(state);
        self.lbracket.codegen(state);
        self.indices.codegen(state);
        self.rbracket.codegen(state);
    }
}

/// `value[low:high]` or `value[low:high:max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceExpr<'a> {
    pub value: Expr<'a>,
    pub lbracket: Token<'a>,
    pub low: Option<Expr<'a>>,
    pub colon1: Token<'a>,
    pub high: Option<Expr<'a>>,
    pub colon2: Option<Token<'a>>,
    pub max: Option<Expr<'a>>,
    pub rbracket: Token<'a>,
}

impl<'a> Codegen<'a> for SliceExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.value.codegen(state);
        self.lbracket.codegen(state);
        self.low.codegen(state);
        self.colon1.codegen(state);
        self.high.codegen(state);
        self.colon2.codegen(state);
        self.max.codegen(state);
        self.rbracket.codegen(state);
    }
}

/// `value.(T)`; `ty` is `None` and `type_kw` is set for `value.(type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAssertExpr<'a> {
    pub value: Expr<'a>,
    pub dot: Token<'a>,
    pub lparen: Token<'a>,
    pub ty: Option<Expr<'a>>,
    pub type_kw: Option<Token<'a>>,
    pub rparen: Token<'a>,
}

impl<'a> Codegen<'a> for TypeAssertExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.value.codegen(state);
        self.dot.codegen(state);
        self.lparen.codegen(state);
        self.ty.codegen(state);
        self.type_kw.codegen(state);
        self.rparen.codegen(state);
    }
}

/// `func(args)`; `ellipsis` is the `...` spreading the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr<'a> {
    pub func: Expr<'a>,
    pub lparen: Token<'a>,
    pub args: Vec<Punct<'a, Expr<'a>>>,
    pub ellipsis: Option<Token<'a>>,
    pub rparen: Token<'a>,
}

impl<'a> CallExpr<'a> {
    /// `(module, symbol)` if the callee is `module.symbol` with a plain
    /// identifier as the base.
    pub fn qualified_callee(&self) -> Option<(&str, &str)> {
        match &self.func {
            Expr::Selector(sel) => sel
                .value
                .as_ident()
                .map(|base| (base.name(), sel.attr.name())),
            _ => None,
        }
    }
}

impl<'a> Codegen<'a> for CallExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.func.codegen(state);
        self.lparen.codegen(state);
        let last = self.args.len().saturating_sub(1);
        for (i, arg) in self.args.iter().enumerate() {
            arg.value.codegen(state);
            if i == last {
                self.ellipsis.codegen(state);
            }
            arg.comma.codegen(state);
        }
        self.rparen.codegen(state);
    }
}

// ============================================================================
// Operators
// ============================================================================

/// `*expr`: pointer type or dereference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarExpr<'a> {
    pub star: Token<'a>,
    pub expr: Expr<'a>,
}

impl<'a> Codegen<'a> for StarExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.star.codegen(state);
        self.expr.codegen(state);
    }
}

/// Prefix `+ - ! ^ & <- ~`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpr<'a> {
    pub op: Token<'a>,
    pub expr: Expr<'a>,
}

impl<'a> Codegen<'a> for UnaryExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.op.codegen(state);
        self.expr.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr<'a> {
    pub left: Expr<'a>,
    pub op: Token<'a>,
    pub right: Expr<'a>,
}

impl<'a> Codegen<'a> for BinaryExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.left.codegen(state);
        self.op.codegen(state);
        self.right.codegen(state);
    }
}

/// `key: value` inside a composite literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueExpr<'a> {
    pub key: Expr<'a>,
    pub colon: Token<'a>,
    pub value: Expr<'a>,
}

impl<'a> Codegen<'a> for KeyValueExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.key.codegen(state);
        self.colon.codegen(state);
        self.value.codegen(state);
    }
}

/// `...T` for variadic parameters, bare `...` for `[...]T` array lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EllipsisExpr<'a> {
    pub ellipsis: Token<'a>,
    pub elt: Option<Expr<'a>>,
}

impl<'a> Codegen<'a> for EllipsisExpr<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.ellipsis.codegen(state);
        self.elt.codegen(state);
    }
}

// ============================================================================
// Types
// ============================================================================

/// `[N]T`, `[...]T` or, when `len` is `None`, the slice type `[]T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType<'a> {
    pub lbracket: Token<'a>,
    pub len: Option<Expr<'a>>,
    pub rbracket: Token<'a>,
    pub elem: Expr<'a>,
}

impl<'a> Codegen<'a> for ArrayType<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.lbracket.codegen(state);
        self.len.codegen(state);
        self.rbracket.codegen(state);
        self.elem.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType<'a> {
    pub struct_kw: Token<'a>,
    pub lbrace: Token<'a>,
    pub fields: Vec<FieldDecl<'a>>,
    pub rbrace: Token<'a>,
}

impl<'a> Codegen<'a> for StructType<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.struct_kw.codegen(state);
        self.lbrace.codegen(state);
        self.fields.codegen(state);
        self.rbrace.codegen(state);
    }
}

/// A struct field line. `names` is empty for an embedded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    pub names: Vec<Punct<'a, Ident<'a>>>,
    pub ty: Expr<'a>,
    pub tag: Option<BasicLit<'a>>,
    pub semi: Option<Token<'a>>,
}

impl<'a> Codegen<'a> for FieldDecl<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.names.codegen(state);
        self.ty.codegen(state);
        self.tag.codegen(state);
        self.semi.codegen(state);
    }
}

/// Parenthesized parameter or result list, or a bracketed type-parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList<'a> {
    pub open: Token<'a>,
    pub fields: Vec<Punct<'a, Field<'a>>>,
    pub close: Token<'a>,
}

impl<'a> Codegen<'a> for FieldList<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.open.codegen(state);
        self.fields.codegen(state);
        self.close.codegen(state);
    }
}

/// `a, b T` within a field list; `names` is empty for an unnamed parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub names: Vec<Punct<'a, Ident<'a>>>,
    pub ty: Expr<'a>,
}

impl<'a> Codegen<'a> for Field<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.names.codegen(state);
        self.ty.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Results<'a> {
    /// A single unnamed result type.
    Single(Expr<'a>),
    List(FieldList<'a>),
}

impl<'a> Codegen<'a> for Results<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Results::Single(e) => e.codegen(state),
            Results::List(l) => l.codegen(state),
        }
    }
}

/// `func(params) results`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType<'a> {
    pub func_kw: Token<'a>,
    pub params: FieldList<'a>,
    pub results: Option<Results<'a>>,
}

impl<'a> Codegen<'a> for FuncType<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.func_kw.codegen(state);
        self.params.codegen(state);
        self.results.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType<'a> {
    pub interface_kw: Token<'a>,
    pub lbrace: Token<'a>,
    pub elems: Vec<InterfaceElem<'a>>,
    pub rbrace: Token<'a>,
}

impl<'a> Codegen<'a> for InterfaceType<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.interface_kw.codegen(state);
        self.lbrace.codegen(state);
        self.elems.codegen(state);
        self.rbrace.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceElem<'a> {
    pub kind: InterfaceElemKind<'a>,
    pub semi: Option<Token<'a>>,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElemKind<'a> {
    Method {
        name: Ident<'a>,
        params: FieldList<'a>,
        results: Option<Results<'a>>,
    },
    /// Embedded interface or type-set term such as `~int | ~string`.
    Embedded(Expr<'a>),
}

impl<'a> Codegen<'a> for InterfaceElem<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match &self.kind {
            InterfaceElemKind::Method {
                name,
                params,
                results,
            } => {
                name.codegen(state);
                params.codegen(state);
                results.codegen(state);
            }
            InterfaceElemKind::Embedded(e) => e.codegen(state),
        }
        self.semi.codegen(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapType<'a> {
    pub map_kw: Token<'a>,
    pub lbracket: Token<'a>,
    pub key: Expr<'a>,
    pub rbracket: Token<'a>,
    pub value: Expr<'a>,
}

impl<'a> Codegen<'a> for MapType<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.map_kw.codegen(state);
        self.lbracket.codegen(state);
        self.key.codegen(state);
        self.rbracket.codegen(state);
        self.value.codegen(state);
    }
}

/// `chan T`, `<-chan T` or `chan<- T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChanType<'a> {
    pub arrow_before: Option<Token<'a>>,
    pub chan_kw: Token<'a>,
    pub arrow_after: Option<Token<'a>>,
    pub elem: Expr<'a>,
}

impl<'a> Codegen<'a> for ChanType<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.arrow_before.codegen(state);
        self.chan_kw.codegen(state);
        self.arrow_after.codegen(state);
        self.elem.codegen(state);
    }
}
