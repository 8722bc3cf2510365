// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Declarations and the source file root.

use crate::nodes::expression::{BasicLit, Expr, FieldList, Ident, Results};
use crate::nodes::statement::Block;
use crate::nodes::traits::{Codegen, CodegenState, Punct};
use crate::tokenizer::Token;

/// Root of a parsed Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile<'a> {
    pub package_kw: Token<'a>,
    pub name: Ident<'a>,
    pub semi: Option<Token<'a>>,
    pub decls: Vec<TopDecl<'a>>,
    /// End-of-file token; its leading trivia is everything after the last
    /// declaration.
    pub eof: Token<'a>,
    /// Line terminator used by the file: `"\n"` or `"\r\n"`.
    pub default_newline: &'static str,
}

impl<'a> SourceFile<'a> {
    pub fn package_name(&self) -> &str {
        self.name.name()
    }

    /// Top-level function declarations in source order.
    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl<'a>> {
        self.decls.iter().filter_map(|d| match &d.decl {
            Decl::Func(f) => Some(f.as_ref()),
            Decl::Gen(_) => None,
        })
    }

    /// Top-level `import` declarations in source order.
    pub fn import_decls(&self) -> impl Iterator<Item = &GenDecl<'a>> {
        self.decls.iter().filter_map(|d| match &d.decl {
            Decl::Gen(g) if g.is_import() => Some(g),
            _ => None,
        })
    }
}

impl<'a> Codegen<'a> for SourceFile<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.package_kw.codegen(state);
        self.name.codegen(state);
        self.semi.codegen(state);
        self.decls.codegen(state);
        self.eof.codegen(state);
    }
}

/// A top-level declaration and its terminating semicolon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopDecl<'a> {
    pub decl: Decl<'a>,
    pub semi: Option<Token<'a>>,
}

impl<'a> Codegen<'a> for TopDecl<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match &self.decl {
            Decl::Gen(g) => g.codegen(state),
            Decl::Func(f) => f.codegen(state),
        }
        self.semi.codegen(state);
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl<'a> {
    Gen(GenDecl<'a>),
    Func(Box<FuncDecl<'a>>),
}

impl<'a> Decl<'a> {
    /// The declaration keyword: `import`, `const`, `var`, `type` or `func`.
    pub fn first_token_mut(&mut self) -> &mut Token<'a> {
        match self {
            Decl::Gen(g) => &mut g.kw,
            Decl::Func(f) => &mut f.func_kw,
        }
    }
}

// ============================================================================
// Generic declarations
// ============================================================================

/// `import`, `const`, `var` or `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl<'a> {
    pub kw: Token<'a>,
    pub body: GenDeclBody<'a>,
}

impl<'a> GenDecl<'a> {
    pub fn is_import(&self) -> bool {
        self.kw.text == "import"
    }

    /// All specs, in source order.
    pub fn specs(&self) -> Vec<&Spec<'a>> {
        match &self.body {
            GenDeclBody::Single(spec) => vec![spec],
            GenDeclBody::Group { specs, .. } => specs.iter().map(|l| &l.spec).collect(),
        }
    }
}

impl<'a> Codegen<'a> for GenDecl<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.kw.codegen(state);
        match &self.body {
            GenDeclBody::Single(spec) => spec.codegen(state),
            GenDeclBody::Group {
                lparen,
                specs,
                rparen,
            } => {
                lparen.codegen(state);
                specs.codegen(state);
                rparen.codegen(state);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenDeclBody<'a> {
    /// `import "fmt"`
    Single(Spec<'a>),
    /// `import ( ... )`
    Group {
        lparen: Token<'a>,
        specs: Vec<SpecLine<'a>>,
        rparen: Token<'a>,
    },
}

/// A spec inside a parenthesized group, with its semicolon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLine<'a> {
    pub spec: Spec<'a>,
    pub semi: Option<Token<'a>>,
}

impl<'a> Codegen<'a> for SpecLine<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.spec.codegen(state);
        self.semi.codegen(state);
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec<'a> {
    Import(ImportSpec<'a>),
    Value(ValueSpec<'a>),
    Type(TypeSpec<'a>),
}

impl<'a> Spec<'a> {
    pub fn first_token(&self) -> Option<&Token<'a>> {
        match self {
            Spec::Import(s) => Some(s.name.as_ref().unwrap_or(&s.path.tok)),
            Spec::Value(s) => s.names.first().map(|n| &n.value.tok),
            Spec::Type(s) => Some(&s.name.tok),
        }
    }

    pub fn first_token_mut(&mut self) -> Option<&mut Token<'a>> {
        match self {
            Spec::Import(s) => Some(match &mut s.name {
                Some(name) => name,
                None => &mut s.path.tok,
            }),
            Spec::Value(s) => s.names.first_mut().map(|n| &mut n.value.tok),
            Spec::Type(s) => Some(&mut s.name.tok),
        }
    }
}

impl<'a> Codegen<'a> for Spec<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            Spec::Import(s) => s.codegen(state),
            Spec::Value(s) => s.codegen(state),
            Spec::Type(s) => s.codegen(state),
        }
    }
}

/// `name "path"`; the name is an identifier, `_` or `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec<'a> {
    pub name: Option<Token<'a>>,
    pub path: BasicLit<'a>,
}

impl<'a> ImportSpec<'a> {
    /// The import path without quotes.
    pub fn path_value(&self) -> String {
        self.path
            .string_value()
            .unwrap_or_else(|| self.path.raw().to_string())
    }

    /// The explicit local name, if any.
    pub fn alias(&self) -> Option<&str> {
        self.name.as_ref().map(|t| t.text.as_ref())
    }
}

impl<'a> Codegen<'a> for ImportSpec<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.name.codegen(state);
        self.path.codegen(state);
    }
}

/// `a, b T = x, y` in a `const` or `var` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec<'a> {
    pub names: Vec<Punct<'a, Ident<'a>>>,
    pub ty: Option<Expr<'a>>,
    pub eq: Option<Token<'a>>,
    pub values: Vec<Punct<'a, Expr<'a>>>,
}

impl<'a> Codegen<'a> for ValueSpec<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.names.codegen(state);
        self.ty.codegen(state);
        self.eq.codegen(state);
        self.values.codegen(state);
    }
}

/// `Name[P any] T` or the alias form `Name = T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec<'a> {
    pub name: Ident<'a>,
    pub type_params: Option<FieldList<'a>>,
    pub assign: Option<Token<'a>>,
    pub ty: Expr<'a>,
}

impl<'a> Codegen<'a> for TypeSpec<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.name.codegen(state);
        self.type_params.codegen(state);
        self.assign.codegen(state);
        self.ty.codegen(state);
    }
}

// ============================================================================
// Function declarations
// ============================================================================

/// `func (recv) Name[T any](params) results { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl<'a> {
    pub func_kw: Token<'a>,
    pub recv: Option<FieldList<'a>>,
    pub name: Ident<'a>,
    pub type_params: Option<FieldList<'a>>,
    pub params: FieldList<'a>,
    pub results: Option<Results<'a>>,
    /// `None` for a declaration implemented outside Go.
    pub body: Option<Block<'a>>,
}

impl<'a> FuncDecl<'a> {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

impl<'a> Codegen<'a> for FuncDecl<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        self.func_kw.codegen(state);
        self.recv.codegen(state);
        self.name.codegen(state);
        self.type_params.codegen(state);
        self.params.codegen(state);
        self.results.codegen(state);
        self.body.codegen(state);
    }
}
