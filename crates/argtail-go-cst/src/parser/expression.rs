// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression and type parsing.

use super::{Parser, Result};
use crate::nodes::expression::{
    ArrayType, BasicLit, BinaryExpr, CallExpr, ChanType, CompositeLit, EllipsisExpr, Expr, Field,
    FieldDecl, FieldList, FuncLit, FuncType, Ident, IndexExpr, InterfaceElem, InterfaceElemKind,
    InterfaceType, KeyValueExpr, MapType, ParenExpr, Results, SelectorExpr, SliceExpr, StarExpr,
    StructType, TypeAssertExpr, UnaryExpr,
};
use crate::nodes::Punct;
use crate::tokenizer::{TokType, Token};

fn binary_precedence(tok: &Token<'_>) -> u8 {
    if tok.kind != TokType::Op {
        return 0;
    }
    match tok.text.as_ref() {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => 0,
    }
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    pub(crate) fn parse_expr(&mut self) -> Result<Expr<'a>> {
        self.parse_binary(1)
    }

    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Punct<'a, Expr<'a>>>> {
        let mut list = Vec::new();
        loop {
            let expr = self.parse_expr()?;
            let comma = self.bump_if(",");
            let more = comma.is_some();
            list.push(Punct::new(expr, comma));
            if !more {
                return Ok(list);
            }
        }
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr<'a>> {
        let mut left = self.parse_unary()?;
        loop {
            let prec = binary_precedence(self.peek());
            if prec == 0 || prec < min_prec {
                return Ok(left);
            }
            let op = self.bump();
            let right = self.parse_binary(prec + 1)?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right }));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr<'a>> {
        let tok = self.peek();
        if tok.kind == TokType::Op {
            match tok.text.as_ref() {
                "+" | "-" | "!" | "^" | "&" | "~" => {
                    let op = self.bump();
                    let expr = self.parse_unary()?;
                    return Ok(Expr::Unary(Box::new(UnaryExpr { op, expr })));
                }
                "<-" => {
                    if self.peek_at(1).is("chan") {
                        let chan = self.parse_type()?;
                        return self.parse_primary_suffixes(chan);
                    }
                    let op = self.bump();
                    let expr = self.parse_unary()?;
                    return Ok(Expr::Unary(Box::new(UnaryExpr { op, expr })));
                }
                "*" => {
                    let star = self.bump();
                    let expr = self.parse_unary()?;
                    return Ok(Expr::Star(Box::new(StarExpr { star, expr })));
                }
                _ => {}
            }
        }
        let operand = self.parse_operand()?;
        self.parse_primary_suffixes(operand)
    }

    fn parse_operand(&mut self) -> Result<Expr<'a>> {
        let tok = self.peek();
        match tok.kind {
            kind if kind.is_literal() => Ok(Expr::BasicLit(BasicLit::new(self.bump()))),
            TokType::Ident => Ok(Expr::Ident(Ident::new(self.bump()))),
            TokType::Op if tok.text == "(" => {
                let lparen = self.bump();
                self.expr_lev += 1;
                let expr = self.parse_expr();
                self.expr_lev -= 1;
                let expr = expr?;
                let rparen = self.expect(")")?;
                Ok(Expr::Paren(Box::new(ParenExpr {
                    lparen,
                    expr,
                    rparen,
                })))
            }
            TokType::Keyword if tok.text == "func" => {
                let ty = self.parse_func_type()?;
                if self.at("{") {
                    let body = self.parse_block()?;
                    Ok(Expr::FuncLit(Box::new(FuncLit { ty, body })))
                } else {
                    Ok(Expr::FuncType(Box::new(ty)))
                }
            }
            TokType::Op if tok.text == "[" => self.parse_type(),
            TokType::Keyword
                if matches!(tok.text.as_ref(), "struct" | "map" | "chan" | "interface") =>
            {
                self.parse_type()
            }
            _ => Err(self.error_expected("operand")),
        }
    }

    fn parse_primary_suffixes(&mut self, mut x: Expr<'a>) -> Result<Expr<'a>> {
        loop {
            if self.at(".") {
                let dot = self.bump();
                if self.at_kind(TokType::Ident) {
                    let attr = Ident::new(self.bump());
                    x = Expr::Selector(Box::new(SelectorExpr {
                        value: x,
                        dot,
                        attr,
                    }));
                } else if self.at("(") {
                    let lparen = self.bump();
                    let (ty, type_kw) = if self.at("type") {
                        (None, Some(self.bump()))
                    } else {
                        (Some(self.parse_type()?), None)
                    };
                    let rparen = self.expect(")")?;
                    x = Expr::TypeAssert(Box::new(TypeAssertExpr {
                        value: x,
                        dot,
                        lparen,
                        ty,
                        type_kw,
                        rparen,
                    }));
                } else {
                    return Err(self.error_expected("selector or type assertion"));
                }
            } else if self.at("[") {
                self.expr_lev += 1;
                let result = self.parse_index_or_slice(x);
                self.expr_lev -= 1;
                x = result?;
            } else if self.at("(") {
                self.expr_lev += 1;
                let result = self.parse_call(x);
                self.expr_lev -= 1;
                x = result?;
            } else if self.at("{") && self.allows_composite_literal(&x) {
                x = self.parse_composite_lit(Some(x))?;
            } else {
                return Ok(x);
            }
        }
    }

    fn allows_composite_literal(&self, ty: &Expr<'a>) -> bool {
        match ty {
            Expr::Ident(_) | Expr::Selector(_) | Expr::Index(_) => self.expr_lev >= 0,
            Expr::ArrayType(_) | Expr::StructType(_) | Expr::MapType(_) => true,
            _ => false,
        }
    }

    fn parse_index_or_slice(&mut self, value: Expr<'a>) -> Result<Expr<'a>> {
        let lbracket = self.expect("[")?;
        let low = if self.at(":") {
            None
        } else {
            Some(self.parse_expr()?)
        };

        if self.at(":") {
            let colon1 = self.bump();
            let high = if self.at(":") || self.at("]") {
                None
            } else {
                Some(self.parse_expr()?)
            };
            let (colon2, max) = if self.at(":") {
                let colon2 = self.bump();
                (Some(colon2), Some(self.parse_expr()?))
            } else {
                (None, None)
            };
            let rbracket = self.expect("]")?;
            return Ok(Expr::Slice(Box::new(SliceExpr {
                value,
                lbracket,
                low,
                colon1,
                high,
                colon2,
                max,
                rbracket,
            })));
        }

        let mut indices = Vec::new();
        let mut next = low;
        while let Some(expr) = next.take() {
            let comma = self.bump_if(",");
            let more = comma.is_some() && !self.at("]");
            indices.push(Punct::new(expr, comma));
            if more {
                next = Some(self.parse_expr()?);
            }
        }
        let rbracket = self.expect("]")?;
        Ok(Expr::Index(Box::new(IndexExpr {
            value,
            lbracket,
            indices,
            rbracket,
        })))
    }

    fn parse_call(&mut self, func: Expr<'a>) -> Result<Expr<'a>> {
        let lparen = self.expect("(")?;
        let mut args = Vec::new();
        let mut ellipsis = None;
        while !self.at(")") {
            let arg = self.parse_expr()?;
            if self.at("...") {
                ellipsis = Some(self.bump());
            }
            let comma = self.bump_if(",");
            let more = comma.is_some();
            args.push(Punct::new(arg, comma));
            if !more || ellipsis.is_some() {
                break;
            }
        }
        let rparen = self.expect(")")?;
        Ok(Expr::Call(Box::new(CallExpr {
            func,
            lparen,
            args,
            ellipsis,
            rparen,
        })))
    }

    pub(crate) fn parse_composite_lit(&mut self, ty: Option<Expr<'a>>) -> Result<Expr<'a>> {
        let lbrace = self.expect("{")?;
        let saved = self.expr_lev;
        self.expr_lev = 0;
        let elts = self.parse_element_list();
        self.expr_lev = saved;
        let elts = elts?;
        let rbrace = self.expect("}")?;
        Ok(Expr::CompositeLit(Box::new(CompositeLit {
            ty,
            lbrace,
            elts,
            rbrace,
        })))
    }

    fn parse_element_list(&mut self) -> Result<Vec<Punct<'a, Expr<'a>>>> {
        let mut elts = Vec::new();
        while !self.at("}") {
            let mut elt = self.parse_element()?;
            if self.at(":") {
                let colon = self.bump();
                let value = self.parse_element()?;
                elt = Expr::KeyValue(Box::new(KeyValueExpr {
                    key: elt,
                    colon,
                    value,
                }));
            }
            let comma = self.bump_if(",");
            let more = comma.is_some();
            elts.push(Punct::new(elt, comma));
            if !more {
                break;
            }
        }
        Ok(elts)
    }

    fn parse_element(&mut self) -> Result<Expr<'a>> {
        if self.at("{") {
            self.parse_composite_lit(None)
        } else {
            self.parse_expr()
        }
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    pub(crate) fn parse_type(&mut self) -> Result<Expr<'a>> {
        let tok = self.peek();
        match (tok.kind, tok.text.as_ref()) {
            (TokType::Ident, _) => self.parse_type_name(),
            (TokType::Op, "[") => {
                let lbracket = self.bump();
                let len = if self.at("]") {
                    None
                } else if self.at("...") && self.peek_at(1).is("]") {
                    let ellipsis = self.bump();
                    Some(Expr::Ellipsis(Box::new(EllipsisExpr {
                        ellipsis,
                        elt: None,
                    })))
                } else {
                    self.expr_lev += 1;
                    let len = self.parse_expr();
                    self.expr_lev -= 1;
                    Some(len?)
                };
                let rbracket = self.expect("]")?;
                let elem = self.parse_type()?;
                Ok(Expr::ArrayType(Box::new(ArrayType {
                    lbracket,
                    len,
                    rbracket,
                    elem,
                })))
            }
            (TokType::Op, "*") => {
                let star = self.bump();
                let expr = self.parse_type()?;
                Ok(Expr::Star(Box::new(StarExpr { star, expr })))
            }
            (TokType::Op, "(") => {
                let lparen = self.bump();
                let expr = self.parse_type()?;
                let rparen = self.expect(")")?;
                Ok(Expr::Paren(Box::new(ParenExpr {
                    lparen,
                    expr,
                    rparen,
                })))
            }
            (TokType::Op, "<-") => {
                let arrow = self.bump();
                let chan_kw = self.expect("chan")?;
                let elem = self.parse_type()?;
                Ok(Expr::ChanType(Box::new(ChanType {
                    arrow_before: Some(arrow),
                    chan_kw,
                    arrow_after: None,
                    elem,
                })))
            }
            (TokType::Keyword, "chan") => {
                let chan_kw = self.bump();
                let arrow_after = self.bump_if("<-");
                let elem = self.parse_type()?;
                Ok(Expr::ChanType(Box::new(ChanType {
                    arrow_before: None,
                    chan_kw,
                    arrow_after,
                    elem,
                })))
            }
            (TokType::Keyword, "map") => {
                let map_kw = self.bump();
                let lbracket = self.expect("[")?;
                let key = self.parse_type()?;
                let rbracket = self.expect("]")?;
                let value = self.parse_type()?;
                Ok(Expr::MapType(Box::new(MapType {
                    map_kw,
                    lbracket,
                    key,
                    rbracket,
                    value,
                })))
            }
            (TokType::Keyword, "func") => Ok(Expr::FuncType(Box::new(self.parse_func_type()?))),
            (TokType::Keyword, "struct") => self.parse_struct_type(),
            (TokType::Keyword, "interface") => self.parse_interface_type(),
            _ => Err(self.error_expected("type")),
        }
    }

    /// `T`, `pkg.T`, optionally instantiated: `T[int]`, `pkg.T[K, V]`.
    fn parse_type_name(&mut self) -> Result<Expr<'a>> {
        let mut ty = Expr::Ident(self.expect_ident()?);
        if self.at(".") {
            let dot = self.bump();
            let attr = self.expect_ident()?;
            ty = Expr::Selector(Box::new(SelectorExpr {
                value: ty,
                dot,
                attr,
            }));
        }
        if self.at("[") {
            let lbracket = self.bump();
            let mut indices = Vec::new();
            while !self.at("]") {
                let arg = self.parse_type()?;
                let comma = self.bump_if(",");
                let more = comma.is_some();
                indices.push(Punct::new(arg, comma));
                if !more {
                    break;
                }
            }
            let rbracket = self.expect("]")?;
            ty = Expr::Index(Box::new(IndexExpr {
                value: ty,
                lbracket,
                indices,
                rbracket,
            }));
        }
        Ok(ty)
    }

    /// A type or a type-set union such as `~int | ~string`.
    fn parse_constraint_type(&mut self) -> Result<Expr<'a>> {
        let mut left = self.parse_constraint_term()?;
        while self.at("|") {
            let op = self.bump();
            let right = self.parse_constraint_term()?;
            left = Expr::Binary(Box::new(BinaryExpr { left, op, right }));
        }
        Ok(left)
    }

    fn parse_constraint_term(&mut self) -> Result<Expr<'a>> {
        if self.at("~") {
            let op = self.bump();
            let expr = self.parse_type()?;
            Ok(Expr::Unary(Box::new(UnaryExpr { op, expr })))
        } else {
            self.parse_type()
        }
    }

    fn parse_param_type(&mut self) -> Result<Expr<'a>> {
        if self.at("...") {
            let ellipsis = self.bump();
            let elt = self.parse_type()?;
            Ok(Expr::Ellipsis(Box::new(EllipsisExpr {
                ellipsis,
                elt: Some(elt),
            })))
        } else {
            self.parse_constraint_type()
        }
    }

    pub(crate) fn parse_func_type(&mut self) -> Result<FuncType<'a>> {
        let func_kw = self.expect("func")?;
        let params = self.parse_field_list("(", ")")?;
        let results = self.parse_results()?;
        Ok(FuncType {
            func_kw,
            params,
            results,
        })
    }

    pub(crate) fn parse_results(&mut self) -> Result<Option<Results<'a>>> {
        if self.at("(") {
            return Ok(Some(Results::List(self.parse_field_list("(", ")")?)));
        }
        let tok = self.peek();
        let starts_type = match tok.kind {
            TokType::Ident => true,
            TokType::Op => matches!(tok.text.as_ref(), "[" | "*" | "<-"),
            TokType::Keyword => matches!(
                tok.text.as_ref(),
                "struct" | "func" | "interface" | "map" | "chan"
            ),
            _ => false,
        };
        if starts_type {
            Ok(Some(Results::Single(self.parse_type()?)))
        } else {
            Ok(None)
        }
    }

    /// True if the identifier at lookahead `idx` followed by `[` is a
    /// generic type (`List[T]`) rather than a name followed by an array or
    /// slice type (`a []int`, `buf [4]byte`). `ends` lists the tokens that may
    /// follow a complete type in this context.
    fn ident_bracket_is_generic_type(&self, idx: usize, ends: &[&str]) -> bool {
        if self.peek_at(idx + 2).is("]") {
            return false;
        }
        match self.matching_bracket(idx + 1) {
            Some(close) => {
                let after = self.peek_at(close + 1);
                if after.kind == TokType::Semi {
                    return ends.contains(&";");
                }
                ends.iter().any(|e| after.is(e))
            }
            None => false,
        }
    }

    /// Parameter, result, receiver or type-parameter list.
    ///
    /// Go lists are either all named (`a, b int, s string`) or all unnamed
    /// (`int, string`). Identifiers are buffered until a type shows whether
    /// they were names.
    pub(crate) fn parse_field_list(&mut self, open: &str, close: &str) -> Result<FieldList<'a>> {
        let open_tok = self.expect(open)?;
        let mut fields: Vec<Punct<'a, Field<'a>>> = Vec::new();
        let mut pending: Vec<Punct<'a, Ident<'a>>> = Vec::new();

        while !self.at(close) {
            if self.at_eof() {
                return Err(self.error_expected(&format!("'{}'", close)));
            }
            let next = self.peek_at(1);
            let ident_first = self.at_kind(TokType::Ident);

            if ident_first && (next.is(",") || next.is(close)) {
                let name = Ident::new(self.bump());
                let comma = self.bump_if(",");
                pending.push(Punct::new(name, comma));
                continue;
            }

            let named = ident_first
                && !next.is(".")
                && !(next.is("[") && self.ident_bracket_is_generic_type(0, &[",", close]));

            if named {
                let name = Ident::new(self.bump());
                let mut names = std::mem::take(&mut pending);
                names.push(Punct::last(name));
                let ty = self.parse_param_type()?;
                let comma = self.bump_if(",");
                let more = comma.is_some();
                fields.push(Punct::new(Field { names, ty }, comma));
                if !more {
                    break;
                }
            } else {
                flush_unnamed(&mut fields, &mut pending);
                let ty = self.parse_param_type()?;
                let comma = self.bump_if(",");
                let more = comma.is_some();
                fields.push(Punct::new(
                    Field {
                        names: Vec::new(),
                        ty,
                    },
                    comma,
                ));
                if !more {
                    break;
                }
            }
        }
        flush_unnamed(&mut fields, &mut pending);
        let close_tok = self.expect(close)?;
        Ok(FieldList {
            open: open_tok,
            fields,
            close: close_tok,
        })
    }

    fn parse_struct_type(&mut self) -> Result<Expr<'a>> {
        let struct_kw = self.expect("struct")?;
        let lbrace = self.expect("{")?;
        let mut fields = Vec::new();
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error_expected("'}'"));
            }
            let next = self.peek_at(1);
            let embedded = if self.at("*") {
                true
            } else if self.at_kind(TokType::Ident) {
                next.is(".")
                    || next.kind == TokType::Semi
                    || next.is("}")
                    || next.kind == TokType::String
                    || (next.is("[") && self.ident_bracket_is_generic_type(0, &[";", "}"]))
            } else {
                return Err(self.error_expected("field name or embedded type"));
            };

            let (names, ty) = if embedded {
                (Vec::new(), self.parse_type()?)
            } else {
                let names = self.parse_ident_list()?;
                (names, self.parse_type()?)
            };
            let tag = if self.at_kind(TokType::String) {
                Some(BasicLit::new(self.bump()))
            } else {
                None
            };
            let semi = self.semi_before("}", "struct field")?;
            fields.push(FieldDecl {
                names,
                ty,
                tag,
                semi,
            });
        }
        let rbrace = self.expect("}")?;
        Ok(Expr::StructType(Box::new(StructType {
            struct_kw,
            lbrace,
            fields,
            rbrace,
        })))
    }

    fn parse_interface_type(&mut self) -> Result<Expr<'a>> {
        let interface_kw = self.expect("interface")?;
        let lbrace = self.expect("{")?;
        let mut elems = Vec::new();
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error_expected("'}'"));
            }
            let kind = if self.at_kind(TokType::Ident) && self.peek_at(1).is("(") {
                let name = self.expect_ident()?;
                let params = self.parse_field_list("(", ")")?;
                let results = self.parse_results()?;
                InterfaceElemKind::Method {
                    name,
                    params,
                    results,
                }
            } else {
                InterfaceElemKind::Embedded(self.parse_constraint_type()?)
            };
            let semi = self.semi_before("}", "interface element")?;
            elems.push(InterfaceElem { kind, semi });
        }
        let rbrace = self.expect("}")?;
        Ok(Expr::InterfaceType(Box::new(InterfaceType {
            interface_kw,
            lbrace,
            elems,
            rbrace,
        })))
    }
}

/// Buffered identifiers that turned out to be types, one field each.
fn flush_unnamed<'a>(
    fields: &mut Vec<Punct<'a, Field<'a>>>,
    pending: &mut Vec<Punct<'a, Ident<'a>>>,
) {
    for Punct { value, comma } in pending.drain(..) {
        fields.push(Punct::new(
            Field {
                names: Vec::new(),
                ty: Expr::Ident(value),
            },
            comma,
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::nodes::{Codegen, Expr, ForHeader, Results, Stmt};
    use crate::{parse_expression, parse_source_file, parse_statement};

    fn roundtrip_expr(src: &str) -> Expr<'_> {
        let expr = parse_expression(src).unwrap();
        assert_eq!(expr.to_source(), src.trim_end());
        expr
    }

    #[test]
    fn selector_call() {
        let expr = roundtrip_expr("flag.Parse()");
        match expr {
            Expr::Call(call) => {
                assert_eq!(call.qualified_callee(), Some(("flag", "Parse")));
                assert!(call.args.is_empty());
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn binary_precedence() {
        let expr = roundtrip_expr("a + b*c == d || e");
        match expr {
            Expr::Binary(b) => {
                assert_eq!(b.op.text, "||");
                match &b.left {
                    Expr::Binary(eq) => assert_eq!(eq.op.text, "=="),
                    other => panic!("expected ==, got {:?}", other),
                }
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn variadic_call_keeps_ellipsis() {
        let expr = roundtrip_expr("append(a, b...)");
        match expr {
            Expr::Call(call) => {
                assert!(call.ellipsis.is_some());
                assert_eq!(call.args.len(), 2);
            }
            other => panic!("expected call, got {:?}", other),
        }
        roundtrip_expr("f(a,\n\tb...,\n)");
    }

    #[test]
    fn composite_literals_and_types() {
        roundtrip_expr("[]int{1, 2, 3}");
        roundtrip_expr("map[string][]int{\"a\": {1}, \"b\": nil}");
        roundtrip_expr("&T{X: 1, Y: struct{ z int }{2}}");
        roundtrip_expr("[...]string{\"x\"}");
        roundtrip_expr("func(a, b int, rest ...string) (n int, err error) { return }");
        roundtrip_expr("make(chan<- int, 3)");
        roundtrip_expr("(<-chan int)(nil)");
    }

    #[test]
    fn index_slice_and_assertions() {
        roundtrip_expr("a[1:]");
        roundtrip_expr("a[:n:m]");
        roundtrip_expr("m[k]");
        roundtrip_expr("Map[int, string](xs, f)");
        roundtrip_expr("v.(fmt.Stringer)");
        roundtrip_expr("<-ch");
        roundtrip_expr("-x * ^y");
    }

    #[test]
    fn composite_literal_restricted_in_if_header() {
        let stmt = parse_statement("if x == y {\n}").unwrap();
        assert!(matches!(stmt.stmt, Stmt::If(_)));
        let stmt = parse_statement("if v := (T{}); v.ok {\n}").unwrap();
        assert!(matches!(stmt.stmt, Stmt::If(_)));
        let stmt = parse_statement("for _, x := range []int{1, 2} {\n}").unwrap();
        match stmt.stmt {
            Stmt::For(f) => assert!(matches!(f.header, ForHeader::Range(_))),
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn parameter_lists() {
        let src = "package p\n\
func a(int, string) {}\n\
func b(x, y int, s ...string) error { return nil }\n\
func c(l List[T], m []int, buf [4]byte) (List[T], error) { return l, nil }\n\
func (l *List[T]) Len() int { return 0 }\n\
func Map[T, U any, C ~int | ~string](xs []T, f func(T) U) []U { return nil }\n";
        let file = parse_source_file(src).unwrap();
        assert_eq!(file.to_source(), src);
        let funcs: Vec<_> = file.funcs().collect();

        let a = &funcs[0].params.fields;
        assert_eq!(a.len(), 2);
        assert!(a.iter().all(|f| f.value.names.is_empty()));

        let b = &funcs[1].params.fields;
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].value.names.len(), 2);

        let c = &funcs[2].params.fields;
        assert_eq!(c.len(), 3);
        assert!(c.iter().all(|f| f.value.names.len() == 1));
        match &funcs[2].results {
            Some(Results::List(list)) => {
                assert!(list.fields.iter().all(|f| f.value.names.is_empty()))
            }
            other => panic!("expected result list, got {:?}", other),
        }

        assert!(funcs[3].is_method());
        let tparams = funcs[4].type_params.as_ref().unwrap();
        assert_eq!(tparams.fields.len(), 2);
        assert_eq!(tparams.fields[0].value.names.len(), 2);
    }

    #[test]
    fn struct_and_interface_types() {
        let src = "package p\n\
type S struct {\n\
\tio.Reader\n\
\t*Base\n\
\tList[int]\n\
\ta, b int `json:\"a\"`\n\
\tbuf  [4]byte\n\
\tnext *S\n\
}\n\
type I interface {\n\
\tfmt.Stringer\n\
\tRead(p []byte) (n int, err error)\n\
\t~int | ~float64\n\
}\n";
        let file = parse_source_file(src).unwrap();
        assert_eq!(file.to_source(), src);
    }
}
