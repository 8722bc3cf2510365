//! Guard insertion layer.
//!
//! Splices the trailing-argument check into a function body, right after
//! the first statement that calls the flag-parsing function:
//!
//! ```text
//! flag.Parse()
//! if flag.NArg() != 0 {
//!     log.Fatalf("Trailing args not expected: %q", flag.Args())
//! }
//! ```
//!
//! The new tokens are laid out the way gofmt would print them: tab
//! indentation taken from the surrounding statements and the file's own
//! line terminator. A body written on a single line is reflowed first so
//! every statement ends up on its own line.

use std::borrow::Cow;

use argtail_core::text::{byte_offset_to_position, trailing_line_indent};
use argtail_go_cst::{
    BasicLit, BinaryExpr, Block, CallExpr, Expr, Ident, IfStmt, Punct, SelectorExpr, Statement,
    Stmt, TokType, Token,
};
use tracing::debug;

use crate::error::FixError;
use crate::pattern::QualifiedName;

/// Format string passed to the fatal log call.
pub const GUARD_MESSAGE: &str = "Trailing args not expected: %q";

/// The modules the guard refers to and the line terminator it is printed
/// with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    flag_module: String,
    log_module: String,
    newline: &'static str,
}

impl Default for Guard {
    fn default() -> Self {
        Guard::new("flag", "log")
    }
}

impl Guard {
    pub fn new(flag_module: impl Into<String>, log_module: impl Into<String>) -> Self {
        Guard {
            flag_module: flag_module.into(),
            log_module: log_module.into(),
            newline: "\n",
        }
    }

    /// Use `newline` (`"\n"` or `"\r\n"`) for the synthesized lines.
    pub fn with_newline(mut self, newline: &'static str) -> Self {
        self.newline = newline;
        self
    }

    pub fn flag_module(&self) -> &str {
        &self.flag_module
    }

    pub fn log_module(&self) -> &str {
        &self.log_module
    }

    /// The call the guard follows: `flag.Parse`.
    pub fn parse_call(&self) -> QualifiedName {
        QualifiedName::new(&self.flag_module, "Parse")
    }

    /// Build the guard statement for a body indented by `indent`.
    ///
    /// The statement starts with a line break, so it can follow any
    /// statement that ends in a virtual semicolon.
    pub fn statement<'a>(&self, indent: &str) -> Statement<'a> {
        let nl = self.newline;
        let narg = QualifiedName::new(&self.flag_module, "NArg");
        let args = QualifiedName::new(&self.flag_module, "Args");
        let fatalf = QualifiedName::new(&self.log_module, "Fatalf");

        let cond = Expr::Binary(Box::new(BinaryExpr {
            left: call(selector(" ", &narg), Vec::new()),
            op: op(" ", "!="),
            right: Expr::BasicLit(BasicLit::new(Token::synthesized(TokType::Int, " ", "0"))),
        }));

        let message = Expr::BasicLit(BasicLit::new(Token::synthesized(
            TokType::String,
            "",
            format!("\"{}\"", GUARD_MESSAGE),
        )));
        let fatal = call(
            selector(format!("{nl}{indent}\t"), &fatalf),
            vec![
                Punct::new(message, Some(op("", ","))),
                Punct::last(call(selector(" ", &args), Vec::new())),
            ],
        );

        let body = Block {
            lbrace: op(" ", "{"),
            stmts: vec![Statement::new(
                Stmt::Expr(fatal),
                Some(Token::virtual_semi()),
            )],
            rbrace: op(format!("{nl}{indent}"), "}"),
        };

        let if_stmt = IfStmt {
            if_kw: Token::synthesized(TokType::Keyword, format!("{nl}{indent}"), "if"),
            init: None,
            cond,
            body,
            else_clause: None,
        };
        Statement::new(Stmt::If(Box::new(if_stmt)), Some(Token::virtual_semi()))
    }
}

/// Where the guard went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSite {
    /// Index of the guard in the body's statement list.
    pub index: usize,
    /// Source offset of the flag-parsing statement the guard follows.
    pub offset: Option<usize>,
}

impl GuardSite {
    /// 1-based line of the flag-parsing statement in `source`.
    pub fn line(&self, source: &str) -> Option<u32> {
        self.offset
            .map(|offset| byte_offset_to_position(source.as_bytes(), offset).0)
    }
}

/// Insert the guard after the first `flag.Parse()` statement of `body`.
///
/// Only the body's own statement list is searched; a call nested in a
/// block, loop or function literal is not an insertion point. Statements
/// before the guard are untouched and the ones after it shift down by one.
pub fn insert_guard(body: &mut Block<'_>, guard: &Guard) -> Result<GuardSite, FixError> {
    let parse = guard.parse_call();
    let index = body
        .stmts
        .iter()
        .position(|stmt| parse.is_call_stmt(&stmt.stmt))
        .ok_or_else(|| FixError::InsertionPointNotFound {
            call: parse.to_string(),
        })?;
    let offset = body.stmts[index].first_token().and_then(Token::start);
    let nl = guard.newline;

    let one_line = !body.rbrace.leading.contains('\n');
    if one_line {
        reflow(body, nl);
    }
    let indent = statement_indent(&body.stmts[..=index]);

    {
        let (head, tail) = body.stmts.split_at_mut(index + 1);
        let next_leading = match tail.first_mut().and_then(Statement::first_token_mut) {
            Some(tok) => &mut tok.leading,
            None => &mut body.rbrace.leading,
        };
        let semi = head[index].semi.get_or_insert_with(Token::virtual_semi);
        if semi.text == ";" {
            semi.text = Cow::Borrowed("");
        }
        // A comment after an explicit `;` belongs to the parse line.
        if let Some((same_line, rest)) = split_line_tail(next_leading) {
            semi.leading = Cow::Owned(format!("{}{}", semi.leading, same_line));
            *next_leading = Cow::Owned(rest);
        }
    }

    body.stmts.insert(index + 1, guard.statement(&indent));

    if let Some(tok) = body
        .stmts
        .get_mut(index + 2)
        .and_then(Statement::first_token_mut)
    {
        if !tok.leading.contains('\n') {
            tok.leading = Cow::Owned(format!("{nl}{indent}{}", tok.leading.trim_start()));
        }
    }

    debug!(index = index + 1, reflowed = one_line, "inserted guard");
    Ok(GuardSite {
        index: index + 1,
        offset,
    })
}

// ============================================================================
// Layout helpers
// ============================================================================

fn op<'a>(leading: impl Into<Cow<'a, str>>, text: &'static str) -> Token<'a> {
    Token::synthesized(TokType::Op, leading, text)
}

fn selector<'a>(leading: impl Into<Cow<'a, str>>, name: &QualifiedName) -> Expr<'a> {
    Expr::Selector(Box::new(SelectorExpr {
        value: Expr::Ident(Ident::new(Token::synthesized(
            TokType::Ident,
            leading,
            name.module.clone(),
        ))),
        dot: op("", "."),
        attr: Ident::synthesized(name.symbol.clone()),
    }))
}

fn call<'a>(func: Expr<'a>, args: Vec<Punct<'a, Expr<'a>>>) -> Expr<'a> {
    Expr::Call(Box::new(CallExpr {
        func,
        lparen: op("", "("),
        args,
        ellipsis: None,
        rparen: op("", ")"),
    }))
}

/// Indentation of the line holding the last of `stmts`.
fn statement_indent(stmts: &[Statement<'_>]) -> String {
    stmts
        .iter()
        .rev()
        .filter_map(Statement::first_token)
        .find_map(|tok| trailing_line_indent(&tok.leading))
        .unwrap_or("\t")
        .to_string()
}

/// Offset of the first line break in trivia that is not inside a block
/// comment.
fn line_break_outside_comments(trivia: &str) -> Option<usize> {
    let mut pos = 0;
    while pos < trivia.len() {
        let rest = &trivia[pos..];
        if rest.starts_with("//") {
            return rest.find('\n').map(|i| pos + i);
        } else if let Some(body) = rest.strip_prefix("/*") {
            pos += 2 + body.find("*/")? + 2;
        } else if rest.starts_with('\n') {
            return Some(pos);
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

/// Split trivia at its first line break outside comments when something
/// other than whitespace comes before it.
fn split_line_tail(leading: &str) -> Option<(String, String)> {
    let mut end = line_break_outside_comments(leading)?;
    if leading[..end].ends_with('\r') {
        end -= 1;
    }
    let (same_line, rest) = leading.split_at(end);
    if same_line.trim().is_empty() {
        return None;
    }
    Some((same_line.trim_end().to_string(), rest.to_string()))
}

/// Put every statement of a one-line body on its own line.
///
/// Bodies of top-level functions are indented by one tab and their closing
/// brace sits in column zero.
fn reflow(body: &mut Block<'_>, newline: &str) {
    for stmt in body.stmts.iter_mut() {
        if let Some(semi) = stmt.semi.as_mut() {
            if semi.text == ";" {
                semi.text = Cow::Borrowed("");
            }
        }
        if let Some(tok) = stmt.first_token_mut() {
            if !tok.leading.contains('\n') {
                tok.leading = Cow::Owned(format!("{newline}\t{}", tok.leading.trim_start()));
            }
        }
    }
    let rest = body.rbrace.leading.trim_end().to_string();
    body.rbrace.leading = Cow::Owned(format!("{rest}{newline}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::find_function;
    use argtail_go_cst::{parse_source_file, Codegen};

    const GUARD: &str = "\tif flag.NArg() != 0 {\n\t\tlog.Fatalf(\"Trailing args not expected: %q\", flag.Args())\n\t}\n";

    fn insert(source: &str, guard: &Guard) -> Result<(String, GuardSite), FixError> {
        let mut file = parse_source_file(source).unwrap();
        let body = find_function(&mut file, "main").unwrap();
        let site = insert_guard(body, guard)?;
        Ok((file.to_source(), site))
    }

    #[test]
    fn guard_statement_text() {
        let stmt = Guard::default().statement("\t");
        assert_eq!(stmt.to_source(), format!("\n{}", GUARD.trim_end()));
    }

    #[test]
    fn guard_statement_structure() {
        let stmt = Guard::default().statement("\t");
        let Stmt::If(if_stmt) = &stmt.stmt else {
            panic!("expected if statement");
        };
        let Expr::Binary(cond) = &if_stmt.cond else {
            panic!("expected binary condition");
        };
        assert_eq!(cond.op.text, "!=");
        assert_eq!(cond.right.to_source().trim(), "0");
        assert_eq!(if_stmt.body.stmts.len(), 1);
        let Stmt::Expr(Expr::Call(fatal)) = &if_stmt.body.stmts[0].stmt else {
            panic!("expected call statement");
        };
        assert_eq!(fatal.qualified_callee(), Some(("log", "Fatalf")));
        assert_eq!(fatal.args.len(), 2);
        assert!(if_stmt.else_clause.is_none());
    }

    #[test]
    fn inserts_after_first_parse_only() {
        let source = "package main\n\nfunc main() {\n\tv := flag.Bool(\"v\", false, \"\")\n\tflag.Parse()\n\trun(*v)\n\tflag.Parse()\n}\n";
        let (out, site) = insert(source, &Guard::default()).unwrap();
        let expected = format!(
            "package main\n\nfunc main() {{\n\tv := flag.Bool(\"v\", false, \"\")\n\tflag.Parse()\n{}\trun(*v)\n\tflag.Parse()\n}}\n",
            GUARD
        );
        assert_eq!(out, expected);
        assert_eq!(site.index, 2);
        assert_eq!(site.line(source), Some(5));
    }

    #[test]
    fn parse_as_last_statement() {
        let source = "package main\n\nfunc main() {\n\tflag.Parse() // flags\n}\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tflag.Parse() // flags\n{}}}\n",
                GUARD
            )
        );
    }

    #[test]
    fn one_line_body_is_reflowed() {
        let source = "package main\n\nfunc main() { flag.Parse() }\n";
        let (out, site) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tflag.Parse()\n{}}}\n",
                GUARD
            )
        );
        assert_eq!(site.index, 1);
    }

    #[test]
    fn explicit_semicolons_become_line_breaks() {
        let source = "package main\n\nfunc main() { x := 1; flag.Parse(); run(x) }\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tx := 1\n\tflag.Parse()\n{}\trun(x)\n}}\n",
                GUARD
            )
        );
    }

    #[test]
    fn comment_after_explicit_semicolon_stays_on_parse_line() {
        let source = "package main\n\nfunc main() {\n\tflag.Parse(); // parse\n\trun()\n}\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tflag.Parse() // parse\n{}\trun()\n}}\n",
                GUARD
            )
        );
    }

    #[test]
    fn statement_sharing_the_parse_line_moves_down() {
        let source = "package main\n\nfunc main() {\n\tflag.Parse(); run()\n}\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tflag.Parse()\n{}\trun()\n}}\n",
                GUARD
            )
        );
    }

    #[test]
    fn keeps_crlf_line_endings() {
        let source = "package main\r\n\r\nfunc main() {\r\n\tflag.Parse()\r\n}\r\n";
        let guard = Guard::default().with_newline("\r\n");
        let (out, _) = insert(source, &guard).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\r\n\r\nfunc main() {{\r\n\tflag.Parse()\r\n{}}}\r\n",
                GUARD.replace('\n', "\r\n")
            )
        );
    }

    #[test]
    fn follows_existing_indentation() {
        let source = "package main\n\nfunc main() {\n    flag.Parse()\n}\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert!(
            out.contains("\n    flag.Parse()\n    if flag.NArg() != 0 {\n    \tlog.Fatalf("),
            "{}",
            out
        );
        assert!(out.ends_with("\n    }\n}\n"), "{}", out);
    }

    #[test]
    fn custom_module_names() {
        let source = "package main\n\nfunc main() {\n\tgflag.Parse()\n}\n";
        let (out, _) = insert(source, &Guard::new("gflag", "glog")).unwrap();
        assert!(out.contains(
            "\tif gflag.NArg() != 0 {\n\t\tglog.Fatalf(\"Trailing args not expected: %q\", gflag.Args())\n\t}\n"
        ));
    }

    #[test]
    fn nested_parse_is_not_an_insertion_point() {
        let source = "package main\n\nfunc main() {\n\tif true {\n\t\tflag.Parse()\n\t}\n}\n";
        let err = insert(source, &Guard::default()).unwrap_err();
        assert_eq!(
            err,
            FixError::InsertionPointNotFound {
                call: "flag.Parse".to_string()
            }
        );
    }

    #[test]
    fn split_line_tail_cases() {
        assert_eq!(split_line_tail("\n\t"), None);
        assert_eq!(split_line_tail(" "), None);
        assert_eq!(
            split_line_tail(" // c\n\t"),
            Some((" // c".to_string(), "\n\t".to_string()))
        );
        assert_eq!(
            split_line_tail(" // c\r\n\t"),
            Some((" // c".to_string(), "\r\n\t".to_string()))
        );
        assert_eq!(
            split_line_tail("/* a\n b */\n\t"),
            Some(("/* a\n b */".to_string(), "\n\t".to_string()))
        );
        assert_eq!(
            split_line_tail(" /* x */ // y\n\t"),
            Some((" /* x */ // y".to_string(), "\n\t".to_string()))
        );
        assert_eq!(split_line_tail("/* a\n b */ "), None);
        assert_eq!(line_break_outside_comments("/* \n */"), None);
    }

    #[test]
    fn block_comment_after_parse_stays_on_parse_line() {
        let source = "package main\n\nfunc main() {\n\tflag.Parse() /* flags */\n\trun()\n}\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tflag.Parse() /* flags */\n{}\trun()\n}}\n",
                GUARD
            )
        );
    }

    #[test]
    fn multi_line_block_comment_after_parse_is_not_split() {
        let source =
            "package main\n\nfunc main() {\n\tflag.Parse() /* a\n b */\n\trun()\n}\n";
        let (out, _) = insert(source, &Guard::default()).unwrap();
        assert_eq!(
            out,
            format!(
                "package main\n\nfunc main() {{\n\tflag.Parse() /* a\n b */\n{}\trun()\n}}\n",
                GUARD
            )
        );
        let reparsed = parse_source_file(&out).unwrap();
        assert_eq!(reparsed.to_source(), out);
    }
}
