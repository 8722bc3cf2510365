//! Qualified reference matching.
//!
//! Matching is syntactic: `flag.Parse` matches any selector whose base is
//! the bare identifier `flag`, whatever `flag` is bound to in the file.

use std::fmt;

use argtail_go_cst::{CallExpr, Expr, SelectorFinder, SourceFile, Stmt};
use serde::{Deserialize, Serialize};

/// A `(module, symbol)` pair such as `flag.Parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub module: String,
    pub symbol: String,
}

impl QualifiedName {
    pub fn new(module: impl Into<String>, symbol: impl Into<String>) -> Self {
        QualifiedName {
            module: module.into(),
            symbol: symbol.into(),
        }
    }

    /// True if this name occurs anywhere in `file`.
    pub fn occurs_in(&self, file: &SourceFile<'_>) -> bool {
        contains_call(file, &self.module, &self.symbol)
    }

    /// True if `call` calls exactly this name.
    pub fn is_callee_of(&self, call: &CallExpr<'_>) -> bool {
        call.qualified_callee() == Some((self.module.as_str(), self.symbol.as_str()))
    }

    /// True if `stmt` is a bare call of this name, e.g. `flag.Parse()`.
    pub fn is_call_stmt(&self, stmt: &Stmt<'_>) -> bool {
        match stmt {
            Stmt::Expr(Expr::Call(call)) => self.is_callee_of(call),
            _ => false,
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.symbol)
    }
}

/// True if a selector `module.symbol` appears anywhere in `file`, called or
/// not. The walk stops at the first match.
pub fn contains_call(file: &SourceFile<'_>, module: &str, symbol: &str) -> bool {
    SelectorFinder::contains(file, module, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtail_go_cst::{parse_source_file, parse_statement};

    #[test]
    fn finds_call_in_nested_function() {
        let file = parse_source_file(
            "package main\n\nfunc setup() {\n\tfor {\n\t\tflag.Parse()\n\t\tbreak\n\t}\n}\n",
        )
        .unwrap();
        assert!(contains_call(&file, "flag", "Parse"));
        assert!(!contains_call(&file, "flag", "NArg"));
    }

    #[test]
    fn reference_without_call_counts() {
        let file = parse_source_file(
            "package main\n\nfunc main() {\n\tflag.Parse()\n\trest := flag.Args\n\t_ = rest\n}\n",
        )
        .unwrap();
        assert!(QualifiedName::new("flag", "Args").occurs_in(&file));
    }

    #[test]
    fn other_module_does_not_match() {
        let file =
            parse_source_file("package main\n\nfunc main() {\n\tpflag.Parse()\n}\n").unwrap();
        assert!(!contains_call(&file, "flag", "Parse"));
        assert!(contains_call(&file, "pflag", "Parse"));
    }

    #[test]
    fn call_statement_recognition() {
        let parse = QualifiedName::new("flag", "Parse");
        let stmt = parse_statement("flag.Parse()").unwrap();
        assert!(parse.is_call_stmt(&stmt.stmt));

        for src in ["x := flag.Parse()", "flag.Parse", "f.flag.Parse()", "go flag.Parse()"] {
            let stmt = parse_statement(src).unwrap();
            assert!(!parse.is_call_stmt(&stmt.stmt), "{}", src);
        }
    }

    #[test]
    fn display() {
        assert_eq!(QualifiedName::new("log", "Fatalf").to_string(), "log.Fatalf");
    }
}
