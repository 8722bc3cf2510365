// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! SelectorFinder visitor: does `module.symbol` appear anywhere?
//!
//! The match is purely syntactic. Any selector expression whose base is the
//! bare identifier `module` and whose member is `symbol` counts, whether it
//! is called (`flag.Parse()`), passed around (`f := flag.Args`) or nested
//! inside a function literal.

use super::dispatch::walk_source_file;
use super::traits::{VisitResult, Visitor};
use crate::nodes::{SelectorExpr, SourceFile};

/// Finds the first `module.symbol` selector in a tree.
pub struct SelectorFinder<'m> {
    module: &'m str,
    symbol: &'m str,
    found: bool,
}

impl<'m> SelectorFinder<'m> {
    pub fn new(module: &'m str, symbol: &'m str) -> Self {
        Self {
            module,
            symbol,
            found: false,
        }
    }

    /// True if `module.symbol` occurs anywhere in `file`.
    ///
    /// The walk stops at the first match.
    pub fn contains(file: &SourceFile<'_>, module: &'m str, symbol: &'m str) -> bool {
        let mut finder = SelectorFinder::new(module, symbol);
        walk_source_file(&mut finder, file);
        finder.found
    }

    pub fn found(&self) -> bool {
        self.found
    }
}

impl<'a, 'm> Visitor<'a> for SelectorFinder<'m> {
    fn visit_selector(&mut self, node: &SelectorExpr<'a>) -> VisitResult {
        let matches = node
            .value
            .as_ident()
            .is_some_and(|base| base.name() == self.module)
            && node.attr.name() == self.symbol;
        if matches {
            self.found = true;
            return VisitResult::Stop;
        }
        VisitResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source_file;

    fn contains(src: &str, module: &str, symbol: &str) -> bool {
        let file = parse_source_file(src).unwrap();
        SelectorFinder::contains(&file, module, symbol)
    }

    #[test]
    fn finds_calls_anywhere() {
        let src = "package main\n\nfunc init() {\n\tif true {\n\t\tflag.Parse()\n\t}\n}\n";
        assert!(contains(src, "flag", "Parse"));
        assert!(!contains(src, "flag", "Args"));
    }

    #[test]
    fn finds_uncalled_references() {
        let src = "package main\n\nvar rest = flag.Args\n\nfunc main() {}\n";
        assert!(contains(src, "flag", "Args"));
    }

    #[test]
    fn finds_references_in_function_literals() {
        let src = "package main\n\nfunc main() {\n\tgo func() {\n\t\tn := flag.NArg()\n\t\t_ = n\n\t}()\n}\n";
        assert!(contains(src, "flag", "NArg"));
    }

    #[test]
    fn requires_plain_identifier_base() {
        let src = "package main\n\nfunc main() {\n\tx.flag.Parse()\n\tflags.Parse()\n}\n";
        assert!(!contains(src, "flag", "Parse"));
    }

    #[test]
    fn ignores_comments_and_strings() {
        let src = "package main\n\n// flag.Parse()\nfunc main() {\n\tprintln(\"flag.Parse()\")\n}\n";
        assert!(!contains(src, "flag", "Parse"));
    }

    #[test]
    fn stops_at_first_match() {
        let file = parse_source_file(
            "package main\n\nfunc main() {\n\tflag.Parse()\n\tflag.Parse()\n}\n",
        )
        .unwrap();
        let mut finder = SelectorFinder::new("flag", "Parse");
        assert_eq!(walk_source_file(&mut finder, &file), VisitResult::Stop);
        assert!(finder.found());
    }
}
