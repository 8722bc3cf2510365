// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! ImportCollector visitor for Go import specs.
//!
//! Collects every import spec in the file, grouped or not:
//!
//! - `import "fmt"`: bound as `fmt`
//! - `import f "fmt"`: bound as `f`
//! - `import _ "embed"` and `import . "math"`: bound as `_` and `.`
//!
//! The bound name of an unaliased import is the last element of its path.
//! Go actually binds the package clause name of the imported package, which
//! is not visible without reading that package; the last path element is the
//! conventional stand-in.

use argtail_core::text::Span;

use super::dispatch::walk_source_file;
use super::traits::{VisitResult, Visitor};
use crate::nodes::{ImportSpec, SourceFile, Stmt};

/// Information about one import spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Import path without quotes, e.g. `net/http`.
    pub path: String,
    /// Explicit local name, if given.
    pub alias: Option<String>,
    /// Name the import binds in the file: the alias, else the default name.
    pub name: String,
    /// Source span of the spec's first token.
    pub span: Option<Span>,
}

impl ImportInfo {
    fn from_spec(spec: &ImportSpec<'_>) -> Self {
        let path = spec.path_value();
        let alias = spec.alias().map(str::to_string);
        let name = alias.clone().unwrap_or_else(|| default_import_name(&path));
        let span = spec.name.as_ref().unwrap_or(&spec.path.tok).span;
        Self {
            path,
            alias,
            name,
            span,
        }
    }

    /// True for standard-library paths (first element has no dot).
    pub fn is_std(&self) -> bool {
        is_std_path(&self.path)
    }
}

/// The name an unaliased import of `path` binds: its last element.
pub fn default_import_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// True if `path` looks like a standard-library import path.
pub fn is_std_path(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or(path);
    !first.contains('.')
}

/// A visitor that collects import specs from a Go CST.
///
/// Only file-level imports exist in Go, so the walk skips function bodies.
#[derive(Debug, Default)]
pub struct ImportCollector {
    imports: Vec<ImportInfo>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect imports from a parsed file in source order.
    pub fn collect(file: &SourceFile<'_>) -> Vec<ImportInfo> {
        let mut collector = ImportCollector::new();
        walk_source_file(&mut collector, file);
        collector.imports
    }

    pub fn into_imports(self) -> Vec<ImportInfo> {
        self.imports
    }
}

impl<'a> Visitor<'a> for ImportCollector {
    fn visit_import_spec(&mut self, node: &ImportSpec<'a>) -> VisitResult {
        self.imports.push(ImportInfo::from_spec(node));
        VisitResult::SkipChildren
    }

    fn visit_stmt(&mut self, _node: &Stmt<'a>) -> VisitResult {
        VisitResult::SkipChildren
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source_file;

    #[test]
    fn collects_all_forms() {
        let src = "package main\n\n\
import \"os\"\n\n\
import (\n\
\t\"fmt\"\n\
\tstr \"strings\"\n\
\t_ \"embed\"\n\
\t. \"math\"\n\
\t\"net/http\"\n\
\t\"github.com/pkg/errors\"\n\
)\n\n\
func main() {}\n";
        let file = parse_source_file(src).unwrap();
        let imports = ImportCollector::collect(&file);
        let names: Vec<&str> = imports.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["os", "fmt", "str", "_", ".", "http", "errors"]);
        let paths: Vec<&str> = imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["os", "fmt", "strings", "embed", "math", "net/http", "github.com/pkg/errors"]
        );
        assert_eq!(imports[2].alias.as_deref(), Some("str"));
        assert!(imports[1].alias.is_none());
        assert_eq!(imports[0].span.map(|s| s.start), Some(21));
    }

    #[test]
    fn std_paths() {
        assert!(is_std_path("fmt"));
        assert!(is_std_path("net/http"));
        assert!(!is_std_path("github.com/pkg/errors"));
        assert!(!is_std_path("example.com"));
    }

    #[test]
    fn raw_string_paths() {
        let file = parse_source_file("package main\n\nimport `flag`\n").unwrap();
        let imports = ImportCollector::collect(&file);
        assert_eq!(imports[0].path, "flag");
        assert_eq!(imports[0].name, "flag");
    }

    #[test]
    fn no_imports() {
        let file = parse_source_file("package main\n\nfunc main() {}\n").unwrap();
        assert!(ImportCollector::collect(&file).is_empty());
    }
}
