//! Import augmentation layer.
//!
//! Adds import specs for modules the guard needs and the file does not
//! import yet. Existing imports are never removed or reordered.
//!
//! New specs are placed where gofmt-formatted code expects them:
//!
//! 1. Into the first parenthesized `import ( ... )` group. Within the group,
//!    specs form runs separated by blank lines; the new spec goes into the
//!    first run holding a standard-library path (else the first run), before
//!    the first spec whose path sorts after it.
//! 2. Otherwise the first single-form `import "fmt"` is turned into a group
//!    and the new specs are added to it.
//! 3. Otherwise a new group is created right after the package clause.
//!
//! The cgo pseudo-import `import "C"` is never extended or grouped: its
//! preamble is the doc comment of that declaration alone.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::ops::Range;

use argtail_core::text::trailing_line_indent;
use argtail_go_cst::visitor::{default_import_name, is_std_path};
use argtail_go_cst::{
    BasicLit, Decl, GenDecl, GenDeclBody, ImportCollector, ImportSpec, SourceFile, Spec,
    SpecLine, TokType, Token, TopDecl,
};
use tracing::debug;

/// Names and paths bound by a file's imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    names: BTreeSet<String>,
    paths: BTreeSet<String>,
    added: Vec<String>,
}

impl ImportSet {
    /// Collect the imports of `file`.
    pub fn from_file(file: &SourceFile<'_>) -> Self {
        let mut set = ImportSet::default();
        for info in ImportCollector::collect(file) {
            set.names.insert(info.name);
            set.paths.insert(info.path);
        }
        set
    }

    /// True if an import binds `module` as its name. Blank (`_`) and dot
    /// imports bind nothing under the path's name.
    pub fn contains(&self, module: &str) -> bool {
        self.names.contains(module)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Import paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Modules added by [`ensure_imports`], in the order they were added.
    pub fn added(&self) -> &[String] {
        &self.added
    }

    fn record_added(&mut self, path: &str) {
        self.names.insert(default_import_name(path));
        self.paths.insert(path.to_string());
        self.added.push(path.to_string());
    }
}

/// Make sure every module in `required` is imported, adding specs for the
/// missing ones. Returns the resulting import set.
///
/// A module counts as present when an existing import binds its name, so
/// calling this twice adds nothing the second time.
pub fn ensure_imports(file: &mut SourceFile<'_>, required: &[&str]) -> ImportSet {
    let mut set = ImportSet::from_file(file);
    for &module in required {
        if set.contains(module) {
            debug!(module, "import already present");
            continue;
        }
        add_import(file, module);
        set.record_added(module);
        debug!(module, "added import");
    }
    set
}

fn add_import(file: &mut SourceFile<'_>, path: &str) {
    let nl = file.default_newline;
    let index = match import_decl_index(file, true) {
        Some(index) => index,
        None => match import_decl_index(file, false) {
            Some(index) => {
                group_single(&mut file.decls[index], nl);
                index
            }
            None => {
                insert_import_decl(file, nl);
                0
            }
        },
    };

    if let Decl::Gen(GenDecl {
        body: GenDeclBody::Group { specs, rparen, .. },
        ..
    }) = &mut file.decls[index].decl
    {
        insert_spec(specs, rparen, path, nl);
    }
}

/// Index of the first import declaration in grouped or single form,
/// skipping `import "C"`.
fn import_decl_index(file: &SourceFile<'_>, grouped: bool) -> Option<usize> {
    file.decls.iter().position(|top| match &top.decl {
        Decl::Gen(g) if g.is_import() && !is_cgo_import(g) => {
            matches!(g.body, GenDeclBody::Group { .. }) == grouped
        }
        _ => false,
    })
}

/// True for a declaration importing only the cgo pseudo-package.
fn is_cgo_import(decl: &GenDecl<'_>) -> bool {
    let specs = decl.specs();
    !specs.is_empty()
        && specs
            .iter()
            .all(|spec| matches!(spec, Spec::Import(spec) if spec.path_value() == "C"))
}

fn op<'a>(leading: impl Into<Cow<'a, str>>, text: &'static str) -> Token<'a> {
    Token::synthesized(TokType::Op, leading, text)
}

/// `import "fmt"` becomes `import (\n\t"fmt"\n)`.
fn group_single(top: &mut TopDecl<'_>, nl: &'static str) {
    let Decl::Gen(decl) = &mut top.decl else {
        return;
    };
    if !matches!(decl.body, GenDeclBody::Single(_)) {
        return;
    }
    let empty = GenDeclBody::Group {
        lparen: op(" ", "("),
        specs: Vec::new(),
        rparen: op(nl, ")"),
    };
    let GenDeclBody::Single(mut spec) = std::mem::replace(&mut decl.body, empty) else {
        return;
    };
    if let Some(tok) = spec.first_token_mut() {
        tok.leading = Cow::Owned(format!("{nl}\t{}", tok.leading.trim_start()));
    }
    // A comment trailing the declaration stays with its spec.
    let mut semi = Token::virtual_semi();
    if let Some(decl_semi) = top.semi.as_mut() {
        if decl_semi.is_virtual_semi() && !decl_semi.leading.trim().is_empty() {
            semi.leading = std::mem::take(&mut decl_semi.leading);
        }
    }
    if let GenDeclBody::Group { specs, .. } = &mut decl.body {
        specs.push(SpecLine {
            spec,
            semi: Some(semi),
        });
    }
}

/// Create an empty `import ()` group right after the package clause.
fn insert_import_decl(file: &mut SourceFile<'_>, nl: &'static str) {
    if let Some(next) = file.decls.first_mut() {
        let tok = next.decl.first_token_mut();
        if !tok.leading.contains('\n') {
            tok.leading = Cow::Owned(format!("{nl}{nl}{}", tok.leading.trim_start()));
        }
    }
    if file.semi.is_none() {
        file.semi = Some(Token::virtual_semi());
    }
    let decl = GenDecl {
        kw: Token::synthesized(TokType::Keyword, format!("{nl}{nl}"), "import"),
        body: GenDeclBody::Group {
            lparen: op(" ", "("),
            specs: Vec::new(),
            rparen: op(nl, ")"),
        },
    };
    file.decls.insert(
        0,
        TopDecl {
            decl: Decl::Gen(decl),
            semi: Some(Token::virtual_semi()),
        },
    );
}

// ============================================================================
// Group editing
// ============================================================================

fn spec_path(line: &SpecLine<'_>) -> Option<String> {
    match &line.spec {
        Spec::Import(spec) => Some(spec.path_value()),
        _ => None,
    }
}

fn spec_leading<'s>(line: &'s SpecLine<'_>) -> &'s str {
    line.spec
        .first_token()
        .map(|tok| &*tok.leading)
        .unwrap_or("")
}

/// True if trivia holds an empty line between two line breaks.
fn has_blank_line(leading: &str) -> bool {
    let lines: Vec<&str> = leading.split('\n').collect();
    lines.len() > 2 && lines[1..lines.len() - 1].iter().any(|l| l.trim().is_empty())
}

/// Runs of specs separated by blank lines.
fn runs(specs: &[SpecLine<'_>]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for (i, line) in specs.iter().enumerate() {
        if i > start && has_blank_line(spec_leading(line)) {
            runs.push(start..i);
            start = i;
        }
    }
    if start < specs.len() {
        runs.push(start..specs.len());
    }
    runs
}

fn is_multiline(specs: &[SpecLine<'_>], rparen: &Token<'_>) -> bool {
    rparen.leading.contains('\n') && specs.iter().all(|l| spec_leading(l).contains('\n'))
}

/// Put each spec of a one-line group on its own line.
fn reflow_group(specs: &mut [SpecLine<'_>], rparen: &mut Token<'_>, nl: &'static str) {
    for line in specs.iter_mut() {
        if let Some(tok) = line.spec.first_token_mut() {
            if !tok.leading.contains('\n') {
                tok.leading = Cow::Owned(format!("{nl}\t{}", tok.leading.trim_start()));
            }
        }
        match line.semi.as_mut() {
            Some(semi) => semi.text = Cow::Borrowed(""),
            None => line.semi = Some(Token::virtual_semi()),
        }
    }
    let rest = rparen.leading.trim_end().to_string();
    rparen.leading = Cow::Owned(format!("{rest}{nl}"));
}

fn insert_spec<'a>(
    specs: &mut Vec<SpecLine<'a>>,
    rparen: &mut Token<'a>,
    path: &str,
    nl: &'static str,
) {
    if !specs.is_empty() && !is_multiline(specs, rparen) {
        reflow_group(specs, rparen, nl);
    }

    let runs = runs(specs);
    let run = runs
        .iter()
        .find(|run| {
            specs[(*run).clone()]
                .iter()
                .any(|l| spec_path(l).is_some_and(|p| is_std_path(&p)))
        })
        .or(runs.first())
        .cloned();

    let (at, run_start, indent) = match run {
        Some(run) => {
            let at = run
                .clone()
                .find(|&i| spec_path(&specs[i]).is_some_and(|p| p.as_str() > path))
                .unwrap_or(run.end);
            let indent = trailing_line_indent(spec_leading(&specs[run.start]))
                .unwrap_or("\t")
                .to_string();
            (at, run.start, indent)
        }
        None => (0, 0, "\t".to_string()),
    };

    // Inserting at the head of a run: the blank line separating the run now
    // precedes the new spec.
    let mut leading = format!("{nl}{indent}");
    if at == run_start && at > 0 && at < specs.len() {
        if let Some(tok) = specs[at].spec.first_token_mut() {
            let lines: Vec<&str> = tok.leading.split('\n').collect();
            if lines.len() > 2 && lines[1].trim().is_empty() {
                leading = format!("{nl}{nl}{indent}");
                let first_break = tok.leading.find('\n').unwrap_or(0);
                tok.leading = Cow::Owned(tok.leading[first_break + 1..].to_string());
            }
        }
    }

    let path_tok = Token::synthesized(TokType::String, leading, format!("\"{path}\""));
    specs.insert(
        at,
        SpecLine {
            spec: Spec::Import(ImportSpec {
                name: None,
                path: BasicLit::new(path_tok),
            }),
            semi: Some(Token::virtual_semi()),
        },
    );
    for line in specs.iter_mut() {
        line.semi.get_or_insert_with(Token::virtual_semi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtail_go_cst::{parse_source_file, Codegen};

    fn ensure(source: &str) -> (String, ImportSet) {
        let mut file = parse_source_file(source).unwrap();
        let set = ensure_imports(&mut file, &["flag", "log"]);
        (file.to_source(), set)
    }

    #[test]
    fn adds_missing_to_group_in_sorted_position() {
        let (out, set) = ensure(
            "package main\n\nimport (\n\t\"flag\"\n\t\"fmt\"\n)\n\nfunc main() {}\n",
        );
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\t\"fmt\"\n\t\"log\"\n)\n\nfunc main() {}\n"
        );
        assert_eq!(set.added(), ["log"]);
        assert!(set.contains("fmt"));
    }

    #[test]
    fn single_import_becomes_group() {
        let (out, set) = ensure("// normal\npackage main\n\nimport \"fmt\"\n\nfunc main() {}\n");
        assert_eq!(
            out,
            "// normal\npackage main\n\nimport (\n\t\"flag\"\n\t\"fmt\"\n\t\"log\"\n)\n\nfunc main() {}\n"
        );
        assert_eq!(set.added(), ["flag", "log"]);
        assert_eq!(set.paths().collect::<Vec<_>>(), ["flag", "fmt", "log"]);
    }

    #[test]
    fn comment_on_single_import_stays_on_its_line() {
        let (out, _) = ensure("package main\n\nimport \"fmt\" // printing\n\nfunc main() {}\n");
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\t\"fmt\" // printing\n\t\"log\"\n)\n\nfunc main() {}\n"
        );
    }

    #[test]
    fn new_group_after_package_clause() {
        let (out, _) = ensure("package main\n\n// main runs.\nfunc main() {}\n");
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\t\"log\"\n)\n\n// main runs.\nfunc main() {}\n"
        );
    }

    #[test]
    fn new_group_in_file_without_declarations() {
        let (out, _) = ensure("package main\n");
        assert_eq!(out, "package main\n\nimport (\n\t\"flag\"\n\t\"log\"\n)\n");
    }

    #[test]
    fn declaration_on_package_line_moves_down() {
        let (out, _) = ensure("package main; func main() {}\n");
        assert_eq!(
            out,
            "package main;\n\nimport (\n\t\"flag\"\n\t\"log\"\n)\n\nfunc main() {}\n"
        );
    }

    #[test]
    fn standard_library_run_is_preferred() {
        let (out, _) = ensure(
            "package main\n\nimport (\n\t\"github.com/a/b\"\n\n\t\"fmt\"\n\t\"os\"\n)\n",
        );
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"github.com/a/b\"\n\n\t\"flag\"\n\t\"fmt\"\n\t\"log\"\n\t\"os\"\n)\n"
        );
    }

    #[test]
    fn later_runs_are_untouched() {
        let (out, _) = ensure(
            "package main\n\nimport (\n\t\"fmt\"\n\n\t\"example.com/x\"\n)\n",
        );
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\t\"fmt\"\n\t\"log\"\n\n\t\"example.com/x\"\n)\n"
        );
    }

    #[test]
    fn one_line_group_is_reflowed() {
        let (out, _) = ensure("package main\n\nimport (\"fmt\"; \"os\")\n");
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\t\"fmt\"\n\t\"log\"\n\t\"os\"\n)\n"
        );
    }

    #[test]
    fn bound_names_count() {
        let source =
            "package main\n\nimport (\n\tflag \"github.com/spf13/pflag\"\n\tlog \"github.com/sirupsen/logrus\"\n)\n";
        let (out, set) = ensure(source);
        assert_eq!(out, source);
        assert!(set.added().is_empty());
        assert_eq!(set.names().collect::<Vec<_>>(), ["flag", "log"]);
    }

    #[test]
    fn aliased_path_does_not_bind_module_name() {
        let (out, set) = ensure(
            "package main\n\nimport (\n\t\"flag\"\n\tmylog \"log\"\n)\n",
        );
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\tmylog \"log\"\n\t\"log\"\n)\n"
        );
        assert_eq!(set.added(), ["log"]);
        assert!(set.contains("mylog"));
    }

    #[test]
    fn blank_import_binds_nothing() {
        let (_, set) = ensure("package main\n\nimport (\n\t\"flag\"\n\t_ \"log\"\n)\n");
        assert_eq!(set.added(), ["log"]);
    }

    #[test]
    fn cgo_import_is_left_alone() {
        let (out, set) = ensure(
            "package main\n\n// #include <stdio.h>\nimport \"C\"\n\nimport \"fmt\"\n",
        );
        assert_eq!(
            out,
            "package main\n\n// #include <stdio.h>\nimport \"C\"\n\nimport (\n\t\"flag\"\n\t\"fmt\"\n\t\"log\"\n)\n"
        );
        assert_eq!(set.added(), ["flag", "log"]);
    }

    #[test]
    fn cgo_only_file_gets_new_group() {
        let (out, _) = ensure("package main\n\n// #include <stdio.h>\nimport \"C\"\n");
        assert_eq!(
            out,
            "package main\n\nimport (\n\t\"flag\"\n\t\"log\"\n)\n\n// #include <stdio.h>\nimport \"C\"\n"
        );
    }

    #[test]
    fn idempotent() {
        let mut file = parse_source_file("package main\n\nimport \"os\"\n").unwrap();
        let first = ensure_imports(&mut file, &["flag", "log"]);
        let once = file.to_source();
        let second = ensure_imports(&mut file, &["flag", "log"]);
        assert_eq!(first.added(), ["flag", "log"]);
        assert!(second.added().is_empty());
        assert_eq!(file.to_source(), once);
    }

    #[test]
    fn keeps_crlf() {
        let (out, _) = ensure("package main\r\n\r\nimport \"fmt\"\r\n");
        assert_eq!(
            out,
            "package main\r\n\r\nimport (\r\n\t\"flag\"\r\n\t\"fmt\"\r\n\t\"log\"\r\n)\r\n"
        );
    }

    #[test]
    fn output_parses_back() {
        let (out, _) = ensure("package main\n\nimport (\"fmt\"; \"os\")\n\nfunc main() {}\n");
        let file = parse_source_file(&out).unwrap();
        let set = ImportSet::from_file(&file);
        assert_eq!(set.paths().collect::<Vec<_>>(), ["flag", "fmt", "log", "os"]);
    }

    #[test]
    fn blank_line_detection() {
        assert!(!has_blank_line("\n\t"));
        assert!(has_blank_line("\n\n\t"));
        assert!(has_blank_line("\r\n\r\n\t"));
        assert!(!has_blank_line("\n\t// comment\n\t"));
        assert!(has_blank_line("\n\t// comment\n\n\t"));
    }
}
