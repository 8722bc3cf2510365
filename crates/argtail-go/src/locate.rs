//! Top-level function lookup.

use argtail_go_cst::{Block, Decl, FuncDecl, SourceFile};
use thiserror::Error;

/// Errors from [`find_function`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("function {name}() not found")]
    FunctionNotFound { name: String },
}

fn is_target(func: &FuncDecl<'_>, name: &str) -> bool {
    !func.is_method() && func.name.name() == name && func.body.is_some()
}

/// Find the body of the top-level function `name`.
///
/// Methods, function literals and bodiless declarations never match. The
/// first match in source order wins.
pub fn find_function<'f, 'a>(
    file: &'f mut SourceFile<'a>,
    name: &str,
) -> Result<&'f mut Block<'a>, LocateError> {
    for top in file.decls.iter_mut() {
        if let Decl::Func(func) = &mut top.decl {
            if is_target(func, name) {
                if let Some(body) = func.body.as_mut() {
                    return Ok(body);
                }
            }
        }
    }
    Err(LocateError::FunctionNotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtail_go_cst::{parse_source_file, Codegen};

    #[test]
    fn finds_main() {
        let mut file = parse_source_file(
            "package main\n\nfunc helper() {}\n\nfunc main() {\n\tflag.Parse()\n}\n",
        )
        .unwrap();
        let body = find_function(&mut file, "main").unwrap();
        assert_eq!(body.stmts.len(), 1);
        assert_eq!(body.to_source(), " {\n\tflag.Parse()\n}");
    }

    #[test]
    fn methods_do_not_match() {
        let mut file =
            parse_source_file("package main\n\ntype T struct{}\n\nfunc (T) main() {}\n").unwrap();
        assert_eq!(
            find_function(&mut file, "main"),
            Err(LocateError::FunctionNotFound {
                name: "main".to_string()
            })
        );
    }

    #[test]
    fn function_literals_do_not_match() {
        let mut file =
            parse_source_file("package main\n\nvar main = func() {\n\tflag.Parse()\n}\n")
                .unwrap();
        assert!(find_function(&mut file, "main").is_err());
    }

    #[test]
    fn bodiless_declaration_is_skipped() {
        let mut file = parse_source_file("package main\n\nfunc main()\n").unwrap();
        assert!(find_function(&mut file, "main").is_err());
    }

    #[test]
    fn other_names() {
        let mut file = parse_source_file("package main\n\nfunc run() {\n\tx()\n}\n").unwrap();
        assert!(find_function(&mut file, "run").is_ok());
        let err = find_function(&mut file, "main").unwrap_err();
        assert_eq!(err.to_string(), "function main() not found");
    }
}
