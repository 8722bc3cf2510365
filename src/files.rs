//! Go file discovery.
//!
//! Paths given on the command line are either files, taken as they are, or
//! directories, walked for `*.go` files. While walking, directories whose
//! name starts with `.` or `_`, `vendor/` and `testdata/` are skipped, the
//! same set the Go tool ignores.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use argtail_core::error::ArgtailError;

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["vendor", "testdata"];

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || EXCLUDED_DIRS.contains(&name.as_ref())
}

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

/// Expand `paths` into the list of Go files to process.
///
/// Files appear in argument order; files found in one directory are sorted
/// by path. A file named twice is kept once, at its first position.
///
/// # Errors
///
/// `InvalidArguments` when a path does not exist or when no Go file is
/// found at all.
pub fn collect_go_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ArgtailError> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for path in paths {
        if path.is_dir() {
            let mut found = 0;
            for entry in WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !is_excluded_dir(e))
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_go_file(entry.path()) {
                    let file = entry.into_path();
                    if seen.insert(file.clone()) {
                        files.push(file);
                        found += 1;
                    }
                }
            }
            debug!(dir = %path.display(), found, "walked directory");
        } else if path.exists() {
            if seen.insert(path.clone()) {
                files.push(path.clone());
            }
        } else {
            return Err(ArgtailError::invalid_args(format!(
                "no such file or directory: {}",
                path.display()
            )));
        }
    }

    if files.is_empty() {
        return Err(ArgtailError::invalid_args("no Go files found"));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "package main\n").unwrap();
        path
    }

    #[test]
    fn walks_directories_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "cmd/b/main.go");
        let a = touch(dir.path(), "cmd/a/main.go");
        touch(dir.path(), "cmd/a/README.md");

        let files = collect_go_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn skips_ignored_directories() {
        let dir = TempDir::new().unwrap();
        let main = touch(dir.path(), "main.go");
        touch(dir.path(), "vendor/dep/dep.go");
        touch(dir.path(), "testdata/in.go");
        touch(dir.path(), ".git/hooks/x.go");
        touch(dir.path(), "_old/main.go");

        let files = collect_go_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![main]);
    }

    #[test]
    fn explicit_files_are_kept_in_order_once() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.go");
        let b = touch(dir.path(), "testdata/b.go");

        let files = collect_go_files(&[b.clone(), a.clone(), b.clone()]).unwrap();
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn missing_path_is_invalid() {
        let dir = TempDir::new().unwrap();
        let err = collect_go_files(&[dir.path().join("nope.go")]).unwrap_err();
        assert!(matches!(err, ArgtailError::InvalidArguments { .. }));
        assert!(err.to_string().contains("nope.go"));
    }

    #[test]
    fn empty_directory_is_invalid() {
        let dir = TempDir::new().unwrap();
        let err = collect_go_files(&[dir.path().to_path_buf()]).unwrap_err();
        assert_eq!(err.to_string(), "invalid arguments: no Go files found");
    }
}
