//! Go trailing-argument fix operation.
//!
//! This module implements the one rewrite argtail performs:
//!
//! 1. Parse the source into a lossless tree
//! 2. Skip files that never reference `flag.Parse`
//! 3. Skip files that already reference `flag.Args` or `flag.NArg`
//! 4. Find the target function (`main` by default)
//! 5. Insert the guard after its `flag.Parse()` statement
//! 6. Import `flag` and `log` if missing
//! 7. Print the tree back to text
//!
//! A file is either rewritten completely or left alone; the skips are
//! ordinary outcomes, not errors. See [`fix`] for the main entry point.

use std::fmt;

use argtail_go_cst::{parse_source_file, Codegen};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::FixError;
use crate::layers::{ensure_imports, insert_guard, Guard};
use crate::locate::{find_function, LocateError};
use crate::pattern::contains_call;

// ============================================================================
// Options and outcomes
// ============================================================================

/// Names the fix works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixOptions {
    /// Name the flag package is referred to by, and the path imported for it.
    pub flag_module: String,
    /// Name the log package is referred to by, and the path imported for it.
    pub log_module: String,
    /// Top-level function that receives the guard.
    pub function: String,
}

impl Default for FixOptions {
    fn default() -> Self {
        FixOptions {
            flag_module: "flag".to_string(),
            log_module: "log".to_string(),
            function: "main".to_string(),
        }
    }
}

/// Why a file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The file never references `flag.Parse`.
    NoParseCalls,
    /// The file already references `flag.Args` or `flag.NArg`.
    AlreadyChecking,
    /// The file has no top-level target function with a body.
    FunctionNotFound,
}

impl SkipReason {
    /// Stable snake_case code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::NoParseCalls => "no_parse_calls",
            SkipReason::AlreadyChecking => "already_checking",
            SkipReason::FunctionNotFound => "function_not_found",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::NoParseCalls => "no flag parse calls found",
            SkipReason::AlreadyChecking => "code already checking trailing args",
            SkipReason::FunctionNotFound => "function to modify not found",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A successful rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The complete rewritten file.
    pub text: String,
    /// 1-based line of the `flag.Parse()` statement the guard follows.
    pub guard_line: Option<u32>,
    /// Import paths that were added, in the order they were added.
    pub added_imports: Vec<String>,
}

/// Result of fixing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    Rewritten(Rewrite),
    Skipped(SkipReason),
}

impl FixOutcome {
    /// The rewritten text, if the file was rewritten.
    pub fn text(&self) -> Option<&str> {
        match self {
            FixOutcome::Rewritten(rewrite) => Some(&rewrite.text),
            FixOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            FixOutcome::Rewritten(_) => None,
            FixOutcome::Skipped(reason) => Some(*reason),
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Fix `source` with the default options.
///
/// `file_name` is only used in diagnostics.
///
/// ```
/// use argtail_go::{fix, FixOutcome, SkipReason};
///
/// let outcome = fix("tool.go", "package main\n\nfunc main() {}\n").unwrap();
/// assert_eq!(outcome, FixOutcome::Skipped(SkipReason::NoParseCalls));
/// ```
pub fn fix(file_name: &str, source: &str) -> Result<FixOutcome, FixError> {
    fix_with_options(file_name, source, &FixOptions::default())
}

/// Fix `source` using the names in `options`.
pub fn fix_with_options(
    file_name: &str,
    source: &str,
    options: &FixOptions,
) -> Result<FixOutcome, FixError> {
    let mut file = parse_source_file(source)
        .map_err(|err| FixError::structural(file_name, source, &err))?;
    debug!(file = file_name, "parsed");

    let flag = options.flag_module.as_str();
    if !contains_call(&file, flag, "Parse") {
        return Ok(skipped(file_name, SkipReason::NoParseCalls));
    }
    if contains_call(&file, flag, "Args") || contains_call(&file, flag, "NArg") {
        return Ok(skipped(file_name, SkipReason::AlreadyChecking));
    }
    debug!(file = file_name, "needs guard");

    let guard = Guard::new(flag, options.log_module.as_str()).with_newline(file.default_newline);
    let site = match find_function(&mut file, &options.function) {
        Ok(body) => insert_guard(body, &guard)?,
        Err(LocateError::FunctionNotFound { .. }) => {
            return Ok(skipped(file_name, SkipReason::FunctionNotFound));
        }
    };
    debug!(file = file_name, function = %options.function, index = site.index, "located and mutated");

    let imports = ensure_imports(&mut file, &[flag, options.log_module.as_str()]);
    let text = file.to_source();
    let guard_line = site.line(source);
    info!(file = file_name, line = guard_line, added = ?imports.added(), "rewrote");

    Ok(FixOutcome::Rewritten(Rewrite {
        text,
        guard_line,
        added_imports: imports.added().to_vec(),
    }))
}

fn skipped(file_name: &str, reason: SkipReason) -> FixOutcome {
    info!(file = file_name, reason = reason.code(), "skipped");
    FixOutcome::Skipped(reason)
}
