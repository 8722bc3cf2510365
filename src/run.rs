//! The argtail-check run: fix every file, then apply the rewrites.
//!
//! Fixing is pure work (read, parse, rewrite) and runs in parallel on a
//! rayon pool. Applying runs afterwards, one file at a time in input order:
//! the checkout command for a file completes before that file is written.
//!
//! A file that does not parse, or is not valid UTF-8, is reported and
//! skipped. A file that cannot be
//! read, checked out or written aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use argtail_core::diff::{unified_diff, DEFAULT_CONTEXT};
use argtail_core::error::{ArgtailError, OutputErrorCode};
use argtail_core::output::{FileReport, RunResponse};
use argtail_go::{fix_with_options, FixError, FixOptions, FixOutcome};

use crate::apply::{write_back, Checkout};
use crate::error_bridges::from_fix_error;

/// Settings for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Names used by the engine.
    pub fix: FixOptions,
    /// Report rewrites with a diff instead of writing them.
    pub dry_run: bool,
    /// Command run before writing each file.
    pub checkout: Option<Checkout>,
    /// Threads for the fixing phase; rayon's default when `None`.
    pub jobs: Option<usize>,
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub response: RunResponse,
    /// Code of the worst per-file failure, if any file failed.
    pub failure: Option<OutputErrorCode>,
}

impl RunResult {
    /// Process exit code for the run.
    pub fn exit_code(&self) -> u8 {
        self.failure.map_or(0, |code| code.code())
    }
}

/// A file after the fixing phase.
struct Fixed {
    path: PathBuf,
    display: String,
    source: String,
    result: Result<FixOutcome, FixError>,
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn fix_file(path: &Path, options: &FixOptions) -> Result<Fixed, ArgtailError> {
    let display = display_path(path);
    let bytes = fs::read(path).map_err(|e| ArgtailError::ReadFailed {
        path: display.clone(),
        message: e.to_string(),
    })?;
    let (source, result) = match String::from_utf8(bytes) {
        Ok(source) => {
            let result = fix_with_options(&display, &source, options);
            (source, result)
        }
        Err(err) => {
            let result = Err(FixError::encoding(
                &display,
                err.as_bytes(),
                &err.utf8_error(),
            ));
            (String::new(), result)
        }
    };
    Ok(Fixed {
        path: path.to_path_buf(),
        display,
        source,
        result,
    })
}

fn fix_all(
    files: &[PathBuf],
    options: &RunOptions,
) -> Result<Vec<Result<Fixed, ArgtailError>>, ArgtailError> {
    let work = || {
        files
            .par_iter()
            .map(|path| fix_file(path, &options.fix))
            .collect::<Vec<_>>()
    };
    match options.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| ArgtailError::internal(format!("thread pool: {}", e)))?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}

/// Keep the harder of two failure codes.
fn worse(current: Option<OutputErrorCode>, new: OutputErrorCode) -> Option<OutputErrorCode> {
    match current {
        Some(code) if code.code() >= new.code() => Some(code),
        _ => Some(new),
    }
}

/// Fix and apply `files`.
///
/// # Errors
///
/// Returns the first read, checkout or write failure; files before it in
/// input order have already been written.
pub fn run_check(files: &[PathBuf], options: &RunOptions) -> Result<RunResult, ArgtailError> {
    info!(files = files.len(), dry_run = options.dry_run, "starting run");
    let fixed = fix_all(files, options)?;

    let mut reports = Vec::with_capacity(fixed.len());
    let mut failure = None;
    for file in fixed {
        let file = file?;
        let report = match file.result {
            Ok(FixOutcome::Skipped(reason)) => {
                FileReport::skipped(&file.display, reason.code(), reason.message())
            }
            Ok(FixOutcome::Rewritten(rewrite)) => {
                let report = FileReport::rewritten(&file.display, rewrite.guard_line);
                if options.dry_run {
                    let diff =
                        unified_diff(&file.display, &file.source, &rewrite.text, DEFAULT_CONTEXT);
                    report.with_diff(diff)
                } else {
                    if let Some(checkout) = &options.checkout {
                        checkout.run(&file.path)?;
                    }
                    write_back(&file.path, &rewrite.text)?;
                    report
                }
            }
            Err(err) => {
                let err = from_fix_error(err);
                warn!(file = %file.display, error = %err, "failed");
                failure = worse(failure, err.error_code());
                FileReport::failed(&file.display, &err)
            }
        };
        debug!(file = %file.display, outcome = %report.outcome, "applied");
        reports.push(report);
    }

    let response = RunResponse::new(reports, options.dry_run);
    info!(
        rewritten = response.summary.rewritten,
        skipped = response.summary.skipped,
        failed = response.summary.failed,
        "run finished"
    );
    Ok(RunResult { response, failure })
}
