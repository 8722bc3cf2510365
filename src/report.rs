//! Human-readable run report.

use std::io::{self, Write};

use argtail_core::output::{FileOutcome, FileReport, RunResponse};

fn guard_suffix(report: &FileReport) -> String {
    match report.line {
        Some(line) => format!(" (guard after line {})", line),
        None => String::new(),
    }
}

/// Write one line per file and a summary line. In dry-run mode each rewrite
/// is followed by its diff.
pub fn write_text_report(response: &RunResponse, writer: &mut impl Write) -> io::Result<()> {
    for report in &response.files {
        let message = report.message.as_deref().unwrap_or_default();
        match report.outcome {
            FileOutcome::Rewritten if response.dry_run => {
                writeln!(writer, "would rewrite {}{}", report.path, guard_suffix(report))?;
                if let Some(diff) = &report.diff {
                    write!(writer, "{}", diff)?;
                }
            }
            FileOutcome::Rewritten => {
                writeln!(writer, "rewrote {}{}", report.path, guard_suffix(report))?;
            }
            FileOutcome::Skipped => {
                writeln!(writer, "nothing to do: {}: {}", report.path, message)?;
            }
            FileOutcome::Failed => {
                writeln!(writer, "failed: {}: {}", report.path, message)?;
            }
        }
    }

    let summary = &response.summary;
    let verb = if response.dry_run { "to rewrite" } else { "rewritten" };
    writeln!(
        writer,
        "{} file(s): {} {}, {} skipped, {} failed",
        summary.total(),
        summary.rewritten,
        verb,
        summary.skipped,
        summary.failed
    )
}
