//! Binary entry point for argtail-check.
//!
//! ## Usage
//!
//! ```bash
//! # Fix every Go file under ./cmd
//! argtail-check cmd/
//!
//! # Preview the rewrites as unified diffs
//! argtail-check --dry-run cmd/tool/main.go
//!
//! # Open files for edit in Perforce before writing them
//! argtail-check --checkout "p4 edit" --format json ./...
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use argtail::apply::Checkout;
use argtail::error::ArgtailError;
use argtail::files::collect_go_files;
use argtail::output::{emit_response, ErrorResponse};
use argtail::report::write_text_report;
use argtail::run::{run_check, RunOptions};
use argtail_go::FixOptions;

// ============================================================================
// CLI Structure
// ============================================================================

/// Add a trailing-argument check to Go programs.
///
/// Programs that call flag.Parse() but never look at flag.Args() or
/// flag.NArg() get `if flag.NArg() != 0 { log.Fatalf(...) }` right after the
/// flag.Parse() call in main.
#[derive(Parser, Debug)]
#[command(name = "argtail-check", version, about, long_about = None)]
struct Cli {
    /// Go files or directories. Directories are walked for *.go files,
    /// skipping hidden directories, vendor/ and testdata/.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Do not write; print a unified diff of each rewrite.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Command run before writing a file, with the file path appended
    /// (e.g. "p4 edit").
    #[arg(long)]
    checkout: Option<String>,

    /// Seconds to wait for one checkout command.
    #[arg(long, default_value_t = 60)]
    checkout_timeout: u64,

    /// Function that receives the check.
    #[arg(long, default_value = "main")]
    function: String,

    /// Name the flag package is imported as.
    #[arg(long, default_value = "flag")]
    flag_module: String,

    /// Name the log package is imported as.
    #[arg(long, default_value = "log")]
    log_module: String,

    /// Threads for the fixing phase (default: one per CPU).
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,

    /// Log level for tracing output. RUST_LOG takes precedence.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Report format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per file plus a summary (default).
    #[default]
    Text,
    /// Full JSON response.
    Json,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let format = cli.format;
    match execute(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            let code = err.error_code().code();
            match format {
                OutputFormat::Json => {
                    let response = ErrorResponse::from_error(&err);
                    let _ = emit_response(&response, &mut io::stdout());
                    let _ = io::stdout().flush();
                }
                OutputFormat::Text => eprintln!("argtail-check: {}", err),
            }
            ExitCode::from(code)
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Run the check and print the report. Returns the exit code.
fn execute(cli: Cli) -> Result<u8, ArgtailError> {
    let checkout = match cli.checkout.as_deref() {
        Some(command) => Some(
            Checkout::parse(command, Duration::from_secs(cli.checkout_timeout))
                .ok_or_else(|| ArgtailError::invalid_args("--checkout command is empty"))?,
        ),
        None => None,
    };
    let options = RunOptions {
        fix: FixOptions {
            flag_module: cli.flag_module,
            log_module: cli.log_module,
            function: cli.function,
        },
        dry_run: cli.dry_run,
        checkout,
        jobs: cli.jobs.map(usize::from),
    };

    let files = collect_go_files(&cli.paths)?;
    let result = run_check(&files, &options)?;

    let mut stdout = io::stdout().lock();
    let written = match cli.format {
        OutputFormat::Text => write_text_report(&result.response, &mut stdout),
        OutputFormat::Json => emit_response(&result.response, &mut stdout),
    };
    written
        .and_then(|_| stdout.flush())
        .map_err(|e| ArgtailError::internal(format!("failed to write report: {}", e)))?;

    Ok(result.exit_code())
}
