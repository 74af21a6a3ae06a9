use std::error::Error;
use std::path::Path;
use clap::Parser;
use tracing::info;

use notelint::cli::Args;
use notelint::config::Settings;
use notelint::report::{self, Reporter};

/// Main entry point for the notelint checker
///
/// Discovers documents under the given root, validates each one
/// (headings vs TOC, device-widget lint), prints a summary and maps the
/// outcome to the process exit code:
/// - 0: no blocking discrepancies
/// - 1: at least one blocking discrepancy found
/// - 2: internal error (missing root path, invalid configuration)
fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("notelint error: {}", e);
            2
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32, Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    // Load settings first
    let settings = Settings::new()?;

    // Initialize the subscriber before any file operations
    let file_appender = tracing_appender::rolling::RollingFileAppender::new(
        tracing_appender::rolling::Rotation::DAILY,
        // Use log file path from settings, or default to "logs"
        settings.logging.file.as_deref().unwrap_or_else(|| Path::new("logs")),
        "notelint",
    );

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let level = settings
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        // Log to file only; stdout is reserved for the report
        .with_writer(non_blocking)
        // Disable ANSI colors for cleaner log files
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_max_level(level)
        .init();

    info!("notelint starting up...");
    info!("Root: {}", args.root.display());
    if args.strict_order {
        info!("Strict TOC-order checking enabled");
    }

    let reporter = Reporter::new(
        settings,
        args.root.clone(),
        args.exclude.clone(),
        args.strict_order,
    );
    let report = reporter.run()?;

    if args.json {
        report::display_json(&report);
    } else {
        report::display_summary(&report, args.strict_order);
    }

    let blocking = report.has_blocking(args.strict_order);
    info!(
        "Scan finished: {} documents, blocking discrepancies: {}",
        report.documents.len(),
        blocking
    );

    Ok(if blocking { 1 } else { 0 })
}
