use std::path::PathBuf;
use clap::Parser;

/// Command line arguments. A single command, no subcommands: point the
/// tool at a corpus root and it validates every document it finds.
#[derive(Debug, Parser)]
#[command(
    name = "notelint",
    version,
    about = "Checks tutorial documents for TOC/heading consistency and device-widget presence"
)]
pub struct Args {
    /// Root directory to scan for documents
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Additional excluded paths or file names, comma-separated
    /// (appended to the configured exclude list)
    #[arg(long, value_delimiter = ',', value_name = "PATH,...")]
    pub exclude: Vec<String>,

    /// Also report TOC entries that are out of document order,
    /// and treat them as blocking
    #[arg(long)]
    pub strict_order: bool,

    /// Emit the report as JSON instead of the human-readable summary
    #[arg(long)]
    pub json: bool,
}
