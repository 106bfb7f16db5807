//! CLI entry point for splitting mosaic images into per-phase frames

use clap::Parser;
use mosaic_frames::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> mosaic_frames::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
