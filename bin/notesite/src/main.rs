//! Notesite CLI
//!
//! Converts a directory of markdown notes into a static HTML site: one page
//! per note plus an index listing all of them.
//!
//! This is the binary entry point. The command implementation is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for notesite.
#[derive(Parser)]
#[command(
    name = "notesite",
    version,
    about = "A minimal static site generator for personal markdown notes"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Notes input directory (overrides configuration)
    #[arg(short, long)]
    input: Option<std::path::PathBuf>,

    /// Output directory (overrides configuration)
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    notesite::init_tracing(cli.verbose);

    notesite::cmd::build::run(&cli.config, cli.input.as_deref(), cli.output.as_deref())?;

    Ok(())
}
