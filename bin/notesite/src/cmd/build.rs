//! Build command - generates the note site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use notesite_core::Config;
use notesite_generator::Builder;

/// Run the build.
///
/// Loads configuration, applies any CLI directory overrides, and generates
/// one page per note plus the index.
pub fn run(config_path: &Path, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?input, ?output, "Starting build");

    // Missing config file is fine, the defaults cover it
    let mut config =
        Config::load_or_default(config_path).wrap_err("Failed to load configuration")?;

    // Override directories if specified via CLI
    if let Some(dir) = input {
        tracing::info!(input = %dir.display(), "Overriding input directory from CLI");
        config.build.input_dir = dir.to_string_lossy().to_string();
    }
    if let Some(dir) = output {
        tracing::info!(output = %dir.display(), "Overriding output directory from CLI");
        config.build.output_dir = dir.to_string_lossy().to_string();
    }

    tracing::debug!(?config, "Loaded configuration");

    let output_dir = config.build.output_dir.clone();
    let builder = Builder::new(config);
    let stats = builder.build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    // Print build statistics
    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Notes:    {}", stats.notes);
    println!("  Index:    1");
    if stats.pruned > 0 {
        println!("  Pruned:   {}", stats.pruned);
    }
    println!();
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!("  Output:   {output_dir}");
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
