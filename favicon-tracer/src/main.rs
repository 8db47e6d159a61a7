use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use favicon_tracer::tracer::{trace_to_svg, DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Trace the white pixels of a PNG into an SVG of horizontal runs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Image to trace
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the SVG
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    info!(input = %cli.input.display(), output = %cli.output.display(), "tracing");

    let summary = trace_to_svg(&cli.input, &cli.output)
        .with_context(|| format!("Failed to trace {}", cli.input.display()))?;

    println!("{}", summary);
    Ok(())
}
