use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pyskel::cli::SinkOptions;

#[derive(Parser)]
#[command(name = "pyskel")]
#[command(
    version,
    about = "Analyze the structure of a Python file and output results as JSON"
)]
struct Cli {
    /// Path to the Python file (.py) to analyze
    filepath: PathBuf,

    /// Write the JSON report to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Copy the generated JSON report to the clipboard
    #[arg(long)]
    copy: bool,

    /// Emit single-line JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opts = SinkOptions {
        output: cli.output,
        copy: cli.copy,
        compact: cli.compact,
    };

    Ok(pyskel::cli::run(&cli.filepath, &opts)?)
}
