use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use loan_calculator_rs::config::DEFAULT_EXPORT_FILE;
use loan_calculator_rs::{CalculatorConfig, SafeTimeProvider, Session, SummaryFormat, TimeSource};

/// Interactive fixed-rate loan calculator with amortization export
#[derive(Parser)]
#[command(name = "loan-calc", version, about)]
struct Cli {
    /// File the amortization table is written to (overwritten each loan)
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,

    /// Print the loan summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so prompts on stdout stay clean
    let filter = if cli.verbose {
        "loan_calculator_rs=debug,loan_calc=debug"
    } else {
        "error"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let summary_format = if cli.json {
        SummaryFormat::Json
    } else {
        SummaryFormat::Text
    };
    let config = CalculatorConfig::default()
        .with_export_path(&cli.output)
        .with_summary_format(summary_format);

    tracing::debug!(?config, "starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        config,
        SafeTimeProvider::new(TimeSource::System),
    );
    session.run()?;

    Ok(())
}
