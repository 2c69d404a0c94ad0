//! CLI entry point for the running-activity analyzer.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use run_analyzer::{AnalysisConfig, Analyzer};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Summary statistics, trends and best efforts from a running-activity CSV export",
    long_about = "Reads a Garmin Connect style activity export and prints a JSON report with \
                  descriptive statistics, weekday paces, totals, yearly statistics, \
                  histograms, moving averages and best performances.\n\n\
                  EXAMPLES:\n  \
                  run-analyzer -i Activities.csv --pretty\n\n  \
                  # Custom columns and target distances\n  \
                  run-analyzer -i Activities.csv -c analysis.json -o report.json"
)]
struct Args {
    /// Path to the CSV export to analyze
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file
    ///
    /// Any subset of the configuration keys; omitted keys take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = AnalysisConfig::from_json(&json)
        .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let config = load_config(args.config.as_ref())?;
    let analyzer = Analyzer::new(config)?;

    info!("Analyzing {}", args.input.display());
    let report = analyzer.analyze_file(&args.input)?;

    let json = if args.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
