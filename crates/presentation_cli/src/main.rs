//! reittiopas CLI
//!
//! Plans a public transport journey between two addresses using the
//! Digitransit APIs and prints it leg by leg.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::{JourneyService, format_itinerary};
use clap::Parser;
use clap::error::ErrorKind;
use infrastructure::{AppConfig, DigitransitAdapter, LogFormat};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Printed on any argument mismatch
const USAGE: &str = r#"Usage: reittiopas "Ratapihantie 13" "suomenlinna""#;

/// Exit status for a wrong invocation
const EXIT_USAGE: u8 = 2;

/// reittiopas CLI
#[derive(Debug, Parser)]
#[command(name = "reittiopas")]
#[command(author, version, about = "Plan a journey with Helsinki region public transport", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the itinerary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Where the journey starts (address or place name)
    #[arg(allow_hyphen_values = true)]
    from: String,

    /// Where the journey ends (address or place name)
    #[arg(allow_hyphen_values = true)]
    to: String,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Resolve both addresses, plan the journey and render it
async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    let adapter = Arc::new(DigitransitAdapter::from_config(&config.digitransit)?);
    let service = JourneyService::new(adapter.clone(), adapter);

    let itinerary = service
        .plan_journey(&cli.from, &cli.to)
        .await
        .with_context(|| format!("Failed to plan a journey from '{}' to '{}'", cli.from, cli.to))?;

    if cli.json {
        serde_json::to_string_pretty(&itinerary).context("Failed to serialize itinerary")
    } else {
        Ok(format_itinerary(&itinerary))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        },
        Err(_) => {
            eprintln!("{USAGE}");
            return ExitCode::from(EXIT_USAGE);
        },
    };

    // .env is optional
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    init_tracing(cli.verbose, config.logging.format);
    debug!(config = ?config, "Configuration loaded");

    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    debug!(from = %cli.from, to = %cli.to, json = cli.json, "Starting");

    match run(&cli, &config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}
