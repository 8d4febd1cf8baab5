mod analyzer;
mod cli;
mod config;
mod dispatch;
mod model;
mod normalizer;
mod parser;
mod scoring;

use analyzer::{AnalyzerImpl, GaussianNoise};
use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use config::{EngineConfig, load_config};
use model::AppError;
use serde_json::{Value, json};
use std::process;
use std::str::FromStr;
use tracing::{debug, error, info};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => fail(AppError::Usage(e.to_string())),
    };

    init_logging(&cli.log_level);

    // A panic still answers with a single JSON line
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
        println!("{}", json!({ "error": format!("Internal error: {}", panic_info) }));
        process::exit(1);
    }));

    match run(&cli) {
        Ok(line) => println!("{}", line),
        Err(e) => fail(e),
    }
}

/// Parses the input, runs the engine and encodes the result as one line.
fn run(cli: &Cli) -> Result<String, AppError> {
    let input = cli.input.as_deref().ok_or(AppError::MissingInput)?;

    let mut config = match cli.config.as_deref() {
        Some(path) => {
            info!("Loading config from {}", path);
            load_config(path)?
        }
        None => EngineConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let document: Value = serde_json::from_str(input).map_err(AppError::InvalidJson)?;

    let noise = match config.seed {
        Some(seed) => GaussianNoise::seeded(seed),
        None => GaussianNoise::from_os_rng(),
    };
    let mut analyzer = AnalyzerImpl::new(config, noise);
    let output = dispatch::dispatch(&mut analyzer, &document);

    let line = serde_json::to_string(&output).map_err(AppError::Encode)?;
    debug!("Encoded {} bytes of output", line.len());
    Ok(line)
}

fn fail(e: AppError) -> ! {
    error!("{}", e);
    println!("{}", json!({ "error": e.to_string() }));
    process::exit(1);
}

fn init_logging(level: &str) {
    let max_level = LevelFilter::from_str(level).unwrap_or(LevelFilter::OFF);
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
