//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "site-audit-analyzer",
    version,
    about = "Derive ranking, forecast, quality and issue insights from a site audit report",
    long_about = "Reads one JSON document, either a bare audit report or an {\"action\", \"data\"} envelope, and prints one line of JSON.",
    after_help = "Examples:\n  site-audit-analyzer '{\"siteHealth\":{\"score\":80,\"errors\":2,\"warnings\":5,\"notices\":1,\"crawledPages\":50}}'\n  site-audit-analyzer --seed 7 '{\"action\":\"forecast_traffic\",\"data\":{\"siteHealth\":{\"score\":64}}}'"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "JSON audit report, or {\"action\": ..., \"data\": ...}")]
    pub input: Option<String>,
    #[arg(long, help = "Path to a JSON engine config")]
    pub config: Option<String>,
    #[arg(long, help = "Seed for reproducible forecast noise (overrides config)")]
    pub seed: Option<u64>,
    #[arg(
        long,
        default_value = "off",
        help = "Diagnostics level on stderr: off|error|warn|info|debug|trace"
    )]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_optional_positional() {
        let cli = Cli::try_parse_from(["site-audit-analyzer"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.log_level, "off");

        let cli = Cli::try_parse_from(["site-audit-analyzer", "--seed", "3", "{}"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("{}"));
        assert_eq!(cli.seed, Some(3));
    }
}
