use clap::Parser;

use super::defaults::{DEFAULT_BASE_URL, DEFAULT_INTERVAL_SECONDS};
use super::parsers::{parse_bool_env, parse_positive_u64};
use super::types::PositiveU64;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Synthetic traffic generator - calls a fixed set of HTTP endpoints on a steady cadence to keep monitoring and tracing pipelines fed."
)]
pub struct GeneratorArgs {
    /// Base URL of the target service
    #[arg(long = "base-url", env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pause between cycles in seconds (0 runs cycles back to back)
    #[arg(
        long = "interval-seconds",
        env = "INTERVAL_SECONDS",
        default_value_t = DEFAULT_INTERVAL_SECONDS
    )]
    pub interval_seconds: u64,

    /// Stop after this many cycles (runs until interrupted when unset)
    #[arg(long = "max-cycles", env = "MAX_CYCLES", value_parser = parse_positive_u64)]
    pub max_cycles: Option<PositiveU64>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", env = "SYNTHLOAD_VERBOSE", value_parser = parse_bool_env)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
