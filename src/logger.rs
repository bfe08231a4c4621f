use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable that overrides `RUST_LOG` for this binary.
const LOG_ENV: &str = "SYNTHLOAD_LOG";

/// Installs the global subscriber. Safe to call more than once; later calls
/// only report that a subscriber is already set.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(directive.as_deref(), verbose))
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    directive.map_or_else(
        || EnvFilter::new(fallback.to_string()),
        |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback.to_string())),
    )
}
