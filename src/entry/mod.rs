use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use crate::args::GeneratorArgs;
use crate::calls::default_calls;
use crate::config::GeneratorConfig;
use crate::cycle::CycleRunner;
use crate::error::AppResult;
use crate::generator::LoadGenerator;
use crate::http::build_client;
use crate::logger::init_logging;
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;
use crate::telemetry::{LogTracer, Tracer};

/// Service name reported on every span.
const SERVICE_NAME: &str = "load-generator";

/// Process entry point: parse arguments, set up logging and the runtime, then
/// run the generator until it is stopped.
///
/// # Errors
///
/// Returns an error for invalid configuration, runtime setup failures, or a
/// cycle that aborted unexpectedly.
pub fn run() -> AppResult<()> {
    let args = GeneratorArgs::parse();
    init_logging(args.verbose, args.no_color);

    let config = GeneratorConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config))
}

async fn run_async(config: GeneratorConfig) -> AppResult<()> {
    let client = build_client(config.request_timeout)?;
    let tracer: Arc<dyn Tracer> = Arc::new(LogTracer::new(SERVICE_NAME));
    let calls = default_calls(&config.base_url)?;
    let runner = CycleRunner::new(client, tracer, calls, &config)?;
    let mut generator = LoadGenerator::new(runner, &config);

    info!(
        "Load generator initialised - base URL: {}, interval: {}s",
        config.base_url,
        config.interval.as_secs()
    );

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let outcome = generator.run(&mut shutdown_rx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        error!("Signal handler task failed: {}", err);
    }

    outcome.map(|_cycles| ())
}
