use tracing::{info, warn};

use crate::shutdown::ShutdownSender;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Broadcasts a shutdown on Ctrl+C (and SIGTERM on unix). The task also ends
/// when a shutdown is broadcast by anyone else.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();
        tokio::select! {
            _ = shutdown_rx.recv() => {}
            name = wait_for_signal() => {
                info!("Received {}", name);
                drop(shutdown_tx.send(()));
            }
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    let mut term_signal = match signal(SignalKind::terminate()) {
        Ok(signal) => Some(signal),
        Err(err) => {
            warn!("Failed to register SIGTERM handler: {}", err);
            None
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => interrupt_name(result),
        () = async {
            if let Some(signal) = term_signal.as_mut() {
                signal.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        } => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    interrupt_name(tokio::signal::ctrl_c().await)
}

fn interrupt_name(result: std::io::Result<()>) -> &'static str {
    if let Err(err) = result {
        warn!("Ctrl+C listener failed: {}", err);
    }
    "interrupt"
}
