use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::sleep;
use tracing::{error, info};

use crate::config::GeneratorConfig;
use crate::cycle::CycleRunner;
use crate::error::{AppError, AppResult};
use crate::shutdown::ShutdownReceiver;

pub struct LoadGenerator {
    runner: CycleRunner,
    interval: Duration,
    max_cycles: Option<u64>,
}

enum Step {
    Continue,
    Stop,
}

impl LoadGenerator {
    #[must_use]
    pub const fn new(runner: CycleRunner, config: &GeneratorConfig) -> Self {
        Self {
            runner,
            interval: config.interval,
            max_cycles: config.max_cycles,
        }
    }

    /// Runs cycles until a shutdown is signalled or `max_cycles` is reached,
    /// and returns the number of cycles started.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CycleAborted`] when a cycle panics. The final
    /// summary is logged on every exit path.
    pub async fn run(&mut self, shutdown_rx: &mut ShutdownReceiver) -> AppResult<u64> {
        info!(
            "Load generator started - one cycle every {}s",
            self.interval.as_secs()
        );

        let mut cycle_count: u64 = 0;
        let outcome = loop {
            if self.max_cycles.is_some_and(|max| cycle_count >= max) {
                break Ok(());
            }
            if shutdown_requested(shutdown_rx) {
                info!("Load generator stop requested");
                break Ok(());
            }

            cycle_count = cycle_count.saturating_add(1);
            info!("Cycle #{}", cycle_count);

            match self.run_one(cycle_count, shutdown_rx).await {
                Ok(Step::Continue) => {}
                Ok(Step::Stop) => break Ok(()),
                Err(err) => break Err(err),
            }

            if self.max_cycles.is_some_and(|max| cycle_count >= max) || self.interval.is_zero() {
                continue;
            }

            info!("Waiting {}s...", self.interval.as_secs());
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Load generator stop requested");
                    break Ok(());
                }
                () = sleep(self.interval) => {}
            }
        };

        info!("{} cycles completed", cycle_count);
        outcome.map(|()| cycle_count)
    }

    async fn run_one(
        &mut self,
        cycle: u64,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> AppResult<Step> {
        let cycle_future = AssertUnwindSafe(self.runner.run_cycle()).catch_unwind();
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Load generator stop requested during cycle #{}", cycle);
                Ok(Step::Stop)
            }
            finished = cycle_future => match finished {
                Ok(_report) => Ok(Step::Continue),
                Err(payload) => {
                    let reason = panic_message(payload.as_ref());
                    error!("Unexpected error in cycle #{}: {}", cycle, reason);
                    Err(AppError::CycleAborted { cycle, reason })
                }
            },
        }
    }
}

fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Closed | TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty) => false,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "cycle panicked".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_reads_common_payloads() -> Result<(), String> {
        let static_payload: Box<dyn Any + Send> = Box::new("boom");
        if panic_message(static_payload.as_ref()) != "boom" {
            return Err("Expected &str payload".to_owned());
        }
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        if panic_message(owned_payload.as_ref()) != "owned boom" {
            return Err("Expected String payload".to_owned());
        }
        let other_payload: Box<dyn Any + Send> = Box::new(42_u8);
        if panic_message(other_payload.as_ref()) != "cycle panicked" {
            return Err("Expected fallback message".to_owned());
        }
        Ok(())
    }

    #[test]
    fn shutdown_requested_sees_pending_signal() -> Result<(), String> {
        let (shutdown_tx, mut shutdown_rx) = crate::shutdown::shutdown_channel();
        if shutdown_requested(&mut shutdown_rx) {
            return Err("No signal sent yet".to_owned());
        }
        shutdown_tx
            .send(())
            .map_err(|err| format!("send failed: {}", err))?;
        if !shutdown_requested(&mut shutdown_rx) {
            return Err("Expected pending signal".to_owned());
        }
        drop(shutdown_tx);
        if !shutdown_requested(&mut shutdown_rx) {
            return Err("Closed channel should stop the loop".to_owned());
        }
        Ok(())
    }
}
