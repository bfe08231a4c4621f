use std::sync::Arc;

use chrono::Local;
use reqwest::Client;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use super::report::CycleReport;
use crate::calls::{CallSpec, SessionEffect, validate_calls};
use crate::config::{GeneratorConfig, JitterRange};
use crate::error::AppResult;
use crate::http::CallExecutor;
use crate::session::SessionManager;
use crate::telemetry::Tracer;

/// Runs the call list once per cycle, strictly in order, with a random pause
/// between consecutive calls.
pub struct CycleRunner {
    calls: Vec<CallSpec>,
    executor: CallExecutor,
    session: SessionManager,
    tracer: Arc<dyn Tracer>,
    jitter: JitterRange,
}

impl CycleRunner {
    /// # Errors
    ///
    /// Returns an error when the call list is empty or has duplicate names,
    /// when the configuration is invalid, or when the login endpoint cannot be
    /// resolved.
    pub fn new(
        client: Client,
        tracer: Arc<dyn Tracer>,
        calls: Vec<CallSpec>,
        config: &GeneratorConfig,
    ) -> AppResult<Self> {
        config.validate()?;
        validate_calls(&calls)?;
        let session = SessionManager::new(client.clone(), config)?;
        Ok(Self {
            calls,
            executor: CallExecutor::new(client, config.request_timeout),
            session,
            tracer,
            jitter: config.jitter,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    pub async fn run_cycle(&mut self) -> CycleReport {
        let started_at = Local::now();
        let start = Instant::now();
        info!(
            "Load generation cycle started - {}",
            started_at.format("%Y-%m-%d %H:%M:%S")
        );

        // Login outcome does not gate the cycle; some calls are meaningful unauthenticated.
        if !self.session.is_logged_in() {
            self.session.ensure_login(self.tracer.as_ref()).await;
        }

        let mut results = Vec::with_capacity(self.calls.len());
        for (index, call) in self.calls.iter().enumerate() {
            if index > 0 {
                let delay = self.jitter.sample();
                debug!("Pausing {}ms before {}", delay.as_millis(), call.name());
                sleep(delay).await;
            }

            let result = self.executor.execute(call, self.tracer.as_ref()).await;
            results.push(result);

            if call.session_effect() == SessionEffect::ClearsSession {
                self.session.clear();
            }
        }

        let report = CycleReport::new(started_at, start.elapsed(), results);
        info!(
            "Cycle complete: {}/{} succeeded, elapsed {:.2}s",
            report.success_count(),
            report.results().len(),
            report.elapsed().as_secs_f64()
        );
        match serde_json::to_string(&report) {
            Ok(json) => debug!(report = %json, "cycle report"),
            Err(err) => debug!("Failed to render cycle report: {}", err),
        }
        report
    }
}
