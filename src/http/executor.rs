use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use tokio::time::Instant;
use tracing::{error, info, warn};

use super::client::build_headers;
use super::result::{CallOutcome, CallResult};
use crate::calls::{CallSpec, Payload};
use crate::telemetry::{ClientSpan, HTTP_REQUEST_OPERATION, TagValue, Tracer};

/// Performs single calls and turns every outcome into a [`CallResult`].
#[derive(Debug, Clone)]
pub struct CallExecutor {
    client: Client,
    timeout: Duration,
}

impl CallExecutor {
    #[must_use]
    pub const fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Issues exactly one request for `spec`. Never fails: timeouts, transport
    /// errors and unexpected statuses are all reported in the result.
    pub async fn execute(&self, spec: &CallSpec, tracer: &dyn Tracer) -> CallResult {
        let resource = format!("{} {}", spec.method(), spec.url());
        let mut span = tracer.start_span(HTTP_REQUEST_OPERATION, &resource);
        span.set_tag("http.method", spec.method().as_str().into());
        span.set_tag("http.url", spec.url().as_str().into());
        span.set_tag("component", "http".into());
        span.set_tag("span.kind", "client".into());

        let start = Instant::now();
        let headers = build_headers(spec.headers(), &*span);
        let outcome = match headers {
            Ok(headers) => self.send(spec, headers).await,
            Err(err) => CallOutcome::Transport(err.to_string()),
        };
        let result = CallResult::from_outcome(spec, outcome, start.elapsed());

        record_tags(&mut *span, &result);
        self.log_result(spec, &result);
        result
    }

    async fn send(&self, spec: &CallSpec, headers: HeaderMap) -> CallOutcome {
        let payload = spec.payload().map(Payload::resolve);
        let mut request = self
            .client
            .request(spec.method().to_reqwest(), spec.url().clone())
            .headers(headers)
            .timeout(self.timeout);
        if let Some(payload) = payload.as_ref() {
            request = request.json(payload);
        }

        match request.send().await {
            Ok(response) => {
                let observed = response.status().as_u16();
                match response.bytes().await {
                    Ok(_) => CallOutcome::Status {
                        observed,
                        expected: spec.expected_status(),
                    },
                    Err(err) => CallOutcome::from_transport(&err),
                }
            }
            Err(err) => CallOutcome::from_transport(&err),
        }
    }

    fn log_result(&self, spec: &CallSpec, result: &CallResult) {
        match (result.success(), result.status_code()) {
            (true, Some(status)) => {
                info!("{}: {} ({}ms)", spec.name(), status, result.response_time_ms());
            }
            (false, Some(status)) => {
                warn!(
                    "{}: {} (expected {})",
                    spec.name(),
                    status,
                    spec.expected_status()
                );
            }
            (_, None) if result.is_timeout() => {
                error!(
                    "{}: Timeout after {}s",
                    spec.name(),
                    self.timeout.as_secs_f64()
                );
            }
            (_, None) => {
                error!("{}: {}", spec.name(), result.error().unwrap_or_default());
            }
        }
    }
}

fn record_tags(span: &mut dyn ClientSpan, result: &CallResult) {
    if let Some(status) = result.status_code() {
        span.set_tag("http.status_code", TagValue::from(status));
    }
    span.set_tag(
        "http.response_time_ms",
        TagValue::from(result.response_time_ms()),
    );
    span.set_tag("http.success", TagValue::from(result.success()));
    if let Some(message) = result.error() {
        span.set_tag("error", TagValue::from(true));
        span.set_tag("error.message", TagValue::from(message));
    }
}
