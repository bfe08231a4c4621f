use std::time::Instant;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{Span, debug, debug_span};

use super::traits::{ClientSpan, TagValue, Tracer};

const TRACEPARENT: HeaderName = HeaderName::from_static("traceparent");

/// Default tracer: W3C `traceparent` propagation, tags reported through `tracing`.
#[derive(Debug, Clone)]
pub struct LogTracer {
    service: &'static str,
}

impl LogTracer {
    #[must_use]
    pub const fn new(service: &'static str) -> Self {
        Self { service }
    }
}

impl Tracer for LogTracer {
    fn start_span(&self, operation: &'static str, resource: &str) -> Box<dyn ClientSpan> {
        let mut rng = rand::thread_rng();
        let trace_id: u128 = rng.gen_range(1..=u128::MAX);
        let span_id: u64 = rng.gen_range(1..=u64::MAX);
        let span = debug_span!(
            "client_span",
            service = self.service,
            operation,
            resource = %resource,
            trace_id = %format!("{:032x}", trace_id),
        );
        Box::new(LogSpan {
            span,
            trace_id,
            span_id,
            started: Instant::now(),
            tags: Vec::new(),
        })
    }
}

struct LogSpan {
    span: Span,
    trace_id: u128,
    span_id: u64,
    started: Instant,
    tags: Vec<(&'static str, TagValue)>,
}

impl LogSpan {
    fn traceparent(&self) -> String {
        format!("00-{:032x}-{:016x}-01", self.trace_id, self.span_id)
    }

    fn render_tags(&self) -> String {
        self.tags
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ClientSpan for LogSpan {
    fn inject(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.traceparent()) {
            headers.insert(TRACEPARENT, value);
        }
    }

    fn set_tag(&mut self, key: &'static str, value: TagValue) {
        if let Some(existing) = self.tags.iter_mut().find(|(name, _)| *name == key) {
            existing.1 = value;
        } else {
            self.tags.push((key, value));
        }
    }
}

impl Drop for LogSpan {
    fn drop(&mut self) {
        let duration_ms = self.started.elapsed().as_millis();
        let tags = self.render_tags();
        self.span.in_scope(|| {
            debug!(duration_ms, tags = %tags, "span finished");
        });
    }
}
