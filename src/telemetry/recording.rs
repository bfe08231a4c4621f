use std::sync::{Arc, Mutex, PoisonError};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::traits::{ClientSpan, TagValue, Tracer};

const RECORDING_HEADER: HeaderName = HeaderName::from_static("x-recorded-span");

/// A span that has been dropped, with the tags it carried.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedSpan {
    pub operation: &'static str,
    pub resource: String,
    pub tags: Vec<(&'static str, TagValue)>,
}

impl FinishedSpan {
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags
            .iter()
            .rev()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// In-memory tracer that keeps every finished span.
///
/// Each span injects an `x-recorded-span: <sequence>` header so that the
/// propagation path can be observed on the wire.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    finished: Arc<Mutex<Vec<FinishedSpan>>>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn finished(&self) -> Vec<FinishedSpan> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Tracer for RecordingTracer {
    fn start_span(&self, operation: &'static str, resource: &str) -> Box<dyn ClientSpan> {
        let sequence = self
            .finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        Box::new(RecordingSpan {
            sink: Arc::clone(&self.finished),
            sequence,
            span: Some(FinishedSpan {
                operation,
                resource: resource.to_owned(),
                tags: Vec::new(),
            }),
        })
    }
}

struct RecordingSpan {
    sink: Arc<Mutex<Vec<FinishedSpan>>>,
    sequence: usize,
    span: Option<FinishedSpan>,
}

impl ClientSpan for RecordingSpan {
    fn inject(&self, headers: &mut HeaderMap) {
        headers.insert(RECORDING_HEADER, HeaderValue::from(self.sequence));
    }

    fn set_tag(&mut self, key: &'static str, value: TagValue) {
        if let Some(span) = self.span.as_mut() {
            span.tags.push((key, value));
        }
    }
}

impl Drop for RecordingSpan {
    fn drop(&mut self) {
        if let Some(span) = self.span.take() {
            self.sink
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(span);
        }
    }
}
