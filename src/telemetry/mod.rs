//! Seam to the distributed-tracing collaborator.
//!
//! The generator never implements tracing itself: it asks a [`Tracer`] for a
//! [`ClientSpan`] around each outbound request, lets the span inject its
//! propagation headers, and reports request metadata as tags. Dropping the
//! span finishes it, so every exit path closes the span.
mod log_tracer;
mod recording;
mod traits;

pub use log_tracer::LogTracer;
pub use recording::{FinishedSpan, RecordingTracer};
pub use traits::{ClientSpan, TagValue, Tracer};

pub const HTTP_REQUEST_OPERATION: &str = "http.request";
pub const LOGIN_OPERATION: &str = "load_generator.login";
