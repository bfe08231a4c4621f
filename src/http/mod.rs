//! HTTP client construction and single-call execution.
mod client;
mod executor;
mod result;


pub use client::{build_client, build_headers};
pub use executor::CallExecutor;
pub use result::{CallOutcome, CallResult, round_ms};
