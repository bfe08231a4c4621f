//! Core library for the `synthload` binary.
//!
//! `synthload` keeps a target service under a thin, continuous stream of
//! realistic traffic: every cycle it walks a fixed list of HTTP endpoints in
//! order, pausing a random second or two between calls, records one
//! [`http::CallResult`] per call, and then waits for the next cycle. Each call
//! is wrapped in a client span from the pluggable [`telemetry::Tracer`], so the
//! traffic shows up end to end in a tracing backend.
pub mod args;
pub mod calls;
pub mod config;
pub mod cycle;
pub mod entry;
pub mod error;
pub mod generator;
pub mod http;
pub mod logger;
pub mod session;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod telemetry;
