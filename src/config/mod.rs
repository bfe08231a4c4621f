//! Validated runtime configuration for the generator.
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use types::{
    BaseUrl, Credentials, DEFAULT_JITTER_MAX, DEFAULT_JITTER_MIN, DEFAULT_REQUEST_TIMEOUT,
    GeneratorConfig, JitterRange,
};
