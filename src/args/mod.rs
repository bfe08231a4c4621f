//! CLI/environment argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::GeneratorArgs;
pub use defaults::{DEFAULT_BASE_URL, DEFAULT_INTERVAL_SECONDS, DEFAULT_USER_AGENT};
pub use types::PositiveU64;
