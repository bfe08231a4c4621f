use std::time::Duration;

use super::types::{BaseUrl, GeneratorConfig};
use crate::args::{GeneratorArgs, PositiveU64};
use crate::error::AppResult;

impl GeneratorConfig {
    /// Builds the runtime configuration from parsed CLI/environment values.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid.
    pub fn from_args(args: &GeneratorArgs) -> AppResult<Self> {
        let base_url = BaseUrl::parse(&args.base_url)?;
        let mut config = Self::new(base_url);
        config.interval = Duration::from_secs(args.interval_seconds);
        config.max_cycles = args.max_cycles.map(PositiveU64::get);
        config.validate()?;
        Ok(config)
    }
}
