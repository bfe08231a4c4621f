use std::fmt;
use std::time::Duration;

use rand::Rng;
use reqwest::Url;
use serde::Serialize;

use crate::args::DEFAULT_INTERVAL_SECONDS;
use crate::error::{AppError, AppResult, ConfigError, HttpError, ValidationError};

/// Per-request timeout applied to every outbound call, login included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Lower bound (inclusive) of the pause inserted between calls.
pub const DEFAULT_JITTER_MIN: Duration = Duration::from_secs(1);
/// Upper bound (exclusive) of the pause inserted between calls.
pub const DEFAULT_JITTER_MAX: Duration = Duration::from_secs(3);

const DEMO_USER: &str = "demo";
const DEMO_PASSWORD: &str = "demo";

/// Absolute http(s) base address; endpoint paths are appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parses and normalises a base URL (trailing slashes are dropped).
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not an absolute URL, uses a scheme
    /// other than http/https, or carries a query or fragment.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        let parsed = Url::parse(trimmed).map_err(|err| {
            AppError::config(ConfigError::InvalidBaseUrl {
                url: trimmed.to_owned(),
                source: err,
            })
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::config(ConfigError::UnsupportedScheme {
                    scheme: other.to_owned(),
                }));
            }
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(AppError::config(ConfigError::BaseUrlHasQuery {
                url: trimmed.to_owned(),
            }));
        }

        Ok(Self(trimmed.trim_end_matches('/').to_owned()))
    }

    /// Resolves `path` (which may include a query) against the base.
    ///
    /// # Errors
    ///
    /// Returns an error when the combined address is not a valid URL.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        let mut joined = String::with_capacity(self.0.len().saturating_add(path.len()));
        joined.push_str(&self.0);
        if !path.starts_with('/') {
            joined.push('/');
        }
        joined.push_str(path);
        Url::parse(&joined).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: joined.clone(),
                source: err,
            })
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uniform pause range `[min, max)` between consecutive calls of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterRange {
    pub min: Duration,
    pub max: Duration,
}

impl JitterRange {
    #[must_use]
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    /// Draws one delay. A degenerate range (`min == max`) always yields `min`.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.min > self.max {
            return Err(ValidationError::InvertedJitterRange {
                min_ms: self.min.as_millis(),
                max_ms: self.max.as_millis(),
            });
        }
        Ok(())
    }
}

impl Default for JitterRange {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_MIN, DEFAULT_JITTER_MAX)
    }
}

/// Login identity; serialises to the authentication request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub id: String,
    pub pw: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            id: DEMO_USER.to_owned(),
            pw: DEMO_PASSWORD.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub base_url: BaseUrl,
    pub interval: Duration,
    pub request_timeout: Duration,
    pub jitter: JitterRange,
    pub credentials: Credentials,
    pub max_cycles: Option<u64>,
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECONDS),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            jitter: JitterRange::default(),
            credentials: Credentials::default(),
            max_cycles: None,
        }
    }

    /// Checks the settings that cannot be expressed in the types.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero request timeout or an inverted jitter range.
    pub fn validate(&self) -> AppResult<()> {
        if self.request_timeout.is_zero() {
            return Err(AppError::validation(ValidationError::ZeroRequestTimeout));
        }
        self.jitter.validate().map_err(AppError::validation)
    }
}
