use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Call list is empty.")]
    EmptyCallList,
    #[error("Duplicate call name '{name}'.")]
    DuplicateCallName { name: String },
    #[error("Jitter range is inverted: min {min_ms}ms > max {max_ms}ms.")]
    InvertedJitterRange { min_ms: u128, max_ms: u128 },
    #[error("Request timeout must be > 0.")]
    ZeroRequestTimeout,
}
