use std::time::Duration;

use serde::Serialize;

use crate::calls::{CallSpec, HttpMethod};

pub const TIMEOUT_ERROR: &str = "Timeout";

/// Milliseconds rounded to two decimals.
#[must_use]
pub fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100_000.0).round() / 100.0
}

/// Classification of one finished call, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Timeout,
    Transport(String),
    Status { observed: u16, expected: u16 },
}

impl CallOutcome {
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            CallOutcome::Timeout
        } else {
            CallOutcome::Transport(error_chain(err))
        }
    }
}

/// Renders an error together with its sources, outermost first.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Immutable record of one executed call.
///
/// `success`, a missing `error` and a status equal to the expected one always
/// hold together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResult {
    name: String,
    method: HttpMethod,
    url: String,
    success: bool,
    status_code: Option<u16>,
    response_time_ms: f64,
    error: Option<String>,
}

impl CallResult {
    #[must_use]
    pub fn from_outcome(spec: &CallSpec, outcome: CallOutcome, elapsed: Duration) -> Self {
        let (success, status_code, error) = match outcome {
            CallOutcome::Timeout => (false, None, Some(TIMEOUT_ERROR.to_owned())),
            CallOutcome::Transport(message) => (false, None, Some(message)),
            CallOutcome::Status { observed, expected } if observed == expected => {
                (true, Some(observed), None)
            }
            CallOutcome::Status { observed, .. } => (
                false,
                Some(observed),
                Some(format!("Unexpected status: {}", observed)),
            ),
        };
        Self {
            name: spec.name().to_owned(),
            method: spec.method(),
            url: spec.url().to_string(),
            success,
            status_code,
            response_time_ms: round_ms(elapsed),
            error,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    #[must_use]
    pub const fn response_time_ms(&self) -> f64 {
        self.response_time_ms
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.error.as_deref() == Some(TIMEOUT_ERROR) && self.status_code.is_none()
    }
}
