use std::time::Duration;

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::http::{CallResult, round_ms};

/// Results of one cycle, in call-list order.
#[derive(Debug, Clone)]
pub struct CycleReport {
    started_at: DateTime<Local>,
    elapsed: Duration,
    results: Vec<CallResult>,
}

impl CycleReport {
    #[must_use]
    pub const fn new(started_at: DateTime<Local>, elapsed: Duration, results: Vec<CallResult>) -> Self {
        Self {
            started_at,
            elapsed,
            results,
        }
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn results(&self) -> &[CallResult] {
        &self.results
    }

    #[must_use]
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|result| result.success()).count()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.results.len().saturating_sub(self.success_count())
    }
}

impl Serialize for CycleReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CycleReport", 4)?;
        state.serialize_field("started_at", &self.started_at.to_rfc3339())?;
        state.serialize_field("elapsed_ms", &round_ms(self.elapsed))?;
        state.serialize_field("success_count", &self.success_count())?;
        state.serialize_field("results", &self.results)?;
        state.end()
    }
}
