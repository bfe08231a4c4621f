use std::collections::HashSet;

use rand::Rng;
use serde_json::{Value, json};

use super::types::{CallSpec, HttpMethod, Payload, SessionEffect};
use crate::config::BaseUrl;
use crate::error::{AppError, AppResult, ValidationError};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_CALL: &str = "logout";
pub const MAX_SCORE: u32 = 1500;

/// Fresh `{"score": n}` document with `n` drawn from `0..=MAX_SCORE`.
#[must_use]
pub fn random_score_payload() -> Value {
    let score = rand::thread_rng().gen_range(0..=MAX_SCORE);
    json!({ "score": score })
}

/// The fixed list of endpoints exercised once per cycle, in call order.
///
/// # Errors
///
/// Returns an error if any endpoint cannot be resolved against `base`.
pub fn default_calls(base: &BaseUrl) -> AppResult<Vec<CallSpec>> {
    Ok(vec![
        CallSpec::new(
            "session_check",
            HttpMethod::Get,
            base.endpoint("/api/session/me")?,
        ),
        CallSpec::new("rankings_top", HttpMethod::Get, base.endpoint("/rankings/top")?),
        CallSpec::new(
            "rankings_top_limit",
            HttpMethod::Get,
            base.endpoint("/rankings/top?limit=5")?,
        ),
        CallSpec::new("score_submit", HttpMethod::Post, base.endpoint("/api/score")?)
            .with_header("Content-Type", "application/json")
            .with_payload(Payload::Generated(random_score_payload)),
        CallSpec::new(LOGOUT_CALL, HttpMethod::Get, base.endpoint("/api/auth/logout")?)
            .with_session_effect(SessionEffect::ClearsSession),
    ])
}

/// Rejects an empty list or duplicated call names.
///
/// # Errors
///
/// Returns a validation error describing the first problem found.
pub fn validate_calls(calls: &[CallSpec]) -> AppResult<()> {
    if calls.is_empty() {
        return Err(AppError::validation(ValidationError::EmptyCallList));
    }
    let mut seen = HashSet::with_capacity(calls.len());
    for call in calls {
        if !seen.insert(call.name()) {
            return Err(AppError::validation(ValidationError::DuplicateCallName {
                name: call.name().to_owned(),
            }));
        }
    }
    Ok(())
}
