//! Static call definitions and the fixed endpoint catalog.
mod catalog;
mod types;

pub use catalog::{
    LOGIN_PATH, LOGOUT_CALL, MAX_SCORE, default_calls, random_score_payload, validate_calls,
};
pub use types::{CallSpec, HttpMethod, Payload, PayloadGenerator, SessionEffect};
