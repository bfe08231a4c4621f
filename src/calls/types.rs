use std::fmt;

use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    #[must_use]
    pub fn to_reqwest(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type PayloadGenerator = fn() -> Value;

/// Request body, resolved freshly on every invocation.
#[derive(Debug, Clone)]
pub enum Payload {
    Static(Value),
    Generated(PayloadGenerator),
}

impl Payload {
    #[must_use]
    pub fn resolve(&self) -> Value {
        match self {
            Payload::Static(document) => document.clone(),
            Payload::Generated(generate) => generate(),
        }
    }
}

/// What executing a call does to the local login state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionEffect {
    #[default]
    NoEffect,
    /// The session is considered ended once the call has run, whatever its outcome.
    ClearsSession,
}

#[derive(Debug, Clone)]
pub struct CallSpec {
    name: String,
    method: HttpMethod,
    url: Url,
    headers: Vec<(String, String)>,
    payload: Option<Payload>,
    expected_status: u16,
    session_effect: SessionEffect,
}

impl CallSpec {
    pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: Url) -> Self {
        Self {
            name: name.into(),
            method,
            url,
            headers: Vec::new(),
            payload: None,
            expected_status: Self::DEFAULT_EXPECTED_STATUS,
            session_effect: SessionEffect::NoEffect,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[must_use]
    pub const fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    #[must_use]
    pub const fn with_session_effect(mut self, effect: SessionEffect) -> Self {
        self.session_effect = effect;
        self
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
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        self.expected_status
    }

    #[must_use]
    pub const fn session_effect(&self) -> SessionEffect {
        self.session_effect
    }
}
