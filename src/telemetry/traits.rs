use std::fmt;

use reqwest::header::HeaderMap;

#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Str(value) => f.write_str(value),
            TagValue::Int(value) => write!(f, "{}", value),
            TagValue::Float(value) => write!(f, "{}", value),
            TagValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Str(value.to_owned())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Str(value)
    }
}

impl From<u16> for TagValue {
    fn from(value: u16) -> Self {
        TagValue::Int(i64::from(value))
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Float(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

pub trait Tracer: Send + Sync {
    /// Opens a client span for one outbound operation.
    fn start_span(&self, operation: &'static str, resource: &str) -> Box<dyn ClientSpan>;
}

/// An open span. It is finished when dropped.
pub trait ClientSpan: Send {
    /// Writes the propagation headers for this span into `headers`.
    fn inject(&self, headers: &mut HeaderMap);

    /// Attaches a key/value tag. Fire-and-forget.
    fn set_tag(&mut self, key: &'static str, value: TagValue);
}
