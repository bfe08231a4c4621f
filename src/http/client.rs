use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};

use crate::{
    args::DEFAULT_USER_AGENT,
    error::{AppError, AppResult, HttpError},
    telemetry::ClientSpan,
};

/// Builds the client shared by every call and cycle.
///
/// The cookie store keeps the login session alive between calls.
///
/// # Errors
///
/// Returns an error when the underlying HTTP client cannot be built.
pub fn build_client(request_timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(request_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .cookie_store(true)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Merges static call headers with the span's propagation headers.
///
/// # Errors
///
/// Returns an error when a configured header name or value is not valid HTTP.
pub fn build_headers(headers: &[(String, String)], span: &dyn ClientSpan) -> AppResult<HeaderMap> {
    let mut header_map = HeaderMap::with_capacity(headers.len().saturating_add(1));
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_err| HttpError::InvalidHeaderName { name: key.clone() })?;
        let value = HeaderValue::from_str(value)
            .map_err(|_err| HttpError::InvalidHeaderValue { name: key.clone() })?;
        header_map.append(name, value);
    }
    span.inject(&mut header_map);
    Ok(header_map)
}
