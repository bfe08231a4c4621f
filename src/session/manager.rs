use std::time::Duration;

use reqwest::{Client, Url, header::HeaderMap};
use tracing::{error, info, warn};

use crate::calls::{HttpMethod, LOGIN_PATH};
use crate::config::{Credentials, GeneratorConfig};
use crate::error::AppResult;
use crate::http::build_headers;
use crate::telemetry::{ClientSpan, LOGIN_OPERATION, TagValue, Tracer};

const LOGIN_OK: u16 = 200;

/// Tracks whether the shared client currently holds a login session.
#[derive(Debug)]
pub struct SessionManager {
    client: Client,
    login_url: Url,
    credentials: Credentials,
    timeout: Duration,
    logged_in: bool,
}

impl SessionManager {
    /// # Errors
    ///
    /// Returns an error when the login endpoint cannot be resolved.
    pub fn new(client: Client, config: &GeneratorConfig) -> AppResult<Self> {
        Ok(Self {
            client,
            login_url: config.base_url.endpoint(LOGIN_PATH)?,
            credentials: config.credentials.clone(),
            timeout: config.request_timeout,
            logged_in: false,
        })
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Ends the session locally.
    pub const fn clear(&mut self) {
        self.logged_in = false;
    }

    /// Authenticates with the fixed identity. Returns `true` only on HTTP 200;
    /// any other status or transport failure leaves the session logged out.
    pub async fn ensure_login(&mut self, tracer: &dyn Tracer) -> bool {
        let resource = format!("{} {}", HttpMethod::Post, LOGIN_PATH);
        let mut span = tracer.start_span(LOGIN_OPERATION, &resource);
        span.set_tag("http.method", HttpMethod::Post.as_str().into());
        span.set_tag("http.url", self.login_url.as_str().into());
        span.set_tag("component", "http".into());
        span.set_tag("span.kind", "client".into());
        span.set_tag("user.id", self.credentials.id.as_str().into());

        let headers = build_headers(
            &[("Content-Type".to_owned(), "application/json".to_owned())],
            &*span,
        );
        let login = match headers {
            Ok(headers) => self.post_credentials(headers).await,
            Err(err) => Err(err.to_string()),
        };

        self.logged_in = match login {
            Ok(status) => {
                span.set_tag("http.status_code", TagValue::from(status));
                record_status(&mut *span, status)
            }
            Err(message) => {
                error!("Login error: {}", message);
                span.set_tag("error", TagValue::from(true));
                span.set_tag("error.message", TagValue::from(message));
                span.set_tag("login.success", TagValue::from(false));
                false
            }
        };
        self.logged_in
    }

    async fn post_credentials(&self, headers: HeaderMap) -> Result<u16, String> {
        let response = self
            .client
            .post(self.login_url.clone())
            .headers(headers)
            .json(&self.credentials)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let status = response.status().as_u16();
        response.bytes().await.map_err(|err| err.to_string())?;
        Ok(status)
    }
}

fn record_status(span: &mut dyn ClientSpan, status: u16) -> bool {
    if status == LOGIN_OK {
        info!("Login succeeded");
        span.set_tag("login.success", TagValue::from(true));
        return true;
    }
    warn!("Login failed - status {}", status);
    span.set_tag("login.success", TagValue::from(false));
    span.set_tag(
        "error.message",
        TagValue::from(format!("Login failed with status {}", status)),
    );
    false
}
