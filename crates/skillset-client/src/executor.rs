//! Request execution: connect, exchange, classify, retry.
//!
//! [`RequestExecutor::execute`] is a bounded loop with three exits:
//!
//! 1. a 200 response whose body parses as JSON (returned),
//! 2. a non-retryable error (returned as-is), or
//! 3. `max_retries` transient failures (wrapped in
//!    [`SkillSetError::RetryExhausted`]).
//!
//! The transport is a `reqwest` client dialing the configured Unix socket.
//! Idle connections are never pooled and every request asks the service to
//! close, so each attempt dials a fresh connection that is released when the
//! attempt returns.

use std::error::Error as _;

use reqwest::header::{ACCEPT, CONNECTION};
use reqwest::{Client, Method, Request, StatusCode};
use serde_json::Value;
use skillset::{RetryPolicy, SkillSetError};
use tracing::{debug, instrument, trace};

use crate::config::ClientConfig;
use crate::routes;

/// Performs HTTP requests against the configured Unix socket.
///
/// Holds only the immutable [`ClientConfig`]; clones are cheap and calls on
/// one instance may run concurrently.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    config: ClientConfig,
}

impl RequestExecutor {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `method target` with an optional JSON body and returns the
    /// decoded JSON response.
    ///
    /// # Errors
    ///
    /// - [`SkillSetError::Api`] on a non-200 status or a 200 with invalid JSON
    ///   (no further attempts are made).
    /// - [`SkillSetError::RetryExhausted`] when every attempt failed with a
    ///   connection, timeout, or unexpected transport error.
    /// - [`SkillSetError::Unexpected`] if the request cannot be built (for
    ///   example, `body` fails to serialise). This is not retried.
    #[instrument(skip(self, body), fields(socket = %self.config.socket_path().display()))]
    pub async fn execute(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
    ) -> Result<Value, SkillSetError> {
        let client = self.client()?;
        let request = self.request(&client, &method, target, body)?;

        let attempts = self.config.max_retries();
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.attempt(&client, &request, target).await {
                Ok(value) => return Ok(value),
                Err(err) => match err.retry_policy() {
                    RetryPolicy::NonRetryable => return Err(err),
                    RetryPolicy::Retryable => {
                        debug!(attempt, max_attempts = attempts, error = %err, "attempt failed");
                        last_error = Some(err);
                        tokio::time::sleep(self.config.retry_delay()).await;
                    }
                },
            }
        }

        Err(SkillSetError::RetryExhausted {
            method: method.to_string(),
            path: target.to_owned(),
            attempts,
            last_error: Box::new(
                last_error.unwrap_or_else(|| SkillSetError::unexpected("no attempt was made")),
            ),
        })
    }

    /// Builds the HTTP client for one `execute` call.
    fn client(&self) -> Result<Client, SkillSetError> {
        Client::builder()
            .unix_socket(self.config.socket_path().to_path_buf())
            .connect_timeout(self.config.dial_timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                SkillSetError::unexpected(format!("failed to build HTTP client: {}", describe(&e)))
            })
    }

    /// Builds the request once; each attempt sends a copy.
    fn request(
        &self,
        client: &Client,
        method: &Method,
        target: &str,
        body: Option<&Value>,
    ) -> Result<Request, SkillSetError> {
        let mut builder = client
            .request(method.clone(), routes::url(target)?)
            .header(ACCEPT, "application/json")
            .header(CONNECTION, "close");
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(limit) = self.config.request_timeout() {
            builder = builder.timeout(limit);
        }
        builder.build().map_err(|e| {
            SkillSetError::unexpected(format!("failed to build request: {}", describe(&e)))
        })
    }

    /// One connect + exchange. The connection is released on return.
    async fn attempt(
        &self,
        client: &Client,
        request: &Request,
        target: &str,
    ) -> Result<Value, SkillSetError> {
        let request = request
            .try_clone()
            .ok_or_else(|| SkillSetError::unexpected("request body cannot be resent"))?;

        trace!(socket = %self.config.socket_path().display(), "dialing");
        let response = client
            .execute(request)
            .await
            .map_err(|e| self.classify(&e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(&e))?;

        let text = String::from_utf8_lossy(&body).into_owned();
        if status != StatusCode::OK {
            return Err(SkillSetError::Api {
                message: format!("{target} failed: {text}"),
                status: Some(status.as_u16()),
                body: Some(text),
            });
        }

        serde_json::from_slice(&body).map_err(|e| SkillSetError::Api {
            message: format!("invalid JSON in response: {e}"),
            status: Some(status.as_u16()),
            body: Some(text),
        })
    }

    /// Maps a transport failure onto the error family.
    fn classify(&self, err: &reqwest::Error) -> SkillSetError {
        let path = self.config.socket_path().display();
        if err.is_timeout() {
            if err.is_connect() {
                SkillSetError::timeout(format!(
                    "connection to {path} timed out after {:?}",
                    self.config.dial_timeout()
                ))
            } else {
                SkillSetError::timeout(format!("request did not complete: {}", describe(err)))
            }
        } else if err.is_connect() {
            SkillSetError::connection(format!(
                "failed to connect to socket {path}: {}",
                describe(err)
            ))
        } else {
            SkillSetError::unexpected(format!("Unexpected error: {}", describe(err)))
        }
    }
}

/// Renders an error and its sources as `outer: inner: ...`.
fn describe(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
