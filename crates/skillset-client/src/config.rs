//! Client configuration.
//!
//! A [`ClientConfig`] is fixed when the client is built and never changes
//! afterwards. It holds no connection state, so one config (and one client)
//! can be shared by any number of concurrent callers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use skillset::SkillSetError;

/// Default limit on establishing the socket connection.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of attempts per request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause after each failed attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Immutable settings for a [`crate::SkillSetClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    socket_path: PathBuf,
    dial_timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Starts a builder for a client that talks to `socket_path`.
    pub fn builder(socket_path: impl Into<PathBuf>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            socket_path: socket_path.into(),
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: None,
        }
    }

    /// Path of the service's Unix domain socket.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Limit on connection establishment only.
    pub fn dial_timeout(&self) -> Duration {
        self.dial_timeout
    }

    /// Total attempts per request (at least 1).
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Fixed pause after each transient failure.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Limit on writing the request and reading the response, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// Builder for [`ClientConfig`]; see [`ClientConfig::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ClientConfigBuilder {
    socket_path: PathBuf,
    dial_timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    pub fn max_retries(mut self, attempts: u32) -> Self {
        self.max_retries = attempts;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Bounds the request/response exchange after a successful connect.
    ///
    /// Unset by default: a slow response is waited on indefinitely.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSetError::Validation`] if the socket path is empty or
    /// `max_retries` is zero.
    pub fn build(self) -> Result<ClientConfig, SkillSetError> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(SkillSetError::validation("socket path is required"));
        }
        if self.max_retries == 0 {
            return Err(SkillSetError::validation("max_retries must be at least 1"));
        }
        Ok(ClientConfig {
            socket_path: self.socket_path,
            dial_timeout: self.dial_timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
            request_timeout: self.request_timeout,
        })
    }
}
