//! The SkillSet error family and its retry classification.
//!
//! [`SkillSetError`] is the one error type every client operation returns.
//! Callers that only care whether "something in the SDK failed" match on the
//! type; callers that need conditional handling match on the variant or use
//! [`SkillSetError::kind`].
//!
//! [`RetryPolicy`] is the only input the request executor uses when deciding
//! whether to make another attempt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry.
///
/// - `Retryable`: connection failures, timeouts, and unclassified transport
///   faults.
/// - `NonRetryable`: validation failures, API error responses, malformed
///   success bodies, and exhausted retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// Another attempt may succeed; wait the configured delay and try again.
    Retryable,
    /// Fail immediately; the outcome is authoritative.
    NonRetryable,
}

/// Discriminant of a [`SkillSetError`], for callers that branch on the kind
/// without destructuring the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Connection,
    Timeout,
    Api,
    RetryExhausted,
    Unexpected,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Connection => "connection",
            Self::Timeout => "timeout",
            Self::Api => "api",
            Self::RetryExhausted => "retry_exhausted",
            Self::Unexpected => "unexpected",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Error family
// ---------------------------------------------------------------------------

/// Errors produced by SkillSet client operations.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SkillSetError {
    /// A required argument was missing or empty.
    ///
    /// Always raised before any socket activity; never retried.
    #[error("Validation failed: {message}")]
    Validation {
        /// Which argument was rejected and why.
        message: String,
    },

    /// The socket could not be connected (refused, missing, or any other
    /// OS-level failure).
    #[error("Connection failed: {message}")]
    Connection {
        /// Description including the socket path and OS error.
        message: String,
    },

    /// Connecting (or, when configured, the whole exchange) exceeded its
    /// time limit.
    #[error("Timed out: {message}")]
    Timeout {
        /// Description including the limit that was exceeded.
        message: String,
    },

    /// The service answered with a non-200 status, or with a 200 whose body
    /// is not valid JSON.
    ///
    /// The response is authoritative; it is never retried.
    #[error("{message}")]
    Api {
        /// Human-readable summary.
        message: String,
        /// HTTP status code of the response, when one was received.
        status: Option<u16>,
        /// Raw response body, when one was received.
        body: Option<String>,
    },

    /// Every attempt failed with a transient error.
    #[error("failed to {method} {path} after {attempts} retries")]
    RetryExhausted {
        /// Request method (`GET` / `POST`).
        method: String,
        /// Request target, including any query string.
        path: String,
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        last_error: Box<SkillSetError>,
    },

    /// Anything not covered above: transport faults after connecting,
    /// malformed framing, or response shapes that do not decode.
    #[error("{message}")]
    Unexpected {
        /// Description naming the failing operation or step.
        message: String,
    },
}

impl SkillSetError {
    /// Creates a [`SkillSetError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a [`SkillSetError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a [`SkillSetError::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a [`SkillSetError::Unexpected`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Api { .. } => ErrorKind::Api,
            Self::RetryExhausted { .. } => ErrorKind::RetryExhausted,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Returns whether the request executor may try again after this error.
    ///
    /// `Unexpected` is retryable: inside the attempt loop every unclassified
    /// failure is treated as transport noise.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Connection { .. } | Self::Timeout { .. } | Self::Unexpected { .. } => {
                RetryPolicy::Retryable
            }
            Self::Validation { .. } | Self::Api { .. } | Self::RetryExhausted { .. } => {
                RetryPolicy::NonRetryable
            }
        }
    }

    /// Returns `true` for errors the executor would retry.
    pub fn is_transient(&self) -> bool {
        self.retry_policy() == RetryPolicy::Retryable
    }

    /// Returns `true` for [`SkillSetError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// HTTP status carried by an [`SkillSetError::Api`] error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body carried by an [`SkillSetError::Api`] error.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Error from the final attempt of a [`SkillSetError::RetryExhausted`].
    pub fn last_error(&self) -> Option<&SkillSetError> {
        match self {
            Self::RetryExhausted { last_error, .. } => Some(last_error),
            _ => None,
        }
    }
}
