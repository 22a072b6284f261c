//! Domain types for the SkillSet client SDK.
//!
//! Code running inside a delegated execution context uses the SkillSet service
//! to invoke skills, enumerate the skills a session may use, and fetch context
//! attached to an invocation. This crate holds everything about those calls
//! that is independent of transport.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies. The
//! `skillset-client` crate supplies the Unix-socket implementation of
//! [`SkillSetService`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Non-empty string newtypes (`SessionId`, `SkillName`, etc.) |
//! | [`types`] | `SkillInvocation` and `SkillResult` |
//! | [`errors`] | `SkillSetError`, `ErrorKind`, `RetryPolicy` |
//! | [`service`] | The `SkillSetService` port trait |

pub mod errors;
pub mod identifiers;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ErrorKind, RetryPolicy, SkillSetError};
pub use identifiers::{ContextName, EmptyIdentifier, InvocationId, SessionId, SkillName};
pub use service::SkillSetService;
pub use types::{JsonObject, SkillInvocation, SkillResult};

/// Unwraps an identifier built with `new`, or fails with a validation error
/// naming `field`.
///
/// ```
/// use skillset::{require, SessionId};
///
/// let err = require(SessionId::new(""), "session_id").unwrap_err();
/// assert_eq!(err.to_string(), "Validation failed: session_id is required");
/// ```
///
/// # Errors
///
/// Returns [`SkillSetError::Validation`] with `"<field> is required"` when
/// `id` is `None`.
pub fn require<T>(id: Option<T>, field: &str) -> Result<T, SkillSetError> {
    id.ok_or_else(|| SkillSetError::validation(format!("{field} is required")))
}
