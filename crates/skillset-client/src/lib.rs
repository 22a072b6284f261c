//! SkillSet client adapter.
//!
//! Implements the [`skillset::SkillSetService`] trait over the SkillSet
//! service's local API: HTTP/1.1 requests with JSON bodies, carried on a Unix
//! domain socket whose path the hosting service supplies.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** The `reqwest` transport over the Unix socket, error
//! classification, and the retry loop all live here. Callers that
//! only need the operations can depend on [`skillset::SkillSetService`].
//!
//! ## Behaviour
//!
//! - Every attempt opens its own connection; nothing is pooled.
//! - Connection failures, timeouts, and unclassified transport faults are
//!   retried up to `max_retries` attempts with a fixed `retry_delay`.
//! - Non-200 responses and unparseable success bodies fail immediately.
//! - Empty identifiers are rejected before any socket activity.
//!
//! ```no_run
//! # async fn demo() -> Result<(), skillset_client::SkillSetError> {
//! use skillset_client::SkillSetClient;
//!
//! let client = SkillSetClient::new("/tmp/skillset.sock")?;
//! let skills = client.get_skills("session-1").await?;
//! println!("{} skills available", skills.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod executor;
pub mod routes;

pub use client::SkillSetClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use executor::RequestExecutor;
pub use skillset::{ErrorKind, SkillSetError, SkillSetService};
