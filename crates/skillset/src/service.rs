//! Port trait for the SkillSet service.
//!
//! The client crate implements [`SkillSetService`] over a Unix socket. Code
//! that only needs to call skills depends on the trait, so tests can supply
//! an in-memory implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::{ContextName, InvocationId, SessionId, SkillInvocation, SkillResult, SkillSetError};

/// Operations the hosting service exposes to a running skill.
#[async_trait]
pub trait SkillSetService: Send + Sync {
    /// Runs a skill and returns its output.
    async fn invoke_skill(&self, invocation: SkillInvocation)
        -> Result<SkillResult, SkillSetError>;

    /// Lists the skill descriptors available to `session_id`.
    ///
    /// Descriptors are returned undecoded.
    async fn list_skills(&self, session_id: &SessionId) -> Result<Vec<Value>, SkillSetError>;

    /// Fetches the named context entry for an invocation.
    async fn get_context(
        &self,
        session_id: &SessionId,
        invocation_id: &InvocationId,
        name: &ContextName,
    ) -> Result<Value, SkillSetError>;
}
