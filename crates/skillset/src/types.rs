//! Request and response shapes exchanged with the SkillSet service.
//!
//! Both types are immutable once built: fields are private and exposed
//! through accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{InvocationId, SessionId, SkillName, SkillSetError};

/// Arguments passed to a skill, or output returned by one.
pub type JsonObject = Map<String, Value>;

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// A request to run one skill with one set of arguments.
///
/// Serialises to the wire body `{session_id, invocation_id, skill_name, args}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInvocation {
    session_id: SessionId,
    invocation_id: InvocationId,
    skill_name: SkillName,
    args: JsonObject,
}

impl SkillInvocation {
    /// Builds an invocation from already-validated identifiers.
    pub fn new(
        session_id: SessionId,
        invocation_id: InvocationId,
        skill_name: SkillName,
        args: JsonObject,
    ) -> Self {
        Self {
            session_id,
            invocation_id,
            skill_name,
            args,
        }
    }

    /// Builds an invocation from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSetError::Validation`] naming the first empty field.
    pub fn from_parts(
        session_id: &str,
        invocation_id: &str,
        skill_name: &str,
        args: JsonObject,
    ) -> Result<Self, SkillSetError> {
        Ok(Self::new(
            crate::require(SessionId::new(session_id), "session_id")?,
            crate::require(InvocationId::new(invocation_id), "invocation_id")?,
            crate::require(SkillName::new(skill_name), "skill_name")?,
            args,
        ))
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn invocation_id(&self) -> &InvocationId {
        &self.invocation_id
    }

    pub fn skill_name(&self) -> &SkillName {
        &self.skill_name
    }

    pub fn args(&self) -> &JsonObject {
        &self.args
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Output of a completed skill invocation.
///
/// Decoded from the service response `{invocation_id, output}`; both keys are
/// required. Unknown keys are ignored.
///
/// `output` must be a JSON object. A response whose `output` is a scalar,
/// array, or `null` fails to decode, which the client reports as
/// [`SkillSetError::Unexpected`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillResult {
    invocation_id: String,
    output: JsonObject,
}

impl SkillResult {
    pub fn new(invocation_id: impl Into<String>, output: JsonObject) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            output,
        }
    }

    /// ID of the invocation this result answers.
    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    /// Output produced by the skill.
    pub fn output(&self) -> &JsonObject {
        &self.output
    }

    /// Consumes the result, returning the output map.
    pub fn into_output(self) -> JsonObject {
        self.output
    }
}
