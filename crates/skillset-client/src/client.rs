//! The public client: three operations over one [`RequestExecutor`].

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use skillset::{
    require, ContextName, InvocationId, JsonObject, SessionId, SkillInvocation, SkillResult,
    SkillSetError, SkillSetService,
};

use crate::config::ClientConfig;
use crate::executor::RequestExecutor;
use crate::routes;

/// Client for the SkillSet service on a local Unix domain socket.
///
/// Reuse the session and invocation IDs handed to the running skill by the
/// hosting service. The client keeps no connection between calls, so a single
/// instance may be shared (e.g. behind an `Arc`) by concurrent tasks.
#[derive(Debug, Clone)]
pub struct SkillSetClient {
    executor: RequestExecutor,
}

impl SkillSetClient {
    /// Creates a client with default timeouts and retries.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSetError::Validation`] if `socket_path` is empty.
    pub fn new(socket_path: impl Into<PathBuf>) -> Result<Self, SkillSetError> {
        Ok(Self::with_config(ClientConfig::builder(socket_path).build()?))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            executor: RequestExecutor::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Invokes `skill_name` with `args` and returns its output.
    ///
    /// # Errors
    ///
    /// - [`SkillSetError::Validation`] if any identifier is empty (before any I/O).
    /// - Transport and API errors from [`RequestExecutor::execute`].
    /// - [`SkillSetError::Unexpected`] if the response lacks `invocation_id` or `output`.
    pub async fn invoke_skill(
        &self,
        session_id: &str,
        invocation_id: &str,
        skill_name: &str,
        args: JsonObject,
    ) -> Result<SkillResult, SkillSetError> {
        let invocation = SkillInvocation::from_parts(session_id, invocation_id, skill_name, args)?;
        self.invoke(invocation).await
    }

    /// Lists the skills available to `session_id`.
    ///
    /// # Errors
    ///
    /// [`SkillSetError::Validation`] if `session_id` is empty; otherwise any
    /// error from the request, or [`SkillSetError::Unexpected`] if the body is
    /// not a JSON array.
    pub async fn get_skills(&self, session_id: &str) -> Result<Vec<Value>, SkillSetError> {
        let session_id = require(SessionId::new(session_id), "session_id")?;
        self.skills(&session_id).await
    }

    /// Fetches context entry `name` for an invocation.
    ///
    /// # Errors
    ///
    /// [`SkillSetError::Validation`] if any argument is empty; otherwise any
    /// error from the request.
    pub async fn get_context(
        &self,
        session_id: &str,
        invocation_id: &str,
        name: &str,
    ) -> Result<Value, SkillSetError> {
        let session_id = require(SessionId::new(session_id), "session_id")?;
        let invocation_id = require(InvocationId::new(invocation_id), "invocation_id")?;
        let name = require(ContextName::new(name), "name")?;
        self.context(&session_id, &invocation_id, &name).await
    }

    async fn invoke(&self, invocation: SkillInvocation) -> Result<SkillResult, SkillSetError> {
        let body = serde_json::to_value(&invocation)
            .map_err(|e| SkillSetError::unexpected(format!("Failed to invoke skill: {e}")))?;
        let value = self
            .executor
            .execute(Method::POST, routes::SKILL_INVOCATIONS, Some(&body))
            .await?;
        serde_json::from_value(value)
            .map_err(|e| SkillSetError::unexpected(format!("Failed to invoke skill: {e}")))
    }

    async fn skills(&self, session_id: &SessionId) -> Result<Vec<Value>, SkillSetError> {
        let target = routes::target(routes::SKILLS, &[("session_id", session_id.as_str())])?;
        let value = self.executor.execute(Method::GET, &target, None).await?;
        serde_json::from_value(value)
            .map_err(|e| SkillSetError::unexpected(format!("Failed to get skills: {e}")))
    }

    async fn context(
        &self,
        session_id: &SessionId,
        invocation_id: &InvocationId,
        name: &ContextName,
    ) -> Result<Value, SkillSetError> {
        let target = routes::target(
            routes::CONTEXT,
            &[
                ("session_id", session_id.as_str()),
                ("invocation_id", invocation_id.as_str()),
                ("name", name.as_str()),
            ],
        )?;
        self.executor.execute(Method::GET, &target, None).await
    }
}

#[async_trait]
impl SkillSetService for SkillSetClient {
    async fn invoke_skill(
        &self,
        invocation: SkillInvocation,
    ) -> Result<SkillResult, SkillSetError> {
        self.invoke(invocation).await
    }

    async fn list_skills(&self, session_id: &SessionId) -> Result<Vec<Value>, SkillSetError> {
        self.skills(session_id).await
    }

    async fn get_context(
        &self,
        session_id: &SessionId,
        invocation_id: &InvocationId,
        name: &ContextName,
    ) -> Result<Value, SkillSetError> {
        self.context(session_id, invocation_id, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens here; validation must fail before the executor dials.
    fn client() -> SkillSetClient {
        let config = ClientConfig::builder("/nonexistent/skillset-test.sock")
            .max_retries(1)
            .retry_delay(std::time::Duration::ZERO)
            .build()
            .unwrap();
        SkillSetClient::with_config(config)
    }

    #[test]
    fn new_rejects_empty_socket_path() {
        let err = SkillSetClient::new("").unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn invoke_skill_validates_each_identifier() {
        let c = client();
        for (s, i, n, field) in [
            ("", "i", "n", "session_id"),
            ("s", "", "n", "invocation_id"),
            ("s", "i", "", "skill_name"),
        ] {
            let err = c.invoke_skill(s, i, n, JsonObject::new()).await.unwrap_err();
            assert_eq!(err, SkillSetError::validation(format!("{field} is required")));
        }
    }

    #[tokio::test]
    async fn get_skills_validates_session() {
        let err = client().get_skills("").await.unwrap_err();
        assert_eq!(err, SkillSetError::validation("session_id is required"));
    }

    #[tokio::test]
    async fn get_context_validates_name() {
        let err = client().get_context("s", "i", "").await.unwrap_err();
        assert_eq!(err, SkillSetError::validation("name is required"));
    }

    #[tokio::test]
    async fn missing_socket_exhausts_retries_with_connection_error() {
        let err = client().get_skills("s1").await.unwrap_err();
        match err {
            SkillSetError::RetryExhausted {
                method,
                path,
                attempts,
                last_error,
            } => {
                assert_eq!(method, "GET");
                assert_eq!(path, "/skills?session_id=s1");
                assert_eq!(attempts, 1);
                assert!(matches!(*last_error, SkillSetError::Connection { .. }));
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }
}
