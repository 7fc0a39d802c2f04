// src/export/identity.rs
//! Caller authentication. The identity provider itself is external; this
//! is only the seam the orchestrator talks to.

use super::plans::Plan;
use super::types::Caller;
use crate::error::AppError;
use crate::types::UserId;

#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve `credentials` to a caller, or fail with
    /// [`AppError::Unauthorized`].
    async fn authenticate(&self, credentials: Option<&str>) -> Result<Caller, AppError>;
}

/// Authenticates everyone as one fixed caller, optionally behind a shared
/// token. This is what the CLI uses.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    caller: Caller,
    required_token: Option<String>,
}

impl StaticAuthenticator {
    pub fn new(user_id: UserId, plan: Plan) -> Self {
        Self {
            caller: Caller { user_id, plan },
            required_token: None,
        }
    }

    /// Callers must then present exactly `token`.
    pub fn with_required_token(mut self, token: impl Into<String>) -> Self {
        self.required_token = Some(token.into());
        self
    }
}

#[async_trait::async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, credentials: Option<&str>) -> Result<Caller, AppError> {
        match (&self.required_token, credentials) {
            (None, _) => Ok(self.caller.clone()),
            (Some(expected), Some(given)) if expected == given => Ok(self.caller.clone()),
            (Some(_), _) => {
                log::warn!("Rejected caller {}: bad or missing token", self.caller.user_id);
                Err(AppError::Unauthorized)
            }
        }
    }
}
