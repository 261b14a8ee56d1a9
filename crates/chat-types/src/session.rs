use serde::{Deserialize, Serialize};

/// The authenticated user, as resolved by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    /// Bearer token forwarded to the server, if the session has one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Everything a collaborator call needs to know about the current
/// conversation. Passed explicitly; nothing is looked up globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub persona_id: String,
    pub identity: Identity,
}

impl ChatContext {
    pub fn new(persona_id: impl Into<String>, identity: Identity) -> Self {
        Self {
            persona_id: persona_id.into(),
            identity,
        }
    }
}
