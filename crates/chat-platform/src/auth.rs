//! Auth collaborator adapters.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use chat_core::ports::AuthPort;
use chat_types::{ChatError, Result, config::ChatConfig, session::Identity};

/// Resolves the signed-in user from the server's session endpoint.
/// An empty session object means nobody is signed in.
pub struct SessionAuth {
    config: ChatConfig,
}

impl SessionAuth {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl AuthPort for SessionAuth {
    async fn current_identity(&self) -> Result<Identity> {
        let response = Request::get(&self.config.session_url())
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(ChatError::Network(format!("HTTP {}", response.status())));
        }

        let session: Value = response
            .json()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))?;
        identity_from_session(&session)
    }
}

/// Extract the identity from a session payload.
pub fn identity_from_session(session: &Value) -> Result<Identity> {
    let user_id = session["user"]["id"]
        .as_str()
        .filter(|id| !id.is_empty())
        .ok_or(ChatError::Unauthenticated)?;

    let identity = Identity::new(user_id);
    Ok(match session["accessToken"].as_str() {
        Some(token) => identity.with_token(token),
        None => identity,
    })
}

/// Always resolves to the same identity. Paired with the memory backend.
pub struct StaticAuth {
    identity: Option<Identity>,
}

impl StaticAuth {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

#[async_trait(?Send)]
impl AuthPort for StaticAuth {
    async fn current_identity(&self) -> Result<Identity> {
        self.identity.clone().ok_or(ChatError::Unauthenticated)
    }
}
