//! Read side of the persistence collaborator over HTTP.
//!
//! History and persona records are fetched from the server. The message
//! endpoint persists both sides of an exchange itself, so this adapter
//! reports `persists_on_send` and refuses direct appends.

use async_trait::async_trait;
use gloo_net::http::Request;

use chat_core::ports::PersistencePort;
use chat_types::{
    ChatError, Result,
    config::ChatConfig,
    message::{Message, Persona},
    session::Identity,
};

use super::{authorize, ensure_ok};

pub struct HttpHistory {
    config: ChatConfig,
}

impl HttpHistory {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl PersistencePort for HttpHistory {
    async fn load_history(&self, identity: &Identity, persona_id: &str) -> Result<Vec<Message>> {
        let url = self.config.history_url(persona_id);
        let response = authorize(Request::get(&url), identity)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        let response = ensure_ok(response).await?;

        let mut messages: Vec<Message> = response
            .json()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))?;
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn append_user_message(
        &self,
        _identity: &Identity,
        _persona_id: &str,
        _content: &str,
    ) -> Result<Message> {
        Err(ChatError::Storage(
            "user messages are persisted by the message endpoint".to_string(),
        ))
    }

    async fn append_assistant_message(
        &self,
        _identity: &Identity,
        _persona_id: &str,
        _content: &str,
    ) -> Result<Message> {
        Err(ChatError::Storage(
            "replies are persisted by the message endpoint".to_string(),
        ))
    }

    async fn get_persona(&self, identity: &Identity, persona_id: &str) -> Result<Option<Persona>> {
        let url = self.config.persona_url(persona_id);
        let response = authorize(Request::get(&url), identity)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        if response.status() == 404 {
            return Ok(None);
        }
        let response = ensure_ok(response).await?;

        let persona: Persona = response
            .json()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))?;
        Ok(Some(persona))
    }

    fn persists_on_send(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
