use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Where history, personas and the signed-in user come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Session, history and persona endpoints of the chat server
    #[default]
    Server,
    /// Browser memory with a fixed local user; replies still come from the server
    Memory,
}

impl FromStr for Backend {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" | "" => Ok(Backend::Server),
            "memory" => Ok(Backend::Memory),
            other => Err(ChatError::Config(format!("unknown backend {:?}", other))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Server origin; empty means same origin as the page
    pub api_base: String,
    /// Sender label shown above the user's own bubbles
    pub user_label: String,
    #[serde(default)]
    pub backend: Backend,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            user_label: "You".to_string(),
            backend: Backend::Server,
        }
    }
}

impl ChatConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Streaming reply endpoint for a persona
    pub fn message_url(&self, persona_id: &str) -> String {
        format!("{}/chat/{}/message", self.base(), persona_id)
    }

    /// Persisted history of the current user's chat with a persona
    pub fn history_url(&self, persona_id: &str) -> String {
        format!("{}/chat/{}/messages", self.base(), persona_id)
    }

    pub fn persona_url(&self, persona_id: &str) -> String {
        format!("{}/api/persons/{}", self.base(), persona_id)
    }

    pub fn session_url(&self) -> String {
        format!("{}/api/auth/session", self.base())
    }
}

/// Prompt used for personas that were created without one.
pub fn default_prompt(name: &str) -> String {
    format!(
        "You are {name}. Stay in character for the whole conversation.\n\
         Answer the way {name} would: short, casual messages, like texting a friend.\n\
         Never mention that you are an AI or a language model."
    )
}

/// Persona id from a page path of the form `/chat/{id}` (trailing
/// segments such as `/chat/{id}/edit` are ignored).
pub fn persona_id_from_path(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("chat"), Some(id)) if id != "start" => Some(id.to_string()),
        _ => None,
    }
}
