use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::default_prompt;

/// Sender of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in a conversation.
///
/// `id` is empty until the persistence side has confirmed the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub chat_id: String,
    pub role: Role,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Optimistic user message, stamped with the local clock.
    pub fn user(text: impl Into<String>) -> Self {
        Self::pending(Role::User, text.into())
    }

    /// Empty assistant message that receives streamed content.
    pub fn assistant_placeholder() -> Self {
        Self::pending(Role::Assistant, String::new())
    }

    fn pending(role: Role, content: String) -> Self {
        Self {
            id: String::new(),
            chat_id: String::new(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    /// True until the persistence collaborator has assigned an id.
    pub fn is_pending(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// The synthetic character on the other side of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub prompt: String,
}

impl Persona {
    /// Prompt shown when the conversation is still empty.
    pub fn display_prompt(&self) -> String {
        if self.prompt.trim().is_empty() {
            default_prompt(&self.name)
        } else {
            self.prompt.clone()
        }
    }

    /// Single uppercase letter used when no avatar image is loaded.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}
