//! UI-level state that drives rendering.
//! Owns the conversation and applies events drained from the EventBus
//! each frame; rows are recomputed from it on every render.

use chrono::{DateTime, Utc};
use chat_core::bubble::{shape, PhysicalCorners};
use chat_core::conversation::{Conversation, Phase, SendTicket};
use chat_core::segment::segment;
use chat_types::event::ChatEvent;
use chat_types::message::{Message, Persona, Role};

/// State visible to UI panels
pub struct UiState {
    pub conversation: Conversation,
    /// Persona on the other side; `None` until loaded
    pub persona: Option<Persona>,
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// Label above the user's own bubbles
    pub user_label: String,
    seeded: bool,
}

/// One message as drawn: sender label plus its shaped bubbles
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub role: Role,
    pub label: String,
    pub bubbles: Vec<Bubble>,
    /// Reply requested but no text has arrived yet
    pub typing: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub text: String,
    pub corners: PhysicalCorners,
}

impl UiState {
    pub fn new(user_label: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            persona: None,
            input_text: String::new(),
            status_text: "Loading...".to_string(),
            user_label: user_label.into(),
            seeded: false,
        }
    }

    /// Seed from persisted history on mount. Later calls are ignored.
    pub fn seed_once(&mut self, persona: Option<Persona>, history: Vec<Message>) -> bool {
        if self.seeded {
            return false;
        }
        self.seeded = true;
        self.persona = persona;
        self.conversation.seed(history);
        self.status_text = "Ready".to_string();
        true
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Apply drained events. Returns true if a repaint is needed.
    pub fn process_events(&mut self, events: Vec<ChatEvent>) -> bool {
        if events.is_empty() {
            return false;
        }
        let changed = self.conversation.apply_all(events);
        self.refresh_status();
        changed
    }

    fn refresh_status(&mut self) {
        self.status_text = match self.conversation.phase() {
            Phase::Idle => "Ready".to_string(),
            Phase::Streaming(_) => format!("{} is typing...", self.assistant_label()),
            Phase::Syncing(_) => "Syncing...".to_string(),
        };
    }

    /// Take the composer input and start a send. Returns `None` (and
    /// leaves everything untouched) before the chat has loaded, when the
    /// input is empty, or while a reply is still in progress.
    pub fn submit(&mut self) -> Option<SendTicket> {
        if !self.is_seeded() {
            log::debug!("Submit ignored: chat not loaded");
            return None;
        }
        let text = self.input_text.trim().to_string();
        match self.conversation.begin_send(&text) {
            Ok(ticket) => {
                self.input_text.clear();
                self.refresh_status();
                Some(ticket)
            }
            Err(e) if e.is_guard() => {
                log::debug!("Submit ignored: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Submit failed: {}", e);
                None
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.conversation.is_busy()
    }

    pub fn can_send(&self) -> bool {
        self.is_seeded() && !self.input_text.trim().is_empty() && !self.is_busy()
    }

    pub fn assistant_label(&self) -> &str {
        self.persona
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("Assistant")
    }

    /// Prompt to show instead of bubbles while the conversation is empty
    pub fn placeholder_prompt(&self) -> Option<String> {
        if !self.conversation.is_empty() {
            return None;
        }
        self.persona.as_ref().map(|p| p.display_prompt())
    }

    /// Rows in chronological order; the newest sits next to the composer.
    pub fn rows(&self) -> Vec<MessageRow> {
        let messages = self.conversation.messages();
        // the in-flight message is always the last one
        let streaming_at = self.conversation.in_flight().map(|_| messages.len() - 1);
        messages
            .iter()
            .enumerate()
            .filter_map(|(i, msg)| self.row(msg, streaming_at == Some(i)))
            .collect()
    }

    fn row(&self, msg: &Message, streaming: bool) -> Option<MessageRow> {
        // whitespace-only fragments (e.g. a trailing space mid-stream) get no bubble
        let fragments = segment(&msg.content);
        let texts: Vec<&str> = fragments
            .iter()
            .map(|f| f.display_text())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() && !streaming {
            return None;
        }

        let count = texts.len();
        let bubbles = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Bubble {
                text: text.to_string(),
                corners: shape(i, count, msg.role).to_physical(),
            })
            .collect();

        let label = match msg.role {
            Role::User => self.user_label.clone(),
            Role::Assistant => self.assistant_label().to_string(),
        };

        Some(MessageRow {
            role: msg.role,
            label,
            bubbles,
            typing: streaming && count == 0,
            created_at: msg.created_at,
        })
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new("You")
    }
}
