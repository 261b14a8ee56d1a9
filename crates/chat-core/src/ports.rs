//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use chat_types::{
    Result,
    message::{Message, Persona},
    session::{ChatContext, Identity},
};

// ─── Reply Transport Port ────────────────────────────────────

/// Raw reply body. Each item is one read step: a chunk of bytes, or the
/// error that ended the read.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>>>>>;

/// JSON body posted to the per-persona message endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyRequest {
    pub message: String,
    #[serde(rename = "personId")]
    pub person_id: String,
}

impl ReplyRequest {
    pub fn new(message: impl Into<String>, person_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            person_id: person_id.into(),
        }
    }
}

#[async_trait(?Send)]
pub trait ReplyTransport {
    /// Dispatch the user's message and open the streamed reply body.
    ///
    /// Fails with `ChatError::Network` when the request cannot be sent or
    /// the response cannot be opened.
    async fn open_reply(&self, ctx: &ChatContext, req: ReplyRequest) -> Result<ByteStream>;
}

// ─── Persistence Port ────────────────────────────────────────

#[async_trait(?Send)]
pub trait PersistencePort {
    /// Conversation history with a persona, oldest first
    async fn load_history(&self, identity: &Identity, persona_id: &str) -> Result<Vec<Message>>;

    /// Persist a user message and return the canonical copy
    async fn append_user_message(
        &self,
        identity: &Identity,
        persona_id: &str,
        content: &str,
    ) -> Result<Message>;

    /// Persist a finished assistant reply and return the canonical copy
    async fn append_assistant_message(
        &self,
        identity: &Identity,
        persona_id: &str,
        content: &str,
    ) -> Result<Message>;

    async fn get_persona(&self, identity: &Identity, persona_id: &str) -> Result<Option<Persona>>;

    /// Whether the reply endpoint already stores both sides of an exchange.
    /// When false the stream consumer appends them through this port.
    fn persists_on_send(&self) -> bool;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Auth Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait AuthPort {
    /// The signed-in user, or `ChatError::Unauthenticated`
    async fn current_identity(&self) -> Result<Identity>;
}
