//! In-memory persistence backend.
//! Lost on page reload. Keyed by (user, persona); each pair owns one chat.
//! Nothing persists on send, so the stream consumer appends both sides.

use std::cell::RefCell;
use std::collections::HashMap;
use async_trait::async_trait;
use chat_core::ports::PersistencePort;
use chat_types::{
    Result,
    message::{Message, Persona},
    session::Identity,
};

struct Chat {
    id: String,
    messages: Vec<Message>,
}

pub struct MemoryStore {
    chats: RefCell<HashMap<(String, String), Chat>>,
    personas: RefCell<HashMap<String, Persona>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            chats: RefCell::new(HashMap::new()),
            personas: RefCell::new(HashMap::new()),
        }
    }

    pub fn insert_persona(&self, persona: Persona) {
        self.personas
            .borrow_mut()
            .insert(persona.id.clone(), persona);
    }

    fn append(&self, identity: &Identity, persona_id: &str, mut message: Message) -> Message {
        let mut chats = self.chats.borrow_mut();
        let chat = chats
            .entry((identity.user_id.clone(), persona_id.to_string()))
            .or_insert_with(|| Chat {
                id: uuid::Uuid::new_v4().to_string(),
                messages: Vec::new(),
            });
        message.id = uuid::Uuid::new_v4().to_string();
        message.chat_id = chat.id.clone();
        chat.messages.push(message.clone());
        message
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl PersistencePort for MemoryStore {
    async fn load_history(&self, identity: &Identity, persona_id: &str) -> Result<Vec<Message>> {
        Ok(self
            .chats
            .borrow()
            .get(&(identity.user_id.clone(), persona_id.to_string()))
            .map(|chat| chat.messages.clone())
            .unwrap_or_default())
    }

    async fn append_user_message(
        &self,
        identity: &Identity,
        persona_id: &str,
        content: &str,
    ) -> Result<Message> {
        Ok(self.append(identity, persona_id, Message::user(content)))
    }

    async fn append_assistant_message(
        &self,
        identity: &Identity,
        persona_id: &str,
        content: &str,
    ) -> Result<Message> {
        let mut message = Message::assistant_placeholder();
        message.content = content.to_string();
        Ok(self.append(identity, persona_id, message))
    }

    async fn get_persona(&self, _identity: &Identity, persona_id: &str) -> Result<Option<Persona>> {
        Ok(self.personas.borrow().get(persona_id).cloned())
    }

    fn persists_on_send(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
