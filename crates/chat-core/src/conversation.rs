//! Conversation state — the ordered message list driving re-render.
//!
//! Owned exclusively by the UI session. It is mutated only by seeding from
//! persisted history, by `begin_send` (optimistic append), and by applying
//! events drained from the `EventBus`.
//!
//! Phases: `Idle → Streaming → Syncing → Idle`. A failed reply takes the
//! same path; it just ends with less content. The exchange of a failed
//! reply survives the resync even when the server never stored it.

use chat_types::{
    ChatError, Result,
    event::{ChatEvent, ReplyOutcome, SendId},
    message::{Message, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Reply body is being read into the trailing assistant message
    Streaming(SendId),
    /// Reply finished, waiting for canonical history
    Syncing(SendId),
}

/// Handed out by `begin_send`; carries what the stream consumer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    pub send_id: SendId,
    pub text: String,
}

pub struct Conversation {
    messages: Vec<Message>,
    phase: Phase,
    send_counter: u64,
    /// User message and partial reply of a failed send, held until resync
    unconfirmed: Option<(Message, Message)>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Idle,
            send_counter: 0,
            unconfirmed: None,
        }
    }

    pub fn seeded(history: Vec<Message>) -> Self {
        let mut conversation = Self::new();
        conversation.seed(history);
        conversation
    }

    /// Replace everything with persisted history. Any send still running
    /// is orphaned: its remaining events no longer match and are ignored.
    pub fn seed(&mut self, history: Vec<Message>) {
        self.messages = history;
        self.phase = Phase::Idle;
        self.unconfirmed = None;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Send the conversation is currently tracking, if any.
    pub fn current_send(&self) -> Option<SendId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Streaming(id) | Phase::Syncing(id) => Some(id),
        }
    }

    /// The assistant message currently receiving content, if any.
    pub fn in_flight(&self) -> Option<&Message> {
        match self.phase {
            Phase::Streaming(_) => self.messages.last(),
            _ => None,
        }
    }

    /// Guard, then optimistically append the user message and an empty
    /// assistant placeholder. Nothing is mutated when the guard rejects.
    pub fn begin_send(&mut self, text: &str) -> Result<SendTicket> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.is_busy() {
            return Err(ChatError::ConcurrentSendRejected);
        }

        self.send_counter += 1;
        let send_id = SendId(self.send_counter);
        self.messages.push(Message::user(text));
        self.messages.push(Message::assistant_placeholder());
        self.phase = Phase::Streaming(send_id);

        Ok(SendTicket {
            send_id,
            text: text.to_string(),
        })
    }

    /// Apply one event. Returns true if anything visible changed.
    pub fn apply(&mut self, event: ChatEvent) -> bool {
        let send_id = event.send_id();
        if self.current_send() != Some(send_id) {
            log::debug!("Ignoring event from stale send {}", send_id.0);
            return false;
        }

        match event {
            ChatEvent::ReplyStart { .. } => false,
            ChatEvent::ReplyChunk { text, .. } => {
                if self.phase != Phase::Streaming(send_id) {
                    return false;
                }
                match self.messages.last_mut() {
                    Some(last) if last.role == Role::Assistant => {
                        last.content.push_str(&text);
                        true
                    }
                    _ => false,
                }
            }
            ChatEvent::ReplyEnd { outcome, .. } => {
                if self.phase != Phase::Streaming(send_id) {
                    return false;
                }
                if let ReplyOutcome::Failed(_) = outcome {
                    self.unconfirmed = self.trailing_pair();
                }
                self.phase = Phase::Syncing(send_id);
                true
            }
            ChatEvent::HistorySynced { messages, .. } => {
                if self.phase != Phase::Syncing(send_id) {
                    return false;
                }
                let unconfirmed = self.unconfirmed.take();
                if let Some(mut canonical) = messages {
                    if let Some((user, reply)) = unconfirmed {
                        keep_unconfirmed(&mut canonical, user, reply);
                    }
                    self.messages = canonical;
                }
                self.phase = Phase::Idle;
                true
            }
        }
    }

    /// The optimistic user/assistant pair appended by `begin_send`
    fn trailing_pair(&self) -> Option<(Message, Message)> {
        match self.messages.as_slice() {
            [.., user, reply] if user.role == Role::User && reply.role == Role::Assistant => {
                Some((user.clone(), reply.clone()))
            }
            _ => None,
        }
    }

    /// Apply a drained batch in order. Returns true if anything changed.
    pub fn apply_all(&mut self, events: Vec<ChatEvent>) -> bool {
        events
            .into_iter()
            .fold(false, |changed, event| self.apply(event) || changed)
    }
}

/// Re-attach the exchange of a failed send to canonical history. The
/// server may have stored the user message, both sides, or nothing.
fn keep_unconfirmed(canonical: &mut Vec<Message>, user: Message, reply: Message) {
    let stored_user = match canonical.as_slice() {
        [.., last] if last.role == Role::User => last.content == user.content,
        [.., prev, last] if prev.role == Role::User && prev.content == user.content => {
            // the reply was stored too, at least as far as it reached us
            if last.content.starts_with(&reply.content) {
                return;
            }
            true
        }
        _ => false,
    };

    if !stored_user {
        canonical.push(user);
    }
    if !reply.content.is_empty() {
        canonical.push(reply);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
