use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Tags every event produced by one send, so events from an outdated send
/// can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SendId(pub u64);

/// How a reply stream ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyOutcome {
    /// The transport signalled the end of the body
    Completed,
    /// The request or the stream failed; partial content is kept
    Failed(String),
}

/// Events emitted by the stream consumer.
/// The conversation owner drains these and applies them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The request was accepted and the body is being read
    ReplyStart { send_id: SendId },

    /// A decoded piece of the assistant reply
    ReplyChunk { send_id: SendId, text: String },

    /// The reply stream terminated
    ReplyEnd { send_id: SendId, outcome: ReplyOutcome },

    /// Canonical history after the reply; `None` when the reload failed
    HistorySynced {
        send_id: SendId,
        messages: Option<Vec<Message>>,
    },
}

impl ChatEvent {
    pub fn send_id(&self) -> SendId {
        match self {
            ChatEvent::ReplyStart { send_id }
            | ChatEvent::ReplyChunk { send_id, .. }
            | ChatEvent::ReplyEnd { send_id, .. }
            | ChatEvent::HistorySynced { send_id, .. } => *send_id,
        }
    }
}
