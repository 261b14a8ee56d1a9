//! Stream consumer — reads one reply body and feeds it to the event bus.
//!
//! One call handles one send:
//! 1. POST the user's text through the reply transport
//! 2. Read the body chunk by chunk, decode, emit `ReplyChunk` per chunk
//! 3. Emit `ReplyEnd` with the outcome (errors are reported, not raised)
//! 4. Reload history from the persistence side and emit `HistorySynced`
//!
//! Backends that do not store messages on send get the user message
//! before the POST and whatever reply text arrived after the read loop.
//!
//! This is async and must be spawned via `wasm_bindgen_futures::spawn_local`.
//! It never touches conversation state directly.

use futures::StreamExt;
use chat_types::{
    ChatError, Result,
    event::{ChatEvent, ReplyOutcome, SendId},
    session::ChatContext,
};
use crate::conversation::SendTicket;
use crate::decode::Utf8ChunkDecoder;
use crate::event_bus::EventBus;
use crate::ports::{PersistencePort, ReplyRequest, ReplyTransport};

/// Run a full send for `ticket`, returning how the reply stream ended.
pub async fn stream_reply(
    ctx: &ChatContext,
    ticket: SendTicket,
    transport: &dyn ReplyTransport,
    store: &dyn PersistencePort,
    bus: &EventBus,
) -> ReplyOutcome {
    let send_id = ticket.send_id;
    log::info!("Send {} to persona {}", send_id.0, ctx.persona_id);

    let local = !store.persists_on_send();
    if local {
        if let Err(e) = store
            .append_user_message(&ctx.identity, &ctx.persona_id, &ticket.text)
            .await
        {
            log::warn!("Storing send {} in {} failed: {}", send_id.0, store.backend_name(), e);
        }
    }

    let mut reply = String::new();
    let outcome = match read_reply(ctx, &ticket, transport, bus, &mut reply).await {
        Ok(()) => {
            log::info!("Reply {} complete: {} bytes", send_id.0, reply.len());
            ReplyOutcome::Completed
        }
        Err(e) => {
            log::warn!("Reply {} stopped early: {}", send_id.0, e);
            ReplyOutcome::Failed(e.to_string())
        }
    };
    bus.emit(ChatEvent::ReplyEnd {
        send_id,
        outcome: outcome.clone(),
    });

    if local && !reply.is_empty() {
        if let Err(e) = store
            .append_assistant_message(&ctx.identity, &ctx.persona_id, &reply)
            .await
        {
            log::warn!("Storing reply {} in {} failed: {}", send_id.0, store.backend_name(), e);
        }
    }

    let messages = match store.load_history(&ctx.identity, &ctx.persona_id).await {
        Ok(messages) => Some(messages),
        Err(e) => {
            log::warn!(
                "History reload from {} failed after send {}: {}",
                store.backend_name(),
                send_id.0,
                e
            );
            None
        }
    };
    bus.emit(ChatEvent::HistorySynced { send_id, messages });

    outcome
}

/// The cooperative read loop. Decoded text is emitted and collected into
/// `reply`, which keeps whatever arrived if the read fails.
async fn read_reply(
    ctx: &ChatContext,
    ticket: &SendTicket,
    transport: &dyn ReplyTransport,
    bus: &EventBus,
    reply: &mut String,
) -> Result<()> {
    let send_id = ticket.send_id;
    let req = ReplyRequest::new(&ticket.text, &ctx.persona_id);
    let mut body = transport.open_reply(ctx, req).await?;
    bus.emit(ChatEvent::ReplyStart { send_id });

    let mut decoder = Utf8ChunkDecoder::new();

    while let Some(step) = body.next().await {
        match step {
            Ok(bytes) => {
                let text = decoder.push(&bytes);
                emit_chunk(bus, send_id, text, reply);
            }
            Err(e @ ChatError::StreamAborted(_)) => return Err(e),
            Err(other) => return Err(ChatError::StreamAborted(other.to_string())),
        }
    }

    emit_chunk(bus, send_id, decoder.finish(), reply);
    Ok(())
}

fn emit_chunk(bus: &EventBus, send_id: SendId, text: String, reply: &mut String) {
    if text.is_empty() {
        return;
    }
    log::debug!("Reply {} chunk: {} bytes", send_id.0, text.len());
    reply.push_str(&text);
    bus.emit(ChatEvent::ReplyChunk { send_id, text });
}
