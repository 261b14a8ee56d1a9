//! Streaming reply transport.
//!
//! POSTs the user's message to the per-persona message endpoint and exposes
//! the response body as a byte stream. The body is plain text written in
//! arrival order: no JSON or SSE framing, no message boundaries.
//! Uses browser `fetch()` via gloo-net and reads the body through a
//! `ReadableStreamDefaultReader`.

use async_trait::async_trait;
use futures::stream;
use gloo_net::http::Request;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{ReadableStream, ReadableStreamDefaultReader};

use chat_core::ports::{ByteStream, ReplyRequest, ReplyTransport};
use chat_types::{ChatError, Result, config::ChatConfig, session::ChatContext};

use super::{authorize, ensure_ok};

pub struct HttpReplyTransport {
    config: ChatConfig,
}

impl HttpReplyTransport {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl ReplyTransport for HttpReplyTransport {
    async fn open_reply(&self, ctx: &ChatContext, req: ReplyRequest) -> Result<ByteStream> {
        let url = self.config.message_url(&ctx.persona_id);

        let builder = Request::post(&url).header("Content-Type", "application/json");
        let response = authorize(builder, &ctx.identity)
            .json(&req)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        let response = ensure_ok(response).await.map_err(|e| match e {
            ChatError::Network(_) => e,
            other => ChatError::Network(other.to_string()),
        })?;

        let body = response
            .body()
            .ok_or_else(|| ChatError::Network("Response has no body".to_string()))?;
        Ok(body_stream(body))
    }
}

/// Adapt a JS `ReadableStream` into a Rust stream of read steps.
/// A failed read ends the stream after yielding the error.
fn body_stream(body: ReadableStream) -> ByteStream {
    let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();

    Box::pin(stream::unfold(Some(reader), |state| async move {
        let reader = state?;
        match read_step(&reader).await {
            Ok(Some(bytes)) => Some((Ok(bytes), Some(reader))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    }))
}

/// One `reader.read()`: `Ok(None)` once the body is done.
async fn read_step(reader: &ReadableStreamDefaultReader) -> Result<Option<Vec<u8>>> {
    let result = JsFuture::from(reader.read())
        .await
        .map_err(|e| ChatError::StreamAborted(format!("{:?}", e)))?;

    let done = Reflect::get(&result, &JsValue::from_str("done"))
        .map_err(|e| ChatError::JsInterop(format!("{:?}", e)))?
        .as_bool()
        .unwrap_or(false);
    if done {
        return Ok(None);
    }

    let value = Reflect::get(&result, &JsValue::from_str("value"))
        .map_err(|e| ChatError::JsInterop(format!("{:?}", e)))?;
    Ok(Some(Uint8Array::new(&value).to_vec()))
}
