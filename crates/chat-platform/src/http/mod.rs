pub mod reply;
pub mod history;

pub use reply::HttpReplyTransport;
pub use history::HttpHistory;

use gloo_net::http::{RequestBuilder, Response};
use chat_types::{ChatError, Result, session::Identity};

/// Attach the identity's bearer token, when it has one.
pub(crate) fn authorize(builder: RequestBuilder, identity: &Identity) -> RequestBuilder {
    match &identity.token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Turn a non-2xx response into an error, keeping the body for the log.
pub(crate) async fn ensure_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    if status == 401 {
        return Err(ChatError::Unauthenticated);
    }
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ChatError::Network(format!("HTTP {}: {}", status, text)))
}
