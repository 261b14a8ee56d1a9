use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Stream aborted: {0}")]
    StreamAborted(String),

    #[error("Empty input")]
    EmptyInput,

    #[error("A reply is already streaming")]
    ConcurrentSendRejected,

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl ChatError {
    /// Guard rejections are expected control flow, not failures.
    pub fn is_guard(&self) -> bool {
        matches!(self, ChatError::EmptyInput | ChatError::ConcurrentSendRejected)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
