//! Browser adapters for the chat-core ports.

pub mod http;
pub mod auth;
pub mod storage;
