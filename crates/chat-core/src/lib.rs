pub mod ports;
pub mod event_bus;
pub mod segment;
pub mod bubble;
pub mod decode;
pub mod stream;
pub mod conversation;
