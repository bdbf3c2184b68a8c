//! Chatrelay core — caller-facing chat types, the function envelope, errors and config.
//!
//! # Modules
//!
//! - [`types`] — `ChatMessage`, `ChatRequest`, `ChatReply`
//! - [`event`] — HTTP-triggered function event and response envelope
//! - [`error`] — the closed `ChatError` enumeration and its response mapping
//! - [`config`] — provider settings, loaded from an optional JSON file + env vars
//! - [`utils`] — string helpers

pub mod config;
pub mod error;
pub mod event;
pub mod types;
pub mod utils;

pub use error::ChatError;
pub use event::{FunctionEvent, FunctionResponse};
pub use types::{ChatMessage, ChatReply, ChatRequest};
