//! Upstream provider layer for Chatrelay.
//!
//! # Architecture
//!
//! - [`traits::ChatProvider`] — trait both upstream clients implement
//! - [`openai::OpenAiProvider`] — OpenAI chat completions
//! - [`yandex::YandexGptProvider`] — YandexGPT foundation models completion
//! - [`registry`] — static specs for the two providers + construction
//! - [`handler`] — request dispatch (CORS, method routing) and the two function entry points

pub mod handler;
pub mod openai;
pub mod registry;
pub mod traits;
pub mod yandex;

mod transport;

// Re-export main types for convenience
pub use handler::{handle, openai_handler, yandex_handler};
pub use openai::OpenAiProvider;
pub use registry::{create_provider, find_by_name, ProviderKind, ProviderSpec, PROVIDERS};
pub use traits::ChatProvider;
pub use yandex::YandexGptProvider;
