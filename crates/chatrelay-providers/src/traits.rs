//! Chat provider trait — the seam between the dispatcher and an upstream API.

use async_trait::async_trait;
use chatrelay_core::{ChatError, ChatReply, ChatRequest};

/// An upstream LLM API that turns a caller's conversation into one reply.
///
/// Implementations make exactly one upstream call per `complete` and never retry.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Fail with [`ChatError::Config`] when credentials are missing.
    ///
    /// The dispatcher calls this before touching the request body, so a
    /// misconfigured function never reaches the network.
    fn ensure_configured(&self) -> Result<(), ChatError>;

    /// Send the conversation upstream and return the first candidate.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
