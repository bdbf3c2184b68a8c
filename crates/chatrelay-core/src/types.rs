//! Caller-facing chat types.
//!
//! The caller sends `{"messages": [{"role": ..., "content": ...}, ...]}` and
//! receives `{"message": ..., "model": ..., "usage": {...}}` regardless of which
//! upstream provider served the request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ChatError, MESSAGES_REQUIRED};

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// One turn of the caller's conversation.
///
/// `role` is passed through as-is; no set of roles is enforced. Any other
/// fields of the entry (e.g. `name`) are kept in `extra` and serialized back
/// alongside `role` and `content`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

// ─────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────

/// A validated chat request. `messages` is never empty.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Build a request from already-typed messages.
    ///
    /// Returns a validation error when `messages` is empty.
    pub fn new(messages: Vec<ChatMessage>) -> Result<Self, ChatError> {
        if messages.is_empty() {
            return Err(ChatError::Validation(MESSAGES_REQUIRED.to_string()));
        }
        Ok(ChatRequest { messages })
    }

    /// Parse and validate a raw request body.
    ///
    /// A missing body, non-JSON body, or a missing/empty/non-array `messages`
    /// field all yield [`MESSAGES_REQUIRED`]. Entries that are not
    /// `{role: string, content: string}` are rejected with their index.
    pub fn from_body(body: Option<&str>) -> Result<Self, ChatError> {
        let required = || ChatError::Validation(MESSAGES_REQUIRED.to_string());

        let body = body.map(str::trim).filter(|b| !b.is_empty()).ok_or_else(required)?;
        let raw: Value = serde_json::from_str(body).map_err(|_| required())?;

        let entries = raw
            .get("messages")
            .and_then(Value::as_array)
            .filter(|entries| !entries.is_empty())
            .ok_or_else(required)?;

        let messages = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                ChatMessage::deserialize(entry).map_err(|e| {
                    ChatError::Validation(format!("Invalid message at index {i}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChatRequest { messages })
    }
}

// ─────────────────────────────────────────────
// Reply
// ─────────────────────────────────────────────

/// The normalized success body returned to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    /// Text of the first upstream candidate.
    pub message: String,
    /// Model name reported by (or configured for) the upstream.
    pub model: String,
    /// Token accounting, echoed from upstream without reinterpretation.
    #[serde(default)]
    pub usage: Map<String, Value>,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
