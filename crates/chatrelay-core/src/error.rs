//! Error kinds for a single function invocation.
//!
//! Every failure a handler can hit is one of these variants, and each variant
//! maps to exactly one status code and body shape. Nothing escapes the handler
//! as a raw error.

use serde_json::{json, Value};
use thiserror::Error;

/// Returned when the request body has no usable `messages` array.
pub const MESSAGES_REQUIRED: &str = "Messages array is required";

/// Returned by the OpenAI function when `OPENAI_API_KEY` is missing.
pub const OPENAI_NOT_CONFIGURED: &str = "OpenAI API key not configured";

/// Returned by the YandexGPT function when the key or folder id is missing.
pub const YANDEX_NOT_CONFIGURED: &str = "Yandex API credentials not configured";

/// Default `type` for upstream HTTP errors that don't carry one.
pub const DEFAULT_ERROR_TYPE: &str = "api_error";

/// A failure while serving one chat request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatError {
    /// Credentials missing from the environment.
    #[error("{0}")]
    Config(String),

    /// The caller's body is malformed.
    #[error("{0}")]
    Validation(String),

    /// Upstream answered with a non-2xx status.
    #[error("{message} (status {status})")]
    UpstreamHttp {
        status: u16,
        message: String,
        error_type: String,
    },

    /// Upstream answered 2xx but the body was unusable.
    #[error("{0}")]
    UpstreamProtocol(String),

    /// Network failure or timeout talking to upstream.
    #[error("{0}")]
    Transport(String),
}

impl ChatError {
    /// HTTP status the caller receives for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::Validation(_) => 400,
            ChatError::UpstreamHttp { status, .. } => *status,
            ChatError::Config(_) | ChatError::UpstreamProtocol(_) | ChatError::Transport(_) => 500,
        }
    }

    /// JSON body the caller receives for this error.
    pub fn to_body(&self) -> Value {
        match self {
            ChatError::Config(msg) | ChatError::Validation(msg) => json!({ "error": msg }),
            ChatError::UpstreamHttp {
                message,
                error_type,
                ..
            } => json!({ "error": message, "type": error_type }),
            ChatError::UpstreamProtocol(msg) | ChatError::Transport(msg) => {
                json!({ "error": format!("Internal error: {msg}") })
            }
        }
    }

    /// Whether the caller is at fault (4xx), used to pick a log level.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
