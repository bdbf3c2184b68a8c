//! OpenAI chat completions client.
//!
//! Caller messages go upstream verbatim; the model, temperature and token
//! limit come from [`OpenAiConfig`], never from the caller.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use chatrelay_core::config::OpenAiConfig;
use chatrelay_core::error::{DEFAULT_ERROR_TYPE, OPENAI_NOT_CONFIGURED};
use chatrelay_core::utils::truncate_string;
use chatrelay_core::{ChatError, ChatMessage, ChatReply, ChatRequest};

use crate::traits::ChatProvider;
use crate::transport;

const DISPLAY_NAME: &str = "OpenAI";
const DEFAULT_ERROR_MESSAGE: &str = "OpenAI API error";

// ─────────────────────────────────────────────
// OpenAiProvider
// ─────────────────────────────────────────────

/// Client for `POST {api_base}/chat/completions` with bearer auth.
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("config", &self.config)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    fn build_request<'a>(&'a self, request: &'a ChatRequest) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    fn extract_reply(&self, response: CompletionResponse) -> Result<ChatReply, ChatError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::UpstreamProtocol("No response from OpenAI".to_string()))?;

        let message = choice.message.content.ok_or_else(|| {
            ChatError::UpstreamProtocol("OpenAI reply has no message content".to_string())
        })?;

        Ok(ChatReply {
            message,
            model: response.model.unwrap_or_else(|| self.config.model.clone()),
            usage: response.usage.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn ensure_configured(&self) -> Result<(), ChatError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ChatError::Config(OPENAI_NOT_CONFIGURED.to_string()))
        }
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let url = self.config.completions_url();
        let body = self.build_request(request);

        debug!(
            provider = DISPLAY_NAME,
            model = %self.config.model,
            messages = request.messages.len(),
            "Calling upstream"
        );

        let http = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body);

        let (status, text) = transport::send(http, self.timeout())
            .await
            .inspect_err(|e| error!(provider = DISPLAY_NAME, error = %e, "HTTP request failed"))?;

        if !status.is_success() {
            error!(
                provider = DISPLAY_NAME,
                status = %status,
                body = %truncate_string(&text, 500),
                "API error"
            );
            return Err(parse_error(status.as_u16(), &text));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text).map_err(|e| {
            error!(provider = DISPLAY_NAME, error = %e, "Failed to parse upstream response");
            ChatError::UpstreamProtocol(format!("invalid OpenAI response: {e}"))
        })?;

        self.extract_reply(parsed)
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }
}

// ─────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Build the caller-facing error from a non-2xx upstream reply.
///
/// `message` and `type` fall back to defaults independently; a body that
/// isn't the expected JSON shape gets both defaults.
fn parse_error(status: u16, body: &str) -> ChatError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    let (message, error_type) = match detail {
        Some(d) => (d.message, d.error_type),
        None => (None, None),
    };

    ChatError::UpstreamHttp {
        status,
        message: message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        error_type: error_type.unwrap_or_else(|| DEFAULT_ERROR_TYPE.to_string()),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
