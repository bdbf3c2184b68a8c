//! YandexGPT completion client.
//!
//! Yandex Foundation Models use a different shape from OpenAI:
//! `{role, text}` messages, a `gpt://<folder>/<model>` selector and a nested
//! `completionOptions` block. Replies come back as `result.alternatives`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use chatrelay_core::config::YandexConfig;
use chatrelay_core::error::{DEFAULT_ERROR_TYPE, YANDEX_NOT_CONFIGURED};
use chatrelay_core::utils::{truncate_chars, truncate_string};
use chatrelay_core::{ChatError, ChatReply, ChatRequest};

use crate::traits::ChatProvider;
use crate::transport;

const DISPLAY_NAME: &str = "YandexGPT";

/// Raw error bodies echoed to the caller are cut to this many characters.
const ERROR_BODY_LIMIT: usize = 200;

// ─────────────────────────────────────────────
// YandexGptProvider
// ─────────────────────────────────────────────

/// Client for `POST {api_base}/completion` with `Api-Key` auth.
pub struct YandexGptProvider {
    client: reqwest::Client,
    config: YandexConfig,
}

impl std::fmt::Debug for YandexGptProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexGptProvider")
            .field("config", &self.config)
            .finish()
    }
}

impl YandexGptProvider {
    pub fn new(config: YandexConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    fn build_request<'a>(&self, request: &'a ChatRequest) -> CompletionRequest<'a> {
        CompletionRequest {
            model_uri: self.config.model_uri(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
            messages: request
                .messages
                .iter()
                .map(|m| YandexMessage {
                    role: &m.role,
                    text: &m.content,
                })
                .collect(),
        }
    }

    fn extract_reply(&self, response: CompletionResponse) -> Result<ChatReply, ChatError> {
        let alternative = response
            .result
            .alternatives
            .into_iter()
            .next()
            .ok_or_else(|| {
                ChatError::UpstreamProtocol(format!("No response from {DISPLAY_NAME}"))
            })?;

        Ok(ChatReply {
            message: alternative.message.text,
            model: self.config.model_name.clone(),
            usage: response.result.usage.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ChatProvider for YandexGptProvider {
    fn ensure_configured(&self) -> Result<(), ChatError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ChatError::Config(YANDEX_NOT_CONFIGURED.to_string()))
        }
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let url = self.config.completion_url();
        let body = self.build_request(request);

        debug!(
            provider = DISPLAY_NAME,
            model_uri = %body.model_uri,
            messages = body.messages.len(),
            "Calling upstream"
        );

        let http = self
            .client
            .post(&url)
            .header("Authorization", format!("Api-Key {}", self.config.api_key))
            .header("x-folder-id", &self.config.folder_id)
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
            ChatError::UpstreamProtocol(format!("invalid {DISPLAY_NAME} response: {e}"))
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
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    model_uri: String,
    completion_options: CompletionOptions,
    messages: Vec<YandexMessage<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionOptions {
    stream: bool,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct YandexMessage<'a> {
    role: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    result: CompletionResult,
}

#[derive(Deserialize)]
struct CompletionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    /// Yandex reports counts as numeric strings; passed through untouched.
    #[serde(default)]
    usage: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct Alternative {
    message: AlternativeMessage,
}

#[derive(Deserialize)]
struct AlternativeMessage {
    text: String,
}

/// Build the caller-facing error from a non-2xx upstream reply.
///
/// Uses the first string among `error.message`, `message` and `error`. Anything
/// else (including non-JSON) becomes `HTTP <code>: <first 200 chars>`.
fn parse_error(status: u16, body: &str) -> ChatError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| extract_error_message(&v))
        .unwrap_or_else(|| format!("HTTP {status}: {}", truncate_chars(body, ERROR_BODY_LIMIT)));

    ChatError::UpstreamHttp {
        status,
        message,
        error_type: DEFAULT_ERROR_TYPE.to_string(),
    }
}

fn extract_error_message(value: &Value) -> Option<String> {
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .or_else(|| value.get("error").and_then(Value::as_str))
        .map(String::from)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
