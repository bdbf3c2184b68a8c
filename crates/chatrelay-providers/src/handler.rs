//! Request dispatch for the HTTP-triggered functions.
//!
//! `OPTIONS` gets the CORS preflight, anything but `POST` gets 405, and `POST`
//! runs a single pass: credentials → body → upstream call → response. Every
//! outcome, including failures, becomes a [`FunctionResponse`].

use tracing::{error, info, warn};

use chatrelay_core::config::load_config;
use chatrelay_core::{ChatError, ChatReply, ChatRequest, FunctionEvent, FunctionResponse};

use crate::registry::{create_provider, ProviderKind};
use crate::traits::ChatProvider;

/// Dispatch one invocation against `provider`.
pub async fn handle(event: &FunctionEvent, provider: &dyn ChatProvider) -> FunctionResponse {
    match event.http_method.as_str() {
        "OPTIONS" => return FunctionResponse::preflight(),
        "POST" => {}
        other => {
            warn!(provider = provider.display_name(), method = other, "Method not allowed");
            return FunctionResponse::method_not_allowed();
        }
    }

    match process(event, provider).await {
        Ok(reply) => {
            info!(
                provider = provider.display_name(),
                model = %reply.model,
                chars = reply.message.chars().count(),
                "Chat completed"
            );
            FunctionResponse::ok(&reply)
        }
        Err(e) => {
            if e.is_client_error() {
                warn!(
                    provider = provider.display_name(),
                    status = e.status_code(),
                    error = %e,
                    "Request rejected"
                );
            } else {
                error!(
                    provider = provider.display_name(),
                    status = e.status_code(),
                    error = %e,
                    "Request failed"
                );
            }
            FunctionResponse::error(&e)
        }
    }
}

async fn process(
    event: &FunctionEvent,
    provider: &dyn ChatProvider,
) -> Result<ChatReply, ChatError> {
    provider.ensure_configured()?;
    let body = event.decoded_body()?;
    let request = ChatRequest::from_body(body.as_deref())?;
    provider.complete(&request).await
}

/// Load config from the environment and dispatch to the provider of `kind`.
pub async fn invoke(kind: ProviderKind, event: FunctionEvent) -> FunctionResponse {
    let config = load_config(None);
    let provider = create_provider(kind, &config);
    handle(&event, provider.as_ref()).await
}

/// Entry point of the OpenAI chat function.
pub async fn openai_handler(event: FunctionEvent) -> FunctionResponse {
    invoke(ProviderKind::OpenAi, event).await
}

/// Entry point of the YandexGPT chat function.
pub async fn yandex_handler(event: FunctionEvent) -> FunctionResponse {
    invoke(ProviderKind::YandexGpt, event).await
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
