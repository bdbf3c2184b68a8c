//! Provider registry — static specs for the supported upstream APIs.
//!
//! Each `ProviderSpec` describes one function: the env vars it needs, where it
//! calls by default, and the model it reports. Used by the CLI for lookup and
//! status output, and by the handlers to build a provider from config.

use std::sync::Arc;

use chatrelay_core::config::schema::{OPENAI_DEFAULT_API_BASE, YANDEX_DEFAULT_API_BASE};
use chatrelay_core::config::Config;

use crate::openai::OpenAiProvider;
use crate::traits::ChatProvider;
use crate::yandex::YandexGptProvider;

/// Which upstream API a function talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    YandexGpt,
}

/// Static specification describing one upstream provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    /// Internal name (e.g. `"openai"`).
    pub name: &'static str,
    /// Extra names accepted on the command line.
    pub aliases: &'static [&'static str],
    /// Human-readable name for logs.
    pub display_name: &'static str,
    /// Environment variables that must all be set.
    pub env_keys: &'static [&'static str],
    pub default_api_base: &'static str,
}

/// Complete list of supported providers.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        kind: ProviderKind::OpenAi,
        name: "openai",
        aliases: &["gpt"],
        display_name: "OpenAI",
        env_keys: &["OPENAI_API_KEY"],
        default_api_base: OPENAI_DEFAULT_API_BASE,
    },
    ProviderSpec {
        kind: ProviderKind::YandexGpt,
        name: "yandex",
        aliases: &["yandexgpt"],
        display_name: "YandexGPT",
        env_keys: &["YANDEX_API_KEY", "YANDEX_FOLDER_ID"],
        default_api_base: YANDEX_DEFAULT_API_BASE,
    },
];

impl ProviderSpec {
    /// Whether the config carries this provider's credentials.
    pub fn is_configured(&self, config: &Config) -> bool {
        match self.kind {
            ProviderKind::OpenAi => config.openai.is_configured(),
            ProviderKind::YandexGpt => config.yandex.is_configured(),
        }
    }

    /// Model reported in replies when upstream doesn't say otherwise.
    pub fn model<'a>(&self, config: &'a Config) -> &'a str {
        match self.kind {
            ProviderKind::OpenAi => &config.openai.model,
            ProviderKind::YandexGpt => &config.yandex.model_name,
        }
    }

    /// Effective endpoint URL.
    pub fn endpoint(&self, config: &Config) -> String {
        match self.kind {
            ProviderKind::OpenAi => config.openai.completions_url(),
            ProviderKind::YandexGpt => config.yandex.completion_url(),
        }
    }
}

/// Find a provider spec by name or alias (case-insensitive).
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    let name = name.to_lowercase();
    PROVIDERS
        .iter()
        .find(|s| s.name == name || s.aliases.contains(&name.as_str()))
}

/// Find the spec for a provider kind.
///
/// Indices follow the order of [`PROVIDERS`].
pub fn spec_for(kind: ProviderKind) -> &'static ProviderSpec {
    match kind {
        ProviderKind::OpenAi => &PROVIDERS[0],
        ProviderKind::YandexGpt => &PROVIDERS[1],
    }
}

/// Build the provider for `kind` from the matching section of `config`.
pub fn create_provider(kind: ProviderKind, config: &Config) -> Arc<dyn ChatProvider> {
    match kind {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config.openai.clone())),
        ProviderKind::YandexGpt => Arc::new(YandexGptProvider::new(config.yandex.clone())),
    }
}
