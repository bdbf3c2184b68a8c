//! Config schema — static upstream parameters plus env-provided credentials.
//!
//! Every field has a default, so an empty JSON object is a valid config file.
//! Credentials are `#[serde(skip)]`: they only ever come from the environment.

use serde::{Deserialize, Serialize};

/// Default OpenAI API base.
pub const OPENAI_DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default Yandex Foundation Models API base.
pub const YANDEX_DEFAULT_API_BASE: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1";

// ─────────────────────────────────────────────
// Root
// ─────────────────────────────────────────────

/// Root configuration object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub yandex: YandexConfig,
}

// ─────────────────────────────────────────────
// OpenAI
// ─────────────────────────────────────────────

/// Settings for the OpenAI chat completions function.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenAiConfig {
    /// From `OPENAI_API_KEY`.
    #[serde(skip)]
    pub api_key: String,
    /// Overrides [`OPENAI_DEFAULT_API_BASE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Upstream call timeout, seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: None,
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

impl OpenAiConfig {
    /// Whether the API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(OPENAI_DEFAULT_API_BASE)
    }

    /// Full chat completions URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base().trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &mask(&self.api_key))
            .field("api_base", &self.api_base())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// ─────────────────────────────────────────────
// YandexGPT
// ─────────────────────────────────────────────

/// Settings for the YandexGPT completion function.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YandexConfig {
    /// From `YANDEX_API_KEY`.
    #[serde(skip)]
    pub api_key: String,
    /// From `YANDEX_FOLDER_ID`.
    #[serde(skip)]
    pub folder_id: String,
    /// Overrides [`YANDEX_DEFAULT_API_BASE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model name inside the folder, also reported back as the reply's model.
    pub model_name: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Upstream call timeout, seconds.
    pub timeout_secs: u64,
}

impl Default for YandexConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            folder_id: String::new(),
            api_base: None,
            model_name: "yandexgpt-lite".to_string(),
            temperature: 0.6,
            max_tokens: 2000,
            timeout_secs: 60,
        }
    }
}

impl YandexConfig {
    /// Both the API key and the folder id are required.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.folder_id.is_empty()
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(YANDEX_DEFAULT_API_BASE)
    }

    /// Full completion URL.
    pub fn completion_url(&self) -> String {
        format!("{}/completion", self.api_base().trim_end_matches('/'))
    }

    /// `gpt://<folder>/<model>` selector sent as `modelUri`.
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.model_name)
    }
}

impl std::fmt::Debug for YandexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexConfig")
            .field("api_key", &mask(&self.api_key))
            .field("folder_id", &self.folder_id)
            .field("api_base", &self.api_base())
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.openai.model, "gpt-4");
        assert_eq!(config.openai.temperature, 0.7);
        assert_eq!(config.openai.max_tokens, 1000);
        assert_eq!(config.openai.timeout_secs, 30);
        assert_eq!(config.yandex.model_name, "yandexgpt-lite");
        assert_eq!(config.yandex.temperature, 0.6);
        assert_eq!(config.yandex.max_tokens, 2000);
        assert_eq!(config.yandex.timeout_secs, 60);
        assert!(!config.openai.is_configured());
        assert!(!config.yandex.is_configured());
    }

    #[test]
    fn test_default_urls() {
        let config = Config::default();
        assert_eq!(
            config.openai.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            config.yandex.completion_url(),
            "https://llm.api.cloud.yandex.net/foundationModels/v1/completion"
        );
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let openai = OpenAiConfig {
            api_base: Some("http://localhost:9000/v1/".into()),
            ..Default::default()
        };
        assert_eq!(openai.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_yandex_requires_both_credentials() {
        let mut yandex = YandexConfig {
            api_key: "key".into(),
            ..Default::default()
        };
        assert!(!yandex.is_configured());
        yandex.folder_id = "b1gfolder".into();
        assert!(yandex.is_configured());
        assert_eq!(yandex.model_uri(), "gpt://b1gfolder/yandexgpt-lite");
    }

    #[test]
    fn test_credentials_never_serialized() {
        let mut config = Config::default();
        config.openai.api_key = "sk-secret".into();
        config.yandex.api_key = "AQVN-secret".into();
        config.yandex.folder_id = "b1gfolder".into();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("b1gfolder"));
        assert!(json.contains("maxTokens"));
    }

    #[test]
    fn test_credentials_ignored_when_deserializing() {
        let config: Config =
            serde_json::from_str(r#"{"openai": {"apiKey": "sk-file", "model": "gpt-4o"}}"#).unwrap();
        assert_eq!(config.openai.api_key, "");
        assert_eq!(config.openai.model, "gpt-4o");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = OpenAiConfig {
            api_key: "sk-very-secret".into(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
