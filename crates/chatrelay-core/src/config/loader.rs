//! Config loader — reads an optional JSON file, then layers env vars on top.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at the given path, or at `$CHATRELAY_CONFIG`
//! 3. Environment variables (credentials and API base overrides)

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::schema::Config;

/// Env var naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "CHATRELAY_CONFIG";

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_API_BASE_ENV: &str = "OPENAI_API_BASE";
pub const YANDEX_API_KEY_ENV: &str = "YANDEX_API_KEY";
pub const YANDEX_FOLDER_ID_ENV: &str = "YANDEX_FOLDER_ID";
pub const YANDEX_API_BASE_ENV: &str = "YANDEX_API_BASE";

/// Load configuration from `path` (or `$CHATRELAY_CONFIG`) plus env vars.
///
/// Never fails: an absent or broken file falls back to defaults, and missing
/// credentials are reported later, per invocation.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .or_else(|| env_value(CONFIG_PATH_ENV).map(PathBuf::from));

    let config = match config_path {
        Some(p) => load_config_from_path(&p),
        None => Config::default(),
    };

    apply_env_overrides(config)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        warn!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, env_value)
}

/// Non-empty value of an env var.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn apply_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(v) = lookup(OPENAI_API_KEY_ENV) {
        config.openai.api_key = v;
    }
    if let Some(v) = lookup(OPENAI_API_BASE_ENV) {
        debug!("Env override: openai.api_base = {}", v);
        config.openai.api_base = Some(v);
    }
    if let Some(v) = lookup(YANDEX_API_KEY_ENV) {
        config.yandex.api_key = v;
    }
    if let Some(v) = lookup(YANDEX_FOLDER_ID_ENV) {
        config.yandex.folder_id = v;
    }
    if let Some(v) = lookup(YANDEX_API_BASE_ENV) {
        debug!("Env override: yandex.api_base = {}", v);
        config.yandex.api_base = Some(v);
    }
    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/chatrelay.json"));
        assert_eq!(config.openai.model, "gpt-4");
        assert_eq!(config.yandex.timeout_secs, 60);
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
                "openai": { "model": "gpt-4o", "maxTokens": 512 },
                "yandex": { "modelName": "yandexgpt", "timeoutSecs": 90 }
            }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.max_tokens, 512);
        // Default preserved
        assert_eq!(config.openai.temperature, 0.7);
        assert_eq!(config.yandex.model_name, "yandexgpt");
        assert_eq!(config.yandex.timeout_secs, 90);
        assert_eq!(config.yandex.max_tokens, 2000);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.openai.max_tokens, 1000);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.yandex.model_name, "yandexgpt-lite");
    }

    #[test]
    fn test_overrides_credentials() {
        let config = apply_overrides_from(
            Config::default(),
            lookup_from(&[
                ("OPENAI_API_KEY", "sk-env"),
                ("YANDEX_API_KEY", "AQVN-env"),
                ("YANDEX_FOLDER_ID", "b1gfolder"),
            ]),
        );
        assert_eq!(config.openai.api_key, "sk-env");
        assert!(config.openai.is_configured());
        assert_eq!(config.yandex.api_key, "AQVN-env");
        assert_eq!(config.yandex.folder_id, "b1gfolder");
        assert!(config.yandex.is_configured());
    }

    #[test]
    fn test_overrides_api_base() {
        let config = apply_overrides_from(
            Config::default(),
            lookup_from(&[
                ("OPENAI_API_BASE", "http://127.0.0.1:8080/v1"),
                ("YANDEX_API_BASE", "http://127.0.0.1:8081"),
            ]),
        );
        assert_eq!(
            config.openai.completions_url(),
            "http://127.0.0.1:8080/v1/chat/completions"
        );
        assert_eq!(config.yandex.completion_url(), "http://127.0.0.1:8081/completion");
    }

    #[test]
    fn test_no_overrides_leaves_config_unconfigured() {
        let config = apply_overrides_from(Config::default(), lookup_from(&[]));
        assert!(!config.openai.is_configured());
        assert!(!config.yandex.is_configured());
    }

    #[test]
    fn test_folder_id_alone_is_not_enough() {
        let config = apply_overrides_from(
            Config::default(),
            lookup_from(&[("YANDEX_FOLDER_ID", "b1gfolder")]),
        );
        assert!(!config.yandex.is_configured());
    }
}
