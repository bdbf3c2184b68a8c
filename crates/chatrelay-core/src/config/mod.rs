//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use chatrelay_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("OpenAI model: {}", cfg.openai.model);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{apply_env_overrides, load_config, CONFIG_PATH_ENV};
pub use schema::{Config, OpenAiConfig, YandexConfig};
