//! Global configuration types for StayOn.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls where
//! transcripts live, which model backs the gateway, and how long idle
//! session history is kept.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the StayOn service.
///
/// Loaded from `~/.stayon/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Root directory for per-agent transcript folders.
    /// Defaults to `{data_dir}/history` when unset.
    #[serde(default)]
    pub history_dir: Option<PathBuf>,

    /// UTC offset (hours) used for transcript filename timestamps.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Idle time after which a session's in-memory history is evicted.
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,

    #[serde(default)]
    pub llm: LlmSettings,
}

fn default_utc_offset_hours() -> i32 {
    9
}

fn default_session_ttl_minutes() -> u64 {
    240
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            history_dir: None,
            utc_offset_hours: default_utc_offset_hours(),
            session_ttl_minutes: default_session_ttl_minutes(),
            llm: LlmSettings::default(),
        }
    }
}

/// Which provider and model the gateway talks to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider preset name ("openai", "gemini", "mistral") or any label when
    /// `base_url` is given.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Override the preset base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f64 {
    0.7
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
        }
    }
}
