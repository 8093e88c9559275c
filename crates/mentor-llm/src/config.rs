use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
];

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TEMPERATURE: f32 = 0.2;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("LLM_MODELS must name at least one model")]
    NoModels,
}

/// Provider settings, read once at startup and injected into [`crate::ProviderClient`].
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model_priority: Vec<String>,
    pub fallback_on_block: bool,
    pub request_timeout: Duration,
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model_priority: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            fallback_on_block: false,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model_priority", &self.model_priority)
            .field("fallback_on_block", &self.fallback_on_block)
            .field("request_timeout", &self.request_timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        config.api_key = get("GROQ_API_KEY").or_else(|| get("LLM_API_KEY"));

        if let Some(base) = get("LLM_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(models) = get("LLM_MODELS") {
            config.model_priority = parse_model_list(&models);
            if config.model_priority.is_empty() {
                return Err(ConfigError::NoModels);
            }
        }

        if let Some(value) = get("LLM_FALLBACK_ON_BLOCK") {
            config.fallback_on_block = parse_bool("LLM_FALLBACK_ON_BLOCK", &value)?;
        }

        if let Some(value) = get("LLM_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "LLM_TIMEOUT_SECS",
                    expected: "a positive integer",
                    value: value.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = get("LLM_TEMPERATURE") {
            config.temperature = value
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or_else(|| ConfigError::Invalid {
                    key: "LLM_TEMPERATURE",
                    expected: "a number between 0 and 2",
                    value: value.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "a boolean",
            value: value.to_string(),
        }),
    }
}
