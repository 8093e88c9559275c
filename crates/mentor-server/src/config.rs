use std::path::PathBuf;

use mentor_llm::{ConfigError, ProviderConfig};
use mentor_pipeline::DEFAULT_LANGUAGE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub provider: ProviderConfig,
    pub language: String,
    pub catalog_path: Option<PathBuf>,
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            provider: ProviderConfig::from_lookup(&lookup)?,
            language: get("RESPONSE_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert_eq!(config.language, "Russian");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert!(config.catalog_path.is_none());
        assert!(!config.provider.has_credential());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "RESPONSE_LANGUAGE" => Some("English".into()),
            "CATALOG_PATH" => Some("/etc/mentor/cases.json".into()),
            "BIND_ADDR" => Some("127.0.0.1:9000".into()),
            "GROQ_API_KEY" => Some("gsk_test".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.language, "English");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/mentor/cases.json")));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert!(config.provider.has_credential());
    }

    #[test]
    fn test_provider_errors_propagate() {
        let err = ServerConfig::from_lookup(|key| (key == "LLM_TIMEOUT_SECS").then(|| "-1".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
