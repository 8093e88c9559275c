mod classify;
mod client;
mod config;
mod provider;

pub use classify::classify_http_failure;
pub use client::LlmClient;
pub use config::{ConfigError, ProviderConfig};
pub use provider::ProviderClient;
