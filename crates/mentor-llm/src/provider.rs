use std::sync::Arc;

use mentor_core::{
    CompletionBackend, CompletionRequest, FailureKind, OutputMode, ProviderFailure,
};
use tracing::{error, info, warn};

use crate::{LlmClient, ProviderConfig};

/// Sends prompts to the LLM, walking the model priority list on model-level failures.
///
/// Exactly one attempt is made per model per call. Only `ModelUnavailable`
/// advances to the next model; `AccessBlocked` advances too when
/// `fallback_on_block` is set. Everything else is returned as observed.
pub struct ProviderClient {
    backend: Arc<dyn CompletionBackend>,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let backend = Arc::new(LlmClient::new(&config)?);
        Ok(Self { backend, config })
    }

    pub fn with_backend(config: ProviderConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend, config }
    }

    pub fn model_priority(&self) -> &[String] {
        &self.config.model_priority
    }

    pub async fn send(
        &self,
        instructions: &str,
        user_message: &str,
        model_priority: &[String],
    ) -> Result<String, ProviderFailure> {
        self.send_with_mode(instructions, user_message, model_priority, OutputMode::Json)
            .await
    }

    pub async fn send_with_mode(
        &self,
        instructions: &str,
        user_message: &str,
        model_priority: &[String],
        output_mode: OutputMode,
    ) -> Result<String, ProviderFailure> {
        if model_priority.is_empty() {
            return Err(ProviderFailure::unknown("no models configured"));
        }

        if !self.config.has_credential() {
            warn!("PROVIDER: No API key configured, refusing to call the provider");
            return Err(ProviderFailure::unauthenticated("provider API key is not configured"));
        }

        let mut last_failure: Option<ProviderFailure> = None;
        let mut blocked = 0usize;

        for (i, model) in model_priority.iter().enumerate() {
            info!("PROVIDER: Attempt {}/{} with model {}", i + 1, model_priority.len(), model);

            let request = CompletionRequest {
                instructions,
                user_message,
                model: model.as_str(),
                output_mode,
            };

            let failure = match self.backend.complete(request).await {
                Ok(text) => {
                    if blocked > 0 {
                        warn!("PROVIDER: {} succeeded after {} blocked model(s)", model, blocked);
                    }
                    info!("PROVIDER: {} answered ({} chars)", model, text.len());
                    return Ok(text);
                }
                Err(failure) => failure,
            };

            match failure.kind {
                FailureKind::ModelUnavailable => {
                    warn!("PROVIDER: {} unavailable ({}), trying next model", model, failure.message);
                }
                FailureKind::AccessBlocked if self.config.fallback_on_block => {
                    warn!("PROVIDER: {} blocked ({}), trying next model", model, failure.message);
                    blocked += 1;
                }
                _ => {
                    warn!("PROVIDER: {} failed: {}", model, failure);
                    return Err(failure);
                }
            }

            last_failure = Some(failure);
        }

        let mut failure = last_failure.unwrap_or_else(|| ProviderFailure::unknown("no models attempted"));

        if blocked == model_priority.len() {
            error!("PROVIDER: Access block persisted across all {} models", blocked);
            failure.message = format!("{} (block persisted across all {} models)", failure.message, blocked);
        } else {
            warn!("PROVIDER: All {} models exhausted", model_priority.len());
        }

        Err(failure)
    }
}
