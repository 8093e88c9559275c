use async_trait::async_trait;

use crate::ProviderFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// One completion attempt against one model.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub instructions: &'a str,
    pub user_message: &'a str,
    pub model: &'a str,
    pub output_mode: OutputMode,
}

/// The LLM capability: send one request, get the completion text or a classified failure.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderFailure>;
}
