use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use mentor_core::{CompletionBackend, CompletionRequest, OutputMode, ProviderFailure};
use serde::Deserialize;
use tracing::debug;

use crate::classify::classify_http_failure;
use crate::ProviderConfig;

fn build_err(e: impl ToString) -> ProviderFailure {
    ProviderFailure::unknown(format!("failed to build request: {}", e.to_string()))
}

fn transport_err(e: reqwest::Error) -> ProviderFailure {
    let failure = if e.is_timeout() {
        ProviderFailure::unknown("request to provider timed out")
    } else {
        ProviderFailure::unknown(format!("request to provider failed: {e}"))
    };
    match e.status() {
        Some(status) => failure.with_status(status.as_u16()),
        None => failure,
    }
}

/// Only the fields we read. OpenAI-compatible servers (Groq included) do not
/// always send everything `CreateChatCompletionResponse` requires.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completions backend (Groq by default).
pub struct LlmClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            temperature: config.temperature,
        })
    }

    fn build_request(&self, request: &CompletionRequest<'_>) -> Result<CreateChatCompletionRequest, ProviderFailure> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.instructions)
                    .build()
                    .map_err(build_err)?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.user_message)
                    .build()
                    .map_err(build_err)?,
            ),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(request.model)
            .temperature(self.temperature)
            .messages(messages);

        if request.output_mode == OutputMode::Json {
            args.response_format(ResponseFormat::JsonObject);
        }

        args.build().map_err(build_err)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderFailure> {
        let body = self.build_request(&request)?;
        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_err)?;

        debug!("PROVIDER: {} answered {} ({} bytes)", request.model, status, text.len());

        read_completion(status, text, request.model)
    }
}

fn read_completion(status: u16, text: String, model: &str) -> Result<String, ProviderFailure> {
    if !(200..300).contains(&status) {
        return Err(classify_http_failure(status, &text, model));
    }

    let parsed: ChatResponse = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Err(
                ProviderFailure::malformed(format!("undecodable completion body: {e}"), text)
                    .with_status(status),
            )
        }
    };

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ProviderFailure::malformed("No response content", text).with_status(status))
}
