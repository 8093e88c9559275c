use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use mentor_core::{FailureKind, OutputMode, ProviderFailure};
use mentor_llm::{ProviderClient, ProviderConfig};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const PROBE_INSTRUCTIONS: &str = "You are a connectivity check. Answer briefly.";

#[derive(Parser, Debug)]
#[command(name = "mentor-probe")]
#[command(about = "Checks which configured models the LLM provider will serve", long_about = None)]
struct Cli {
    /// Comma-separated models to try, in order (defaults to LLM_MODELS)
    #[arg(short, long, value_delimiter = ',')]
    models: Vec<String>,

    /// Prompt sent to each model
    #[arg(short, long, default_value = "Say hello in Russian")]
    prompt: String,

    /// Keep probing after the first model that answers
    #[arg(long)]
    all: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ProbeOutcome {
    model: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProbeOutcome {
    fn from_result(model: &str, result: Result<String, ProviderFailure>) -> Self {
        match result {
            Ok(reply) => Self {
                model: model.to_string(),
                ok: true,
                kind: None,
                status: None,
                reply: Some(reply.trim().to_string()),
                error: None,
            },
            Err(failure) => Self {
                model: model.to_string(),
                ok: false,
                kind: Some(failure.kind.as_str()),
                status: failure.status,
                reply: None,
                error: Some(failure.message),
            },
        }
    }

    fn is_blocked(&self) -> bool {
        self.kind == Some(FailureKind::AccessBlocked.as_str())
    }

    fn render(&self) -> String {
        if self.ok {
            return format!(
                "SUCCESS!\nResponse: {}",
                self.reply.as_deref().unwrap_or_default()
            );
        }

        let mut out = format!(
            "FAILED ({}): {}: {}",
            self.model,
            self.kind.unwrap_or("unknown"),
            self.error.as_deref().unwrap_or_default()
        );
        if self.is_blocked() {
            out.push_str(
                "\nObservation: 403 Forbidden detected. This usually means:\
                 \n1. Your region is blocked by the provider's edge network.\
                 \n2. The model is not available for your API key tier.",
            );
        }
        out
    }
}

fn models_to_probe(cli: &Cli, config: &ProviderConfig) -> Vec<String> {
    let requested: Vec<String> = cli
        .models
        .iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    if requested.is_empty() {
        config.model_priority.clone()
    } else {
        requested
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ProviderConfig::from_env()?;
    let models = models_to_probe(&cli, &config);

    if !cli.json {
        println!("--- Provider Diagnostic ---");
        println!("API base: {}", config.api_base);
        println!("API key present: {}", config.has_credential());
    }

    let client = ProviderClient::new(config)?;
    let mut outcomes = Vec::new();

    for model in &models {
        if !cli.json {
            println!("\nTesting model: {model}...");
        }

        let result = client
            .send_with_mode(
                PROBE_INSTRUCTIONS,
                &cli.prompt,
                std::slice::from_ref(model),
                OutputMode::Text,
            )
            .await;
        let outcome = ProbeOutcome::from_result(model, result);

        if !cli.json {
            println!("{}", outcome.render());
        }

        let ok = outcome.ok;
        outcomes.push(outcome);
        if ok && !cli.all {
            break;
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    }

    if outcomes.iter().any(|o| o.ok) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_splits_models() {
        let cli = Cli::try_parse_from(["mentor-probe", "--models", "a, b,c", "--all"]).unwrap();
        let models = models_to_probe(&cli, &ProviderConfig::default());
        assert_eq!(models, vec!["a", "b", "c"]);
        assert!(cli.all);
        assert_eq!(cli.prompt, "Say hello in Russian");
    }

    #[test]
    fn test_defaults_to_configured_priority() {
        let cli = Cli::try_parse_from(["mentor-probe"]).unwrap();
        let config = ProviderConfig {
            model_priority: vec!["primary".into(), "backup".into()],
            ..ProviderConfig::default()
        };
        assert_eq!(models_to_probe(&cli, &config), vec!["primary", "backup"]);
    }

    #[test]
    fn test_blocked_outcome_explains_likely_causes() {
        let outcome = ProbeOutcome::from_result(
            "llama-3.3-70b-versatile",
            Err(ProviderFailure::new(FailureKind::AccessBlocked, Some(403), "Forbidden")),
        );
        assert!(!outcome.ok);
        assert_eq!(outcome.status, Some(403));

        let text = outcome.render();
        assert!(text.starts_with("FAILED (llama-3.3-70b-versatile): access_blocked: Forbidden"));
        assert!(text.contains("region is blocked"));
        assert!(text.contains("API key tier"));
    }

    #[test]
    fn test_other_failures_have_no_observation() {
        let outcome = ProbeOutcome::from_result(
            "gone",
            Err(ProviderFailure::new(FailureKind::ModelUnavailable, Some(404), "gone: model not found")),
        );
        assert!(!outcome.render().contains("Observation"));
    }

    #[test]
    fn test_success_outcome_serializes_compactly() {
        let outcome = ProbeOutcome::from_result("m", Ok("  Привет!\n".into()));
        assert_eq!(outcome.render(), "SUCCESS!\nResponse: Привет!");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"model": "m", "ok": true, "reply": "Привет!"})
        );
    }
}
