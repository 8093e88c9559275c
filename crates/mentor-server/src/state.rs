use std::path::Path;

use anyhow::{Context, Result};
use mentor_core::CaseCatalog;
use mentor_llm::ProviderClient;
use mentor_pipeline::{EvaluationService, PromptBuilder};
use tracing::{info, warn};

use crate::config::ServerConfig;

const BUNDLED_CATALOG: &str = include_str!("../data/cases.json");

pub struct AppState {
    pub evaluator: EvaluationService,
    pub catalog: CaseCatalog,
}

impl AppState {
    pub fn new(evaluator: EvaluationService, catalog: CaseCatalog) -> Self {
        Self { evaluator, catalog }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        if !config.provider.has_credential() {
            warn!("SERVER: No provider API key configured; evaluations will fail as unauthenticated");
        }

        let provider = ProviderClient::new(config.provider.clone())
            .context("failed to build provider HTTP client")?;
        let evaluator = EvaluationService::new(PromptBuilder::new(config.language.as_str()), provider);
        let catalog = load_catalog(config.catalog_path.as_deref())?;

        Ok(Self::new(evaluator, catalog))
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<CaseCatalog> {
    let catalog = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            CaseCatalog::from_json(&json)
                .with_context(|| format!("invalid catalog {}", path.display()))?
        }
        None => CaseCatalog::from_json(BUNDLED_CATALOG).context("invalid bundled catalog")?,
    };

    info!(
        "SERVER: Loaded catalog with {} professions",
        catalog.professions().len()
    );
    Ok(catalog)
}
