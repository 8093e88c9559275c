use mentor_core::{CaseContext, EvaluationError, EvaluationResult, FailureKind, SolutionInput};
use mentor_llm::ProviderClient;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::result_schema;
use crate::PromptBuilder;

const RAW_LOG_LIMIT: usize = 500;

/// Validates input, builds the prompt, calls the provider and normalizes the answer.
///
/// Stateless apart from its injected collaborators, so one instance serves
/// concurrent requests.
pub struct EvaluationService {
    prompts: PromptBuilder,
    provider: ProviderClient,
}

impl EvaluationService {
    pub fn new(prompts: PromptBuilder, provider: ProviderClient) -> Self {
        Self { prompts, provider }
    }

    pub async fn evaluate(
        &self,
        context: &CaseContext,
        solution: &SolutionInput,
    ) -> Result<EvaluationResult, EvaluationError> {
        if solution.is_blank() {
            info!("EVALUATOR: Rejected empty solution for \"{}\"", context.title);
            return Err(EvaluationError::InvalidInput);
        }

        let span = info_span!("evaluation", id = %Uuid::new_v4(), case = %context.title);
        self.run(context, solution).instrument(span).await
    }

    async fn run(
        &self,
        context: &CaseContext,
        solution: &SolutionInput,
    ) -> Result<EvaluationResult, EvaluationError> {
        info!(
            "EVALUATOR: Grading {} chars for {} ({})",
            solution.text.chars().count(),
            context.profession_label,
            self.prompts.language()
        );

        let prompt = self.prompts.build(context, solution);

        let raw = self
            .provider
            .send(&prompt.instructions, &prompt.user_message, self.provider.model_priority())
            .await?;

        let result = result_schema::parse(&raw, context).inspect_err(|failure| {
            if failure.kind == FailureKind::MalformedResponse {
                let raw = failure.raw.as_deref().unwrap_or_default();
                warn!(
                    "EVALUATOR: Malformed provider response: {} - content: {}",
                    failure.message,
                    raw.chars().take(RAW_LOG_LIMIT).collect::<String>()
                );
            }
        })?;

        info!(
            "EVALUATOR: Score {}/10 (logic {}, depth {}, practicality {}), {} ideal concept(s) covered",
            result.score,
            result.criteria.logic,
            result.criteria.depth,
            result.criteria.practicality,
            result.ideal_concepts_covered.len()
        );

        Ok(result)
    }
}
