use mentor_core::{CaseContext, Prompt, SolutionInput};

use crate::prompts::{
    DEFAULT_LANGUAGE, NO_DESCRIPTION, NO_IDEAL_CONCEPTS, NO_RUBRIC, OUTPUT_CONTRACT,
};

/// Turns a case and a solution into the grading prompt. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    language: String,
}

impl PromptBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn build(&self, context: &CaseContext, solution: &SolutionInput) -> Prompt {
        Prompt {
            instructions: self.instructions(context),
            user_message: solution.text.clone(),
        }
    }

    fn instructions(&self, context: &CaseContext) -> String {
        let description = non_blank(context.description.as_deref()).unwrap_or(NO_DESCRIPTION);
        let rubric = non_blank(Some(context.rubric_logic.as_str())).unwrap_or(NO_RUBRIC);

        let concepts = context
            .ideal_concepts
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let concepts = if concepts.is_empty() {
            NO_IDEAL_CONCEPTS
        } else {
            concepts.as_str()
        };

        format!(
            "You are a Senior Lead Mentor. Evaluate the user's solution for the case \"{title}\" in the field of \"{profession}\".\n\n\
             Case description:\n{description}\n\n\
             Context for evaluation:\n{rubric}\n\n\
             Key terms that should be mentioned or concepts that should be covered:\n{concepts}\n\n\
             {OUTPUT_CONTRACT}\n\n\
             Write every text value in {language}. The response MUST be a single valid JSON object with no markdown fences or commentary.",
            title = context.title.trim(),
            profession = context.profession_label.trim(),
            language = self.language,
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
