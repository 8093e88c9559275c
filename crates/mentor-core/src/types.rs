use serde::{Deserialize, Serialize};

/// Everything the evaluator needs to know about the case being solved.
///
/// Supplied by the caller (or resolved from the catalog) and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseContext {
    pub title: String,
    pub profession_label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rubric_logic: String,
    #[serde(default)]
    pub ideal_concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionInput {
    pub text: String,
}

impl SolutionInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The two halves of a grading request: system instructions and the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub instructions: String,
    pub user_message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub logic: f64,
    pub depth: f64,
    pub practicality: f64,
}

/// Canonical evaluation outcome. Numeric fields are always within `0..=10`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: f64,
    pub criteria: Criteria,
    pub verdict: String,
    pub errors: Vec<String>,
    pub missing_points: Vec<String>,
    pub recommendation: String,
    pub ideal_concepts_covered: Vec<String>,
}
