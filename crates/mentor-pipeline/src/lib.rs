mod evaluator;
mod prompt;
mod prompts;
pub mod result_schema;

pub use evaluator::EvaluationService;
pub use prompt::PromptBuilder;
pub use prompts::DEFAULT_LANGUAGE;
