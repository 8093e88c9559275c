pub mod backend;
pub mod catalog;
pub mod error;
pub mod types;

pub use backend::{CompletionBackend, CompletionRequest, OutputMode};
pub use catalog::{CaseCatalog, CaseRecord, CatalogError, Difficulty, Profession};
pub use error::{EvaluationError, FailureKind, ProviderFailure};
pub use types::*;
