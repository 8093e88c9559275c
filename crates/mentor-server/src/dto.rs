use mentor_core::{CaseContext, CaseRecord, Difficulty, Profession, SolutionInput};
use serde::{Deserialize, Serialize};

// === Requests ===

/// Ad-hoc evaluation: the client supplies the whole case.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub case_title: String,
    pub profession_label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub solution_text: String,
    #[serde(default)]
    pub rubric_logic: String,
    #[serde(default)]
    pub ideal_concepts: Vec<String>,
}

impl EvaluateRequest {
    pub fn into_parts(self) -> (CaseContext, SolutionInput) {
        let context = CaseContext {
            title: self.case_title,
            profession_label: self.profession_label,
            description: self.description,
            rubric_logic: self.rubric_logic,
            ideal_concepts: self.ideal_concepts,
        };
        (context, SolutionInput::new(self.solution_text))
    }
}

/// Evaluation against a catalog case: only the answer travels.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseEvaluateRequest {
    #[serde(default)]
    pub solution_text: String,
}

// === Responses ===

#[derive(Debug, Serialize)]
pub struct ProfessionSummary {
    pub id: String,
    pub title: String,
    pub case_count: usize,
}

impl ProfessionSummary {
    pub fn new(profession: &Profession, case_count: usize) -> Self {
        Self {
            id: profession.id.clone(),
            title: profession.title.clone(),
            case_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaseSummary {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
}

impl From<&CaseRecord> for CaseSummary {
    fn from(record: &CaseRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            difficulty: record.difficulty,
        }
    }
}

/// Full case card. The grading rubric stays server-side.
#[derive(Debug, Serialize)]
pub struct CaseDetail {
    pub id: String,
    pub profession: String,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&CaseRecord> for CaseDetail {
    fn from(record: &CaseRecord) -> Self {
        Self {
            id: record.id.clone(),
            profession: record.profession.clone(),
            title: record.title.clone(),
            difficulty: record.difficulty,
            description: record.description.clone(),
        }
    }
}
