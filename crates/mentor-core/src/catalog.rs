use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CaseContext;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate profession id: {0}")]
    DuplicateProfession(String),

    #[error("Duplicate case id: {0}")]
    DuplicateCase(String),

    #[error("Case {case} references unknown profession {profession}")]
    UnknownProfession { case: String, profession: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Junior,
    Middle,
    Senior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    pub profession: String,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "systemLogic")]
    pub system_logic: String,
    #[serde(default, alias = "idealConcepts")]
    pub ideal_concepts: Vec<String>,
}

/// Read-only lookup of professions and their cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseCatalog {
    professions: Vec<Profession>,
    cases: Vec<CaseRecord>,
}

impl CaseCatalog {
    pub fn new(professions: Vec<Profession>, cases: Vec<CaseRecord>) -> Result<Self, CatalogError> {
        let catalog = Self { professions, cases };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: CaseCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut profession_ids = HashSet::new();
        for p in &self.professions {
            if !profession_ids.insert(p.id.as_str()) {
                return Err(CatalogError::DuplicateProfession(p.id.clone()));
            }
        }

        let mut case_ids = HashSet::new();
        for c in &self.cases {
            if !case_ids.insert(c.id.as_str()) {
                return Err(CatalogError::DuplicateCase(c.id.clone()));
            }
            if !profession_ids.contains(c.profession.as_str()) {
                return Err(CatalogError::UnknownProfession {
                    case: c.id.clone(),
                    profession: c.profession.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn professions(&self) -> &[Profession] {
        &self.professions
    }

    pub fn profession(&self, profession_id: &str) -> Option<&Profession> {
        self.professions.iter().find(|p| p.id == profession_id)
    }

    pub fn cases_for<'a>(&'a self, profession_id: &'a str) -> impl Iterator<Item = &'a CaseRecord> + 'a {
        self.cases.iter().filter(move |c| c.profession == profession_id)
    }

    pub fn case(&self, case_id: &str) -> Option<&CaseRecord> {
        self.cases.iter().find(|c| c.id == case_id)
    }

    pub fn case_context(&self, case_id: &str) -> Option<CaseContext> {
        let record = self.case(case_id)?;
        let profession_label = self
            .profession(&record.profession)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| record.profession.clone());

        Some(CaseContext {
            title: record.title.clone(),
            profession_label,
            description: record.description.clone(),
            rubric_logic: record.system_logic.clone(),
            ideal_concepts: record.ideal_concepts.clone(),
        })
    }
}
