use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::{CaseDetail, CaseSummary, ProfessionSummary};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_professions(State(state): State<Arc<AppState>>) -> Json<Vec<ProfessionSummary>> {
    let catalog = &state.catalog;
    let summaries = catalog
        .professions()
        .iter()
        .map(|p| ProfessionSummary::new(p, catalog.cases_for(&p.id).count()))
        .collect();
    Json(summaries)
}

pub async fn list_cases(
    State(state): State<Arc<AppState>>,
    Path(profession_id): Path<String>,
) -> Result<Json<Vec<CaseSummary>>, AppError> {
    if state.catalog.profession(&profession_id).is_none() {
        return Err(AppError::NotFound(format!("profession {profession_id} not found")));
    }

    let cases = state
        .catalog
        .cases_for(&profession_id)
        .map(CaseSummary::from)
        .collect();
    Ok(Json(cases))
}

pub async fn get_case(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseDetail>, AppError> {
    state
        .catalog
        .case(&case_id)
        .map(|record| Json(CaseDetail::from(record)))
        .ok_or_else(|| AppError::NotFound(format!("case {case_id} not found")))
}
