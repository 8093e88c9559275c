use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use mentor_core::{EvaluationResult, SolutionInput};

use crate::dto::{CaseEvaluateRequest, EvaluateRequest};
use crate::error::AppError;
use crate::state::AppState;

pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let (context, solution) = req.into_parts();
    let result = state.evaluator.evaluate(&context, &solution).await?;
    Ok(Json(result))
}

pub async fn evaluate_case(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
    Json(req): Json<CaseEvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let context = state
        .catalog
        .case_context(&case_id)
        .ok_or_else(|| AppError::NotFound(format!("case {case_id} not found")))?;

    let solution = SolutionInput::new(req.solution_text);
    let result = state.evaluator.evaluate(&context, &solution).await?;
    Ok(Json(result))
}
