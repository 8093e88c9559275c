use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mentor_core::{EvaluationError, FailureKind};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Evaluation(EvaluationError),
}

impl From<EvaluationError> for AppError {
    fn from(err: EvaluationError) -> Self {
        AppError::Evaluation(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

fn status_for(err: &EvaluationError) -> StatusCode {
    match err.provider_kind() {
        None => StatusCode::BAD_REQUEST,
        Some(FailureKind::Unauthenticated) | Some(FailureKind::AccessBlocked) => StatusCode::FORBIDDEN,
        Some(FailureKind::ModelUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
        Some(FailureKind::MalformedResponse) | Some(FailureKind::Unknown) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "not_found",
                    message,
                    hint: None,
                },
            ),
            AppError::Evaluation(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!("SERVER: Evaluation failed: {}", err);
                } else {
                    warn!("SERVER: Evaluation rejected: {}", err);
                }
                (
                    status,
                    ErrorResponse {
                        error: err.kind_str(),
                        message: err.public_message().to_string(),
                        hint: err.hint(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
