use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Unauthenticated,
    AccessBlocked,
    ModelUnavailable,
    MalformedResponse,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Unauthenticated => "unauthenticated",
            FailureKind::AccessBlocked => "access_blocked",
            FailureKind::ModelUnavailable => "model_unavailable",
            FailureKind::MalformedResponse => "malformed_response",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider-side failure, classified at the boundary where it was observed.
///
/// `raw` holds the offending provider text for `MalformedResponse`; it is for
/// logs only and is not part of `Display`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {message}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
    pub raw: Option<String>,
}

impl ProviderFailure {
    pub fn new(kind: FailureKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            raw: None,
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unauthenticated, None, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unknown, None, message)
    }

    pub fn malformed(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            ..Self::new(FailureKind::MalformedResponse, None, message)
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Failure taxonomy of a whole evaluation request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("solution text is empty")]
    InvalidInput,

    #[error(transparent)]
    Provider(#[from] ProviderFailure),
}

impl EvaluationError {
    pub fn kind_str(&self) -> &'static str {
        match self {
            EvaluationError::InvalidInput => "invalid_input",
            EvaluationError::Provider(failure) => failure.kind.as_str(),
        }
    }

    pub fn provider_kind(&self) -> Option<FailureKind> {
        match self {
            EvaluationError::InvalidInput => None,
            EvaluationError::Provider(failure) => Some(failure.kind),
        }
    }

    /// Message safe to show to the end user.
    pub fn public_message(&self) -> &'static str {
        match self.provider_kind() {
            None => "Решение не может быть пустым.",
            Some(FailureKind::Unauthenticated) => "Сервис оценки не настроен: ключ доступа к провайдеру отсутствует или недействителен.",
            Some(FailureKind::AccessBlocked) => "Провайдер модели отказал в доступе (403).",
            Some(FailureKind::ModelUnavailable) => "Ни одна из настроенных моделей сейчас недоступна.",
            Some(FailureKind::MalformedResponse) | Some(FailureKind::Unknown) => {
                "Не удалось оценить решение. Попробуйте ещё раз."
            }
        }
    }

    /// Actionable remediation text, present only where the user or operator can act.
    pub fn hint(&self) -> Option<&'static str> {
        match self.provider_kind()? {
            FailureKind::AccessBlocked => Some(
                "Обычно это блокировка по региону или ограничение тарифа. Попробуйте другой сетевой маршрут (VPN или прокси на сервере).",
            ),
            FailureKind::Unauthenticated => Some(
                "Проверьте ключ API провайдера (GROQ_API_KEY) в конфигурации сервера.",
            ),
            _ => None,
        }
    }
}
