use mentor_core::{FailureKind, ProviderFailure};
use serde::Deserialize;

const MAX_MESSAGE_LEN: usize = 300;

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Maps a non-success chat-completions response onto the failure taxonomy.
///
/// Status wins over body for 401/403 because a region block usually comes back
/// as an HTML page from the edge proxy, not as the provider's JSON envelope.
pub fn classify_http_failure(status: u16, body: &str, model: &str) -> ProviderFailure {
    let envelope = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error)
        .unwrap_or_default();

    let code = envelope.code.as_deref().unwrap_or_default();
    let message = envelope
        .message
        .unwrap_or_else(|| summarize(body, status));

    let kind = if status == 401 || code == "invalid_api_key" {
        FailureKind::Unauthenticated
    } else if status == 403 {
        FailureKind::AccessBlocked
    } else if status == 404 || is_model_gone(code, &message) {
        FailureKind::ModelUnavailable
    } else {
        FailureKind::Unknown
    };

    let message = match kind {
        FailureKind::ModelUnavailable => format!("{model}: {message}"),
        _ => message,
    };

    ProviderFailure::new(kind, Some(status), message)
}

fn is_model_gone(code: &str, message: &str) -> bool {
    if matches!(code, "model_not_found" | "model_decommissioned") {
        return true;
    }
    let lower = message.to_lowercase();
    lower.contains("model")
        && (lower.contains("decommissioned") || lower.contains("does not exist") || lower.contains("not found"))
}

fn summarize(body: &str, status: u16) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        return format!("upstream returned HTTP {status}");
    }
    trimmed.chars().take(MAX_MESSAGE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let failure = classify_http_failure(401, body, "model-a");
        assert_eq!(failure.kind, FailureKind::Unauthenticated);
        assert_eq!(failure.status, Some(401));
        assert_eq!(failure.message, "Invalid API Key");
    }

    #[test]
    fn test_forbidden_html_page_is_access_block() {
        let body = "<html><head><title>403 Forbidden</title></head><body>cloudflare</body></html>";
        let failure = classify_http_failure(403, body, "model-a");
        assert_eq!(failure.kind, FailureKind::AccessBlocked);
        assert_eq!(failure.message, "upstream returned HTTP 403");
    }

    #[test]
    fn test_decommissioned_model() {
        let body = r#"{"error":{"message":"The model `mixtral-8x7b-32768` has been decommissioned and is no longer supported.","type":"invalid_request_error","code":"model_decommissioned"}}"#;
        let failure = classify_http_failure(400, body, "mixtral-8x7b-32768");
        assert_eq!(failure.kind, FailureKind::ModelUnavailable);
        assert!(failure.message.starts_with("mixtral-8x7b-32768: "));
    }

    #[test]
    fn test_missing_model_by_message_only() {
        let body = r#"{"error":{"message":"The model `foo` does not exist or you do not have access to it."}}"#;
        let failure = classify_http_failure(400, body, "foo");
        assert_eq!(failure.kind, FailureKind::ModelUnavailable);
    }

    #[test]
    fn test_not_found_status() {
        let failure = classify_http_failure(404, "", "foo");
        assert_eq!(failure.kind, FailureKind::ModelUnavailable);
    }

    #[test]
    fn test_rate_limit_and_server_errors_are_unknown() {
        let body = r#"{"error":{"message":"Rate limit reached","code":"rate_limit_exceeded"}}"#;
        assert_eq!(classify_http_failure(429, body, "m").kind, FailureKind::Unknown);
        assert_eq!(classify_http_failure(503, "busy", "m").kind, FailureKind::Unknown);
        assert_eq!(classify_http_failure(503, "busy", "m").message, "busy");
    }
}
