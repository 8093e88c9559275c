use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mentor_core::{
    CaseContext, CompletionBackend, CompletionRequest, EvaluationError, FailureKind, OutputMode,
    ProviderFailure, SolutionInput,
};
use mentor_llm::{ProviderClient, ProviderConfig};
use mentor_pipeline::{EvaluationService, PromptBuilder};

struct RecordingBackend {
    outcomes: HashMap<String, Result<String, ProviderFailure>>,
    calls: Mutex<Vec<(String, OutputMode, String)>>,
}

impl RecordingBackend {
    fn with(outcomes: Vec<(&str, Result<String, ProviderFailure>)>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: outcomes.into_iter().map(|(m, o)| (m.to_string(), o)).collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn models_called(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _, _)| m.clone()).collect()
    }
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderFailure> {
        self.calls.lock().unwrap().push((
            request.model.to_string(),
            request.output_mode,
            request.user_message.to_string(),
        ));
        self.outcomes
            .get(request.model)
            .cloned()
            .unwrap_or_else(|| Err(ProviderFailure::unknown("unscripted model")))
    }
}

fn context() -> CaseContext {
    CaseContext {
        title: "Падение удержания".into(),
        profession_label: "Продуктовый аналитик".into(),
        description: Some("После редизайна удержание упало на 15%.".into()),
        rubric_logic: "Оцени работу с когортами и приоритизацию гипотез.".into(),
        ideal_concepts: vec!["Unit economics".into(), "Churn".into()],
    }
}

fn service(backend: Arc<RecordingBackend>, api_key: Option<&str>) -> EvaluationService {
    let config = ProviderConfig {
        api_key: api_key.map(String::from),
        model_priority: vec!["model-a".into(), "model-b".into()],
        ..ProviderConfig::default()
    };
    EvaluationService::new(
        PromptBuilder::default(),
        ProviderClient::with_backend(config, backend),
    )
}

const STRONG_ANSWER: &str = r#"{"score":7, "criteria":{"logic":8,"depth":6,"practicality":7}, "verdict":"Решение сильное.", "errors":[], "missing_points":[], "recommendation":"Добавьте метрики.", "ideal_concepts":["Churn"]}"#;

#[tokio::test]
async fn blank_solution_rejected_before_any_provider_call() {
    let backend = RecordingBackend::with(vec![("model-a", Ok(STRONG_ANSWER.into()))]);
    let service = service(backend.clone(), Some("gsk_test"));

    let err = service
        .evaluate(&context(), &SolutionInput::new("   "))
        .await
        .unwrap_err();

    assert_eq!(err, EvaluationError::InvalidInput);
    assert!(backend.models_called().is_empty());
}

#[tokio::test]
async fn access_block_surfaces_without_trying_next_model() {
    let backend = RecordingBackend::with(vec![
        (
            "model-a",
            Err(ProviderFailure::new(FailureKind::AccessBlocked, Some(403), "Forbidden")),
        ),
        ("model-b", Ok(STRONG_ANSWER.into())),
    ]);
    let service = service(backend.clone(), Some("gsk_test"));

    let err = service
        .evaluate(&context(), &SolutionInput::new("Сегментирую пользователей по когортам."))
        .await
        .unwrap_err();

    assert_eq!(err.provider_kind(), Some(FailureKind::AccessBlocked));
    assert!(err.hint().is_some());
    assert_eq!(backend.models_called(), vec!["model-a"]);
}

#[tokio::test]
async fn decommissioned_model_falls_back_to_next() {
    let backend = RecordingBackend::with(vec![
        (
            "model-a",
            Err(ProviderFailure::new(
                FailureKind::ModelUnavailable,
                Some(400),
                "model-a: The model has been decommissioned",
            )),
        ),
        ("model-b", Ok(STRONG_ANSWER.into())),
    ]);
    let service = service(backend.clone(), Some("gsk_test"));
    let solution = SolutionInput::new("Считаю churn по когортам и сравниваю до и после редизайна.");

    let result = service.evaluate(&context(), &solution).await.unwrap();

    assert_eq!(result.score, 7.0);
    assert_eq!(result.criteria.logic, 8.0);
    assert_eq!(result.verdict, "Решение сильное.");
    assert_eq!(result.ideal_concepts_covered, vec!["Churn"]);
    assert_eq!(backend.models_called(), vec!["model-a", "model-b"]);

    let calls = backend.calls.lock().unwrap();
    assert!(calls.iter().all(|(_, mode, _)| *mode == OutputMode::Json));
    assert!(calls.iter().all(|(_, _, user)| user == &solution.text));
}

#[tokio::test]
async fn missing_credential_is_unauthenticated_without_network() {
    let backend = RecordingBackend::with(vec![("model-a", Ok(STRONG_ANSWER.into()))]);
    let service = service(backend.clone(), None);

    let err = service
        .evaluate(&context(), &SolutionInput::new("Любой ответ"))
        .await
        .unwrap_err();

    assert_eq!(err.provider_kind(), Some(FailureKind::Unauthenticated));
    assert!(backend.models_called().is_empty());
}

#[tokio::test]
async fn malformed_provider_text_is_classified() {
    let backend = RecordingBackend::with(vec![("model-a", Ok("Извините, я не могу оценить это.".into()))]);
    let service = service(backend.clone(), Some("gsk_test"));

    let err = service
        .evaluate(&context(), &SolutionInput::new("Ответ"))
        .await
        .unwrap_err();

    assert_eq!(err.provider_kind(), Some(FailureKind::MalformedResponse));
    assert!(!err.to_string().contains("Извините"));
    assert_eq!(backend.models_called(), vec!["model-a"]);
}

#[tokio::test]
async fn hallucinated_concepts_and_wild_scores_are_normalized() {
    let raw = r#"{"score": 15, "criteria": {"logic": -1, "depth": "9", "practicality": 11},
                  "ideal_concepts": ["Unit economics", "Moonwalk"]}"#;
    let backend = RecordingBackend::with(vec![("model-a", Ok(raw.into()))]);
    let service = service(backend, Some("gsk_test"));

    let result = service
        .evaluate(&context(), &SolutionInput::new("Unit economics first."))
        .await
        .unwrap();

    assert_eq!(result.score, 10.0);
    assert_eq!(result.criteria.logic, 0.0);
    assert_eq!(result.criteria.depth, 9.0);
    assert_eq!(result.criteria.practicality, 10.0);
    assert_eq!(result.ideal_concepts_covered, vec!["Unit economics"]);
    assert!(result.errors.is_empty());
    assert!(result.verdict.is_empty());
}

#[tokio::test]
async fn all_models_unavailable_reports_model_unavailable() {
    let gone = |m: &str| -> Result<String, ProviderFailure> {
        Err(ProviderFailure::new(
            FailureKind::ModelUnavailable,
            Some(404),
            format!("{m}: model not found"),
        ))
    };
    let backend = RecordingBackend::with(vec![("model-a", gone("model-a")), ("model-b", gone("model-b"))]);
    let service = service(backend.clone(), Some("gsk_test"));

    let err = service
        .evaluate(&context(), &SolutionInput::new("Ответ"))
        .await
        .unwrap_err();

    assert_eq!(err.provider_kind(), Some(FailureKind::ModelUnavailable));
    assert!(err.to_string().contains("model-b"));
    assert_eq!(backend.models_called(), vec!["model-a", "model-b"]);
}
