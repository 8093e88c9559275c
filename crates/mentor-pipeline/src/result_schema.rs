//! Validation and normalization of the provider's JSON into [`EvaluationResult`].
//!
//! Only the initial JSON decode can fail. Every field afterwards has a default:
//! numbers fall back to 0 and are clamped into `0..=10`, narrative strings fall
//! back to empty, lists fall back to empty, and claimed ideal concepts are
//! restricted to the ones the case actually lists.

use mentor_core::{CaseContext, Criteria, EvaluationResult, ProviderFailure};
use serde_json::{Map, Value};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

pub fn parse(raw_text: &str, context: &CaseContext) -> Result<EvaluationResult, ProviderFailure> {
    let body = strip_code_fence(raw_text);

    let value: Value = serde_json::from_str(body).map_err(|e| {
        ProviderFailure::malformed(format!("response is not valid JSON: {e}"), raw_text)
    })?;

    let Value::Object(fields) = value else {
        return Err(ProviderFailure::malformed("response is not a JSON object", raw_text));
    };

    Ok(normalize(&fields, context))
}

fn normalize(fields: &Map<String, Value>, context: &CaseContext) -> EvaluationResult {
    let criteria = match fields.get("criteria") {
        Some(Value::Object(c)) => Criteria {
            logic: number(c.get("logic")),
            depth: number(c.get("depth")),
            practicality: number(c.get("practicality")),
        },
        _ => Criteria::default(),
    };

    EvaluationResult {
        score: number(fields.get("score")),
        criteria,
        verdict: text(fields.get("verdict")),
        errors: text_list(fields.get("errors")),
        missing_points: text_list(fields.get("missing_points")),
        recommendation: text(fields.get("recommendation")),
        ideal_concepts_covered: covered_concepts(
            &text_list(fields.get("ideal_concepts")),
            &context.ideal_concepts,
        ),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => lenient_number(s),
        _ => None,
    };
    clamp(parsed.unwrap_or(MIN_SCORE))
}

/// Accepts "7", " 7.5 ", "7,5" and "7/10".
fn lenient_number(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized.parse::<f64>().ok().or_else(|| {
        let (head, _) = normalized.split_once('/')?;
        head.trim().parse::<f64>().ok()
    })
}

fn clamp(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_SCORE;
    }
    value.clamp(MIN_SCORE, MAX_SCORE)
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lowercased words. Hyphenated words stay whole, so "zero-churn" is not "churn".
fn words(term: &str) -> Vec<String> {
    term.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '\''))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .map(String::from)
        .collect()
}

fn contains_words(claim: &[String], term: &[String]) -> bool {
    !term.is_empty() && claim.windows(term.len()).any(|window| window == term)
}

/// Keeps claimed concepts that trace back to the case's list, in claimed order,
/// reported with the case's own spelling and without duplicates.
///
/// A claim matches a listed term when it equals it (case-insensitive) or
/// contains it as a run of whole words, e.g. "Unit economics (LTV/CAC)"
/// matches "Unit economics" but "Heroic effort" does not match "ROI".
fn covered_concepts(claimed: &[String], ideal: &[String]) -> Vec<String> {
    let ideal_normalized: Vec<(String, Vec<String>, &String)> = ideal
        .iter()
        .map(|term| (normalize_term(term), words(term), term))
        .filter(|(norm, _, _)| !norm.is_empty())
        .collect();

    let mut covered: Vec<String> = Vec::new();

    for claim in claimed {
        let claim_words = words(claim);
        let claim = normalize_term(claim);

        let matched = ideal_normalized
            .iter()
            .find(|(norm, _, _)| *norm == claim)
            .or_else(|| {
                ideal_normalized
                    .iter()
                    .find(|(_, term_words, _)| contains_words(&claim_words, term_words))
            });

        if let Some((_, _, canonical)) = matched {
            if !covered.iter().any(|c| c == *canonical) {
                covered.push((*canonical).clone());
            }
        }
    }

    covered
}
