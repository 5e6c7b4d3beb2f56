//! Response Normalizer — turns the model's free-form reply into the canonical
//! `EvaluationResult`.
//!
//! Field resolution is deliberately forgiving: one alias adapter handles the
//! model's spelling drift (`score_breakdown` vs `Score_breakdown`), absent-ish
//! values (`null`, `""`, `[]`, `"N/A"`) fall back to per-field defaults, and
//! non-numeric scores coerce to 0.0 instead of failing the candidate. Only a
//! missing or unparseable JSON object fails the record — and even that is
//! downgraded to an all-default parse-error record, never a batch abort.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::evaluation::{EvaluationResult, ScoreBreakdown};
use crate::screening::json_extract::{extract_json_object, JsonLocateError};

#[derive(Debug, Error)]
enum NormalizeError {
    #[error(transparent)]
    Locate(#[from] JsonLocateError),

    #[error("malformed JSON in model reply: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model reply is not a JSON object")]
    NotAnObject,
}

/// Normalizes a raw model reply. Pure: the same reply text always yields an
/// identical record.
pub fn normalize_reply(filename: &str, raw_reply: &str) -> EvaluationResult {
    match parse_reply(filename, raw_reply) {
        Ok(result) => result,
        Err(e) => EvaluationResult::parse_error(filename, e),
    }
}

fn parse_reply(filename: &str, raw_reply: &str) -> Result<EvaluationResult, NormalizeError> {
    let span = extract_json_object(raw_reply)?;
    let value: Value = serde_json::from_str(span)?;
    let obj = value.as_object().ok_or(NormalizeError::NotAnObject)?;

    Ok(EvaluationResult {
        filename: filename.to_string(),
        name: text_field(obj, &["name"]),
        score: number_field(obj, &["score"]).clamp(0.0, 100.0),
        score_breakdown: breakdown_field(obj),
        experience_summary: text_field(obj, &["experience", "experience_summary"]),
        education_summary: text_field(obj, &["education", "education_summary"]),
        skills_matched: skills_field(obj),
        remark: text_field(obj, &["remark", "remarks"]),
    })
}

/// One alias adapter for every field lookup: case-insensitive key match over a
/// fixed alias list, with absent-ish values skipped.
fn field<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    for alias in aliases {
        let found = obj
            .iter()
            .find(|(key, value)| key.eq_ignore_ascii_case(alias) && !is_absent(value));
        if let Some((_, value)) = found {
            return Some(value);
        }
    }
    None
}

/// `null`, empty/whitespace strings, the literal "N/A", and empty lists all
/// count as "the model did not answer this field".
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim();
            s.is_empty() || s.eq_ignore_ascii_case("n/a")
        }
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn text_field(obj: &Map<String, Value>, aliases: &[&str]) -> String {
    match field(obj, aliases) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "N/A".to_string(),
    }
}

fn number_field(obj: &Map<String, Value>, aliases: &[&str]) -> f64 {
    field(obj, aliases).map(coerce_number).unwrap_or(0.0)
}

/// Numbers pass through; numeric strings parse; everything else is 0.0.
fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn breakdown_field(obj: &Map<String, Value>) -> ScoreBreakdown {
    let Some(Value::Object(breakdown)) = field(obj, &["score_breakdown", "scorebreakdown"]) else {
        return ScoreBreakdown::default();
    };
    ScoreBreakdown {
        experience: number_field(breakdown, &["experience"]),
        skills: number_field(breakdown, &["skills"]),
        education: number_field(breakdown, &["education"]),
        industry: number_field(breakdown, &["industry"]),
    }
}

/// `skills_matched` arrives as either a list or one comma-separated string.
fn skills_field(obj: &Map<String, Value>) -> Vec<String> {
    match field(obj, &["skills_matched", "skills"]) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![],
    }
}
