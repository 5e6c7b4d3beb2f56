//! Axum route handler for the screening upload boundary.
//!
//! The handler stays thin: it reads the multipart form, enforces the
//! request-level validations (JD present and readable, weights sum to 100,
//! at least one resume, sane file types and sizes), hands everything to the
//! batch orchestrator, and emits one audit event per invocation regardless of
//! outcome.

use std::path::Path;
use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use serde_json::json;
use tracing::warn;

use crate::audit::{self, AuditEvent};
use crate::errors::AppError;
use crate::screening::batch::{evaluate_batch, BatchResult, ResumeUpload};
use crate::screening::extract::extract_text;
use crate::screening::jd::clean_text;
use crate::screening::tone::RemarkTone;
use crate::screening::weights::ScoringWeights;
use crate::state::AppState;

/// Per-resume upload cap.
const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
/// A JD file smaller than this cannot hold a meaningful description.
const MIN_JD_BYTES: usize = 20;
/// Minimum extracted JD text length.
const MIN_JD_TEXT_CHARS: usize = 10;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Default)]
struct EvaluateForm {
    jd: Option<(String, Bytes)>,
    resumes: Vec<ResumeUpload>,
    weights_raw: Option<String>,
    remark_style: String,
}

/// POST /evaluate
///
/// Multipart form: `jd` (one file), `resumes` (one or more files), `weights`
/// (JSON object string), `remarkStyle` (tone label). Returns the partitioned
/// batch result, or a structured validation failure — never a half-processed
/// batch.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<BatchResult>, AppError> {
    let started = Instant::now();
    // Token issuance lives outside this service; the boundary forwards
    // whatever identity it was given.
    let actor = headers
        .get("x-actor")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_string();

    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            let event = AuditEvent::evaluate(
                actor,
                false,
                started.elapsed().as_millis() as u64,
                json!({ "error": "multipart form could not be read" }),
            );
            audit::emit(&event);
            return Err(e);
        }
    };

    let metadata = json!({
        "jd_filename": form.jd.as_ref().map(|(name, _)| name.clone()),
        "resume_count": form.resumes.len(),
        "resume_filenames": form.resumes.iter().map(|r| r.filename.clone()).collect::<Vec<_>>(),
        "remark_style": form.remark_style,
        "weights_sum": form
            .weights_raw
            .as_deref()
            .and_then(|raw| serde_json::from_str::<ScoringWeights>(raw).ok())
            .map(|w| w.sum()),
    });

    let outcome = validate_and_run(&state, form).await;

    let event = AuditEvent::evaluate(
        actor,
        outcome.is_ok(),
        started.elapsed().as_millis() as u64,
        metadata,
    );
    audit::emit(&event);

    outcome.map(Json)
}

async fn read_form(mut multipart: Multipart) -> Result<EvaluateForm, AppError> {
    let mut form = EvaluateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart request: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "jd" => {
                let filename = field.file_name().unwrap_or("jd").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read JD upload: {e}")))?;
                form.jd = Some((filename, bytes));
            }
            "resumes" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                check_resume_filename(&filename)?;
                // A single file failing to stream still becomes a batch record,
                // attributed to its filename, rather than sinking the request.
                let bytes = match field.bytes().await {
                    Ok(bytes) if bytes.len() > MAX_RESUME_BYTES => {
                        return Err(AppError::Validation(format!(
                            "file too large: {filename} exceeds the 10MB limit"
                        )));
                    }
                    Ok(bytes) => Ok(bytes),
                    Err(e) => {
                        warn!("resume upload {filename} could not be read: {e}");
                        Err(e.to_string())
                    }
                };
                form.resumes.push(ResumeUpload { filename, bytes });
            }
            "weights" => {
                form.weights_raw = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read weights field: {e}"))
                })?);
            }
            "remarkStyle" => {
                form.remark_style = field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read remarkStyle field: {e}"))
                })?;
            }
            _ => {
                // Drain unknown fields so the stream stays consumable.
                let _ = field.bytes().await;
            }
        }
    }

    Ok(form)
}

fn check_resume_filename(filename: &str) -> Result<(), AppError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Validation(format!(
            "invalid file type: {filename} (only PDF and DOCX files are allowed)"
        )));
    }
    Ok(())
}

async fn validate_and_run(
    state: &AppState,
    form: EvaluateForm,
) -> Result<BatchResult, AppError> {
    let (jd_filename, jd_bytes) = form
        .jd
        .ok_or_else(|| AppError::Validation("no JD file uploaded".to_string()))?;
    if jd_bytes.len() < MIN_JD_BYTES {
        return Err(AppError::Validation(
            "uploaded JD file is empty or too small".to_string(),
        ));
    }

    let jd_text = extract_text(&jd_bytes, &jd_filename)
        .map(|text| clean_text(&text))
        .map_err(|e| {
            AppError::UnprocessableEntity(format!("could not process JD file {jd_filename}: {e}"))
        })?;
    if jd_text.chars().count() < MIN_JD_TEXT_CHARS {
        return Err(AppError::UnprocessableEntity(format!(
            "JD file {jd_filename} contains too little text"
        )));
    }

    let weights_raw = form
        .weights_raw
        .ok_or_else(|| AppError::Validation("weights field is missing".to_string()))?;
    let weights: ScoringWeights = serde_json::from_str(&weights_raw)
        .map_err(|e| AppError::Validation(format!("invalid weights data: {e}")))?;
    weights
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if form.resumes.is_empty() {
        return Err(AppError::Validation("no resumes uploaded".to_string()));
    }

    let tone = RemarkTone::from_label(&form.remark_style);

    Ok(evaluate_batch(
        state.gateway.as_ref(),
        &state.deny_list,
        &jd_text,
        form.resumes,
        &weights,
        tone,
        state.config.score_threshold,
    )
    .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_filename_extension_allowlist() {
        assert!(check_resume_filename("cv.pdf").is_ok());
        assert!(check_resume_filename("CV.DOCX").is_ok());
        assert!(check_resume_filename("cv.exe").is_err());
        assert!(check_resume_filename("cv").is_err());
    }
}
