//! Batch Orchestrator — runs the evaluation pipeline once per uploaded resume
//! and partitions the results.
//!
//! Resumes are processed sequentially in upload order. Every stage failure is
//! absorbed into that resume's record: the batch always produces exactly one
//! record per input, and one resume's total failure never affects another's
//! result. A slow or down model endpoint degrades each resume to an error
//! record after the per-call timeout, but the batch still completes.

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::llm_client::ModelGateway;
use crate::models::evaluation::EvaluationResult;
use crate::screening::extract;
use crate::screening::jd::{clean_text, JdSummary};
use crate::screening::normalize::normalize_reply;
use crate::screening::prompts::build_prompt;
use crate::screening::tone::RemarkTone;
use crate::screening::verify::{verify, DenyList};
use crate::screening::weights::ScoringWeights;

/// Accept/reject cut-off, inclusive on the accept side.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 60.0;

/// One uploaded resume as received at the boundary. A failed multipart read is
/// carried as `Err` so the batch still accounts for the file instead of
/// silently dropping it.
#[derive(Debug)]
pub struct ResumeUpload {
    pub filename: String,
    pub bytes: Result<Bytes, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub accepted: Vec<EvaluationResult>,
    pub rejected: Vec<EvaluationResult>,
    pub jd_summary: JdSummary,
}

/// Evaluates every resume against the JD and partitions by score threshold.
/// Output count always equals input count.
pub async fn evaluate_batch(
    gateway: &dyn ModelGateway,
    deny_list: &DenyList,
    jd_text: &str,
    resumes: Vec<ResumeUpload>,
    weights: &ScoringWeights,
    tone: RemarkTone,
    threshold: f64,
) -> BatchResult {
    let jd_summary = JdSummary::derive(jd_text);
    let total = resumes.len();

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, upload) in resumes.into_iter().enumerate() {
        debug!("evaluating resume {}/{}: {}", index + 1, total, upload.filename);
        let result = evaluate_one(gateway, deny_list, jd_text, upload, weights, tone).await;
        if result.score >= threshold {
            accepted.push(result);
        } else {
            rejected.push(result);
        }
    }

    info!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "batch evaluation complete"
    );

    BatchResult {
        accepted,
        rejected,
        jd_summary,
    }
}

async fn evaluate_one(
    gateway: &dyn ModelGateway,
    deny_list: &DenyList,
    jd_text: &str,
    upload: ResumeUpload,
    weights: &ScoringWeights,
    tone: RemarkTone,
) -> EvaluationResult {
    let filename = upload.filename;

    let bytes = match upload.bytes {
        Ok(bytes) => bytes,
        Err(reason) => {
            return EvaluationResult::pipeline_error(
                filename,
                format!("upload could not be read: {reason}"),
            )
        }
    };

    let resume_text = match extract::extract_text(&bytes, &filename) {
        Ok(text) => clean_text(&text),
        Err(e) => return EvaluationResult::pipeline_error(filename, e),
    };

    let prompt = match build_prompt(jd_text, &resume_text, weights, tone) {
        Ok(prompt) => prompt,
        Err(e) => return EvaluationResult::pipeline_error(filename, e),
    };

    let raw_reply = match gateway.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => return EvaluationResult::pipeline_error(filename, e),
    };

    let mut result = normalize_reply(&filename, &raw_reply);
    verify(deny_list, &resume_text, &mut result);
    result
}
