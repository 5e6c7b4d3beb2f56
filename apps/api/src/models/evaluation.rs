use serde::{Deserialize, Serialize};

/// Per-dimension sub-scores reported by the model.
/// Dimensions are fixed; a missing or malformed breakdown collapses to the
/// zero vector rather than failing the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub experience: f64,
    pub skills: f64,
    pub education: f64,
    pub industry: f64,
}

/// The canonical per-candidate record produced by the screening pipeline.
///
/// Created once per resume per batch. The only post-construction mutation is
/// the one-time append of an override annotation to `remark` during policy
/// verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Source identity — always the uploaded filename.
    pub filename: String,
    pub name: String,
    /// Overall score, coerced and clamped to 0..=100. 0 on any parse failure.
    pub score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub experience_summary: String,
    pub education_summary: String,
    /// Ordered, trimmed, non-empty skill names. May be empty.
    pub skills_matched: Vec<String>,
    /// Free-text verdict. Always non-empty; carries override annotations.
    pub remark: String,
}

impl EvaluationResult {
    /// Fallback record for a reply that could not be located or parsed as JSON.
    pub fn parse_error(filename: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::fallback(filename, format!("Could not parse model reply: {reason}"))
    }

    /// Fallback record for a resume that failed before the model was consulted
    /// (unreadable upload, extraction failure, gateway failure).
    pub fn pipeline_error(filename: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::fallback(filename, format!("Resume could not be evaluated: {reason}"))
    }

    fn fallback(filename: impl Into<String>, remark: String) -> Self {
        Self {
            filename: filename.into(),
            name: "N/A".to_string(),
            score: 0.0,
            score_breakdown: ScoreBreakdown::default(),
            experience_summary: "N/A".to_string(),
            education_summary: "N/A".to_string(),
            skills_matched: vec![],
            remark,
        }
    }
}
