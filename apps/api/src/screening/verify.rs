//! Policy Verifier — cross-checks the model's rejection claims against the
//! source text.
//!
//! The model is told to reject only when the resume unambiguously names a
//! disqualifying employer. Models sometimes claim such a mention where none
//! exists, so the verifier independently searches the resume text (plus the
//! reported experience and education summaries) and, when the claim is
//! unsupported, appends a fixed override annotation for manual review. The
//! numeric score is never touched: the model's scoring stands unless flatly
//! contradicted by the source text.

use regex::Regex;
use tracing::warn;

use crate::models::evaluation::EvaluationResult;

/// Appended (once) to the remark when a rejection claim is unsupported.
pub const OVERRIDE_ANNOTATION: &str = " [Override: model claimed a disqualifying employer but resume parsing found no such company. Please review.]";

/// Employers whose current or former staff are screened out.
const DEFAULT_EMPLOYERS: &[&str] = &["JSW Paints", "JSW", "Dulux", "Akzo Nobel", "Birla Opus"];

/// Immutable deny-list of disqualifying employer names, compiled to
/// whitespace-tolerant case-insensitive patterns ("Akzo Nobel" also matches
/// "AkzoNobel"). Constructed once at startup and injected into the pipeline,
/// so deployments can carry their own list and tests can build small ones.
#[derive(Debug, Clone)]
pub struct DenyList {
    pattern: Regex,
    /// Lowercased leading tokens ("jsw", "akzo", ...) used to decide whether a
    /// remark names one of the employers.
    remark_markers: Vec<String>,
}

impl DenyList {
    pub fn from_names<I, S>(names: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut alternatives = Vec::new();
        let mut remark_markers = Vec::new();
        for name in names {
            let tokens: Vec<String> = name
                .as_ref()
                .split_whitespace()
                .map(|t| regex::escape(&t.to_lowercase()))
                .collect();
            if tokens.is_empty() {
                continue;
            }
            alternatives.push(format!(r"\b{}\b", tokens.join(r"\s*")));
            remark_markers.push(
                name.as_ref()
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_lowercase(),
            );
        }
        // An empty deny-list never matches anything.
        let pattern = if alternatives.is_empty() {
            Regex::new("a^")?
        } else {
            Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?
        };
        Ok(Self {
            pattern,
            remark_markers,
        })
    }

    /// Returns the matched employer substring, if any.
    pub fn find_in(&self, text: &str) -> Option<String> {
        self.pattern.find(text).map(|m| m.as_str().to_string())
    }

    fn named_in_remark(&self, remark_lower: &str) -> bool {
        self.remark_markers
            .iter()
            .any(|marker| remark_lower.contains(marker))
    }
}

impl Default for DenyList {
    fn default() -> Self {
        Self::from_names(DEFAULT_EMPLOYERS).expect("default deny-list patterns compile")
    }
}

/// Annotates `result.remark` when the model's rejection claim is unsupported
/// by the source material. Never changes the score.
pub fn verify(deny_list: &DenyList, resume_text: &str, result: &mut EvaluationResult) {
    let haystack = format!(
        "{} {} {}",
        resume_text, result.experience_summary, result.education_summary
    );
    let source_match = deny_list.find_in(&haystack);

    let remark_lower = result.remark.to_lowercase();
    let claims_rejection = remark_lower.contains("reject");

    if claims_rejection && deny_list.named_in_remark(&remark_lower) && source_match.is_none() {
        warn!(
            filename = %result.filename,
            "rejection claim names a disqualifying employer absent from source text"
        );
        result.remark.push_str(OVERRIDE_ANNOTATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluation::EvaluationResult;

    fn record(remark: &str) -> EvaluationResult {
        let mut result = EvaluationResult::pipeline_error("cv.pdf", "placeholder");
        result.remark = remark.to_string();
        result.score = 55.0;
        result
    }

    const CLEAN_RESUME: &str =
        "Worked 5 years at Asian Paints as brand manager, MBA from IIM Indore.";

    #[test]
    fn test_unsupported_rejection_claim_gets_override_annotation() {
        let deny_list = DenyList::default();
        let mut result = record("Rejected — previously worked at JSW.");
        verify(&deny_list, CLEAN_RESUME, &mut result);
        assert!(result.remark.ends_with(OVERRIDE_ANNOTATION));
        assert_eq!(result.score, 55.0, "score must never change");
    }

    #[test]
    fn test_supported_rejection_claim_is_left_alone() {
        let deny_list = DenyList::default();
        let mut result = record("Rejected: resume states 'Senior Executive, Dulux India, 2019-2023'.");
        verify(
            &deny_list,
            "Senior Executive at Dulux India from 2019 to 2023.",
            &mut result,
        );
        assert!(!result.remark.contains("[Override:"));
    }

    #[test]
    fn test_whitespace_variants_match_the_same_employer() {
        let deny_list = DenyList::default();
        assert!(deny_list.find_in("previously at AkzoNobel Coatings").is_some());
        assert!(deny_list.find_in("previously at Akzo Nobel Coatings").is_some());
        assert!(deny_list.find_in("AKZO NOBEL alumni").is_some());
    }

    #[test]
    fn test_short_names_require_word_boundaries() {
        let deny_list = DenyList::default();
        // "JSWARM" must not count as JSW.
        assert!(deny_list.find_in("Built the JSWARM simulation toolkit").is_none());
        assert!(deny_list.find_in("Assistant Manager, JSW Steel").is_some());
    }

    #[test]
    fn test_rejection_without_employer_name_is_not_annotated() {
        let deny_list = DenyList::default();
        let mut result = record("Rejected due to insufficient experience.");
        verify(&deny_list, CLEAN_RESUME, &mut result);
        assert!(!result.remark.contains("[Override:"));
    }

    #[test]
    fn test_employer_mention_without_rejection_is_not_annotated() {
        let deny_list = DenyList::default();
        let mut result = record("Accepted. Candidate never worked at JSW or competitors.");
        verify(&deny_list, CLEAN_RESUME, &mut result);
        assert!(!result.remark.contains("[Override:"));
    }

    #[test]
    fn test_employer_in_reported_experience_counts_as_source_evidence() {
        let deny_list = DenyList::default();
        let mut result = record("Rejected — ex-JSW employee.");
        result.experience_summary = "4 years at JSW Paints, 2 years at HUL".to_string();
        verify(&deny_list, "resume text without the employer", &mut result);
        assert!(!result.remark.contains("[Override:"));
    }

    #[test]
    fn test_custom_deny_list_names() {
        let deny_list = DenyList::from_names(["Contoso Coatings"]).unwrap();
        assert!(deny_list.find_in("worked at ContosoCoatings").is_some());
        assert!(deny_list.find_in("worked at JSW Paints").is_none());

        let mut result = record("Rejected — candidate is ex-Contoso.");
        verify(&deny_list, CLEAN_RESUME, &mut result);
        assert!(result.remark.ends_with(OVERRIDE_ANNOTATION));
    }
}
