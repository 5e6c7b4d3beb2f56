//! Prompt Builder — renders the one deterministic evaluation prompt.
//!
//! Pure string interpolation: the template performs no JSON escaping of its
//! own, so attacker-controlled delimiters in the inputs can break the
//! requested output shape. Known limitation, not hardened against.

use thiserror::Error;

use crate::screening::tone::RemarkTone;
use crate::screening::weights::ScoringWeights;

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("job description text is empty")]
    EmptyJobDescription,

    #[error("resume text is empty")]
    EmptyResume,
}

/// Evaluation prompt template. Replace `{experience_weight}`, `{skills_weight}`,
/// `{education_weight}`, `{industry_weight}`, `{policy_line}`,
/// `{tone_instruction}`, `{jd_text}`, `{resume_text}` before sending.
/// The JSON braces below are literal — only the named placeholders are
/// substituted.
const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are acting as a professional HR Manager at JSW Paints.
Evaluate the following resume against the job description.

Scoring Logic:
1. Experience Match - {experience_weight}%
2. Skill Match - {skills_weight}%
3. Education Quality - {education_weight}%
4. Industry relevance - {industry_weight}%
{policy_line}
Strict Rules:
- Deduct 10% if total experience is under 2 years.
- Score 0 if job-hopping (tenure under 2 years per company) occurred more than twice.
- Score 0 and mark as Rejected ONLY if the candidate's work history (company names in experience or education) directly and unambiguously mentions: JSW, Dulux, Akzo Nobel, or Birla Opus. Do NOT reject based on guesses, abbreviations, partial matches, or vague context.
- For evaluating colleges/universities use NIRF ranking.
- DO NOT reject candidates for working at Asian Paints.

IMPORTANT: When you reject, always quote the exact line/company/experience that triggered the rejection in your remark.
If you find NO such company in experience or education, do NOT reject for this rule.

{tone_instruction}

Return ONLY JSON in this format:
{
  "name": "Candidate name from the resume",
  "score": final score out of 100,
  "score_breakdown": {
      "experience": score_from_experience,
      "skills": score_from_skills,
      "education": score_from_education,
      "industry": score_from_industry
  },
  "experience": "Total and relevant years of experience with role/company breakdown",
  "education": "Highest education achieved or degree",
  "skills_matched": ["skill1", "skill2"],
  "remark": "30-word summary with Accept/Reject verdict, citing which experience/company caused rejection if rejected"
}

If any of these fields are missing, return "N/A", 0, or [] as appropriate.

Job Description:
"""
{jd_text}
"""

Candidate Resume:
"""
{resume_text}
""""#;

/// Renders the evaluation prompt. Empty (post-trim) JD or resume text is a
/// validation failure — a prompt must never be sent with missing context.
pub fn build_prompt(
    jd_text: &str,
    resume_text: &str,
    weights: &ScoringWeights,
    tone: RemarkTone,
) -> Result<String, PromptError> {
    if jd_text.trim().is_empty() {
        return Err(PromptError::EmptyJobDescription);
    }
    if resume_text.trim().is_empty() {
        return Err(PromptError::EmptyResume);
    }

    let policy_line = match weights.policy {
        Some(policy) => format!("5. Policy Compliance - {policy}%\n"),
        None => String::new(),
    };

    Ok(EVALUATION_PROMPT_TEMPLATE
        .replace("{experience_weight}", &weights.experience.to_string())
        .replace("{skills_weight}", &weights.skills.to_string())
        .replace("{education_weight}", &weights.education.to_string())
        .replace("{industry_weight}", &weights.industry.to_string())
        .replace("{policy_line}", &policy_line)
        .replace("{tone_instruction}", tone.instruction())
        .replace("{jd_text}", jd_text)
        .replace("{resume_text}", resume_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ScoringWeights {
        ScoringWeights {
            experience: 40.0,
            skills: 30.0,
            education: 10.0,
            industry: 20.0,
            policy: None,
        }
    }

    #[test]
    fn test_empty_jd_is_rejected() {
        let err = build_prompt("   ", "resume body", &weights(), RemarkTone::Professional);
        assert_eq!(err, Err(PromptError::EmptyJobDescription));
    }

    #[test]
    fn test_empty_resume_is_rejected() {
        let err = build_prompt("jd body", "\n", &weights(), RemarkTone::Professional);
        assert_eq!(err, Err(PromptError::EmptyResume));
    }

    #[test]
    fn test_weights_are_embedded() {
        let prompt =
            build_prompt("jd body", "resume body", &weights(), RemarkTone::Professional).unwrap();
        assert!(prompt.contains("Experience Match - 40%"));
        assert!(prompt.contains("Skill Match - 30%"));
        assert!(prompt.contains("Education Quality - 10%"));
        assert!(prompt.contains("Industry relevance - 20%"));
        assert!(!prompt.contains("Policy Compliance"));
    }

    #[test]
    fn test_policy_weight_adds_fifth_line() {
        let mut w = weights();
        w.skills = 20.0;
        w.policy = Some(10.0);
        let prompt = build_prompt("jd body", "resume body", &w, RemarkTone::Professional).unwrap();
        assert!(prompt.contains("5. Policy Compliance - 10%"));
    }

    #[test]
    fn test_output_contract_and_rules_are_present() {
        let prompt =
            build_prompt("jd body", "resume body", &weights(), RemarkTone::Professional).unwrap();
        for key in [
            "\"name\"",
            "\"score\"",
            "\"score_breakdown\"",
            "\"experience\"",
            "\"education\"",
            "\"skills_matched\"",
            "\"remark\"",
        ] {
            assert!(prompt.contains(key), "missing key {key} in prompt");
        }
        assert!(prompt.contains("Deduct 10% if total experience is under 2 years"));
        assert!(prompt.contains("quote the exact line/company/experience"));
    }

    #[test]
    fn test_tone_instruction_and_inputs_are_embedded() {
        let prompt = build_prompt(
            "the job description",
            "the resume body",
            &weights(),
            RemarkTone::Blunt,
        )
        .unwrap();
        assert!(prompt.contains(RemarkTone::Blunt.instruction()));
        assert!(prompt.contains("the job description"));
        assert!(prompt.contains("the resume body"));
        // No unresolved placeholders left behind.
        assert!(!prompt.contains("{jd_text}"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{policy_line}"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = build_prompt("jd", "cv", &weights(), RemarkTone::Critical).unwrap();
        let b = build_prompt("jd", "cv", &weights(), RemarkTone::Critical).unwrap();
        assert_eq!(a, b);
    }
}
