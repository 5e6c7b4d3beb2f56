//! Job-description summary — derived once per batch, immutable afterwards.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Headline facts pulled out of the JD text for display next to the results.
/// Best-effort: a JD without labelled sections yields empty fields, which is
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JdSummary {
    pub expected_experience: String,
    pub required_education: String,
    pub key_skills: Vec<String>,
}

impl JdSummary {
    /// Derives the summary from raw JD text using labelled-line heuristics
    /// ("Expected Experience:", "Required Education:", "Key Skills:", and
    /// close variants).
    pub fn derive(jd_text: &str) -> Self {
        let exp_re =
            Regex::new(r"(?:[Ee]xpected\s+[Ee]xperience|[Ee]xperience\s+[Rr]equired)[:\-]?\s*([^\n\r.;]*)")
                .expect("static regex");
        let edu_re =
            Regex::new(r"(?:[Rr]equired\s+[Ee]ducation|[Ee]ducation)[:\-]?\s*([^\n\r.;]*)")
                .expect("static regex");
        let skills_re =
            Regex::new(r"(?:[Kk]ey\s+[Ss]kills|[Ss]kills\s+[Rr]equired)[:\-]?\s*([^\n\r.]+)")
                .expect("static regex");

        let expected_experience = exp_re
            .captures(jd_text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let required_education = edu_re
            .captures(jd_text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let key_skills = skills_re
            .captures(jd_text)
            .and_then(|c| c.get(1))
            .map(|m| {
                m.as_str()
                    .split(|c| matches!(c, ',' | '•' | '·' | '-'))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            expected_experience,
            required_education,
            key_skills,
        }
    }
}

/// Collapses runs of whitespace into single spaces. Extracted resume and JD
/// text goes through this before prompting so page breaks and column layouts
/// do not leak into the model input.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Brand Manager, Decorative Paints\n\
        Expected Experience: 4 to 6 years in FMCG or paints\n\
        Required Education: MBA in Marketing\n\
        Key Skills: brand strategy, trade marketing, stakeholder management\n";

    #[test]
    fn test_derive_picks_up_labelled_lines() {
        let summary = JdSummary::derive(JD);
        assert_eq!(summary.expected_experience, "4 to 6 years in FMCG or paints");
        assert_eq!(summary.required_education, "MBA in Marketing");
        assert_eq!(
            summary.key_skills,
            vec!["brand strategy", "trade marketing", "stakeholder management"]
        );
    }

    #[test]
    fn test_derive_handles_missing_sections() {
        let summary = JdSummary::derive("We need someone great.");
        assert!(summary.expected_experience.is_empty());
        assert!(summary.required_education.is_empty());
        assert!(summary.key_skills.is_empty());
    }

    #[test]
    fn test_skills_split_on_bullets() {
        let summary = JdSummary::derive("Key Skills: excel • sql • python");
        assert_eq!(summary.key_skills, vec!["excel", "sql", "python"]);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a\n\n b\t c  "), "a b c");
        assert_eq!(clean_text(""), "");
    }
}
