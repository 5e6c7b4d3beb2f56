//! Remark-tone selector — affects only the phrasing instruction embedded in
//! the prompt, never the business rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemarkTone {
    #[default]
    Professional,
    Critical,
    Blunt,
}

impl RemarkTone {
    /// Parses the tone label from the upload form. Unknown labels fall back to
    /// `Professional` — a bad tone should not fail an otherwise valid request.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "blunt" => Self::Blunt,
            _ => Self::Professional,
        }
    }

    /// Phrasing instruction embedded verbatim into the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Professional => "Use a neutral and formal tone.",
            Self::Critical => "Be sharply evaluative, pointing out weaknesses clearly.",
            Self::Blunt => "Give a direct, no-nonsense assessment without sugarcoating.",
        }
    }
}
