//! Scoring-weight configuration supplied with each batch request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weight sums may drift from 100 by at most this much (percentage points).
const SUM_TOLERANCE: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("weight for '{dimension}' must be non-negative, got {value}")]
    Negative { dimension: &'static str, value: f64 },

    #[error("sum of weights must be 100 (±{SUM_TOLERANCE}), got {sum}")]
    SumMismatch { sum: f64 },
}

/// Named percentage weights for the scoring dimensions. `policy` is optional:
/// the standalone-tool variant of the screening flow carries it, the web
/// variant usually does not. Validation is a request-boundary concern — a bad
/// weights object fails the whole request, never a single resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub experience: f64,
    pub skills: f64,
    pub education: f64,
    pub industry: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<f64>,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.experience + self.skills + self.education + self.industry + self.policy.unwrap_or(0.0)
    }

    /// Hard input validation: every present weight non-negative, sum within
    /// tolerance of 100.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let dims: [(&'static str, f64); 5] = [
            ("experience", self.experience),
            ("skills", self.skills),
            ("education", self.education),
            ("industry", self.industry),
            ("policy", self.policy.unwrap_or(0.0)),
        ];
        for (dimension, value) in dims {
            if value < 0.0 {
                return Err(WeightsError::Negative { dimension, value });
            }
        }
        let sum = self.sum();
        if (sum - 100.0).abs() > SUM_TOLERANCE {
            return Err(WeightsError::SumMismatch { sum });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_weight_variant_summing_to_100_is_accepted() {
        let weights = ScoringWeights {
            experience: 40.0,
            skills: 20.0,
            education: 10.0,
            industry: 20.0,
            policy: Some(10.0),
        };
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_four_weight_variant_summing_to_90_is_rejected() {
        let weights = ScoringWeights {
            experience: 40.0,
            skills: 20.0,
            education: 10.0,
            industry: 20.0,
            policy: None,
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::SumMismatch { sum: 90.0 })
        );
    }

    #[test]
    fn test_sum_tolerance_of_one_point_is_allowed() {
        let weights = ScoringWeights {
            experience: 40.5,
            skills: 20.0,
            education: 10.0,
            industry: 30.0,
            policy: None,
        };
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let weights = ScoringWeights {
            experience: -5.0,
            skills: 45.0,
            education: 30.0,
            industry: 30.0,
            policy: None,
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsError::Negative {
                dimension: "experience",
                ..
            })
        ));
    }

    #[test]
    fn test_deserializes_with_and_without_policy() {
        let four: ScoringWeights =
            serde_json::from_str(r#"{"experience":40,"skills":30,"education":10,"industry":20}"#)
                .unwrap();
        assert_eq!(four.policy, None);
        assert!(four.validate().is_ok());

        let five: ScoringWeights = serde_json::from_str(
            r#"{"experience":40,"skills":20,"education":10,"industry":20,"policy":10}"#,
        )
        .unwrap();
        assert_eq!(five.policy, Some(10.0));
        assert!(five.validate().is_ok());
    }

    #[test]
    fn test_missing_dimension_fails_deserialization() {
        let result: Result<ScoringWeights, _> =
            serde_json::from_str(r#"{"experience":50,"skills":50}"#);
        assert!(result.is_err());
    }
}
