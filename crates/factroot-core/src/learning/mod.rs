//! Verification feedback loop
//!
//! A flagged answer can be reviewed by a human later. The review outcome is
//! mapped to a learning outcome: promote the answer's provenance, record a
//! correction, or note that review found nothing. Writing the outcome back
//! into the knowledge bases is left to the caller.

use crate::error::{FactRootError, Result};
use crate::provenance::{ProvenanceLabel, Source};
use crate::search::QueryResult;
use serde::{Deserialize, Serialize};

/// Result of a human review of a flagged answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The answer was found in an authoritative source
    Confirmed { source: Source, citation: String },

    /// An authoritative source gives a different answer
    Corrected {
        value: String,
        source: Source,
        citation: String,
    },

    /// Review found no authoritative source either way
    NoDeterministicSource,
}

/// What the knowledge base should learn from a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LearningOutcome {
    Upgraded {
        original: ProvenanceLabel,
        upgraded: ProvenanceLabel,
        citation: String,
    },
    Corrected {
        original_answer: String,
        correct_answer: String,
        correct_source: Source,
        citation: String,
    },
    Inconclusive {
        message: String,
    },
}

/// Map a reviewed result to its learning outcome.
///
/// Only flagged results can be reviewed; a deterministic result fails with
/// `InvalidPrecondition`.
pub fn process_verification(
    result: &QueryResult,
    outcome: VerificationOutcome,
) -> Result<LearningOutcome> {
    if result.is_deterministic {
        return Err(FactRootError::InvalidPrecondition(format!(
            "result {} is already deterministic and cannot be re-verified",
            result.label.identifier()
        )));
    }

    let learning = match outcome {
        VerificationOutcome::Confirmed { source, citation } => {
            let upgraded = result.label.upgrade(source);
            tracing::info!(
                "Verified {} as {}: {}",
                result.label,
                upgraded,
                citation
            );
            LearningOutcome::Upgraded {
                original: result.label,
                upgraded,
                citation,
            }
        }
        VerificationOutcome::Corrected {
            value,
            source,
            citation,
        } => {
            tracing::info!(
                "Correction for {}: {:?} -> {:?} ({}: {})",
                result.label,
                result.answer,
                value,
                source,
                citation
            );
            LearningOutcome::Corrected {
                original_answer: result.answer.clone(),
                correct_answer: value,
                correct_source: source,
                citation,
            }
        }
        VerificationOutcome::NoDeterministicSource => {
            tracing::info!("Review of {} was inconclusive", result.label);
            LearningOutcome::Inconclusive {
                message: format!(
                    "No deterministic source found during verification; {} stays attributed to {}",
                    result.label.identifier(),
                    result.label.source.description()
                ),
            }
        }
    };

    Ok(learning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{DataType, Sector};

    fn flagged() -> QueryResult {
        QueryResult {
            answer: "1.2e7 cycles".to_string(),
            label: ProvenanceLabel::create(
                Sector::Materials,
                DataType::Measurement,
                Source::MlPrediction,
                77,
            ),
            confidence: 0.55,
            is_deterministic: false,
            citation: "ML Prediction (Model: m)".to_string(),
            reasoning: String::new(),
            alternatives: vec![],
        }
    }

    fn all_outcomes() -> Vec<VerificationOutcome> {
        vec![
            VerificationOutcome::Confirmed {
                source: Source::Handbook,
                citation: "c".to_string(),
            },
            VerificationOutcome::Corrected {
                value: "v".to_string(),
                source: Source::Datasheet,
                citation: "c".to_string(),
            },
            VerificationOutcome::NoDeterministicSource,
        ]
    }

    #[test]
    fn test_confirmed_upgrades_label() {
        let result = flagged();
        let outcome = process_verification(
            &result,
            VerificationOutcome::Confirmed {
                source: Source::StandardsBody,
                citation: "IEC 61000-4-2 §5.1".to_string(),
            },
        )
        .unwrap();

        match outcome {
            LearningOutcome::Upgraded {
                original,
                upgraded,
                citation,
            } => {
                assert_eq!(original, result.label);
                assert_eq!(upgraded.source, Source::StandardsBody);
                assert_eq!(upgraded.item_id, original.item_id);
                assert_eq!(citation, "IEC 61000-4-2 §5.1");
            }
            other => panic!("expected Upgraded, got {:?}", other),
        }
        assert_eq!(result.label.source, Source::MlPrediction);
    }

    #[test]
    fn test_corrected_records_discrepancy() {
        let outcome = process_verification(
            &flagged(),
            VerificationOutcome::Corrected {
                value: "8.0e6 cycles".to_string(),
                source: Source::Handbook,
                citation: "ASM Vol. 19 p. 42".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            outcome,
            LearningOutcome::Corrected {
                original_answer: "1.2e7 cycles".to_string(),
                correct_answer: "8.0e6 cycles".to_string(),
                correct_source: Source::Handbook,
                citation: "ASM Vol. 19 p. 42".to_string(),
            }
        );
    }

    #[test]
    fn test_no_source_is_inconclusive() {
        let outcome =
            process_verification(&flagged(), VerificationOutcome::NoDeterministicSource).unwrap();
        match outcome {
            LearningOutcome::Inconclusive { message } => assert!(!message.is_empty()),
            other => panic!("expected Inconclusive, got {:?}", other),
        }
    }

    #[test]
    fn test_deterministic_result_is_rejected() {
        let mut result = flagged();
        result.is_deterministic = true;
        result.confidence = 1.0;
        result.label = result.label.upgrade(Source::Handbook);

        for outcome in all_outcomes() {
            let err = process_verification(&result, outcome).unwrap_err();
            assert!(matches!(err, FactRootError::InvalidPrecondition(_)));
        }
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(VerificationOutcome::Confirmed {
            source: Source::StandardsBody,
            citation: "c".to_string(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "confirmed");
        assert_eq!(json["source"], "STANDARDS_BODY");

        let parsed: VerificationOutcome =
            serde_json::from_str(r#"{"outcome": "no_deterministic_source"}"#).unwrap();
        assert_eq!(parsed, VerificationOutcome::NoDeterministicSource);
    }
}
