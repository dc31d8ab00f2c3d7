//! Result assembly for the three resolution paths

use super::{AlternativeAnswer, Query, QueryResult};
use crate::category::{DataType, Sector};
use crate::llm::MlPrediction;
use crate::provenance::{stable_item_id, ProvenanceLabel, Source};
use crate::providers::{clamp_unit, SearchHit};

/// Answer text of a result with no authoritative match
pub const NOT_FOUND_ANSWER: &str = "NOT FOUND";

/// Citation of a result with no authoritative match
pub const NO_SOURCE_CITATION: &str = "No source";

/// Answer quoted from an authoritative source
pub(crate) fn deterministic(hit: &SearchHit, sector: Sector, data_type: DataType) -> QueryResult {
    QueryResult {
        answer: hit.value.clone(),
        label: ProvenanceLabel::create(sector, data_type, hit.source, hit.item_id),
        confidence: 1.0,
        is_deterministic: true,
        citation: hit.citation.clone(),
        reasoning: format!(
            "Answer retrieved verbatim from {}: {}.",
            hit.source.description(),
            hit.citation
        ),
        alternatives: Vec::new(),
    }
}

/// Flagged answer from the fallback predictor, linked to the nearest
/// authoritative hit when one was found
pub(crate) fn ml_flagged(
    prediction: &MlPrediction,
    sector: Sector,
    data_type: DataType,
    nearest: Option<&SearchHit>,
) -> QueryResult {
    let alternatives: Vec<AlternativeAnswer> = nearest.map(alternative).into_iter().collect();

    let reference = match nearest {
        Some(hit) => format!(
            "Nearest deterministic reference: {} ({}, relevance {:.0}%).",
            hit.citation,
            hit.source.description(),
            clamp_unit(hit.relevance) * 100.0
        ),
        None => "No similar deterministic data found.".to_string(),
    };

    let confidence = clamp_unit(prediction.confidence);

    let reasoning = [
        "No deterministic source matched this query with sufficient relevance.".to_string(),
        format!("Prediction generated by model: {}", prediction.model_id),
        format!("Confidence: {:.1}%", confidence * 100.0),
        format!("Model reasoning: {}", prediction.reasoning),
        reference,
    ]
    .join("\n");

    QueryResult {
        answer: prediction.value.clone(),
        label: ProvenanceLabel::create(
            sector,
            data_type,
            Source::MlPrediction,
            prediction.prediction_id,
        ),
        confidence,
        is_deterministic: false,
        citation: format!("ML Prediction (Model: {})", prediction.model_id),
        reasoning,
        alternatives,
    }
}

/// Result for a query nothing authoritative could answer
pub(crate) fn not_found(query: &Query, sector: Sector, data_type: DataType) -> QueryResult {
    QueryResult {
        answer: NOT_FOUND_ANSWER.to_string(),
        label: ProvenanceLabel::create(
            sector,
            data_type,
            Source::Unverified,
            stable_item_id(query.raw()),
        ),
        confidence: 0.0,
        is_deterministic: false,
        citation: NO_SOURCE_CITATION.to_string(),
        reasoning: "No deterministic source matched this query with sufficient relevance and \
                    ML fallback was not permitted."
            .to_string(),
        alternatives: Vec::new(),
    }
}

fn alternative(hit: &SearchHit) -> AlternativeAnswer {
    AlternativeAnswer {
        value: hit.value.clone(),
        source: hit.source,
        confidence: clamp_unit(hit.relevance),
        citation: hit.citation.clone(),
        reason: format!(
            "Closest deterministic match from {} ({}), below the relevance threshold",
            hit.source.description(),
            hit.citation
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> MlPrediction {
        MlPrediction::new("1.2e7 cycles", 0.64, 77, "fatigue-net-v2", "Extrapolated from Ti-6Al-4V S-N data")
    }

    #[test]
    fn test_deterministic_result() {
        let hit = SearchHit::new("50 V AC", Source::StandardsBody, 411, "IEC 60364-4-41", 0.95);
        let result = deterministic(&hit, Sector::Electrical, DataType::Specification);

        assert_eq!(result.answer, "50 V AC");
        assert_eq!(result.confidence, 1.0);
        assert!(result.is_deterministic);
        assert_eq!(result.citation, "IEC 60364-4-41");
        assert_eq!(result.label.source, Source::StandardsBody);
        assert_eq!(result.label.item_id, 411);
        assert!(result.reasoning.contains(Source::StandardsBody.description()));
        assert!(result.reasoning.contains("IEC 60364-4-41"));
        assert!(result.alternatives.is_empty());
        assert!(result.warning().is_none());
    }

    #[test]
    fn test_ml_flagged_without_alternative() {
        let result = ml_flagged(&prediction(), Sector::Materials, DataType::Measurement, None);

        assert_eq!(result.answer, "1.2e7 cycles");
        assert_eq!(result.confidence, 0.64);
        assert!(!result.is_deterministic);
        assert_eq!(result.citation, "ML Prediction (Model: fatigue-net-v2)");
        assert_eq!(result.label.source, Source::MlPrediction);
        assert_eq!(result.label.item_id, 77);
        assert!(result.alternatives.is_empty());
        assert!(result.reasoning.contains("fatigue-net-v2"));
        assert!(result.reasoning.contains("Confidence: 64.0%"));
        assert!(result.reasoning.contains("Extrapolated from Ti-6Al-4V S-N data"));
        assert!(result.reasoning.contains("No similar deterministic data found."));
        assert!(result.reasoning.lines().count() >= 5);
    }

    #[test]
    fn test_ml_flagged_links_nearest_hit() {
        let hit = SearchHit::new("10^7 cycles", Source::Handbook, 12, "ASM Handbook Vol. 19 p. 42", 0.4);
        let result = ml_flagged(&prediction(), Sector::Materials, DataType::Measurement, Some(&hit));

        assert_eq!(result.alternatives.len(), 1);
        let alt = &result.alternatives[0];
        assert_eq!(alt.value, "10^7 cycles");
        assert_eq!(alt.source, Source::Handbook);
        assert_eq!(alt.confidence, 0.4);
        assert_eq!(alt.citation, "ASM Handbook Vol. 19 p. 42");
        assert!(result.reasoning.contains("ASM Handbook Vol. 19 p. 42"));
        assert!(!result.reasoning.contains("No similar deterministic data found."));
    }

    #[test]
    fn test_ml_flagged_clamps_raw_scores() {
        let mut prediction = prediction();
        prediction.confidence = 1.5;
        let hit = SearchHit {
            value: "10^7 cycles".to_string(),
            source: Source::Handbook,
            item_id: 12,
            citation: "ASM Handbook Vol. 19 p. 42".to_string(),
            relevance: f64::NAN,
        };

        let result = ml_flagged(&prediction, Sector::Materials, DataType::Measurement, Some(&hit));
        assert_eq!(result.confidence, 1.0);
        assert!(result.reasoning.contains("Confidence: 100.0%"));
        assert!(result.warning().unwrap().contains("(confidence 100%)"));
        assert_eq!(result.alternatives[0].confidence, 0.0);
    }

    #[test]
    fn test_not_found_is_traceable() {
        let query = Query::new("coefficient of unobtainium").deterministic_only();
        let first = not_found(&query, Sector::Materials, DataType::Table);
        let second = not_found(&query, Sector::Materials, DataType::Table);

        assert_eq!(first.answer, NOT_FOUND_ANSWER);
        assert_eq!(first.citation, NO_SOURCE_CITATION);
        assert_eq!(first.confidence, 0.0);
        assert!(!first.is_deterministic);
        assert_eq!(first.label.source, Source::Unverified);
        assert_eq!(first.label.item_id, stable_item_id("coefficient of unobtainium"));
        assert_eq!(first.label, second.label);
        assert!(first.warning().is_some());
    }
}
