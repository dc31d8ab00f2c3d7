//! Fallback predictor trait definitions

use crate::category::Sector;
use crate::error::Result;
use crate::providers::clamp_unit;
use crate::search::Query;
use async_trait::async_trait;

/// Statistical fallback used when no authoritative source answers a query
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Predict an answer for the query within a sector
    async fn predict(&self, query: &Query, sector: Sector) -> Result<MlPrediction>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Prediction returned by a fallback predictor
#[derive(Debug, Clone, PartialEq)]
pub struct MlPrediction {
    pub value: String,
    /// Model confidence, in [0, 1]
    pub confidence: f64,
    pub prediction_id: u64,
    pub model_id: String,
    pub reasoning: String,
}

impl MlPrediction {
    /// Create a prediction. Confidence is clamped into [0, 1]; NaN becomes 0.
    pub fn new(
        value: impl Into<String>,
        confidence: f64,
        prediction_id: u64,
        model_id: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            confidence: clamp_unit(confidence),
            prediction_id,
            model_id: model_id.into(),
            reasoning: reasoning.into(),
        }
    }
}
