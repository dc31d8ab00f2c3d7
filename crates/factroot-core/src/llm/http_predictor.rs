//! HTTP-based fallback predictor using an external LLM service

use super::{ChatMessage, LLMClient, MlPrediction, Predictor};
use crate::category::Sector;
use crate::config::PredictorConfig;
use crate::error::{FactRootError, Result};
use crate::provenance::stable_item_id;
use crate::search::Query;
use async_trait::async_trait;
use std::sync::Arc;

/// Predictor asking an OpenAI-compatible chat model for an estimate
pub struct HttpPredictor {
    client: Arc<dyn LLMClient>,
}

impl HttpPredictor {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: PredictorConfig) -> Result<Self> {
        let client = super::VLLMClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let client = super::VLLMClient::from_env()?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, query: &Query, sector: Sector) -> Result<MlPrediction> {
        let messages = vec![
            ChatMessage::system(
                "You are an engineering estimator. No authoritative source answered the \
                 question, so give your best estimate. Output ONLY valid JSON with these \
                 fields: value (string), confidence (0.0-1.0), reasoning (string)",
            ),
            ChatMessage::user(build_prediction_prompt(query.raw(), sector)),
        ];

        let response = self.client.chat_completion(messages).await?;
        let model = self.client.model_name();
        let prediction_id = stable_item_id(&format!("{}\n{}", model, query.raw()));

        parse_prediction_response(&response, model, prediction_id)
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

fn build_prediction_prompt(query: &str, sector: Sector) -> String {
    format!(
        r#"Sector: {}
Question: "{}"

Output JSON with:
- value: the answer, including units
- confidence: 0.0-1.0, how sure you are
- reasoning: one or two sentences on how you estimated it

Example:
{{"value": "1.2e7 cycles", "confidence": 0.55, "reasoning": "Extrapolated from S-N curves of similar titanium alloys."}}

Output only JSON:"#,
        sector, query
    )
}

fn parse_prediction_response(
    response: &str,
    model: &str,
    prediction_id: u64,
) -> Result<MlPrediction> {
    // Models often wrap the object in markdown fences or extra prose
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => {
            return Err(FactRootError::Parse(format!(
                "No JSON object in prediction response: {}",
                response.trim()
            )))
        }
    };

    let parsed: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
        tracing::warn!("Failed to parse prediction JSON: {}", e);
        FactRootError::Parse(format!("Prediction JSON parse error: {}", e))
    })?;

    let value = match &parsed["value"] {
        serde_json::Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => {
            return Err(FactRootError::Parse(
                "Prediction response has no value".to_string(),
            ))
        }
    };

    let confidence = parsed["confidence"].as_f64().unwrap_or(0.0);
    let reasoning = parsed["reasoning"]
        .as_str()
        .unwrap_or("No justification provided by the model")
        .to_string();

    Ok(MlPrediction::new(
        value,
        confidence,
        prediction_id,
        model,
        reasoning,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedClient {
        reply: String,
    }

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
            assert_eq!(messages.len(), 2);
            assert!(messages[1].content.contains("MATERIALS"));
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "canned-model"
        }
    }

    #[test]
    fn test_parse_plain_json() {
        let prediction = parse_prediction_response(
            r#"{"value": "42 MPa", "confidence": 0.7, "reasoning": "typical"}"#,
            "m",
            1,
        )
        .unwrap();
        assert_eq!(prediction.value, "42 MPa");
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(prediction.reasoning, "typical");
        assert_eq!(prediction.model_id, "m");
        assert_eq!(prediction.prediction_id, 1);
    }

    #[test]
    fn test_parse_fenced_json_and_clamp() {
        let prediction = parse_prediction_response(
            "Here you go:\n```json\n{\"value\": 12.5, \"confidence\": 1.7}\n```",
            "m",
            2,
        )
        .unwrap();
        assert_eq!(prediction.value, "12.5");
        assert_eq!(prediction.confidence, 1.0);
        assert_eq!(prediction.reasoning, "No justification provided by the model");
    }

    #[test]
    fn test_parse_rejects_missing_value() {
        assert!(parse_prediction_response(r#"{"confidence": 0.3}"#, "m", 3).is_err());
        assert!(parse_prediction_response("I don't know", "m", 3).is_err());
        assert!(parse_prediction_response("{not json}", "m", 3).is_err());
    }

    #[tokio::test]
    async fn test_predict_uses_client() {
        let predictor = HttpPredictor::new(Arc::new(CannedClient {
            reply: r#"{"value": "1.2e7 cycles", "confidence": 0.55, "reasoning": "S-N extrapolation"}"#
                .to_string(),
        }));
        let query = Query::new("expected fatigue life of novel alloy X");

        let prediction = predictor.predict(&query, Sector::Materials).await.unwrap();
        assert_eq!(prediction.value, "1.2e7 cycles");
        assert_eq!(prediction.model_id, "canned-model");
        assert_eq!(
            prediction.prediction_id,
            stable_item_id("canned-model\nexpected fatigue life of novel alloy X")
        );
        assert_eq!(predictor.model_name(), "canned-model");
    }
}
