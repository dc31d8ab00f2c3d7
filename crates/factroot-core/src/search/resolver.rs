//! Deterministic-first resolver
//!
//! Every query fans out to the standards, datasheet and handbook sources at
//! once. The most relevant hit above the threshold is answered verbatim.
//! Otherwise the fallback predictor is asked, and its answer is flagged and
//! linked to the nearest authoritative hit.

use super::{builder, Query, QueryResult};
use crate::category::{CategoryClassifier, DataType, KeywordClassifier, Sector};
use crate::config::{EngineConfig, PredictionFailurePolicy};
use crate::error::{FactRootError, Result};
use crate::llm::Predictor;
use crate::providers::{clamp_unit, KnowledgeSource, SearchHit};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// Query resolution engine
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// resolutions.
pub struct Resolver {
    standards: Arc<dyn KnowledgeSource>,
    datasheets: Arc<dyn KnowledgeSource>,
    handbooks: Arc<dyn KnowledgeSource>,
    predictor: Arc<dyn Predictor>,
    classifier: Arc<dyn CategoryClassifier>,
    config: EngineConfig,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one query
    pub async fn resolve(&self, query: &Query) -> Result<QueryResult> {
        let (sector, data_type) = self.categorize(query);
        let keywords = query.keywords();
        let timeout = self.config.adapter_timeout();

        // Priority order doubles as the tie-break order
        let (standards, datasheets, handbooks) = tokio::join!(
            lookup(self.standards.as_ref(), keywords, sector, timeout),
            lookup(self.datasheets.as_ref(), keywords, sector, timeout),
            lookup(self.handbooks.as_ref(), keywords, sector, timeout),
        );
        let best = select_best([standards, datasheets, handbooks]);

        if let Some(hit) = best
            .as_ref()
            .filter(|hit| hit.relevance > self.config.relevance_threshold)
        {
            tracing::info!(
                "Deterministic answer from {} (relevance {:.2}): {}",
                hit.source,
                hit.relevance,
                hit.citation
            );
            return Ok(builder::deterministic(hit, sector, data_type));
        }

        if query.require_deterministic() {
            tracing::info!(
                "No deterministic answer for {:?} and fallback disabled",
                query.raw()
            );
            return Ok(builder::not_found(query, sector, data_type));
        }

        tracing::info!(
            "No deterministic answer for {:?}, asking predictor {}",
            query.raw(),
            self.predictor.model_name()
        );

        match self.predictor.predict(query, sector).await {
            Ok(prediction) => Ok(builder::ml_flagged(
                &prediction,
                sector,
                data_type,
                best.as_ref(),
            )),
            Err(e) => match self.config.on_prediction_failure {
                PredictionFailurePolicy::Error => Err(FactRootError::PredictionUnavailable(
                    format!("{}: {}", self.predictor.model_name(), e),
                )),
                PredictionFailurePolicy::NotFound => {
                    tracing::warn!(
                        "Predictor {} failed: {}, answering not found",
                        self.predictor.model_name(),
                        e
                    );
                    Ok(builder::not_found(query, sector, data_type))
                }
            },
        }
    }

    /// Resolve many queries concurrently.
    ///
    /// Results come back in input order; each query succeeds or fails on
    /// its own.
    pub async fn resolve_batch(&self, queries: &[Query]) -> Vec<Result<QueryResult>> {
        tracing::debug!(
            "Resolving batch of {} queries ({} concurrent)",
            queries.len(),
            self.config.batch_concurrency
        );

        stream::iter(queries.iter().map(|query| self.resolve(query)))
            .buffered(self.config.batch_concurrency.max(1))
            .collect()
            .await
    }

    /// Resolve without fallback; `None` unless an authoritative source answered
    pub async fn resolve_deterministic_only(&self, query: &Query) -> Result<Option<QueryResult>> {
        let query = query.clone().deterministic_only();
        let result = self.resolve(&query).await?;
        Ok(result.is_deterministic.then_some(result))
    }

    fn categorize(&self, query: &Query) -> (Sector, DataType) {
        match (query.sector(), query.data_type()) {
            (Some(sector), Some(data_type)) => (sector, data_type),
            (sector, data_type) => {
                let (classified_sector, classified_type) = self.classifier.classify(query.raw());
                (
                    sector.unwrap_or(classified_sector),
                    data_type.unwrap_or(classified_type),
                )
            }
        }
    }
}

/// Run one source lookup; errors, timeouts and non-authoritative hits count
/// as no match
async fn lookup(
    source: &dyn KnowledgeSource,
    keywords: &[String],
    sector: Sector,
    timeout: Duration,
) -> Option<SearchHit> {
    let kind = source.source();
    match tokio::time::timeout(timeout, source.search(keywords, sector)).await {
        Ok(Ok(Some(hit))) if !hit.source.is_deterministic() => {
            tracing::warn!(
                "Knowledge source {} returned a {} hit, ignoring it",
                kind,
                hit.source
            );
            None
        }
        Ok(Ok(hit)) => hit.map(|mut hit| {
            // Hits built without `SearchHit::new` may carry any score
            hit.relevance = clamp_unit(hit.relevance);
            tracing::debug!(
                "{} hit {} (relevance {:.2})",
                kind,
                hit.citation,
                hit.relevance
            );
            hit
        }),
        Ok(Err(e)) => {
            tracing::warn!("Knowledge source {} failed: {}, treating as no match", kind, e);
            None
        }
        Err(_) => {
            tracing::warn!(
                "Knowledge source {} timed out after {} ms, treating as no match",
                kind,
                timeout.as_millis()
            );
            None
        }
    }
}

/// Highest relevance wins; on a tie the earlier slot wins
fn select_best<const N: usize>(hits: [Option<SearchHit>; N]) -> Option<SearchHit> {
    let mut best: Option<SearchHit> = None;
    for hit in hits.into_iter().flatten() {
        if best.as_ref().map_or(true, |b| hit.relevance > b.relevance) {
            best = Some(hit);
        }
    }
    best
}

/// Builder wiring a resolver to its collaborators
#[derive(Default)]
pub struct ResolverBuilder {
    standards: Option<Arc<dyn KnowledgeSource>>,
    datasheets: Option<Arc<dyn KnowledgeSource>>,
    handbooks: Option<Arc<dyn KnowledgeSource>>,
    predictor: Option<Arc<dyn Predictor>>,
    classifier: Option<Arc<dyn CategoryClassifier>>,
    config: Option<EngineConfig>,
}

impl ResolverBuilder {
    pub fn standards(mut self, source: Arc<dyn KnowledgeSource>) -> Self {
        self.standards = Some(source);
        self
    }

    pub fn datasheets(mut self, source: Arc<dyn KnowledgeSource>) -> Self {
        self.datasheets = Some(source);
        self
    }

    pub fn handbooks(mut self, source: Arc<dyn KnowledgeSource>) -> Self {
        self.handbooks = Some(source);
        self
    }

    pub fn predictor(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Defaults to [`KeywordClassifier`]
    pub fn classifier(mut self, classifier: Arc<dyn CategoryClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Defaults to [`EngineConfig::default`]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Resolver> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Resolver {
            standards: self.standards.ok_or_else(|| missing("standards source"))?,
            datasheets: self.datasheets.ok_or_else(|| missing("datasheet source"))?,
            handbooks: self.handbooks.ok_or_else(|| missing("handbook source"))?,
            predictor: self.predictor.ok_or_else(|| missing("predictor"))?,
            classifier: self
                .classifier
                .unwrap_or_else(|| Arc::new(KeywordClassifier::new())),
            config,
        })
    }
}

fn missing(what: &str) -> FactRootError {
    FactRootError::Config(format!("Resolver requires a {}", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MlPrediction;
    use crate::provenance::Source;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        source: Source,
        hit: Option<SearchHit>,
    }

    #[async_trait]
    impl KnowledgeSource for FixedSource {
        fn source(&self) -> Source {
            self.source
        }

        async fn search(&self, _keywords: &[String], _sector: Sector) -> Result<Option<SearchHit>> {
            Ok(self.hit.clone())
        }
    }

    struct CountingPredictor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Predictor for CountingPredictor {
        async fn predict(&self, _query: &Query, _sector: Sector) -> Result<MlPrediction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(MlPrediction::new("guess", 0.5, 1, "counting", "because"))
        }

        fn model_name(&self) -> &str {
            "counting"
        }
    }

    fn fixed(source: Source, relevance: Option<f64>) -> Arc<dyn KnowledgeSource> {
        Arc::new(FixedSource {
            source,
            hit: relevance.map(|r| {
                SearchHit::new(format!("{} value", source), source, 1, format!("{} cite", source), r)
            }),
        })
    }

    fn resolver(
        scores: [Option<f64>; 3],
        predictor: Arc<CountingPredictor>,
        config: EngineConfig,
    ) -> Resolver {
        Resolver::builder()
            .standards(fixed(Source::StandardsBody, scores[0]))
            .datasheets(fixed(Source::Datasheet, scores[1]))
            .handbooks(fixed(Source::Handbook, scores[2]))
            .predictor(predictor)
            .config(config)
            .build()
            .unwrap()
    }

    fn counting() -> Arc<CountingPredictor> {
        Arc::new(CountingPredictor {
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_select_best_prefers_priority_on_tie() {
        let hit = |source| SearchHit::new("v", source, 1, "c", 0.8);
        let best = select_best([
            Some(hit(Source::StandardsBody)),
            Some(hit(Source::Datasheet)),
            Some(hit(Source::Handbook)),
        ]);
        assert_eq!(best.unwrap().source, Source::StandardsBody);

        let best = select_best([None, Some(hit(Source::Datasheet)), Some(hit(Source::Handbook))]);
        assert_eq!(best.unwrap().source, Source::Datasheet);

        assert!(select_best::<3>([None, None, None]).is_none());
    }

    #[tokio::test]
    async fn test_highest_relevance_wins() {
        let predictor = counting();
        let resolver = resolver(
            [Some(0.75), Some(0.9), Some(0.8)],
            predictor.clone(),
            EngineConfig::default(),
        );

        let result = resolver.resolve(&Query::new("anything")).await.unwrap();
        assert!(result.is_deterministic);
        assert_eq!(result.label.source, Source::Datasheet);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let predictor = counting();
        let resolver = resolver([Some(0.7), None, None], predictor.clone(), EngineConfig::default());

        let result = resolver.resolve(&Query::new("anything")).await.unwrap();
        assert!(!result.is_deterministic);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.alternatives.len(), 1);
    }

    #[tokio::test]
    async fn test_threshold_is_configurable() {
        let predictor = counting();
        let config = EngineConfig {
            relevance_threshold: 0.3,
            ..EngineConfig::default()
        };
        let resolver = resolver([None, None, Some(0.4)], predictor.clone(), config);

        let result = resolver.resolve(&Query::new("anything")).await.unwrap();
        assert!(result.is_deterministic);
        assert_eq!(result.label.source, Source::Handbook);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_authoritative_hit_is_ignored() {
        let predictor = counting();
        let resolver = Resolver::builder()
            .standards(Arc::new(FixedSource {
                source: Source::StandardsBody,
                hit: Some(SearchHit::new("x", Source::MlPrediction, 1, "c", 0.99)),
            }))
            .datasheets(fixed(Source::Datasheet, None))
            .handbooks(fixed(Source::Handbook, None))
            .predictor(predictor.clone())
            .build()
            .unwrap();

        let result = resolver.resolve(&Query::new("anything")).await.unwrap();
        assert!(!result.is_deterministic);
        assert!(result.alternatives.is_empty());
    }

    #[tokio::test]
    async fn test_override_skips_classifier() {
        let predictor = counting();
        let resolver = resolver([Some(0.9), None, None], predictor, EngineConfig::default());

        let query = Query::new("IEC 60364 maximum touch voltage").with_sector(Sector::Energy);
        let result = resolver.resolve(&query).await.unwrap();
        assert_eq!(result.label.sector, Sector::Energy);
        assert_eq!(result.label.data_type, DataType::Specification);
    }

    #[test]
    fn test_builder_requires_collaborators() {
        let err = Resolver::builder()
            .standards(fixed(Source::StandardsBody, None))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, FactRootError::Config(_)));
    }

    #[test]
    fn test_builder_validates_config() {
        let config = EngineConfig {
            batch_concurrency: 0,
            ..EngineConfig::default()
        };
        let result = Resolver::builder()
            .standards(fixed(Source::StandardsBody, None))
            .datasheets(fixed(Source::Datasheet, None))
            .handbooks(fixed(Source::Handbook, None))
            .predictor(counting())
            .config(config)
            .build();
        assert!(result.is_err());
    }
}
