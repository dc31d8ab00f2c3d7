//! Factroot Core Library
//!
//! Deterministic-first resolution of engineering questions.
//!
//! # Features
//! - Concurrent lookup across standards, datasheet and handbook sources
//! - Relevance-ranked authoritative answers with verbatim citations
//! - Flagged ML fallback linked to the nearest authoritative fact
//! - Immutable provenance labels on every answer
//! - Verification feedback loop promoting reviewed answers

pub mod category;
pub mod config;
pub mod error;
pub mod learning;
pub mod llm;
pub mod provenance;
pub mod providers;
pub mod search;

pub use category::{CategoryClassifier, DataType, KeywordClassifier, Sector};
pub use config::{
    Config, EngineConfig, KnowledgeBaseConfig, PredictionFailurePolicy, PredictorConfig,
};
pub use error::{Error, FactRootError, Result};
pub use learning::{process_verification, LearningOutcome, VerificationOutcome};
pub use llm::{ChatMessage, HttpPredictor, LLMClient, MlPrediction, Predictor, VLLMClient};
pub use provenance::{stable_item_id, ProvenanceLabel, Source};
pub use providers::{CatalogEntry, CatalogSource, KnowledgeSource, SearchHit};
pub use search::{
    extract_keywords, AlternativeAnswer, Query, QueryResult, Resolver, ResolverBuilder,
    NOT_FOUND_ANSWER, NO_SOURCE_CITATION,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "factroot";
