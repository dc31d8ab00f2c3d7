//! Query resolution
//!
//! Provides:
//! - Query parsing and keyword extraction
//! - Deterministic-first resolution across knowledge sources
//! - Result assembly with provenance, reasoning and warnings

mod builder;
mod resolver;

pub use builder::{NOT_FOUND_ANSWER, NO_SOURCE_CITATION};
pub use resolver::{Resolver, ResolverBuilder};

use crate::category::{DataType, Sector};
use crate::provenance::{ProvenanceLabel, Source};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PUNCTUATION_RE: Regex = Regex::new(r"[^\p{L}\p{N}]").unwrap();
}

/// Minimum keyword length (exclusive)
const MIN_KEYWORD_LEN: usize = 2;

/// Extract lowercase keywords from free text.
///
/// Words are split on whitespace, stripped of punctuation and kept when
/// longer than two characters. Duplicates are dropped, first occurrence wins.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        let cleaned = PUNCTUATION_RE.replace_all(word, "").to_lowercase();
        if cleaned.chars().count() > MIN_KEYWORD_LEN && !keywords.contains(&cleaned) {
            keywords.push(cleaned);
        }
    }
    keywords
}

/// A question to resolve
///
/// Keywords are derived once from the raw text and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    raw: String,
    keywords: Vec<String>,
    sector: Option<Sector>,
    data_type: Option<DataType>,
    require_deterministic: bool,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let keywords = extract_keywords(&raw);
        Self {
            raw,
            keywords,
            sector: None,
            data_type: None,
            require_deterministic: false,
        }
    }

    /// Force the sector instead of classifying the text
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }

    /// Force the data type instead of classifying the text
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Only accept answers from authoritative sources
    pub fn deterministic_only(mut self) -> Self {
        self.require_deterministic = true;
        self
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn require_deterministic(&self) -> bool {
        self.require_deterministic
    }
}

/// Secondary candidate attached to a result for disambiguation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeAnswer {
    pub value: String,
    pub source: Source,
    pub confidence: f64,
    pub citation: String,
    pub reason: String,
}

/// Final answer of a resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    pub label: ProvenanceLabel,
    pub confidence: f64,
    pub is_deterministic: bool,
    pub citation: String,
    pub reasoning: String,
    #[serde(default)]
    pub alternatives: Vec<AlternativeAnswer>,
}

impl QueryResult {
    /// Warning to show next to any answer that is not authoritative
    pub fn warning(&self) -> Option<String> {
        if self.is_deterministic {
            return None;
        }
        Some(format!(
            "UNVERIFIED ANSWER - source: {} (confidence {:.0}%). Do not treat this answer as authoritative.",
            self.label.source.description(),
            self.confidence * 100.0
        ))
    }

    /// Opaque provenance identifier of the answer
    pub fn provenance_id(&self) -> String {
        self.label.identifier()
    }
}
