//! Knowledge source abstraction
//!
//! Authoritative answers come from three kinds of knowledge bases:
//! - Standards body publications (IEC, ISO, IEEE, ...)
//! - Manufacturer datasheets
//! - Engineering handbooks
//!
//! Each one implements the KnowledgeSource trait and returns at most one
//! best match per lookup.

use crate::category::Sector;
use crate::error::Result;
use crate::provenance::Source;

pub mod catalog;

pub use catalog::{CatalogEntry, CatalogSource};

/// Knowledge source trait - every authoritative lookup provider implements this
///
/// Implementations are shared across concurrent resolutions and must be safe
/// to call from several tasks at once.
#[async_trait::async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Kind of source this provider answers for
    fn source(&self) -> Source;

    /// Best match for the keywords within a sector, if any
    async fn search(&self, keywords: &[String], sector: Sector) -> Result<Option<SearchHit>>;
}

/// Single match returned by a knowledge source
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Answer text, quoted verbatim from the source
    pub value: String,

    /// Source that produced the hit
    pub source: Source,

    /// Identifier of the item inside its source
    pub item_id: u64,

    /// Citation (document, clause, page...)
    pub citation: String,

    /// How well the hit matches the query, in [0, 1]
    pub relevance: f64,
}

impl SearchHit {
    /// Create a hit. Relevance is clamped into [0, 1]; NaN becomes 0.
    pub fn new(
        value: impl Into<String>,
        source: Source,
        item_id: u64,
        citation: impl Into<String>,
        relevance: f64,
    ) -> Self {
        Self {
            value: value.into(),
            source,
            item_id,
            citation: citation.into(),
            relevance: clamp_unit(relevance),
        }
    }
}

/// Clamp a score into [0, 1], mapping NaN to 0
pub(crate) fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
