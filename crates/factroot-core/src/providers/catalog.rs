//! Catalog provider: a knowledge source backed by a list of curated entries
//!
//! Catalogs are loaded from YAML, JSON or CSV files. YAML and JSON files hold
//! a list of entries; CSV files use the headers
//! `id,value,citation,sector,keywords` with `;`-separated keywords.

use crate::category::Sector;
use crate::error::{FactRootError, Result};
use crate::providers::{KnowledgeSource, SearchHit};
use crate::provenance::Source;
use crate::search::extract_keywords;
use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One curated fact in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub value: String,
    pub citation: String,

    /// Restricts the entry to one sector. `None` matches every sector.
    #[serde(default)]
    pub sector: Option<Sector>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: u64,
    value: String,
    citation: String,
    #[serde(default)]
    sector: String,
    #[serde(default)]
    keywords: String,
}

struct IndexedEntry {
    entry: CatalogEntry,
    vocabulary: HashSet<String>,
}

impl IndexedEntry {
    fn new(entry: CatalogEntry) -> Self {
        let text = format!(
            "{} {} {}",
            entry.keywords.join(" "),
            entry.value,
            entry.citation
        );
        let vocabulary = extract_keywords(&text).into_iter().collect();
        Self { entry, vocabulary }
    }
}

/// Knowledge source scoring entries by keyword overlap
///
/// Relevance is the share of query keywords found in an entry's vocabulary
/// (its keywords plus the words of its value and citation).
pub struct CatalogSource {
    source: Source,
    entries: Vec<IndexedEntry>,
}

impl CatalogSource {
    /// Create a catalog for `source` from in-memory entries
    pub fn new(source: Source, entries: Vec<CatalogEntry>) -> Self {
        Self {
            source,
            entries: entries.into_iter().map(IndexedEntry::new).collect(),
        }
    }

    /// Load a catalog file, picking the format from its extension
    pub fn from_path(source: Source, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FactRootError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read catalog {:?}: {}", path, e),
            ))
        })?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();

        let entries = match extension.as_str() {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "csv" => parse_csv(&content)?,
            other => {
                return Err(FactRootError::InvalidInput(format!(
                    "Unsupported catalog format '{}' for {:?}. Expected: yml, yaml, json or csv",
                    other, path
                )))
            }
        };

        let catalog = Self::new(source, entries);
        tracing::info!(
            "Loaded {} {} entries from {:?}",
            catalog.len(),
            source,
            path
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn best_entry(&self, keywords: &[String], sector: Sector) -> Option<(&CatalogEntry, f64)> {
        if keywords.is_empty() {
            return None;
        }

        let mut best: Option<(&CatalogEntry, usize)> = None;
        for indexed in &self.entries {
            if indexed.entry.sector.is_some_and(|s| s != sector) {
                continue;
            }
            let matched = keywords
                .iter()
                .filter(|k| indexed.vocabulary.contains(k.as_str()))
                .count();
            if matched > 0 && best.map_or(true, |(_, top)| matched > top) {
                best = Some((&indexed.entry, matched));
            }
        }

        best.map(|(entry, matched)| (entry, matched as f64 / keywords.len() as f64))
    }
}

#[async_trait]
impl KnowledgeSource for CatalogSource {
    fn source(&self) -> Source {
        self.source
    }

    async fn search(&self, keywords: &[String], sector: Sector) -> Result<Option<SearchHit>> {
        Ok(self.best_entry(keywords, sector).map(|(entry, relevance)| {
            SearchHit::new(
                entry.value.clone(),
                self.source,
                entry.id,
                entry.citation.clone(),
                relevance,
            )
        }))
    }
}

fn parse_csv(content: &str) -> Result<Vec<CatalogEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for (row_num, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|e| {
            FactRootError::Parse(format!("Failed to parse catalog row {}: {}", row_num + 1, e))
        })?;

        let sector = if row.sector.is_empty() {
            None
        } else {
            Some(row.sector.parse::<Sector>()?)
        };

        let keywords = row
            .keywords
            .split(';')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        entries.push(CatalogEntry {
            id: row.id,
            value: row.value,
            citation: row.citation,
            sector,
            keywords,
        });
    }

    Ok(entries)
}
