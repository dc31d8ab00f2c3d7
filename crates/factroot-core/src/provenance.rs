//! Provenance labels
//!
//! A label ties an answer to where it came from: the category it was
//! resolved in, the kind of source, and the item inside that source.
//! Labels are plain values. Upgrading one returns a new label.

use crate::category::{normalize_name, DataType, Sector};
use crate::error::FactRootError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Origin of an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    StandardsBody,
    Datasheet,
    Handbook,
    MlPrediction,
    Unverified,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::StandardsBody,
        Source::Datasheet,
        Source::Handbook,
        Source::MlPrediction,
        Source::Unverified,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::StandardsBody => "STANDARDS_BODY",
            Source::Datasheet => "DATASHEET",
            Source::Handbook => "HANDBOOK",
            Source::MlPrediction => "ML_PREDICTION",
            Source::Unverified => "UNVERIFIED",
        }
    }

    /// Human-readable description, used verbatim in reasoning and warnings
    pub fn description(&self) -> &'static str {
        match self {
            Source::StandardsBody => "Standards body publication",
            Source::Datasheet => "Manufacturer datasheet",
            Source::Handbook => "Engineering handbook",
            Source::MlPrediction => "ML prediction (not verified against an authoritative source)",
            Source::Unverified => "Unverified (no authoritative source found)",
        }
    }

    /// Three-letter code used in label identifiers
    pub fn code(&self) -> &'static str {
        match self {
            Source::StandardsBody => "STD",
            Source::Datasheet => "DSH",
            Source::Handbook => "HBK",
            Source::MlPrediction => "MLP",
            Source::Unverified => "UNV",
        }
    }

    /// Whether answers from this source are authoritative and citable
    pub fn is_deterministic(&self) -> bool {
        matches!(
            self,
            Source::StandardsBody | Source::Datasheet | Source::Handbook
        )
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = FactRootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "STANDARDS_BODY" | "STANDARDS" | "STANDARD" | "STD" => Ok(Source::StandardsBody),
            "DATASHEET" | "DSH" => Ok(Source::Datasheet),
            "HANDBOOK" | "HBK" => Ok(Source::Handbook),
            "ML_PREDICTION" | "ML" | "MLP" => Ok(Source::MlPrediction),
            "UNVERIFIED" | "UNV" => Ok(Source::Unverified),
            _ => Err(FactRootError::InvalidInput(format!("Unknown source: {}", s))),
        }
    }
}

/// Immutable provenance record of an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvenanceLabel {
    pub sector: Sector,
    pub data_type: DataType,
    pub source: Source,
    pub item_id: u64,
}

impl ProvenanceLabel {
    pub fn create(sector: Sector, data_type: DataType, source: Source, item_id: u64) -> Self {
        Self {
            sector,
            data_type,
            source,
            item_id,
        }
    }

    /// Copy of this label attributed to `new_source`
    pub fn upgrade(&self, new_source: Source) -> Self {
        Self {
            source: new_source,
            ..*self
        }
    }

    /// Opaque identifier, e.g. `ELEC-SPEC-STD-00000000000003E8`
    pub fn identifier(&self) -> String {
        format!(
            "{}-{}-{}-{:016X}",
            self.sector.code(),
            self.data_type.code(),
            self.source.code(),
            self.item_id
        )
    }
}

impl fmt::Display for ProvenanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

/// Stable pseudo item id for text that has no catalog entry.
///
/// First 8 bytes (big-endian) of the SHA-256 of the trimmed, lower-cased text.
pub fn stable_item_id(text: &str) -> u64 {
    let normalized = text.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_source() -> impl Strategy<Value = Source> {
        prop::sample::select(Source::ALL.to_vec())
    }

    fn any_sector() -> impl Strategy<Value = Sector> {
        prop::sample::select(Sector::ALL.to_vec())
    }

    fn any_data_type() -> impl Strategy<Value = DataType> {
        prop::sample::select(DataType::ALL.to_vec())
    }

    #[test]
    fn test_identifier_format() {
        let label = ProvenanceLabel::create(
            Sector::Electrical,
            DataType::Specification,
            Source::StandardsBody,
            1000,
        );
        assert_eq!(label.identifier(), "ELEC-SPEC-STD-00000000000003E8");
        assert_eq!(label.to_string(), label.identifier());
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!("standards_body".parse::<Source>().unwrap(), Source::StandardsBody);
        assert_eq!("Standards-Body".parse::<Source>().unwrap(), Source::StandardsBody);
        assert_eq!("handbook".parse::<Source>().unwrap(), Source::Handbook);
        assert_eq!("ml".parse::<Source>().unwrap(), Source::MlPrediction);
        assert!("rumour".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_serde_names() {
        assert_eq!(
            serde_json::to_string(&Source::StandardsBody).unwrap(),
            "\"STANDARDS_BODY\""
        );
        assert_eq!(
            serde_json::to_string(&Source::MlPrediction).unwrap(),
            "\"ML_PREDICTION\""
        );
    }

    #[test]
    fn test_stable_item_id() {
        assert_eq!(stable_item_id("Foo bar"), stable_item_id("  foo BAR "));
        assert_ne!(stable_item_id("foo bar"), stable_item_id("foo baz"));
    }

    proptest! {
        #[test]
        fn upgrade_only_replaces_source(
            sector in any_sector(),
            data_type in any_data_type(),
            source in any_source(),
            new_source in any_source(),
            item_id in any::<u64>(),
        ) {
            let label = ProvenanceLabel::create(sector, data_type, source, item_id);
            let before = label;
            let upgraded = label.upgrade(new_source);

            prop_assert_eq!(label, before);
            prop_assert_eq!(upgraded.sector, label.sector);
            prop_assert_eq!(upgraded.data_type, label.data_type);
            prop_assert_eq!(upgraded.item_id, label.item_id);
            prop_assert_eq!(upgraded.source, new_source);
        }
    }
}
