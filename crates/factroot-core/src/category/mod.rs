//! Engineering sector and data type categories
//!
//! Every query is resolved inside a `(Sector, DataType)` pair. The pair is
//! either supplied by the caller or produced by a [`CategoryClassifier`].

mod keyword;

pub use keyword::KeywordClassifier;

use crate::error::FactRootError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engineering sector a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sector {
    Electrical,
    Mechanical,
    Chemical,
    Digital,
    Aerospace,
    Biomedical,
    Energy,
    Materials,
    Construction,
    Transport,
}

impl Sector {
    /// All sectors in declaration order
    pub const ALL: [Sector; 10] = [
        Sector::Electrical,
        Sector::Mechanical,
        Sector::Chemical,
        Sector::Digital,
        Sector::Aerospace,
        Sector::Biomedical,
        Sector::Energy,
        Sector::Materials,
        Sector::Construction,
        Sector::Transport,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Electrical => "ELECTRICAL",
            Sector::Mechanical => "MECHANICAL",
            Sector::Chemical => "CHEMICAL",
            Sector::Digital => "DIGITAL",
            Sector::Aerospace => "AEROSPACE",
            Sector::Biomedical => "BIOMEDICAL",
            Sector::Energy => "ENERGY",
            Sector::Materials => "MATERIALS",
            Sector::Construction => "CONSTRUCTION",
            Sector::Transport => "TRANSPORT",
        }
    }

    /// Four-letter code used in provenance identifiers
    pub fn code(&self) -> &'static str {
        match self {
            Sector::Electrical => "ELEC",
            Sector::Mechanical => "MECH",
            Sector::Chemical => "CHEM",
            Sector::Digital => "DIGI",
            Sector::Aerospace => "AERO",
            Sector::Biomedical => "BIOM",
            Sector::Energy => "ENRG",
            Sector::Materials => "MATL",
            Sector::Construction => "CONS",
            Sector::Transport => "TRAN",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = FactRootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(s);
        Sector::ALL
            .iter()
            .copied()
            .find(|sector| sector.as_str() == normalized || sector.code() == normalized)
            .ok_or_else(|| FactRootError::InvalidInput(format!("Unknown sector: {}", s)))
    }
}

/// Kind of engineering data a question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Specification,
    Datasheet,
    Formula,
    Table,
    Diagram,
    Procedure,
    Measurement,
    Simulation,
}

impl DataType {
    /// All data types in declaration order
    pub const ALL: [DataType; 8] = [
        DataType::Specification,
        DataType::Datasheet,
        DataType::Formula,
        DataType::Table,
        DataType::Diagram,
        DataType::Procedure,
        DataType::Measurement,
        DataType::Simulation,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Specification => "SPECIFICATION",
            DataType::Datasheet => "DATASHEET",
            DataType::Formula => "FORMULA",
            DataType::Table => "TABLE",
            DataType::Diagram => "DIAGRAM",
            DataType::Procedure => "PROCEDURE",
            DataType::Measurement => "MEASUREMENT",
            DataType::Simulation => "SIMULATION",
        }
    }

    /// Four-letter code used in provenance identifiers
    pub fn code(&self) -> &'static str {
        match self {
            DataType::Specification => "SPEC",
            DataType::Datasheet => "DSHT",
            DataType::Formula => "FORM",
            DataType::Table => "TABL",
            DataType::Diagram => "DIAG",
            DataType::Procedure => "PROC",
            DataType::Measurement => "MEAS",
            DataType::Simulation => "SIML",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = FactRootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(s);
        DataType::ALL
            .iter()
            .copied()
            .find(|dt| dt.as_str() == normalized || dt.code() == normalized)
            .ok_or_else(|| FactRootError::InvalidInput(format!("Unknown data type: {}", s)))
    }
}

/// Upper-case a user supplied enum name, mapping `-` and spaces to `_`
pub(crate) fn normalize_name(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Maps free query text to a `(Sector, DataType)` pair.
///
/// Implementations always answer. When nothing in the text points to a
/// category they return a fixed default instead of failing.
pub trait CategoryClassifier: Send + Sync {
    fn classify(&self, text: &str) -> (Sector, DataType);
}
