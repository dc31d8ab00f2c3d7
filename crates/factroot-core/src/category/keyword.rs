//! Keyword-table category classifier

use super::{CategoryClassifier, DataType, Sector};
use crate::search::extract_keywords;

/// Fallback pair when no keyword matches
pub const DEFAULT_CATEGORY: (Sector, DataType) = (Sector::Electrical, DataType::Specification);

const SECTOR_KEYWORDS: &[(Sector, &[&str])] = &[
    (
        Sector::Electrical,
        &[
            "voltage", "current", "circuit", "resistor", "capacitor", "wiring", "touch",
            "insulation", "ampere", "ohm", "electrical", "iec", "transformer", "earthing",
            "grounding",
        ],
    ),
    (
        Sector::Mechanical,
        &[
            "torque", "bearing", "gear", "shaft", "fatigue", "stress", "strain", "spring",
            "mechanical", "tolerance", "fastener", "bolt",
        ],
    ),
    (
        Sector::Chemical,
        &[
            "reaction", "solvent", "concentration", "chemical", "molar", "catalyst",
            "corrosion", "acid",
        ],
    ),
    (
        Sector::Digital,
        &[
            "firmware", "protocol", "bus", "microcontroller", "software", "digital", "logic",
            "i2c", "spi", "usb", "bandwidth",
        ],
    ),
    (
        Sector::Aerospace,
        &[
            "aircraft", "thrust", "airfoil", "avionics", "orbit", "aerospace", "rocket", "wing",
        ],
    ),
    (
        Sector::Biomedical,
        &[
            "implant", "biocompatible", "medical", "patient", "biomedical", "sterilization",
            "prosthetic",
        ],
    ),
    (
        Sector::Energy,
        &[
            "battery", "solar", "turbine", "photovoltaic", "energy", "grid", "efficiency", "fuel",
        ],
    ),
    (
        Sector::Materials,
        &[
            "alloy", "polymer", "ceramic", "composite", "hardness", "tensile", "yield",
            "material", "materials", "steel", "aluminum",
        ],
    ),
    (
        Sector::Construction,
        &[
            "concrete", "beam", "foundation", "rebar", "building", "construction", "masonry",
        ],
    ),
    (
        Sector::Transport,
        &[
            "vehicle", "railway", "traffic", "brake", "automotive", "transport", "road",
        ],
    ),
];

const DATA_TYPE_KEYWORDS: &[(DataType, &[&str])] = &[
    (
        DataType::Specification,
        &[
            "maximum", "minimum", "limit", "rating", "rated", "standard", "requirement",
            "specification", "allowed", "permissible",
        ],
    ),
    (
        DataType::Datasheet,
        &["datasheet", "part", "pinout", "package", "manufacturer"],
    ),
    (
        DataType::Formula,
        &["formula", "equation", "calculate", "compute", "derive"],
    ),
    (DataType::Table, &["table", "chart", "list", "values"]),
    (
        DataType::Diagram,
        &["diagram", "schematic", "drawing", "layout"],
    ),
    (
        DataType::Procedure,
        &["procedure", "steps", "install", "how", "method"],
    ),
    (
        DataType::Measurement,
        &["measure", "measured", "measurement", "expected", "typical", "life"],
    ),
    (
        DataType::Simulation,
        &["simulation", "simulate", "model", "fea", "cfd"],
    ),
];

/// Classifier that counts keyword hits against fixed tables.
///
/// The category with the most hits wins; ties go to the earlier entry in the
/// table. No hits at all yields [`DEFAULT_CATEGORY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl CategoryClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> (Sector, DataType) {
        let keywords = extract_keywords(text);

        let sector = best_match(SECTOR_KEYWORDS, &keywords).unwrap_or(DEFAULT_CATEGORY.0);
        let data_type = best_match(DATA_TYPE_KEYWORDS, &keywords).unwrap_or(DEFAULT_CATEGORY.1);

        tracing::debug!(
            "Classified {:?} as {}/{} from {} keywords",
            text,
            sector,
            data_type,
            keywords.len()
        );

        (sector, data_type)
    }
}

fn best_match<T: Copy>(table: &[(T, &[&str])], keywords: &[String]) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for (category, vocabulary) in table {
        let hits = keywords
            .iter()
            .filter(|k| vocabulary.contains(&k.as_str()))
            .count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((*category, hits));
        }
    }
    best.map(|(category, _)| category)
}
