//! Face-domain columnar input (`FaceData`, owned by the ETL) and the
//! evaluation view built over it (`CardIndex`).

use crate::mana::{self, ManaCost};
use crate::stat::parse_stat_value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recognized format names, in the order they occupy bits 0..21 of the
/// `legalities_*` masks. `format_bit` resolves a user-typed name to its bit.
pub const FORMATS: &[&str] = &[
    "standard",
    "pioneer",
    "modern",
    "legacy",
    "vintage",
    "commander",
    "pauper",
    "historic",
    "explorer",
    "alchemy",
    "brawl",
    "standardbrawl",
    "timeless",
    "oathbreaker",
    "penny",
    "duel",
    "oldschool",
    "premodern",
    "predh",
    "future",
    "gladiator",
];

/// Bit index for a format name (case-insensitive), or `None` if unrecognized.
pub fn format_bit(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    FORMATS.iter().position(|f| *f == lower).map(|i| i as u32)
}

pub const FLAG_RESERVED: u16 = 1 << 0;
pub const FLAG_FUNNY: u16 = 1 << 1;
pub const FLAG_UNIVERSES_BEYOND: u16 = 1 << 2;

/// Columnar face data, one row per printable face of a card. Produced by the
/// ETL pipeline; treated here as an opaque, immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceData {
    pub name: Vec<String>,
    pub combined_name: Vec<String>,
    pub mana_cost: Vec<String>,
    pub oracle_text: Vec<String>,
    pub oracle_text_tilde: Vec<String>,
    pub colors: Vec<u8>,
    pub color_identity: Vec<u8>,
    pub type_line: Vec<String>,
    /// Indices into `power_dict`/`toughness_dict`/etc; `None` if the face has
    /// no value for that stat (e.g. an instant has no power).
    pub power: Vec<Option<u32>>,
    pub toughness: Vec<Option<u32>>,
    pub loyalty: Vec<Option<u32>>,
    pub defense: Vec<Option<u32>>,
    pub legalities_legal: Vec<u32>,
    pub legalities_banned: Vec<u32>,
    pub legalities_restricted: Vec<u32>,
    pub card_index: Vec<u32>,
    pub canonical_face: Vec<u32>,
    pub scryfall_id: Vec<String>,
    pub layout: Vec<String>,
    pub flags: Vec<u16>,
    pub power_dict: Vec<String>,
    pub toughness_dict: Vec<String>,
    pub loyalty_dict: Vec<String>,
    pub defense_dict: Vec<String>,
}

/// Strip balanced-parenthesis reminder text, handling nesting defensively
/// even though real oracle text rarely nests parens.
fn strip_reminder_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0u32;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn normalize_alnum_lower(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn lookup_stat(dict: &[String], idx: Option<u32>) -> f64 {
    match idx {
        None => f64::NAN,
        Some(i) => dict
            .get(i as usize)
            .map(|s| parse_stat_value(s))
            .unwrap_or(f64::NAN),
    }
}

/// Evaluation view over `FaceData`: precomputed lowercased strings,
/// reminder-stripped oracle text, mana multisets/values, parsed stat
/// lookups, and the canonical-face reverse map. Immutable after
/// construction.
pub struct CardIndex {
    pub data: FaceData,
    pub names_lower: Vec<String>,
    pub combined_names_lower: Vec<String>,
    pub combined_names_normalized: Vec<String>,
    pub oracle_texts_lower: Vec<String>,
    pub oracle_texts_tilde_lower: Vec<String>,
    pub mana_costs_lower: Vec<String>,
    pub mana_symbols: Vec<ManaCost>,
    pub mana_value: Vec<f64>,
    pub type_lines_lower: Vec<String>,
    pub numeric_power: Vec<f64>,
    pub numeric_toughness: Vec<f64>,
    pub numeric_loyalty: Vec<f64>,
    pub numeric_defense: Vec<f64>,
    /// canonical face → every face row index sharing that identity.
    pub faces_of: HashMap<u32, Vec<u32>>,
}

impl CardIndex {
    pub fn face_count(&self) -> usize {
        self.data.name.len()
    }

    /// Build the evaluation view from columnar input. Panics if the input's
    /// columns are not all the same length — that is a producer bug, not a
    /// query-time condition, and has no place in the error-as-value model
    /// §7 defines for query evaluation.
    pub fn build(data: FaceData) -> Self {
        let n = data.name.len();
        assert_eq!(data.combined_name.len(), n, "FaceData column length mismatch");
        assert_eq!(data.mana_cost.len(), n, "FaceData column length mismatch");
        assert_eq!(data.oracle_text.len(), n, "FaceData column length mismatch");
        assert_eq!(data.canonical_face.len(), n, "FaceData column length mismatch");

        let names_lower: Vec<String> = data.name.iter().map(|s| s.to_lowercase()).collect();
        let combined_names_lower: Vec<String> =
            data.combined_name.iter().map(|s| s.to_lowercase()).collect();
        let combined_names_normalized: Vec<String> =
            data.combined_name.iter().map(|s| normalize_alnum_lower(s)).collect();
        let oracle_texts_lower: Vec<String> = data
            .oracle_text
            .iter()
            .map(|s| strip_reminder_text(s).to_lowercase())
            .collect();
        let oracle_texts_tilde_lower: Vec<String> = data
            .oracle_text_tilde
            .iter()
            .map(|s| strip_reminder_text(s).to_lowercase())
            .collect();
        let mana_costs_lower: Vec<String> = data.mana_cost.iter().map(|s| s.to_lowercase()).collect();
        let mana_symbols: Vec<ManaCost> = data.mana_cost.iter().map(|s| mana::parse_mana_cost(s)).collect();
        let mana_value: Vec<f64> = mana_symbols.iter().map(mana::mana_value).collect();
        let type_lines_lower: Vec<String> = data.type_line.iter().map(|s| s.to_lowercase()).collect();

        let numeric_power = (0..n).map(|i| lookup_stat(&data.power_dict, data.power[i])).collect();
        let numeric_toughness = (0..n)
            .map(|i| lookup_stat(&data.toughness_dict, data.toughness[i]))
            .collect();
        let numeric_loyalty = (0..n).map(|i| lookup_stat(&data.loyalty_dict, data.loyalty[i])).collect();
        let numeric_defense = (0..n).map(|i| lookup_stat(&data.defense_dict, data.defense[i])).collect();

        let mut faces_of: HashMap<u32, Vec<u32>> = HashMap::new();
        for (row, &canonical) in data.canonical_face.iter().enumerate() {
            faces_of.entry(canonical).or_default().push(row as u32);
        }

        CardIndex {
            data,
            names_lower,
            combined_names_lower,
            combined_names_normalized,
            oracle_texts_lower,
            oracle_texts_tilde_lower,
            mana_costs_lower,
            mana_symbols,
            mana_value,
            type_lines_lower,
            numeric_power,
            numeric_toughness,
            numeric_loyalty,
            numeric_defense,
            faces_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_text_is_stripped() {
        assert_eq!(
            strip_reminder_text("Flying (This creature can't be blocked except by flying.)"),
            "Flying "
        );
    }

    #[test]
    fn nested_parens_are_handled() {
        assert_eq!(strip_reminder_text("a(b(c)d)e"), "ae");
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_alnum_lower("Jace, the Mind Sculptor"), "jacethemindsculptor");
    }

    #[test]
    fn format_bit_is_case_insensitive() {
        assert_eq!(format_bit("Standard"), format_bit("standard"));
        assert!(format_bit("standard").is_some());
        assert!(format_bit("not-a-format").is_none());
    }
}
