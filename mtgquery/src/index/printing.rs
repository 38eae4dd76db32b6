//! Printing-domain columnar input (`PrintingData`) and the evaluation view
//! built over it (`PrintingIndex`). Optional: a `CardIndex` can exist on its
//! own without any printing data loaded (§4.12 `printing data not loaded`).

use super::card::CardIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finish {
    Nonfoil,
    Foil,
    Etched,
}

pub const FULL_ART: u16 = 1 << 0;
pub const TEXTLESS: u16 = 1 << 1;
pub const REPRINT: u16 = 1 << 2;
pub const PROMO: u16 = 1 << 3;
pub const DIGITAL: u16 = 1 << 4;
pub const HIRES: u16 = 1 << 5;
pub const BORDERLESS: u16 = 1 << 6;
pub const EXTENDED_ART: u16 = 1 << 7;

const FRAMES: &[&str] = &["1993", "1997", "2003", "2015", "future"];

/// Bit/rank for a frame name, or `None` if unrecognized.
pub fn frame_bit(name: &str) -> Option<u8> {
    FRAMES.iter().position(|f| *f == name.to_lowercase()).map(|i| i as u8)
}

const RARITIES: &[&str] = &["common", "uncommon", "rare", "mythic"];
const RARITY_ALIASES: &[(&str, &str)] = &[("c", "common"), ("u", "uncommon"), ("r", "rare"), ("m", "mythic")];

/// Rank for a rarity name/abbreviation, ordered common < uncommon < rare <
/// mythic, or `None` if unrecognized.
pub fn rarity_rank(name: &str) -> Option<u8> {
    let lower = name.to_lowercase();
    let resolved = RARITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, full)| *full)
        .unwrap_or(lower.as_str());
    RARITIES.iter().position(|r| *r == resolved).map(|i| i as u8)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetInfo {
    pub code: String,
    pub name: String,
    pub released_at: u32,
}

/// Columnar printing data, one row per distinct physical printing.
/// `canonical_face_ref` points at a row in the associated `FaceData`'s
/// `canonical_face` column, not necessarily the owning face's own row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintingData {
    pub canonical_face_ref: Vec<u32>,
    pub scryfall_id: Vec<String>,
    pub collector_number: Vec<String>,
    pub set_index: Vec<u32>,
    pub rarity: Vec<u8>,
    pub printing_flags: Vec<u16>,
    pub finish: Vec<Finish>,
    pub frame: Vec<u8>,
    /// Price in integer cents; 0 means unknown.
    pub price_usd: Vec<u32>,
    /// Release date as YYYYMMDD; 0 means unknown.
    pub released_at: Vec<u32>,
    pub set_lookup: Vec<SetInfo>,
}

/// Evaluation view over `PrintingData`: precomputed lowercased strings and
/// the canonical-face → printing-rows reverse map.
pub struct PrintingIndex {
    pub data: PrintingData,
    pub collector_numbers_lower: Vec<String>,
    pub set_codes_lower: Vec<String>,
    pub set_released_at: Vec<u32>,
    pub known_set_codes: HashSet<String>,
    /// canonical face → every printing row index for that face identity.
    pub printings_of: HashMap<u32, Vec<u32>>,
}

impl PrintingIndex {
    pub fn printing_count(&self) -> usize {
        self.data.canonical_face_ref.len()
    }

    /// Build the evaluation view. `card_index` supplies the canonical-face
    /// identity each printing row's `canonical_face_ref` resolves through;
    /// panics on malformed input for the same reason `CardIndex::build` does.
    pub fn build(data: PrintingData, card_index: &CardIndex) -> Self {
        let n = data.canonical_face_ref.len();
        assert_eq!(data.scryfall_id.len(), n, "PrintingData column length mismatch");
        assert_eq!(data.set_index.len(), n, "PrintingData column length mismatch");
        assert_eq!(data.collector_number.len(), n, "PrintingData column length mismatch");

        let collector_numbers_lower: Vec<String> =
            data.collector_number.iter().map(|s| s.to_lowercase()).collect();

        let set_codes_lower: Vec<String> = data
            .set_index
            .iter()
            .map(|&i| {
                data.set_lookup
                    .get(i as usize)
                    .map(|s| s.code.to_lowercase())
                    .unwrap_or_default()
            })
            .collect();
        let set_released_at: Vec<u32> = data
            .set_index
            .iter()
            .map(|&i| data.set_lookup.get(i as usize).map(|s| s.released_at).unwrap_or(0))
            .collect();

        let known_set_codes: HashSet<String> =
            data.set_lookup.iter().map(|s| s.code.to_lowercase()).collect();

        let mut printings_of: HashMap<u32, Vec<u32>> = HashMap::new();
        for (row, &face_ref) in data.canonical_face_ref.iter().enumerate() {
            let canonical = card_index
                .data
                .canonical_face
                .get(face_ref as usize)
                .copied()
                .unwrap_or(face_ref);
            printings_of.entry(canonical).or_default().push(row as u32);
        }

        PrintingIndex {
            data,
            collector_numbers_lower,
            set_codes_lower,
            set_released_at,
            known_set_codes,
            printings_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_aliases_rank_in_order() {
        assert!(rarity_rank("c").unwrap() < rarity_rank("u").unwrap());
        assert!(rarity_rank("uncommon").unwrap() < rarity_rank("rare").unwrap());
        assert!(rarity_rank("r").unwrap() < rarity_rank("mythic").unwrap());
        assert!(rarity_rank("not-a-rarity").is_none());
    }

    #[test]
    fn frame_bit_recognizes_known_frames() {
        assert!(frame_bit("2015").is_some());
        assert!(frame_bit("future").is_some());
        assert!(frame_bit("bogus").is_none());
    }
}
