//! §4.5 face-domain leaf evaluators.

use super::LeafOutcome;
use crate::ast::Operator;
use crate::color::{self, ColorQuery};
use crate::engine::Domain;
use crate::error::QueryErrorKind;
use crate::fields::CanonicalField;
use crate::index::{format_bit, CardIndex, PrintingIndex, FLAG_FUNNY, FLAG_RESERVED, FLAG_UNIVERSES_BEYOND};
use crate::keywords::{resolve_keyword, IsKeyword, UNSUPPORTED};
use crate::mana;

/// Every face leaf writes at the canonical slot only: iterate every row,
/// evaluate the predicate against that row's own data, and record the hit
/// at its canonical face.
fn write_matches<F: Fn(usize) -> bool>(card_index: &CardIndex, pred: F) -> Vec<u8> {
    let mut buf = vec![0u8; card_index.face_count()];
    for i in 0..card_index.face_count() {
        if pred(i) {
            buf[card_index.data.canonical_face[i] as usize] = 1;
        }
    }
    buf
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

pub fn evaluate_bare(value: &str, quoted: bool, card_index: &CardIndex) -> LeafOutcome {
    let buf = if quoted {
        let needle = value.to_lowercase();
        write_matches(card_index, |i| card_index.combined_names_lower[i].contains(&needle))
    } else {
        let needle = normalize(value);
        write_matches(card_index, |i| card_index.combined_names_normalized[i].contains(&needle))
    };
    LeafOutcome::ok(buf, Domain::Face)
}

pub fn evaluate_exact(value: &str, card_index: &CardIndex) -> LeafOutcome {
    let needle = value.to_lowercase();
    let buf = write_matches(card_index, |i| {
        card_index.combined_names_lower[i] == needle || card_index.names_lower[i] == needle
    });
    LeafOutcome::ok(buf, Domain::Face)
}

fn cmp_numeric(val: f64, op: Operator, query: f64) -> bool {
    if val.is_nan() || query.is_nan() {
        return false;
    }
    match op {
        Operator::Colon | Operator::Eq => val == query,
        Operator::Neq => val != query,
        Operator::Lt => val < query,
        Operator::Gt => val > query,
        Operator::Lte => val <= query,
        Operator::Gte => val >= query,
    }
}

pub fn evaluate_field(
    canonical: CanonicalField,
    operator: Operator,
    value: &str,
    card_index: &CardIndex,
) -> LeafOutcome {
    match canonical {
        CanonicalField::Name => {
            if value.is_empty() {
                return LeafOutcome::ok(write_matches(card_index, |_| true), Domain::Face);
            }
            let needle = value.to_lowercase();
            let buf = write_matches(card_index, |i| card_index.combined_names_lower[i].contains(&needle));
            LeafOutcome::ok(buf, Domain::Face)
        }
        CanonicalField::Type => {
            if value.is_empty() {
                return LeafOutcome::ok(write_matches(card_index, |_| true), Domain::Face);
            }
            let needle = value.to_lowercase();
            let buf = write_matches(card_index, |i| card_index.type_lines_lower[i].contains(&needle));
            LeafOutcome::ok(buf, Domain::Face)
        }
        CanonicalField::Oracle => {
            if value.is_empty() {
                return LeafOutcome::ok(write_matches(card_index, |_| true), Domain::Face);
            }
            let use_tilde = value.contains('~');
            let needle = value.to_lowercase();
            let buf = write_matches(card_index, |i| {
                if use_tilde {
                    card_index.oracle_texts_tilde_lower[i].contains(&needle)
                } else {
                    card_index.oracle_texts_lower[i].contains(&needle)
                }
            });
            LeafOutcome::ok(buf, Domain::Face)
        }
        CanonicalField::Color | CanonicalField::Identity => {
            if value.is_empty() {
                return LeafOutcome::ok(write_matches(card_index, |_| true), Domain::Face);
            }
            let query = match color::parse_color_value(value) {
                Ok(q) => q,
                Err(e) => return LeafOutcome::err(e, Domain::Face, card_index.face_count()),
            };
            let default_is_superset = canonical == CanonicalField::Color;
            let column = if canonical == CanonicalField::Color {
                &card_index.data.colors
            } else {
                &card_index.data.color_identity
            };
            let buf = write_matches(card_index, |i| {
                color::compare_mask(column[i], query, operator, default_is_superset)
            });
            LeafOutcome::ok(buf, Domain::Face)
        }
        CanonicalField::Power => numeric_leaf(card_index, operator, value, |ci, i| ci.numeric_power[i]),
        CanonicalField::Toughness => {
            numeric_leaf(card_index, operator, value, |ci, i| ci.numeric_toughness[i])
        }
        CanonicalField::Loyalty => numeric_leaf(card_index, operator, value, |ci, i| ci.numeric_loyalty[i]),
        CanonicalField::Defense => numeric_leaf(card_index, operator, value, |ci, i| ci.numeric_defense[i]),
        CanonicalField::ManaValue => {
            numeric_leaf(card_index, operator, value, |ci, i| ci.mana_value[i])
        }
        CanonicalField::Mana => {
            let query = mana::parse_mana_cost(value);
            let buf = write_matches(card_index, |i| mana::contains(&card_index.mana_symbols[i], &query));
            LeafOutcome::ok(buf, Domain::Face)
        }
        CanonicalField::Legal | CanonicalField::Banned | CanonicalField::Restricted => {
            if value.is_empty() {
                return LeafOutcome::ok(write_matches(card_index, |_| true), Domain::Face);
            }
            let Some(bit) = format_bit(value) else {
                return LeafOutcome::err(
                    QueryErrorKind::UnknownFormat(value.to_string()),
                    Domain::Face,
                    card_index.face_count(),
                );
            };
            let mask = 1u32 << bit;
            let column = match canonical {
                CanonicalField::Legal => &card_index.data.legalities_legal,
                CanonicalField::Banned => &card_index.data.legalities_banned,
                _ => &card_index.data.legalities_restricted,
            };
            let buf = write_matches(card_index, |i| (column[i] & mask) != 0);
            LeafOutcome::ok(buf, Domain::Face)
        }
        CanonicalField::Is => unreachable!("is: is dispatched via evaluate_is"),
        _ => unreachable!("printing-domain field reached a face evaluator"),
    }
}

fn numeric_leaf(
    card_index: &CardIndex,
    operator: Operator,
    value: &str,
    column: impl Fn(&CardIndex, usize) -> f64,
) -> LeafOutcome {
    if value.is_empty() {
        return LeafOutcome::ok(write_matches(card_index, |_| true), Domain::Face);
    }
    let query = crate::stat::parse_stat_value(value);
    let buf = write_matches(card_index, |i| cmp_numeric(column(card_index, i), operator, query));
    LeafOutcome::ok(buf, Domain::Face)
}

pub fn evaluate_is(
    value: &str,
    operator: Operator,
    card_index: &CardIndex,
    printing_index: Option<&PrintingIndex>,
) -> LeafOutcome {
    if !matches!(operator, Operator::Colon | Operator::Eq) {
        return LeafOutcome::ok(vec![0u8; card_index.face_count()], Domain::Face);
    }

    let Some(keyword) = resolve_keyword(value) else {
        let lower = value.to_lowercase();
        let err = if UNSUPPORTED.contains(&lower.as_str()) {
            QueryErrorKind::UnsupportedKeyword(value.to_string())
        } else {
            QueryErrorKind::UnknownKeyword(value.to_string())
        };
        return LeafOutcome::err(err, Domain::Face, card_index.face_count());
    };

    if keyword.is_printing_only() {
        return match printing_index {
            None => LeafOutcome::err(QueryErrorKind::PrintingNotLoaded, Domain::Printing, 0),
            Some(pi) => super::printing::evaluate_is_keyword(keyword, card_index, pi),
        };
    }

    let buf = write_matches(card_index, |i| matches_face_keyword(keyword, card_index, i));
    LeafOutcome::ok(buf, Domain::Face)
}

fn has_basic_land_type(type_line: &str, name: &str) -> bool {
    type_line.contains(name)
}

fn basic_land_type_count(type_line: &str) -> usize {
    ["plains", "island", "swamp", "mountain", "forest"]
        .iter()
        .filter(|n| has_basic_land_type(type_line, n))
        .count()
}

fn matches_face_keyword(keyword: IsKeyword, card_index: &CardIndex, i: usize) -> bool {
    use IsKeyword::*;
    let type_line = &card_index.type_lines_lower[i];
    let oracle = &card_index.oracle_texts_lower[i];
    let layout = card_index.data.layout[i].to_lowercase();
    let flags = card_index.data.flags[i];
    let power = card_index.numeric_power[i];
    let toughness = card_index.numeric_toughness[i];
    let mv = card_index.mana_value[i];
    let is_creature = type_line.contains("creature");
    let is_land = type_line.contains("land");

    match keyword {
        Permanent => !type_line.contains("instant") && !type_line.contains("sorcery"),
        Spell => type_line.contains("instant") || type_line.contains("sorcery"),
        Historic => type_line.contains("legendary") || type_line.contains("artifact") || layout == "saga",
        Party => {
            is_creature
                && ["cleric", "rogue", "warrior", "wizard"]
                    .iter()
                    .any(|t| type_line.contains(t))
        }
        Outlaw => ["assassin", "mercenary", "pirate", "rogue", "warlock"]
            .iter()
            .any(|t| type_line.contains(t)),
        Transform => layout.contains("transform"),
        Modal => layout.contains("modal_dfc"),
        Dfc => layout.contains("transform") || layout.contains("modal_dfc") || layout.contains("flip"),
        Meld => layout == "meld",
        Adventure => layout == "adventure",
        Split => layout == "split",
        Leveler => layout == "leveler" || oracle.contains("level up"),
        Flip => layout == "flip",
        Vanilla => is_creature && oracle.trim().is_empty(),
        FrenchVanilla => {
            is_creature && !oracle.trim().is_empty() && !oracle.contains("target") && !oracle.contains('.')
        }
        Commander => {
            (type_line.contains("legendary") && is_creature) || oracle.contains("can be your commander")
        }
        Companion => oracle.contains("companion") && type_line.contains("legendary"),
        Partner => oracle.contains("partner"),
        Bear => is_creature && power == 2.0 && toughness == 2.0 && mv == 2.0,
        Reserved => flags & FLAG_RESERVED != 0,
        Funny => flags & FLAG_FUNNY != 0,
        UniversesBeyond => flags & FLAG_UNIVERSES_BEYOND != 0,
        Hybrid => card_index.mana_symbols[i]
            .symbols
            .keys()
            .any(|k| k.contains('/') && !k.contains('P')),
        Phyrexian => card_index.mana_symbols[i].symbols.keys().any(|k| k.contains("/P")),

        Dual => is_land && basic_land_type_count(type_line) >= 2,
        Shockland => is_land && oracle.contains("pay 2 life"),
        Fetchland => is_land && oracle.contains("search your library") && oracle.contains("sacrifice"),
        Checkland => is_land && oracle.contains("unless you control"),
        Fastland => is_land && oracle.contains("two or fewer other lands"),
        Painland => is_land && oracle.contains("deals 1 damage to you"),
        Slowland => is_land && oracle.contains("two or more other lands") && oracle.contains("tapped unless"),
        Bounceland => is_land && oracle.contains("return a land you control to its owner's hand"),
        Bikeland => is_land && oracle.contains("cycling"),
        Bondland => {
            is_land && oracle.contains("unless you control two or more other lands") && oracle.contains("pay 1 life")
        }
        Canopyland => is_land && oracle.contains("pay 1 life") && oracle.contains("draw a card"),
        Creatureland => is_land && oracle.contains("becomes a") && oracle.contains("creature"),
        Filterland => is_land && oracle.contains("spend this mana only"),
        Gainland => is_land && oracle.contains("you gain 1 life"),
        Pathway => is_land && layout.contains("modal_dfc"),
        Scryland => is_land && oracle.contains("scry 1"),
        Surveilland => is_land && oracle.contains("surveil 1"),
        Shadowland => is_land && oracle.contains("reveal a") && oracle.contains("land card from your hand"),
        Storageland => is_land && oracle.contains("storage counter"),
        Tangoland => is_land && oracle.contains("unless you control two or more basic lands"),
        Tricycleland => is_land && basic_land_type_count(type_line) >= 3 && oracle.contains("cycling"),
        Triland => is_land && basic_land_type_count(type_line) >= 3,

        Foil | Nonfoil | Etched | FullArt | Textless | Reprint | Promo | Digital | Hires | Borderless
        | Extended => unreachable!("printing-only keyword reached the face dispatcher"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{CardIndex, FaceData};

    fn fixture() -> CardIndex {
        CardIndex::build(FaceData {
            name: vec!["Lightning Bolt".into(), "Mountain".into()],
            combined_name: vec!["Lightning Bolt".into(), "Mountain".into()],
            mana_cost: vec!["{R}".into(), "".into()],
            oracle_text: vec!["Lightning Bolt deals 3 damage to any target.".into(), "".into()],
            oracle_text_tilde: vec!["~ deals 3 damage to any target.".into(), "".into()],
            colors: vec![color::RED, 0],
            color_identity: vec![color::RED, 0],
            type_line: vec!["Instant".into(), "Basic Land".into()],
            power: vec![None, None],
            toughness: vec![None, None],
            loyalty: vec![None, None],
            defense: vec![None, None],
            legalities_legal: vec![0b11, 0b11],
            legalities_banned: vec![0, 0],
            legalities_restricted: vec![0, 0],
            card_index: vec![0, 1],
            canonical_face: vec![0, 1],
            scryfall_id: vec!["a".into(), "b".into()],
            layout: vec!["normal".into(), "normal".into()],
            flags: vec![0, 0],
            power_dict: vec![],
            toughness_dict: vec![],
            loyalty_dict: vec![],
            defense_dict: vec![],
        })
    }

    #[test]
    fn bare_word_matches_normalized_name() {
        let ci = fixture();
        let out = evaluate_bare("bolt", false, &ci);
        assert_eq!(out.buffer, vec![1, 0]);
    }

    #[test]
    fn type_field_matches_substring() {
        let ci = fixture();
        let out = evaluate_field(CanonicalField::Type, Operator::Colon, "instant", &ci);
        assert_eq!(out.buffer, vec![1, 0]);
    }

    #[test]
    fn legal_unknown_format_errs() {
        let ci = fixture();
        let out = evaluate_field(CanonicalField::Legal, Operator::Colon, "not-a-format", &ci);
        assert!(out.error.is_some());
        assert_eq!(out.match_count, -1);
    }

    #[test]
    fn empty_value_matches_all_for_numeric_color_and_legal_fields() {
        let ci = fixture();
        for field in [
            CanonicalField::Power,
            CanonicalField::Toughness,
            CanonicalField::Loyalty,
            CanonicalField::Defense,
            CanonicalField::ManaValue,
            CanonicalField::Color,
            CanonicalField::Identity,
            CanonicalField::Legal,
            CanonicalField::Banned,
            CanonicalField::Restricted,
        ] {
            let out = evaluate_field(field, Operator::Colon, "", &ci);
            assert!(out.error.is_none(), "{field:?} errored on empty value");
            assert_eq!(out.buffer, vec![1, 1], "{field:?} did not match all faces");
        }
    }
    }
}
