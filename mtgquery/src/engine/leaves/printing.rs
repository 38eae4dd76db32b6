//! §4.7 printing-domain leaf evaluators, plus the printing-only `is:`
//! keywords dispatched here from `face::evaluate_is`.

use super::LeafOutcome;
use crate::ast::Operator;
use crate::engine::Domain;
use crate::error::QueryErrorKind;
use crate::fields::CanonicalField;
use crate::index::{frame_bit, rarity_rank, CardIndex, Finish, PrintingIndex};
use crate::keywords::IsKeyword;

fn cmp_ordered(val: i64, op: Operator, query: i64) -> bool {
    match op {
        Operator::Colon | Operator::Eq => val == query,
        Operator::Neq => val != query,
        Operator::Lt => val < query,
        Operator::Gt => val > query,
        Operator::Lte => val <= query,
        Operator::Gte => val >= query,
    }
}

/// Parse a dollar-string price query (`"3.50"`, `"3"`) into integer cents.
fn parse_price_cents(value: &str) -> Option<u32> {
    let trimmed = value.trim().trim_start_matches('$');
    let parsed: f64 = trimmed.parse().ok()?;
    if parsed.is_sign_negative() || !parsed.is_finite() {
        return None;
    }
    Some((parsed * 100.0).round() as u32)
}

/// `YYYY[-MM[-DD]]`, clamping an out-of-range month/day into `[1,12]`/`[1,31]`
/// and padding missing components with the lowest value, per §4.7 `date`.
fn parse_partial_date(value: &str) -> Option<u32> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let year: u32 = parts[0].parse().ok()?;
    let month: u32 = match parts.get(1) {
        Some(m) => m.parse::<u32>().ok()?.clamp(1, 12),
        None => 1,
    };
    let day: u32 = match parts.get(2) {
        Some(d) => d.parse::<u32>().ok()?.clamp(1, 31),
        None => 1,
    };
    Some(year * 10_000 + month * 100 + day)
}

pub fn evaluate(
    canonical: CanonicalField,
    operator: Operator,
    value: &str,
    printing_index: &PrintingIndex,
) -> LeafOutcome {
    let n = printing_index.printing_count();
    match canonical {
        CanonicalField::Set => {
            let lower = value.to_lowercase();
            if !printing_index.known_set_codes.contains(&lower) {
                return LeafOutcome::err(QueryErrorKind::UnknownSet(value.to_string()), Domain::Printing, n);
            }
            let mut buf = vec![0u8; n];
            for i in 0..n {
                if printing_index.set_codes_lower[i] == lower {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        CanonicalField::Rarity => {
            let Some(query_rank) = rarity_rank(value) else {
                return LeafOutcome::err(QueryErrorKind::UnknownRarity(value.to_string()), Domain::Printing, n);
            };
            let mut buf = vec![0u8; n];
            for i in 0..n {
                if cmp_ordered(printing_index.data.rarity[i] as i64, operator, query_rank as i64) {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        CanonicalField::Price => {
            let Some(query_cents) = parse_price_cents(value) else {
                return LeafOutcome::err(QueryErrorKind::InvalidPrice(value.to_string()), Domain::Printing, n);
            };
            let mut buf = vec![0u8; n];
            for i in 0..n {
                let cents = printing_index.data.price_usd[i];
                if cents != 0 && cmp_ordered(cents as i64, operator, query_cents as i64) {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        CanonicalField::CollectorNumber => {
            let lower = value.to_lowercase();
            let mut buf = vec![0u8; n];
            for i in 0..n {
                if printing_index.collector_numbers_lower[i] == lower {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        CanonicalField::Frame => {
            let Some(bit) = frame_bit(value) else {
                return LeafOutcome::err(QueryErrorKind::UnknownFrame(value.to_string()), Domain::Printing, n);
            };
            let mut buf = vec![0u8; n];
            for i in 0..n {
                if printing_index.data.frame[i] == bit {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        CanonicalField::Year => {
            let Ok(query_year) = value.trim().parse::<i64>() else {
                return LeafOutcome::err(QueryErrorKind::InvalidYear(value.to_string()), Domain::Printing, n);
            };
            let mut buf = vec![0u8; n];
            for i in 0..n {
                let released = printing_index.data.released_at[i];
                if released != 0 && cmp_ordered((released / 10_000) as i64, operator, query_year) {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        CanonicalField::Date => {
            let resolved = resolve_date_value(value, printing_index);
            let Some(query_date) = resolved else {
                return LeafOutcome::err(
                    QueryErrorKind::InvalidDate(value.to_string()),
                    Domain::Printing,
                    n,
                );
            };
            let mut buf = vec![0u8; n];
            for i in 0..n {
                let released = printing_index.data.released_at[i];
                if released != 0 && cmp_ordered(released as i64, operator, query_date as i64) {
                    buf[i] = 1;
                }
            }
            LeafOutcome::ok(buf, Domain::Printing)
        }
        _ => unreachable!("non-printing field reached the printing evaluator"),
    }
}

fn resolve_date_value(value: &str, printing_index: &PrintingIndex) -> Option<u32> {
    let lower = value.to_lowercase();
    if lower == "now" || lower == "today" {
        let today = chrono::Utc::now().date_naive();
        return Some(today.format("%Y%m%d").to_string().parse().ok()?);
    }
    if let Some(d) = parse_partial_date(&lower) {
        return Some(d);
    }
    if printing_index.known_set_codes.contains(&lower) {
        return printing_index
            .set_codes_lower
            .iter()
            .position(|c| *c == lower)
            .map(|i| printing_index.set_released_at[i]);
    }
    None
}

pub fn evaluate_is_keyword(
    keyword: IsKeyword,
    _card_index: &CardIndex,
    printing_index: &PrintingIndex,
) -> LeafOutcome {
    use IsKeyword::*;
    let n = printing_index.printing_count();
    let mut buf = vec![0u8; n];
    for i in 0..n {
        let flags = printing_index.data.printing_flags[i];
        let hit = match keyword {
            Foil => printing_index.data.finish[i] == Finish::Foil,
            Nonfoil => printing_index.data.finish[i] == Finish::Nonfoil,
            Etched => printing_index.data.finish[i] == Finish::Etched,
            FullArt => flags & crate::index::FULL_ART != 0,
            Textless => flags & crate::index::TEXTLESS != 0,
            Reprint => flags & crate::index::REPRINT != 0,
            Promo => flags & crate::index::PROMO != 0,
            Digital => flags & crate::index::DIGITAL != 0,
            Hires => flags & crate::index::HIRES != 0,
            Borderless => flags & crate::index::BORDERLESS != 0,
            Extended => flags & crate::index::EXTENDED_ART != 0,
            _ => unreachable!("non-printing-only keyword reached the printing dispatcher"),
        };
        if hit {
            buf[i] = 1;
        }
    }
    LeafOutcome::ok(buf, Domain::Printing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_parses_dollars_to_cents() {
        assert_eq!(parse_price_cents("3.50"), Some(350));
        assert_eq!(parse_price_cents("$3"), Some(300));
        assert!(parse_price_cents("free").is_none());
    }

    #[test]
    fn partial_date_pads_with_lowest_value() {
        assert_eq!(parse_partial_date("2020"), Some(20_200_101));
        assert_eq!(parse_partial_date("2020-06"), Some(20_200_601));
        assert_eq!(parse_partial_date("2020-06-15"), Some(20_200_615));
    }

    #[test]
    fn partial_date_clamps_out_of_range_components() {
        assert_eq!(parse_partial_date("2020-99-99"), Some(20_201_231));
    }

    #[test]
    fn now_and_today_resolve_to_a_packed_date() {
        let now = chrono::Utc::now().date_naive();
        let expected: u32 = now.format("%Y%m%d").to_string().parse().unwrap();
        let printing_index = PrintingIndex::build(
            crate::index::PrintingData {
                canonical_face_ref: vec![],
                scryfall_id: vec![],
                collector_number: vec![],
                set_index: vec![],
                rarity: vec![],
                printing_flags: vec![],
                finish: vec![],
                frame: vec![],
                price_usd: vec![],
                released_at: vec![],
                set_lookup: vec![],
            },
            &CardIndex::build(crate::index::FaceData {
                name: vec![],
                combined_name: vec![],
                mana_cost: vec![],
                oracle_text: vec![],
                oracle_text_tilde: vec![],
                colors: vec![],
                color_identity: vec![],
                type_line: vec![],
                power: vec![],
                toughness: vec![],
                loyalty: vec![],
                defense: vec![],
                legalities_legal: vec![],
                legalities_banned: vec![],
                legalities_restricted: vec![],
                card_index: vec![],
                canonical_face: vec![],
                scryfall_id: vec![],
                layout: vec![],
                flags: vec![],
                power_dict: vec![],
                toughness_dict: vec![],
                loyalty_dict: vec![],
                defense_dict: vec![],
            }),
        );
        assert_eq!(resolve_date_value("now", &printing_index), Some(expected));
        assert_eq!(resolve_date_value("TODAY", &printing_index), Some(expected));
    }
}
