//! §4.6 regex leaf evaluator: `field:/pattern/` and bare-regex desugaring
//! both land here. Only `name`, `oracle`, and `type` are supported; anything
//! else is `unknown field`.

use super::LeafOutcome;
use crate::ast::Operator;
use crate::engine::Domain;
use crate::error::QueryErrorKind;
use crate::index::CardIndex;
use regex::RegexBuilder;

pub fn evaluate(field: &str, _operator: Operator, pattern: &str, card_index: &CardIndex) -> LeafOutcome {
    let lower_field = field.to_lowercase();
    if !matches!(lower_field.as_str(), "name" | "n" | "oracle" | "o" | "type" | "t") {
        return LeafOutcome::err(
            QueryErrorKind::UnknownField(field.to_string()),
            Domain::Face,
            card_index.face_count(),
        );
    }

    let re = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(_) => {
            return LeafOutcome::err(QueryErrorKind::InvalidRegex, Domain::Face, card_index.face_count())
        }
    };

    let use_tilde = pattern.contains('~');
    let mut buf = vec![0u8; card_index.face_count()];
    for i in 0..card_index.face_count() {
        let hit = match lower_field.as_str() {
            "name" | "n" => re.is_match(&card_index.combined_names_lower[i]),
            "oracle" | "o" => {
                if use_tilde {
                    re.is_match(&card_index.oracle_texts_tilde_lower[i])
                } else {
                    re.is_match(&card_index.oracle_texts_lower[i])
                }
            }
            _ => re.is_match(&card_index.type_lines_lower[i]),
        };
        if hit {
            buf[card_index.data.canonical_face[i] as usize] = 1;
        }
    }
    LeafOutcome::ok(buf, Domain::Face)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::index::FaceData;

    fn fixture() -> CardIndex {
        CardIndex::build(FaceData {
            name: vec!["Lightning Bolt".into()],
            combined_name: vec!["Lightning Bolt".into()],
            mana_cost: vec!["{R}".into()],
            oracle_text: vec!["Lightning Bolt deals 3 damage to any target.".into()],
            oracle_text_tilde: vec!["~ deals 3 damage to any target.".into()],
            colors: vec![color::RED],
            color_identity: vec![color::RED],
            type_line: vec!["Instant".into()],
            power: vec![None],
            toughness: vec![None],
            loyalty: vec![None],
            defense: vec![None],
            legalities_legal: vec![0],
            legalities_banned: vec![0],
            legalities_restricted: vec![0],
            card_index: vec![0],
            canonical_face: vec![0],
            scryfall_id: vec!["a".into()],
            layout: vec!["normal".into()],
            flags: vec![0],
            power_dict: vec![],
            toughness_dict: vec![],
            loyalty_dict: vec![],
            defense_dict: vec![],
        })
    }

    #[test]
    fn tilde_pattern_uses_tilde_column() {
        let ci = fixture();
        let out = evaluate("o", Operator::Colon, r"~ deals \d+", &ci);
        assert_eq!(out.buffer, vec![1]);
    }

    #[test]
    fn plain_pattern_uses_untouched_oracle() {
        let ci = fixture();
        let out = evaluate("o", Operator::Colon, "damage", &ci);
        assert_eq!(out.buffer, vec![1]);
    }

    #[test]
    fn invalid_regex_errs() {
        let ci = fixture();
        let out = evaluate("o", Operator::Colon, "(unclosed", &ci);
        assert!(out.error.is_some());
    }

    #[test]
    fn unsupported_field_errs() {
        let ci = fixture();
        let out = evaluate("power", Operator::Colon, "foo", &ci);
        assert!(matches!(out.error, Some(QueryErrorKind::UnknownField(_))));
    }
}
