//! §4.5 color/identity mask parsing and comparison. A mask is a 5-bit set
//! over WUBRG, stored in the low 5 bits of a `u8`.

use crate::ast::Operator;
use crate::error::QueryErrorKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const WHITE: u8 = 1 << 0;
pub const BLUE: u8 = 1 << 1;
pub const BLACK: u8 = 1 << 2;
pub const RED: u8 = 1 << 3;
pub const GREEN: u8 = 1 << 4;

/// A parsed color-field value: either an explicit mask, or one of the two
/// keyword forms that don't reduce to a plain mask comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorQuery {
    Mask(u8),
    Colorless,
    Multicolor,
}

static NAMED_COMBOS: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    use HashMap as M;
    let mut m: M<&'static str, u8> = M::new();
    m.insert("white", WHITE);
    m.insert("blue", BLUE);
    m.insert("black", BLACK);
    m.insert("red", RED);
    m.insert("green", GREEN);

    // Guilds
    m.insert("azorius", WHITE | BLUE);
    m.insert("dimir", BLUE | BLACK);
    m.insert("rakdos", BLACK | RED);
    m.insert("gruul", RED | GREEN);
    m.insert("selesnya", GREEN | WHITE);
    m.insert("orzhov", WHITE | BLACK);
    m.insert("izzet", BLUE | RED);
    m.insert("golgari", BLACK | GREEN);
    m.insert("boros", RED | WHITE);
    m.insert("simic", GREEN | BLUE);

    // Shards
    m.insert("bant", GREEN | WHITE | BLUE);
    m.insert("esper", WHITE | BLUE | BLACK);
    m.insert("grixis", BLUE | BLACK | RED);
    m.insert("jund", BLACK | RED | GREEN);
    m.insert("naya", RED | GREEN | WHITE);

    // Wedges
    m.insert("abzan", WHITE | BLACK | GREEN);
    m.insert("jeskai", BLUE | RED | WHITE);
    m.insert("sultai", BLACK | GREEN | BLUE);
    m.insert("mardu", RED | WHITE | BLACK);
    m.insert("temur", GREEN | BLUE | RED);

    // Strixhaven colleges (same pairs as the guilds, different names)
    m.insert("lorehold", RED | WHITE);
    m.insert("prismari", BLUE | RED);
    m.insert("quandrix", GREEN | BLUE);
    m.insert("silverquill", WHITE | BLACK);
    m.insert("witherbloom", BLACK | GREEN);

    m
});

/// Parse a color/identity query value. Named multi-color combos and the
/// `colorless`/`multicolor` keywords override letter-by-letter scanning.
pub fn parse_color_value(raw: &str) -> Result<ColorQuery, QueryErrorKind> {
    let lower = raw.to_lowercase();

    if let Some(&mask) = NAMED_COMBOS.get(lower.as_str()) {
        return Ok(ColorQuery::Mask(mask));
    }
    match lower.as_str() {
        "colorless" => return Ok(ColorQuery::Colorless),
        "multicolor" => return Ok(ColorQuery::Multicolor),
        _ => {}
    }

    let mut mask = 0u8;
    let mut saw_colorless = false;
    let mut saw_multicolor = false;
    for ch in lower.chars() {
        match ch {
            'w' => mask |= WHITE,
            'u' => mask |= BLUE,
            'b' => mask |= BLACK,
            'r' => mask |= RED,
            'g' => mask |= GREEN,
            'c' => saw_colorless = true,
            'm' => saw_multicolor = true,
            _ => {}
        }
    }

    if saw_colorless && mask != 0 {
        return Err(QueryErrorKind::ColorColorlessContradiction);
    }
    if saw_colorless {
        return Ok(ColorQuery::Colorless);
    }
    if saw_multicolor && mask == 0 {
        return Ok(ColorQuery::Multicolor);
    }
    Ok(ColorQuery::Mask(mask))
}

/// Compare a card's mask against a parsed query under `operator`.
/// `default_is_superset` selects the `:`-operator default: `true` for
/// `color:` (card colors must be a superset of the query), `false` for
/// `identity:` (card identity must be a subset of the query).
pub fn compare_mask(card: u8, query: ColorQuery, operator: Operator, default_is_superset: bool) -> bool {
    match query {
        ColorQuery::Colorless => match operator {
            Operator::Colon | Operator::Eq => card == 0,
            Operator::Neq => card != 0,
            Operator::Lt => false,
            Operator::Lte => card == 0,
            Operator::Gt => card != 0,
            Operator::Gte => true,
        },
        ColorQuery::Multicolor => {
            let is_multi = card.count_ones() >= 2;
            match operator {
                Operator::Colon | Operator::Eq | Operator::Gte => is_multi,
                Operator::Neq | Operator::Lt | Operator::Lte => !is_multi,
                Operator::Gt => is_multi,
            }
        }
        ColorQuery::Mask(qmask) => match operator {
            Operator::Colon => {
                if default_is_superset {
                    (card & qmask) == qmask
                } else {
                    (card & !qmask) == 0
                }
            }
            Operator::Eq => card == qmask,
            Operator::Neq => card != qmask,
            Operator::Lt => card != qmask && (card & !qmask) == 0,
            Operator::Gt => card != qmask && (card & qmask) == qmask,
            Operator::Lte => (card & !qmask) == 0,
            Operator::Gte => (card & qmask) == qmask,
        },
    }
}
