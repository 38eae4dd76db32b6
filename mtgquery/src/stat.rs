//! §4.3 stat-value parser: turns a power/toughness/loyalty/defense string
//! (from either the card dictionary at index-build time, or a user-supplied
//! query literal) into a comparable `f64`. Must never panic.

use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

static DICE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)d\d+").unwrap());

/// Parse a stat literal into a number, or `NaN` if it cannot be made sense of.
/// Never panics.
pub fn parse_stat_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    if matches!(trimmed, "*" | "x" | "X" | "y" | "Y" | "?") {
        return 0.0;
    }
    if trimmed == "\u{221E}" {
        return f64::INFINITY;
    }

    let substituted = substitute(trimmed);
    evaluate_arith(&substituted).unwrap_or(f64::NAN)
}

fn substitute(value: &str) -> String {
    let squared = value.replace('\u{B2}', "**2");
    let diced = DICE_PATTERN.replace_all(&squared, "${1}*1").into_owned();
    zero_out_stray_stars(&diced)
}

/// Any star glyph left after dice/square substitution represents a variable
/// stat (`"1+*"`, `"*/*"`) and contributes 0. Protect `**` (our own exponent
/// operator, inserted above) before zeroing stray single stars.
fn zero_out_stray_stars(s: &str) -> String {
    const GUARD: &str = "\u{1}";
    s.replace("**", GUARD).replace('*', "0").replace(GUARD, "**")
}

/// Evaluate `+ - * **` over the substituted text, standard precedence,
/// right-associative `**`. Returns `None` on anything unparsable.
fn evaluate_arith(s: &str) -> Option<f64> {
    let mut p = ArithParser {
        chars: s.chars().peekable(),
    };
    let v = p.parse_expr()?;
    p.skip_ws();
    if p.chars.peek().is_some() {
        return None; // trailing garbage
    }
    Some(v)
}

struct ArithParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> ArithParser<'a> {
    fn skip_ws(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Option<f64> {
        let mut value = self.parse_term()?;
        loop {
            self.skip_ws();
            match self.chars.peek() {
                Some('+') => {
                    self.chars.next();
                    value += self.parse_term()?;
                }
                Some('-') => {
                    self.chars.next();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    // term := pow (('*' !'*') pow)*   -- a lone '*' is multiplication; '**' belongs to pow
    fn parse_term(&mut self) -> Option<f64> {
        let mut value = self.parse_pow()?;
        loop {
            self.skip_ws();
            let mut lookahead = self.chars.clone();
            if lookahead.next() == Some('*') && lookahead.next() != Some('*') {
                self.chars.next();
                value *= self.parse_pow()?;
            } else {
                break;
            }
        }
        Some(value)
    }

    // pow := unary ('**' pow)?   -- right associative
    fn parse_pow(&mut self) -> Option<f64> {
        let base = self.parse_unary()?;
        self.skip_ws();
        let mut lookahead = self.chars.clone();
        if lookahead.next() == Some('*') && lookahead.next() == Some('*') {
            self.chars.next();
            self.chars.next();
            let exp = self.parse_pow()?;
            return Some(base.powf(exp));
        }
        Some(base)
    }

    // unary := '-' unary | primary
    fn parse_unary(&mut self) -> Option<f64> {
        self.skip_ws();
        if self.chars.peek() == Some(&'-') {
            self.chars.next();
            return Some(-self.parse_unary()?);
        }
        self.parse_primary()
    }

    // primary := number | '(' expr ')'
    fn parse_primary(&mut self) -> Option<f64> {
        self.skip_ws();
        if self.chars.peek() == Some(&'(') {
            self.chars.next();
            let v = self.parse_expr()?;
            self.skip_ws();
            if self.chars.next() != Some(')') {
                return None;
            }
            return Some(v);
        }
        self.parse_number()
    }

    fn parse_number(&mut self) -> Option<f64> {
        let mut digits = String::new();
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit() || *c == '.') {
            digits.push(self.chars.next().unwrap());
        }
        if digits.is_empty() {
            return None;
        }
        digits.parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_nan() {
        assert!(parse_stat_value("").is_nan());
        assert!(parse_stat_value("   ").is_nan());
    }

    #[test]
    fn star_family_is_zero() {
        for v in ["*", "x", "X", "y", "Y", "?"] {
            assert_eq!(parse_stat_value(v), 0.0, "{v}");
        }
    }

    #[test]
    fn infinity_symbol() {
        assert_eq!(parse_stat_value("\u{221E}"), f64::INFINITY);
    }

    #[test]
    fn plain_integer() {
        assert_eq!(parse_stat_value("7"), 7.0);
    }

    #[test]
    fn variable_power_adds_zero() {
        assert_eq!(parse_stat_value("1+*"), 1.0);
        assert_eq!(parse_stat_value("*+1"), 1.0);
    }

    #[test]
    fn squared_symbol() {
        // "7²" -> "7**2" -> 49
        assert_eq!(parse_stat_value("7\u{B2}"), 49.0);
    }

    #[test]
    fn dice_notation_uses_minimum_roll() {
        // "2d4" -> "2*1" -> 2
        assert_eq!(parse_stat_value("2d4"), 2.0);
    }

    #[test]
    fn exponent_right_associative() {
        // 2**3**2 == 2**(3**2) == 2**9 == 512
        assert_eq!(parse_stat_value("2**3**2"), 512.0);
    }

    #[test]
    fn unparsable_is_nan() {
        assert!(parse_stat_value("banana").is_nan());
        assert!(parse_stat_value("1+").is_nan());
    }
}
