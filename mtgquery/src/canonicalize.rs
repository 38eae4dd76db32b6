//! §4.9 canonicalizer: serializes an AST back into Scryfall-compatible
//! source text. Drops `Nop` and empty-valued fields; quotes values that
//! contain whitespace; renders `Exact` as `!"value"`; pads partial dates.

use crate::ast::Ast;

pub fn canonicalize(ast: &Ast) -> String {
    let mut out = String::new();
    write_top(ast, &mut out);
    out
}

fn needs_quotes(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace())
}

fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

fn write_value(field: &str, value: &str, out: &mut String) {
    let rendered = if field.eq_ignore_ascii_case("date") {
        pad_date(value)
    } else {
        value.to_string()
    };
    if needs_quotes(&rendered) {
        out.push_str(&quote(&rendered));
    } else {
        out.push_str(&rendered);
    }
}

/// Pads a partial `YYYY[-MM[-DD]]` literal to `YYYY-MM-DD`, leaving
/// recognized non-date literals (`now`, a bare set code) untouched.
fn pad_date(value: &str) -> String {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.is_empty() || parts.len() > 3 || !parts[0].chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }
    if parts[0].len() != 4 {
        return value.to_string();
    }
    let year = parts[0];
    let month = parts.get(1).copied().unwrap_or("01");
    let day = parts.get(2).copied().unwrap_or("01");
    format!("{year}-{month:0>2}-{day:0>2}")
}

/// The bare-regex desugar (`/pattern/` -> name/oracle/type `RegexField`s)
/// keeps its own span on the `Or` while giving each child `span: None`,
/// since the children never appeared as their own source tokens. That
/// shape is the only way an `Or` can hold unspanned `RegexField` children.
fn is_bare_regex_desugar(children: &[Ast]) -> bool {
    !children.is_empty()
        && children
            .iter()
            .all(|c| matches!(c, Ast::RegexField { span: None, .. }))
}

// Top-level OR is written without wrapping parentheses, except for the
// bare-regex desugar, which always renders parenthesized per its one
// canonical source form; nested OR/AND/NOT recurse through `write_node`,
// which parenthesizes as needed.
fn write_top(ast: &Ast, out: &mut String) {
    match ast {
        Ast::Or { children, .. } if is_bare_regex_desugar(children) => {
            out.push('(');
            write_or_children(children, out);
            out.push(')');
        }
        Ast::Or { children, .. } => write_or_children(children, out),
        other => write_node(other, out, false),
    }
}

fn write_node(ast: &Ast, out: &mut String, parent_is_or: bool) {
    match ast {
        Ast::Nop => {}
        Ast::Bare { value, quoted, .. } => {
            if *quoted || needs_quotes(value) {
                out.push_str(&quote(value));
            } else {
                out.push_str(value);
            }
        }
        Ast::Exact { value, .. } => {
            out.push('!');
            out.push_str(&quote(value));
        }
        Ast::Field {
            field,
            operator,
            value,
            ..
        } => {
            if value.is_empty() {
                return;
            }
            out.push_str(field);
            out.push_str(operator.as_str());
            write_value(field, value, out);
        }
        Ast::RegexField {
            field,
            operator,
            pattern,
            ..
        } => {
            out.push_str(field);
            out.push_str(operator.as_str());
            out.push('/');
            out.push_str(pattern);
            out.push('/');
        }
        Ast::Not { child, .. } => {
            out.push('-');
            write_node(child, out, false);
        }
        Ast::And { children, .. } => {
            let rendered = render_and_children(children);
            if rendered.is_empty() {
                return;
            }
            if parent_is_or {
                out.push('(');
                out.push_str(&rendered);
                out.push(')');
            } else {
                out.push_str(&rendered);
            }
        }
        Ast::Or { children, .. } => {
            if parent_is_or {
                let mut inner = String::new();
                write_or_children(children, &mut inner);
                out.push('(');
                out.push_str(&inner);
                out.push(')');
            } else {
                out.push('(');
                write_or_children(children, out);
                out.push(')');
            }
        }
    }
}

fn render_and_children(children: &[Ast]) -> String {
    let mut parts = Vec::new();
    for c in children {
        let mut part = String::new();
        write_node(c, &mut part, false);
        if !part.is_empty() {
            parts.push(part);
        }
    }
    parts.join(" ")
}

fn write_or_children(children: &[Ast], out: &mut String) {
    let mut parts = Vec::new();
    for c in children {
        let mut part = String::new();
        write_node(c, &mut part, true);
        if !part.is_empty() {
            parts.push(part);
        }
    }
    out.push_str(&parts.join(" OR "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn drops_nop_and_empty_fields() {
        assert_eq!(canonicalize(&parse("power:")), "");
    }

    #[test]
    fn quotes_values_with_whitespace() {
        assert_eq!(canonicalize(&parse(r#""Lightning Bolt""#)), "\"Lightning Bolt\"");
    }

    #[test]
    fn exact_renders_as_bang_quote() {
        assert_eq!(canonicalize(&parse(r#"!"Lightning Bolt""#)), "!\"Lightning Bolt\"");
    }

    #[test]
    fn pads_partial_dates() {
        assert_eq!(canonicalize(&parse("date:2020")), "date:2020-01-01");
        assert_eq!(canonicalize(&parse("date:2020-06")), "date:2020-06-01");
    }

    #[test]
    fn bare_regex_round_trips_as_parenthesized_or() {
        let rendered = canonicalize(&parse("/damage/"));
        assert_eq!(rendered, "(name:/damage/ OR oracle:/damage/ OR type:/damage/)");
    }

    #[test]
    fn nested_or_gets_parenthesized() {
        let rendered = canonicalize(&parse("c:r (bolt OR shock)"));
        assert_eq!(rendered, "c:r (bolt OR shock)");
    }

    #[test]
    fn simple_and_has_no_parens() {
        assert_eq!(canonicalize(&parse("c:r t:instant")), "c:r t:instant");
    }
}
