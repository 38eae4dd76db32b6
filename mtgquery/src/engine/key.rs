//! §4.8 structural key: a deterministic string built from an AST node's kind
//! tag, immediate fields, and child keys, joined by a byte that cannot
//! appear in any field. Two structurally equal subtrees always produce the
//! same key regardless of where in the source they were parsed from — spans
//! are deliberately excluded.

use crate::ast::Ast;

/// ASCII record separator; field text (words, regex patterns, quoted
/// strings) cannot contain it.
const SEP: char = '\u{1E}';

pub fn structural_key(ast: &Ast) -> String {
    let mut out = String::new();
    write_key(ast, &mut out);
    out
}

fn write_key(ast: &Ast, out: &mut String) {
    match ast {
        Ast::Bare { value, quoted, .. } => {
            out.push_str("BARE");
            out.push(SEP);
            out.push_str(value);
            out.push(SEP);
            out.push_str(if *quoted { "q" } else { "u" });
        }
        Ast::Exact { value, .. } => {
            out.push_str("EXACT");
            out.push(SEP);
            out.push_str(value);
        }
        Ast::Field {
            field,
            operator,
            value,
            ..
        } => {
            out.push_str("FIELD");
            out.push(SEP);
            out.push_str(field);
            out.push(SEP);
            out.push_str(operator.as_str());
            out.push(SEP);
            out.push_str(value);
        }
        Ast::RegexField {
            field,
            operator,
            pattern,
            ..
        } => {
            out.push_str("REGEX_FIELD");
            out.push(SEP);
            out.push_str(field);
            out.push(SEP);
            out.push_str(operator.as_str());
            out.push(SEP);
            out.push_str(pattern);
        }
        Ast::Not { child, .. } => {
            out.push_str("NOT");
            out.push(SEP);
            write_key(child, out);
        }
        Ast::And { children, .. } => {
            out.push_str("AND");
            for c in children {
                out.push(SEP);
                write_key(c, out);
            }
        }
        Ast::Or { children, .. } => {
            out.push_str("OR");
            for c in children {
                out.push(SEP);
                write_key(c, out);
            }
        }
        Ast::Nop => out.push_str("NOP"),
    }
}
