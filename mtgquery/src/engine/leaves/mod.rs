//! Leaf evaluators: the only nodes that read columnar data directly.
//! Combinators (`And`/`Or`/`Not`) never appear here — see `engine::combine`.

mod face;
mod printing;
mod regex_leaf;

use crate::ast::{Ast, Operator};
use crate::engine::Domain;
use crate::error::QueryErrorKind;
use crate::fields::{resolve_field, CanonicalField};
use crate::index::{CardIndex, PrintingIndex};

pub struct LeafOutcome {
    pub buffer: Vec<u8>,
    pub domain: Domain,
    pub match_count: i64,
    pub error: Option<QueryErrorKind>,
}

impl LeafOutcome {
    fn ok(buffer: Vec<u8>, domain: Domain) -> Self {
        let match_count = buffer.iter().filter(|&&b| b == 1).count() as i64;
        LeafOutcome {
            buffer,
            domain,
            match_count,
            error: None,
        }
    }

    fn err(error: QueryErrorKind, domain: Domain, size: usize) -> Self {
        LeafOutcome {
            buffer: vec![0u8; size],
            domain,
            match_count: -1,
            error: Some(error),
        }
    }
}

pub fn evaluate_leaf(
    ast: &Ast,
    card_index: &CardIndex,
    printing_index: Option<&PrintingIndex>,
) -> LeafOutcome {
    match ast {
        Ast::Nop => LeafOutcome::ok(vec![0u8; card_index.face_count()], Domain::Face),
        Ast::Bare { value, quoted, .. } => face::evaluate_bare(value, *quoted, card_index),
        Ast::Exact { value, .. } => face::evaluate_exact(value, card_index),
        Ast::Field {
            field,
            operator,
            value,
            ..
        } => dispatch_field(field, *operator, value, card_index, printing_index),
        Ast::RegexField {
            field,
            operator,
            pattern,
            ..
        } => regex_leaf::evaluate(field, *operator, pattern, card_index),
        Ast::Not { .. } | Ast::And { .. } | Ast::Or { .. } => {
            unreachable!("combinators are evaluated by engine::combine, not as leaves")
        }
    }
}

fn dispatch_field(
    field: &str,
    operator: Operator,
    value: &str,
    card_index: &CardIndex,
    printing_index: Option<&PrintingIndex>,
) -> LeafOutcome {
    let lower = field.to_lowercase();
    let Some(canonical) = resolve_field(&lower) else {
        return LeafOutcome::err(
            QueryErrorKind::UnknownField(field.to_string()),
            Domain::Face,
            card_index.face_count(),
        );
    };

    if canonical == CanonicalField::Is {
        return face::evaluate_is(value, operator, card_index, printing_index);
    }

    if canonical.is_printing_domain() {
        match printing_index {
            None => LeafOutcome::err(QueryErrorKind::PrintingNotLoaded, Domain::Printing, 0),
            Some(pi) => printing::evaluate(canonical, operator, value, pi),
        }
    } else {
        face::evaluate_field(canonical, operator, value, card_index)
    }
}
