//! AST node types produced by the parser.
//!
//! Each node kind is a discriminated variant, not a subclass: the parser
//! returns the variant directly and the evaluator matches on it. There is no
//! virtual dispatch anywhere in this tree.

use serde::{Deserialize, Serialize};

/// A byte span into the source query string. `input[start..end]` is the
/// slice this node (or sub-part of a node) was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `pos`, used for a FIELD's `value_span` when the
    /// value is missing.
    pub fn empty_at(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// The span covering `a` through `b`, in source order.
    pub fn cover(a: Span, b: Span) -> Span {
        Span::new(a.start.min(b.start), a.end.max(b.end))
    }
}

/// A field-query comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Colon,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Colon => ":",
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
        }
    }
}

/// An AST node. `Nop` is a structurally elidable placeholder with no span;
/// every other variant carries a span whose slice of the source
/// approximates the text it was parsed from (desugared nodes, which have no
/// single source slice, are the one exception — see `REGEX_FIELD` produced
/// by bare-regex desugaring).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ast {
    Bare {
        value: String,
        quoted: bool,
        span: Span,
    },
    Exact {
        value: String,
        span: Span,
    },
    Field {
        field: String,
        operator: Operator,
        value: String,
        span: Span,
        value_span: Span,
    },
    RegexField {
        field: String,
        operator: Operator,
        pattern: String,
        span: Option<Span>,
    },
    Not {
        child: Box<Ast>,
        span: Span,
    },
    And {
        children: Vec<Ast>,
        span: Span,
    },
    Or {
        children: Vec<Ast>,
        span: Span,
    },
    Nop,
}

impl Ast {
    /// The node's span, if any. `Nop` and desugared `RegexField` nodes have none.
    pub fn span(&self) -> Option<Span> {
        match self {
            Ast::Bare { span, .. }
            | Ast::Exact { span, .. }
            | Ast::Field { span, .. }
            | Ast::Not { span, .. }
            | Ast::And { span, .. }
            | Ast::Or { span, .. } => Some(*span),
            Ast::RegexField { span, .. } => *span,
            Ast::Nop => None,
        }
    }

    pub fn is_nop(&self) -> bool {
        matches!(self, Ast::Nop)
    }

    /// Collect every free-floating (non-quoted-is-fine, but not negated) bare
    /// word in the tree, for the seeded sort's name-prefix tier (§4.10).
    /// A `Bare` beneath a `Not` is excluded.
    pub fn collect_bare_words(&self, under_not: bool, out: &mut Vec<String>) {
        match self {
            Ast::Bare { value, .. } => {
                if !under_not {
                    out.push(value.clone());
                }
            }
            Ast::Not { child, .. } => child.collect_bare_words(true, out),
            Ast::And { children, .. } | Ast::Or { children, .. } => {
                for c in children {
                    c.collect_bare_words(under_not, out);
                }
            }
            _ => {}
        }
    }
}
