//! MTGQuery - in-memory search engine for a Magic: The Gathering card corpus
//!
//! This crate provides a lexer, parser, and memoized evaluator for a
//! Scryfall-like query mini-language over columnar card data.
//!
//! Architecture:
//! ```text
//! Query string
//!     ↓
//! Lexer (tokenize, never fails)
//!     ↓
//! Parser (build AST, never fails)
//!     ↓
//! NodeCache (structural interning + memoized evaluation)
//!     ↓
//! EvalOutput (face/printing indices, per-node match counts, diagnostics)
//! ```
//!
//! [`canonicalize`] serializes an AST back into a Scryfall-compatible string.

pub mod ast;
pub mod canonicalize;
pub mod color;
pub mod engine;
pub mod error;
pub mod fields;
pub mod index;
pub mod keywords;
pub mod lexer;
pub mod mana;
pub mod parser;
pub mod sort;
pub mod stat;

pub use ast::{Ast, Operator, Span};
pub use engine::{ComputedResult, Domain, EvalOutput, NodeCache, QueryNodeResult};
pub use error::QueryErrorKind;
pub use index::{CardIndex, FaceData, PrintingData, PrintingIndex};
pub use parser::parse;

/// Parse and evaluate `query` against `card_index` (and, if loaded, `printing_index`)
/// using a fresh, single-use [`NodeCache`]. Convenience wrapper for callers that do
/// not need to reuse the cache across queries; a long-lived host should build one
/// [`NodeCache`] per worker and call [`NodeCache::evaluate`] directly so repeated,
/// overlapping queries benefit from memoization.
pub fn search(
    query: &str,
    card_index: &CardIndex,
    printing_index: Option<&PrintingIndex>,
) -> EvalOutput {
    let ast = parse(query);
    let mut cache = NodeCache::new(card_index, printing_index);
    cache.evaluate(&ast)
}
