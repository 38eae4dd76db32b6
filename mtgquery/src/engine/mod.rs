//! §4.8 NodeCache and evaluator: structural interning, memoized per-node
//! results, domain promotion across the face/printing boundary, and the
//! non-destructive error semantics of §7.

mod buffer;
mod key;
mod leaves;

use crate::ast::Ast;
use crate::error::QueryErrorKind;
use crate::fields::{resolve_field, CanonicalField};
use crate::index::{CardIndex, PrintingIndex};
use crate::keywords::resolve_keyword;
use buffer::BufferPool;
use key::structural_key;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    Face,
    Printing,
}

/// The cached result stored for one interned AST subtree. Shared by `Rc`
/// across every occurrence of the same structural key — §8 invariant 7
/// ("cache correctness") depends on this being the *same* allocation, not a
/// copy.
#[derive(Debug, Clone)]
pub struct ComputedResult {
    pub buffer: Vec<u8>,
    pub match_count: i64,
    pub domain: Domain,
    pub production_ms: u64,
    pub error: Option<QueryErrorKind>,
}

/// One node of the result tree the UI renders, mirroring the AST shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryNodeResult {
    pub ast: Ast,
    pub match_count: i64,
    pub cached: bool,
    pub production_ms: u64,
    pub eval_ms: u64,
    pub error: Option<String>,
    pub children: Option<Vec<QueryNodeResult>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutput {
    pub result_tree: QueryNodeResult,
    pub face_indices: Vec<u32>,
    pub printing_indices: Option<Vec<u32>>,
    pub has_printing_conditions: bool,
    pub printings_unavailable: bool,
}

/// Structurally interns AST subtrees and memoizes their computed buffers.
/// Bound to one `(CardIndex, PrintingIndex?)` pair; not safe to share across
/// threads or to call `evaluate` on concurrently (§5).
pub struct NodeCache<'a> {
    card_index: &'a CardIndex,
    printing_index: Option<&'a PrintingIndex>,
    cache: HashMap<String, Rc<ComputedResult>>,
    pool: BufferPool,
}

impl<'a> NodeCache<'a> {
    pub fn new(card_index: &'a CardIndex, printing_index: Option<&'a PrintingIndex>) -> Self {
        NodeCache {
            card_index,
            printing_index,
            cache: HashMap::new(),
            pool: BufferPool::new(),
        }
    }

    pub fn evaluate(&mut self, ast: &Ast) -> EvalOutput {
        let (root, root_qnr) = self.eval_node(ast);
        self.build_output(ast, &root, root_qnr)
    }

    fn eval_node(&mut self, ast: &Ast) -> (Rc<ComputedResult>, QueryNodeResult) {
        let key = structural_key(ast);

        let child_pairs: Vec<(Rc<ComputedResult>, QueryNodeResult)> = match ast {
            Ast::Not { child, .. } => vec![self.eval_node(child)],
            Ast::And { children, .. } | Ast::Or { children, .. } => {
                children.iter().map(|c| self.eval_node(c)).collect()
            }
            _ => Vec::new(),
        };

        let (result, cached) = if let Some(existing) = self.cache.get(&key).cloned() {
            debug!(%key, "node cache hit");
            (existing, true)
        } else {
            let start = Instant::now();
            let (buffer, domain, match_count, error) = self.compute(ast, &child_pairs);
            let production_ms = start.elapsed().as_millis() as u64;
            if let Some(err) = &error {
                warn!(%err, node = %key, "leaf evaluation error");
            }
            let rc = Rc::new(ComputedResult {
                buffer,
                match_count,
                domain,
                production_ms,
                error,
            });
            self.cache.insert(key, rc.clone());
            trace!(node = %rc.match_count, "computed node");
            (rc, false)
        };

        let eval_ms = if cached { 0 } else { result.production_ms };
        let children_qnr: Vec<QueryNodeResult> = child_pairs.into_iter().map(|(_, q)| q).collect();
        let qnr = QueryNodeResult {
            ast: ast.clone(),
            match_count: result.match_count,
            cached,
            production_ms: result.production_ms,
            eval_ms,
            error: result.error.as_ref().map(|e| e.message()),
            children: if children_qnr.is_empty() { None } else { Some(children_qnr) },
        };
        (result, qnr)
    }

    fn compute(
        &mut self,
        ast: &Ast,
        child_pairs: &[(Rc<ComputedResult>, QueryNodeResult)],
    ) -> (Vec<u8>, Domain, i64, Option<QueryErrorKind>) {
        match ast {
            Ast::Not { child, .. } => self.compute_not(child, &child_pairs[0].0),
            Ast::And { children, .. } => self.compute_and_or(children, child_pairs, true),
            Ast::Or { children, .. } => self.compute_and_or(children, child_pairs, false),
            _ => {
                let outcome = leaves::evaluate_leaf(ast, self.card_index, self.printing_index);
                (outcome.buffer, outcome.domain, outcome.match_count, outcome.error)
            }
        }
    }

    fn compute_not(
        &mut self,
        child_ast: &Ast,
        child: &ComputedResult,
    ) -> (Vec<u8>, Domain, i64, Option<QueryErrorKind>) {
        if let Some(err) = &child.error {
            return (vec![0u8; self.card_index.face_count()], Domain::Face, -1, Some(err.clone()));
        }
        if child_ast.is_nop() {
            // Never produced by the parser (DASH with no atom yields Nop
            // directly), but handled defensively: negating nothing matches
            // every canonical face.
            let buf = vec![1u8; self.card_index.face_count()];
            let count = buf.len() as i64;
            return (buf, Domain::Face, count, None);
        }
        let face_buf = match child.domain {
            Domain::Face => child.buffer.clone(),
            Domain::Printing => {
                let pi = self.printing_index.expect("printing-domain child requires a loaded PrintingIndex");
                demote_printing_to_face(&child.buffer, self.card_index, pi)
            }
        };
        let inverted: Vec<u8> = face_buf.iter().map(|&b| 1 - b).collect();
        let count = inverted.iter().filter(|&&b| b == 1).count() as i64;
        (inverted, Domain::Face, count, None)
    }

    fn compute_and_or(
        &mut self,
        child_asts: &[Ast],
        child_pairs: &[(Rc<ComputedResult>, QueryNodeResult)],
        is_and: bool,
    ) -> (Vec<u8>, Domain, i64, Option<QueryErrorKind>) {
        let active: Vec<&Rc<ComputedResult>> = child_asts
            .iter()
            .zip(child_pairs.iter())
            .filter(|(ast, (res, _))| !ast.is_nop() && res.error.is_none())
            .map(|(_, (res, _))| res)
            .collect();

        if active.is_empty() {
            let size = self.card_index.face_count();
            let fill = if is_and { 1u8 } else { 0u8 };
            let buf = vec![fill; size];
            let count = buf.iter().filter(|&&b| b == 1).count() as i64;
            return (buf, Domain::Face, count, None);
        }

        let any_printing = active.iter().any(|r| r.domain == Domain::Printing);
        if any_printing {
            let pi = self.printing_index.expect("printing-domain child requires a loaded PrintingIndex");
            let n = pi.printing_count();
            let mut acc = self.pool.acquire(n);
            if is_and {
                acc.iter_mut().for_each(|b| *b = 1);
            }
            for res in &active {
                let printing_buf = match res.domain {
                    Domain::Printing => res.buffer.clone(),
                    Domain::Face => {
                        let promoted = promote_face_to_printing(&res.buffer, self.card_index, pi);
                        promoted
                    }
                };
                for i in 0..n {
                    acc[i] = if is_and { acc[i] & printing_buf[i] } else { acc[i] | printing_buf[i] };
                }
                self.pool.release(printing_buf);
            }
            let count = acc.iter().filter(|&&b| b == 1).count() as i64;
            (acc, Domain::Printing, count, None)
        } else {
            let n = self.card_index.face_count();
            let mut acc = self.pool.acquire(n);
            if is_and {
                acc.iter_mut().for_each(|b| *b = 1);
            }
            for res in &active {
                for i in 0..n {
                    acc[i] = if is_and { acc[i] & res.buffer[i] } else { acc[i] | res.buffer[i] };
                }
            }
            let count = acc.iter().filter(|&&b| b == 1).count() as i64;
            (acc, Domain::Face, count, None)
        }
    }

    fn build_output(&self, ast: &Ast, root: &ComputedResult, root_qnr: QueryNodeResult) -> EvalOutput {
        let has_printing_conditions = ast_has_printing_condition(ast);
        let printings_unavailable = self.printing_index.is_none() && has_printing_conditions;

        if root.error.is_some() {
            return EvalOutput {
                result_tree: root_qnr,
                face_indices: Vec::new(),
                printing_indices: None,
                has_printing_conditions,
                printings_unavailable,
            };
        }

        let (face_indices, printing_indices) = match root.domain {
            Domain::Face => {
                let face_indices: Vec<u32> = (0..root.buffer.len())
                    .filter(|&i| root.buffer[i] == 1)
                    .map(|i| i as u32)
                    .collect();
                (face_indices, None)
            }
            Domain::Printing => {
                let pi = self.printing_index.expect("printing-domain root requires a loaded PrintingIndex");
                let printing_indices: Vec<u32> = (0..root.buffer.len())
                    .filter(|&i| root.buffer[i] == 1)
                    .map(|i| i as u32)
                    .collect();
                let mut face_set = BTreeSet::new();
                for &p in &printing_indices {
                    let face_ref = pi.data.canonical_face_ref[p as usize] as usize;
                    face_set.insert(self.card_index.data.canonical_face[face_ref]);
                }
                (face_set.into_iter().collect(), Some(printing_indices))
            }
        };

        EvalOutput {
            result_tree: root_qnr,
            face_indices,
            printing_indices,
            has_printing_conditions,
            printings_unavailable,
        }
    }
}

fn promote_face_to_printing(face_buf: &[u8], card_index: &CardIndex, printing_index: &PrintingIndex) -> Vec<u8> {
    let n = printing_index.printing_count();
    let mut out = vec![0u8; n];
    for p in 0..n {
        let face_ref = printing_index.data.canonical_face_ref[p] as usize;
        let canonical = card_index.data.canonical_face[face_ref] as usize;
        if face_buf[canonical] == 1 {
            out[p] = 1;
        }
    }
    out
}

fn demote_printing_to_face(printing_buf: &[u8], card_index: &CardIndex, printing_index: &PrintingIndex) -> Vec<u8> {
    let mut out = vec![0u8; card_index.face_count()];
    for (p, &hit) in printing_buf.iter().enumerate() {
        if hit == 1 {
            let face_ref = printing_index.data.canonical_face_ref[p] as usize;
            let canonical = card_index.data.canonical_face[face_ref] as usize;
            out[canonical] = 1;
        }
    }
    out
}

fn ast_has_printing_condition(ast: &Ast) -> bool {
    match ast {
        Ast::Field { field, value, .. } => {
            let lower = field.to_lowercase();
            match resolve_field(&lower) {
                Some(CanonicalField::Is) => resolve_keyword(value).map(|k| k.is_printing_only()).unwrap_or(false),
                Some(canonical) => canonical.is_printing_domain(),
                None => false,
            }
        }
        Ast::Not { child, .. } => ast_has_printing_condition(child),
        Ast::And { children, .. } | Ast::Or { children, .. } => {
            children.iter().any(ast_has_printing_condition)
        }
        _ => false,
    }
}
