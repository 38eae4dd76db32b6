//! End-to-end scenarios against the synthetic 10-face, 5-printing corpus:
//! color/type intersection, DFC canonical collapse, cross-domain AND
//! promotion, error containment, and tilde-aware regex matching.

mod fixtures;

use fixtures::{card_index, printing_index};
use mtgquery::{parse, NodeCache};

#[test]
fn color_and_type_intersection() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("c:g t:creature"));
    assert_eq!(out.face_indices, vec![0, 4]);
    let children = out.result_tree.children.expect("AND has children");
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].match_count, 2);
    assert_eq!(children[1].match_count, 4);
}

#[test]
fn bare_word_matches_single_card() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("bolt"));
    assert_eq!(out.face_indices, vec![1]);
}

#[test]
fn back_face_type_match_collapses_to_canonical_front() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("t:phyrexian"));
    assert_eq!(out.face_indices, vec![7]);
}

#[test]
fn set_query_without_printing_index_errors() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("set:mh2"));
    assert!(out.face_indices.is_empty());
    assert!(out.printings_unavailable);
    assert_eq!(out.result_tree.match_count, -1);
    assert_eq!(out.result_tree.error.as_deref(), Some("printing data not loaded"));
}

#[test]
fn set_query_with_printing_index_promotes_domain() {
    let ci = card_index();
    let pi = printing_index(&ci);
    let mut cache = NodeCache::new(&ci, Some(&pi));
    let out = cache.evaluate(&parse("set:mh2"));
    assert_eq!(out.face_indices, vec![1]);
    assert_eq!(out.printing_indices, Some(vec![0, 1]));
    assert_eq!(out.result_tree.match_count, 2);
    assert!(out.has_printing_conditions);
}

#[test]
fn cross_domain_and_promotes_type_to_printing() {
    let ci = card_index();
    let pi = printing_index(&ci);
    let mut cache = NodeCache::new(&ci, Some(&pi));
    let out = cache.evaluate(&parse("t:instant set:mh2"));
    assert_eq!(out.face_indices, vec![1]);
    assert_eq!(out.printing_indices, Some(vec![0, 1]));
    assert_eq!(out.result_tree.match_count, 2);
}

#[test]
fn error_child_is_skipped_non_destructively() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("t:creature ci:cb"));
    assert_eq!(out.face_indices, vec![0, 4, 5, 6]);
    let children = out.result_tree.children.expect("AND has children");
    assert_eq!(children.len(), 2);
    assert_eq!(
        children[1].error.as_deref(),
        Some("a card cannot be both colored and colorless")
    );
}

#[test]
fn tilde_aware_regex_narrows_to_one_card() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse(r"o:/~ deals 3 damage/"));
    assert_eq!(out.face_indices, vec![1]);
}

#[test]
fn plain_regex_matches_unstripped_oracle_on_both_cards() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("o:/damage/"));
    assert_eq!(out.face_indices, vec![1, 6]);
}

#[test]
fn mana_value_field_matches_one_drops() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("cmc:1"));
    assert_eq!(out.face_indices, vec![0, 1, 5]);
}

#[test]
fn legal_field_respects_format_bits() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("legal:legacy"));
    assert_eq!(out.face_indices, vec![1]);
}

#[test]
fn reserved_keyword_matches_flagged_face() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("is:reserved"));
    assert_eq!(out.face_indices, vec![2]);
}

#[test]
fn unknown_format_error_does_not_destroy_sibling_match() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let out = cache.evaluate(&parse("t:instant legal:not-a-format"));
    assert_eq!(out.face_indices, vec![1, 2, 3]);
}

#[test]
fn canonicalize_round_trips_to_same_result() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let ast = parse("c:r t:instant");
    let rendered = mtgquery::canonicalize::canonicalize(&ast);
    let reparsed = parse(&rendered);
    let first = cache.evaluate(&ast);
    let second = cache.evaluate(&reparsed);
    assert_eq!(first.face_indices, second.face_indices);
}

#[test]
fn repeated_evaluation_is_byte_identical() {
    let ci = card_index();
    let mut cache = NodeCache::new(&ci, None);
    let ast = parse("c:g t:creature OR bolt");
    let first = cache.evaluate(&ast);
    let second = cache.evaluate(&ast);
    assert_eq!(first.face_indices, second.face_indices);
    assert_eq!(first.printing_indices, second.printing_indices);
}
