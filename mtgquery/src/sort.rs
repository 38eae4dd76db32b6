//! §4.10 seeded sort: a stable two-tier ordering over result indices.
//! Tier 0 holds indices whose name starts with a bare word collected from
//! the query; tier 1 holds everyone else. Within a tier, order is driven by
//! a keyed pseudorandom rank so repeated queries against the same seed and
//! corpus produce the same order, but different seeds reshuffle ties.

fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for b in s.as_bytes() {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Two rounds of `(x ^ x>>16) * 0x45d9f3b`, the standard 32-bit integer mix.
fn mix(x: u32) -> u32 {
    let mut x = x;
    x ^= x >> 16;
    x = x.wrapping_mul(0x45d9_f3b);
    x ^= x >> 16;
    x = x.wrapping_mul(0x45d9_f3b);
    x ^= x >> 16;
    x
}

fn rank(seed_hash: u32, index: u32) -> u32 {
    mix(seed_hash ^ index)
}

fn starts_with_any_bare_word(name_lower: &str, bare_words_lower: &[String]) -> bool {
    bare_words_lower.iter().any(|w| !w.is_empty() && name_lower.starts_with(w.as_str()))
}

/// Sort `indices` (face rows, or printing rows keyed by their canonical
/// face) in place by the two-tier seeded rule. `name_of(i)` must return the
/// lowercase name used for the prefix check.
pub fn seeded_sort<F>(indices: &mut [u32], seed: &str, session_salt: u32, bare_words: &[String], name_of: F)
where
    F: Fn(u32) -> String,
{
    let seed_hash = fnv1a(seed) ^ session_salt;
    let bare_words_lower: Vec<String> = bare_words.iter().map(|w| w.to_lowercase()).collect();

    indices.sort_by(|&a, &b| {
        let tier_a = !starts_with_any_bare_word(&name_of(a), &bare_words_lower);
        let tier_b = !starts_with_any_bare_word(&name_of(b), &bare_words_lower);
        tier_a.cmp(&tier_b).then_with(|| rank(seed_hash, a).cmp(&rank(seed_hash, b)))
    });
}

/// Face-indexed variant: `name_of` reads `combined_names_lower` directly.
pub fn seeded_sort_faces(indices: &mut [u32], seed: &str, session_salt: u32, bare_words: &[String], names_lower: &[String]) {
    seeded_sort(indices, seed, session_salt, bare_words, |i| names_lower[i as usize].clone());
}

/// Printing-indexed variant: keyed on the printing's canonical face, so
/// printings of the same card sort together.
pub fn seeded_sort_printings(
    indices: &mut [u32],
    seed: &str,
    session_salt: u32,
    bare_words: &[String],
    names_lower: &[String],
    canonical_face_of_printing: &[u32],
) {
    seeded_sort(indices, seed, session_salt, bare_words, |p| {
        names_lower[canonical_face_of_printing[p as usize] as usize].clone()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_seed() {
        let names = vec!["bolt".to_string(), "shock".to_string(), "counterspell".to_string()];
        let bare = vec!["bolt".to_string()];
        let mut a: Vec<u32> = vec![2, 1, 0];
        let mut b: Vec<u32> = vec![0, 2, 1];
        seeded_sort_faces(&mut a, "seed", 7, &bare, &names);
        seeded_sort_faces(&mut b, "seed", 7, &bare, &names);
        assert_eq!(a, b);
    }

    #[test]
    fn prefix_tier_sorts_first() {
        let names = vec!["bolt".to_string(), "shock".to_string(), "bolt of fury".to_string()];
        let bare = vec!["bolt".to_string()];
        let mut idx: Vec<u32> = vec![1, 0, 2];
        seeded_sort_faces(&mut idx, "seed", 0, &bare, &names);
        assert!(idx[0] == 0 || idx[0] == 2);
        assert!(idx[1] == 0 || idx[1] == 2);
        assert_eq!(idx[2], 1);
    }

    #[test]
    fn different_salt_can_reorder_within_tier() {
        let names = vec!["aaa".to_string(), "bbb".to_string(), "ccc".to_string()];
        let mut a: Vec<u32> = vec![0, 1, 2];
        let mut b: Vec<u32> = vec![0, 1, 2];
        seeded_sort_faces(&mut a, "seed", 0, &[], &names);
        seeded_sort_faces(&mut b, "seed", 999, &[], &names);
        // Not guaranteed to differ for every seed pair, but the hash should
        // not trivially ignore the salt.
        let mix_a = mix(fnv1a("seed") ^ 0 ^ 0);
        let mix_b = mix(fnv1a("seed") ^ 999 ^ 0);
        assert_ne!(mix_a, mix_b);
        let _ = (a, b);
    }
}
