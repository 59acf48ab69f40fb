//! Typo-tolerant product name matching for the sell-screen search box.
//!
//! Cashiers type on small screens, so a query still matches with one wrong,
//! missing, doubled or trailing letter. Both sides are lowercased and
//! stripped of accents first.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Length thresholds for the loose rules, counted in characters after
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Queries shorter than this only get substring and subsequence matching.
    pub loose_min_len: usize,
    /// Minimum query length for the "last letter wrong" prefix rule.
    pub suffix_min_len: usize,
    /// Prefix length for the loose prefix fallback. The fallback only runs for
    /// queries of at least `suffix_min_len` characters (and at least this
    /// long); it has no query-length threshold of its own.
    pub prefix_fallback_len: usize,
    /// Minimum query length for the one-substitution window rule.
    pub substitution_min_len: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            loose_min_len: 3,
            suffix_min_len: 4,
            prefix_fallback_len: 3,
            substitution_min_len: 4,
        }
    }
}

/// Lowercase, decompose (NFD) and drop combining diacritics (U+0300..=U+036F).
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Does `candidate` plausibly match what the cashier typed?
pub fn matches(query: &str, candidate: &str) -> bool {
    matches_with(query, candidate, &MatchOptions::default())
}

pub fn matches_with(query: &str, candidate: &str, options: &MatchOptions) -> bool {
    let query = normalize(query);
    let candidate = normalize(candidate);

    if candidate.contains(query.as_str()) {
        return true;
    }

    let q: Vec<char> = query.chars().collect();
    let t: Vec<char> = candidate.chars().collect();

    if q.len() >= 2 && is_subsequence(&q, &t) {
        return true;
    }

    if q.len() < options.loose_min_len {
        return false;
    }

    // One extra letter typed. The shortened query must keep two letters.
    if q.len() > 2 && (0..q.len()).any(|i| candidate.contains(without(&q, i).as_str())) {
        return true;
    }

    // One letter missing, either side.
    for i in 0..t.len() {
        let partial = without(&t, i);
        if partial.contains(query.as_str()) || query.contains(partial.as_str()) {
            return true;
        }
    }

    if q.len() >= options.suffix_min_len {
        let head: String = q[..q.len() - 1].iter().collect();
        if candidate.starts_with(head.as_str()) {
            return true;
        }
    }

    if q.len() >= options.suffix_min_len && q.len() >= options.prefix_fallback_len {
        let prefix: String = q[..options.prefix_fallback_len].iter().collect();
        if candidate.starts_with(prefix.as_str()) {
            return true;
        }
    }

    q.len() >= options.substitution_min_len && has_one_substitution_window(&q, &t)
}

/// Two-pointer scan: every query char appears in order in the candidate.
fn is_subsequence(q: &[char], t: &[char]) -> bool {
    let mut qi = 0;
    for &c in t {
        if qi == q.len() {
            break;
        }
        if c == q[qi] {
            qi += 1;
        }
    }
    qi == q.len()
}

fn without(chars: &[char], skip: usize) -> String {
    chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .map(|(_, c)| c)
        .collect()
}

/// Some window of `t` as long as `q` differs from it in exactly one place.
fn has_one_substitution_window(q: &[char], t: &[char]) -> bool {
    if q.is_empty() || t.len() < q.len() {
        return false;
    }
    t.windows(q.len())
        .any(|w| w.iter().zip(q).filter(|(a, b)| a != b).count() == 1)
}
