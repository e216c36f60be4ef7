//! Approximate matching against the named-color table.
//!
//! The metric is normalized Levenshtein similarity (`1 - distance/max_len`)
//! with a substring fast path: when one string contains the other, the score
//! is at least `2 * min_len / (len_a + len_b)`. Scores are in [0,1]; inputs
//! are expected to already be normalized, so matching is effectively
//! case-insensitive. The table is scanned in its fixed order and only a
//! strictly better score replaces the current best, which makes tie-breaking
//! deterministic: first name in table order wins.

use crate::color::Rgb;
use crate::names::NAMED_COLORS;

/// Returns the color of the best-scoring table entry at or above `cutoff`.
pub(crate) fn closest(query: &str, cutoff: f64) -> Option<Rgb> {
    if query.is_empty() {
        return None;
    }

    let mut best: Option<(f64, Rgb, &str)> = None;
    for &(name, rgb) in NAMED_COLORS {
        let score = similarity(query, name);
        if score >= cutoff && best.map_or(true, |(b, _, _)| score > b) {
            best = Some((score, rgb, name));
        }
    }
    if let Some((score, _, name)) = best {
        log::trace!("fuzzy match {query:?} -> {name:?} (score {score:.3})");
    }
    best.map(|(_, rgb, _)| rgb)
}

/// Similarity of two strings in [0,1].
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let edit = 1.0 - levenshtein(a, b) as f64 / len_a.max(len_b) as f64;

    // Substring fast path: reward full containment the way a matching-block
    // ratio would.
    let contained = if len_a <= len_b {
        b.contains(a)
    } else {
        a.contains(b)
    };
    if contained {
        let overlap = 2.0 * len_a.min(len_b) as f64 / (len_a + len_b) as f64;
        edit.max(overlap)
    } else {
        edit
    }
}

/// Classic two-row edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("red", "red"), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("red", "red"), 1.0);
        assert_eq!(similarity("", "red"), 0.0);
        assert_eq!(similarity("zzzqqq123", "red"), 0.0);
    }

    #[test]
    fn test_similarity_near_miss() {
        // One edit away from a 9-letter name.
        assert!(similarity("turquois", "turquoise") > 0.85);
        assert!(similarity("crimsom", "crimson") > 0.8);
    }

    #[test]
    fn test_substring_awareness() {
        // Containment scores at least the overlap ratio.
        let score = similarity("blue", "lightblue");
        assert!(score >= 2.0 * 4.0 / 13.0);
    }

    #[test]
    fn test_closest_honors_cutoff() {
        assert_eq!(closest("turquois", 0.6), Some(Rgb::new(64, 224, 208)));
        assert_eq!(closest("zzzqqq123", 0.55), None);
        assert_eq!(closest("", 0.0), None);
    }

    #[test]
    fn test_closest_is_deterministic() {
        let first = closest("gren", 0.55);
        for _ in 0..10 {
            assert_eq!(closest("gren", 0.55), first);
        }
    }
}
