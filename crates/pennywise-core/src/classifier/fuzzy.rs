//! Ratcliff/Obershelp string similarity
//!
//! `ratio` returns `2 * M / T` where `T` is the combined length of both strings
//! and `M` the number of characters in matching blocks. Blocks are found by
//! taking the longest common substring (earliest on ties) and recursing on the
//! pieces to its left and right.

/// Similarity ratio between `a` and `b`, in `0.0..=1.0`
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Closest candidate to `word` scoring at least `cutoff`
///
/// Ties on score go to the lexicographically greatest candidate.
pub fn best_match<'a>(word: &str, candidates: &[&'a str], cutoff: f64) -> Option<(&'a str, f64)> {
    candidates
        .iter()
        .map(|&candidate| (candidate, ratio(candidate, word)))
        .filter(|(_, score)| *score >= cutoff)
        .fold(None, |best: Option<(&'a str, f64)>, (candidate, score)| match best {
            Some((best_candidate, best_score))
                if best_score > score || (best_score == score && best_candidate >= candidate) =>
            {
                best
            }
            _ => Some((candidate, score)),
        })
}

fn matching_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
    if size == 0 {
        return 0;
    }
    size + matching_chars(a, b, alo, i, blo, j) + matching_chars(a, b, i + size, ahi, j + size, bhi)
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j] = length of the match ending at (i - 1, j - 1)
    let mut prev = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        let mut curr = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                curr[j - blo + 1] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        prev = curr;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical_and_disjoint() {
        assert_eq!(ratio("coffee", "coffee"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn test_ratio_known_values() {
        // "abcd" vs "bcde": block "bcd" -> 2*3/8
        assert_eq!(ratio("abcd", "bcde"), 0.75);
        // one dropped letter
        let r = ratio("restaurant", "restarant");
        assert!((r - 18.0 / 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_match_respects_cutoff() {
        let keywords = ["netflix", "movie", "cinema"];
        assert_eq!(best_match("netflx", &keywords, 0.75).map(|m| m.0), Some("netflix"));
        assert!(best_match("spreadsheet", &keywords, 0.75).is_none());
    }

    #[test]
    fn test_best_match_prefers_highest_score() {
        let keywords = ["drink", "drinking"];
        let (word, score) = best_match("drinkin", &keywords, 0.75).unwrap();
        assert_eq!(word, "drinking");
        assert!(score > ratio("drink", "drinkin"));
    }
}
