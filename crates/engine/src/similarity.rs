//! Loose keyword matching for mistyped categories (`прдукты`, `таксии`).
//!
//! Similarity is the Ratcliff/Obershelp "gestalt" ratio: the longest common
//! run is matched first, then the pieces on either side of it are matched
//! recursively; the score is `2 * matched / (len(a) + len(b))`.

/// Similarity of two strings in `0.0..=1.0`, compared char by char.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Up to `n` candidates whose [`ratio`] with `word` is at least `cutoff`.
///
/// Results are ordered best first; equal scores are ordered by the candidate
/// text, greatest first.
pub fn close_matches<'a, I>(word: &str, candidates: I, n: usize, cutoff: f64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f64, &'a str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = ratio(word, candidate);
            (score >= cutoff).then_some((score, candidate))
        })
        .collect();

    scored.sort_by(|left, right| {
        right
            .0
            .total_cmp(&left.0)
            .then_with(|| right.1.cmp(left.1))
    });
    scored.truncate(n);
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            queue.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            queue.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common run inside `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
///
/// Among runs of equal length the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // run_len[j + 1] = length of the common run ending at a[i - 1], b[j]
    let mut previous = vec![0usize; b.len() + 1];

    for i in a_lo..a_hi {
        let mut current = vec![0usize; b.len() + 1];
        for j in b_lo..b_hi {
            if a[i] != b[j] {
                continue;
            }
            let run = previous[j] + 1;
            current[j + 1] = run;
            if run > best_size {
                best_i = i + 1 - run;
                best_j = j + 1 - run;
                best_size = run;
            }
        }
        previous = current;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_and_disjoint() {
        assert_eq!(ratio("такси", "такси"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn ratio_counts_recursive_blocks() {
        // "abcd" vs "bcde": block "bcd" -> 2 * 3 / 8
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        // one deleted letter in a six letter word
        assert!((ratio("прдукты", "продукты") - 14.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn close_matches_respects_cutoff_and_limit() {
        let candidates = ["такси", "такса", "метро", "кафе"];
        let found = close_matches("таксии", candidates, 3, 0.6);
        assert_eq!(found.first(), Some(&"такси"));
        assert!(!found.contains(&"метро"));
        assert!(!found.contains(&"кафе"));

        let limited = close_matches("такс", candidates, 1, 0.6);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn equal_scores_prefer_greater_candidate() {
        let found = close_matches("ab", ["ax", "ay"], 2, 0.5);
        assert_eq!(found, vec!["ay", "ax"]);
    }

    #[test]
    fn nothing_close() {
        assert!(close_matches("zzz", ["такси", "кафе"], 3, 0.6).is_empty());
    }
}
