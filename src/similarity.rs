//! Donor Match Similarity Scoring
//!
//! Scores two character sequences by their longest common substring
//! (contiguous run, not a subsequence), normalized against the longer
//! sequence and expressed as a percentage.
//!
//! A naive scan that extends a match counter at every (i, j) offset pair is
//! O(n·m·L) worst case. This module computes the same result with the
//! standard common-suffix DP recurrence in O(n·m) time and O(min(n,m)) space
//! via row rolling. This is the only performance-sensitive path in the
//! service.

use serde::Serialize;

/// A contiguous run where two sequences agree character-by-character.
///
/// Offsets are 0-based character indices into each sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub offset_a: usize,
    pub offset_b: usize,
    pub len: usize,
}

impl MatchSpan {
    /// The empty span. Returned when the sequences share no characters.
    pub const EMPTY: MatchSpan = MatchSpan {
        offset_a: 0,
        offset_b: 0,
        len: 0,
    };
}

/// Find the longest common substring of `a` and `b`.
///
/// Comparison is by `char` equality; any Unicode input is accepted (no
/// alphabet validation). `row[j + 1]` holds the length of the common suffix
/// ending at the current outer character and `inner[j]`; the shorter
/// sequence is always the inner axis so the rolling buffer is O(min(n,m)).
///
/// Ties on length keep the run found first (strict `>` update); only the
/// length feeds the similarity score.
pub fn longest_common_run(a: &str, b: &str) -> MatchSpan {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Keep the shorter sequence on the inner (row) axis.
    let (outer, inner, swapped) = if a_chars.len() >= b_chars.len() {
        (&a_chars, &b_chars, false)
    } else {
        (&b_chars, &a_chars, true)
    };

    if inner.is_empty() {
        return MatchSpan::EMPTY;
    }

    let mut row = vec![0usize; inner.len() + 1];
    let mut best = MatchSpan::EMPTY;

    for (i, &oc) in outer.iter().enumerate() {
        // Walk right-to-left so row[j] still holds the previous row's value.
        for j in (0..inner.len()).rev() {
            if oc == inner[j] {
                row[j + 1] = row[j] + 1;
                if row[j + 1] > best.len {
                    let len = row[j + 1];
                    best = MatchSpan {
                        offset_a: i + 1 - len,
                        offset_b: j + 1 - len,
                        len,
                    };
                }
            } else {
                row[j + 1] = 0;
            }
        }
    }

    if swapped {
        MatchSpan {
            offset_a: best.offset_b,
            offset_b: best.offset_a,
            len: best.len,
        }
    } else {
        best
    }
}

/// Similarity percentage between two sequences, rounded to two decimals.
///
/// `100 × longest_common_run / max(len(a), len(b))`. The denominator uses
/// max() so the score is independent of argument order.
///
/// Zero-length policy: when both sequences are empty the ratio is undefined
/// (0/0); this implementation returns 0.0. A single empty input scores 0.0
/// through the normal formula (no run, non-zero denominator).
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let n = a.chars().count();
    let m = b.chars().count();

    let denominator = n.max(m);
    if denominator == 0 {
        return 0.0;
    }

    let span = longest_common_run(a, b);
    let score = (span.len as f64 / denominator as f64) * 100.0;
    round2(score)
}

/// Round to two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identical_sequences_score_100() {
        assert_relative_eq!(similarity_score("ATCG", "ATCG"), 100.0);
        assert_relative_eq!(similarity_score("A", "A"), 100.0);
    }

    #[test]
    fn single_shared_character() {
        // Longest run is one 'G' over max length 4.
        assert_relative_eq!(similarity_score("ATCG", "GGGG"), 25.0);
    }

    #[test]
    fn one_empty_sequence_scores_zero() {
        assert_relative_eq!(similarity_score("", "ATCG"), 0.0);
        assert_relative_eq!(similarity_score("ATCG", ""), 0.0);
    }

    #[test]
    fn both_empty_sequences_score_zero() {
        assert_relative_eq!(similarity_score("", ""), 0.0);
    }

    #[test]
    fn unequal_lengths_use_max_denominator() {
        // Run of 3 over max length 4.
        assert_relative_eq!(similarity_score("AAAA", "AAA"), 75.0);
    }

    #[test]
    fn disjoint_alphabets_score_zero() {
        assert_relative_eq!(similarity_score("AAAA", "TTTT"), 0.0);
    }

    #[test]
    fn score_is_symmetric() {
        let pairs = [
            ("ATCGGA", "GGAT"),
            ("AAAA", "AAA"),
            ("GATTACA", "TACAGATT"),
            ("", "ATCG"),
        ];
        for (a, b) in pairs {
            assert_relative_eq!(similarity_score(a, b), similarity_score(b, a));
        }
    }

    #[test]
    fn score_stays_in_range() {
        let inputs = ["", "A", "ATCG", "GATTACA", "NNNNXYZ", "ATATATAT"];
        for a in inputs {
            for b in inputs {
                let s = similarity_score(a, b);
                assert!((0.0..=100.0).contains(&s), "score({a:?}, {b:?}) = {s}");
            }
        }
    }

    #[test]
    fn rounding_to_two_decimals() {
        // Run of 1 over max length 3: 100/3 = 33.333... -> 33.33
        assert_relative_eq!(similarity_score("A", "TAT"), 33.33);
        // Run of 2 over max length 3: 66.666... -> 66.67
        assert_relative_eq!(similarity_score("AT", "TAT"), 66.67);
    }

    #[test]
    fn run_must_be_contiguous() {
        // "AC" appears as a subsequence of "ABC" but not a substring;
        // longest common substring is length 1.
        assert_relative_eq!(similarity_score("AC", "ABC"), 33.33);
    }

    #[test]
    fn span_reports_char_offsets() {
        let span = longest_common_run("xxGATTyy", "zGATTz");
        assert_eq!(
            span,
            MatchSpan {
                offset_a: 2,
                offset_b: 1,
                len: 4
            }
        );
    }

    #[test]
    fn span_matches_naive_scan() {
        // Cross-check the DP against a direct offset-pair extension.
        fn naive(a: &str, b: &str) -> usize {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            let mut max_match = 0;
            for i in 0..a.len() {
                for j in 0..b.len() {
                    let mut k = 0;
                    while i + k < a.len() && j + k < b.len() && a[i + k] == b[j + k] {
                        k += 1;
                    }
                    max_match = max_match.max(k);
                }
            }
            max_match
        }

        let cases = [
            ("GATTACA", "TACAGATT"),
            ("ATATAT", "TATATA"),
            ("CCCC", "CC"),
            ("ACGTACGT", "GTAC"),
            ("abcdef", "zabcyde"),
        ];
        for (a, b) in cases {
            assert_eq!(longest_common_run(a, b).len, naive(a, b), "{a} vs {b}");
        }
    }

    #[test]
    fn multibyte_characters_compare_by_char() {
        // Offsets and lengths are in chars, not bytes.
        let span = longest_common_run("αβγδ", "βγ");
        assert_eq!(span.len, 2);
        assert_eq!(span.offset_a, 1);
        assert_relative_eq!(similarity_score("αβγδ", "βγ"), 50.0);
    }
}
