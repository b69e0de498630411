//! Unit scoring engine.
//!
//! # Responsibility
//! - Compute the readability and diversity indices of one unit from its
//!   complete word list.
//!
//! # Invariants
//! - Both functions are pure: no storage, network or logging side effects.
//! - Titles containing `_` count as syllable-marked words; everything else is
//!   a plain word. The readability constants are applied literally.
//! - Diversity is total and always within `[0, 1]`.

use crate::model::word::{is_multi_syllable, Word};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const READABILITY_BASE: f64 = 206.835;
const WORD_COUNT_WEIGHT: f64 = 1.015;
const SYLLABLE_RATIO_WEIGHT: f64 = 84.6;

/// Anything that exposes a word title to the scoring functions.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for Word {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for String {
    fn title(&self) -> &str {
        self
    }
}

impl Titled for &str {
    fn title(&self) -> &str {
        self
    }
}

/// Degenerate input for the readability formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringError {
    /// The word list has no plain word, so the syllable ratio divides by zero.
    NoPlainWords { syllable_count: usize },
}

impl Display for ScoringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlainWords { syllable_count } => write!(
                f,
                "readability is undefined without plain words ({syllable_count} syllable-marked)"
            ),
        }
    }
}

impl Error for ScoringError {}

/// Computes `206.835 - 1.015 * plain - 84.6 * (marked / plain)`.
///
/// # Errors
/// - `ScoringError::NoPlainWords` when `words` is empty or every title is
///   syllable-marked.
pub fn compute_readability_index<W: Titled>(words: &[W]) -> Result<f64, ScoringError> {
    let syllable_count = words
        .iter()
        .filter(|word| is_multi_syllable(word.title()))
        .count();
    let word_count = words.len() - syllable_count;

    if word_count == 0 {
        return Err(ScoringError::NoPlainWords { syllable_count });
    }

    let word_count = word_count as f64;
    let syllable_count = syllable_count as f64;
    Ok(READABILITY_BASE
        - WORD_COUNT_WEIGHT * word_count
        - SYLLABLE_RATIO_WEIGHT * (syllable_count / word_count))
}

/// Computes the type-token ratio: distinct titles over total titles.
///
/// Titles compare case-sensitively. Returns `0.0` for an empty list.
pub fn compute_diversity_index<W: Titled>(words: &[W]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let unique = words
        .iter()
        .map(Titled::title)
        .collect::<HashSet<_>>()
        .len();
    unique as f64 / words.len() as f64
}

/// Both indices for one unit, in the shape persisted on the unit row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScores {
    /// `None` when the readability formula has no plain word to divide by.
    pub readability_index: Option<f64>,
    pub diversity_index: f64,
}

impl UnitScores {
    /// Runs both scoring functions over `words`.
    ///
    /// A degenerate readability input is downgraded to `None` and logged.
    pub fn compute<W: Titled>(words: &[W]) -> Self {
        let readability_index = match compute_readability_index(words) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=unit_score module=scoring status=degenerate word_count={} error={}",
                    words.len(),
                    err
                );
                None
            }
        };
        Self {
            readability_index,
            diversity_index: compute_diversity_index(words),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_diversity_index, compute_readability_index, ScoringError, UnitScores};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn diversity_of_empty_list_is_zero() {
        let words: [&str; 0] = [];
        assert_eq!(compute_diversity_index(&words), 0.0);
    }

    #[test]
    fn diversity_counts_distinct_titles() {
        assert_close(compute_diversity_index(&["a", "a", "a"]), 1.0 / 3.0);
        assert_close(compute_diversity_index(&["a", "b", "c"]), 1.0);
    }

    #[test]
    fn diversity_is_case_sensitive() {
        assert_close(compute_diversity_index(&["Run", "run"]), 1.0);
    }

    #[test]
    fn diversity_stays_within_unit_interval() {
        let lists: [&[&str]; 4] = [
            &["x"],
            &["x", "x", "y"],
            &["a_b", "a_b", "a_b", "c"],
            &["p", "q", "p", "q", "p", "q"],
        ];
        for list in lists {
            let value = compute_diversity_index(list);
            assert!((0.0..=1.0).contains(&value), "{list:?} -> {value}");
        }
    }

    #[test]
    fn readability_of_plain_words_only() {
        let value = compute_readability_index(&["cat", "dog"]).unwrap();
        assert_close(value, 204.805);
    }

    #[test]
    fn readability_with_one_syllable_word() {
        let value = compute_readability_index(&["cat", "do_g"]).unwrap();
        assert_close(value, 121.22);
    }

    #[test]
    fn readability_without_plain_words_is_degenerate() {
        assert_eq!(
            compute_readability_index(&["do_g", "ca_t"]),
            Err(ScoringError::NoPlainWords { syllable_count: 2 })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            compute_readability_index(&empty),
            Err(ScoringError::NoPlainWords { syllable_count: 0 })
        );
    }

    #[test]
    fn unit_scores_keep_diversity_when_readability_is_degenerate() {
        let scores = UnitScores::compute(&["jump_ed", "jump_ed"]);
        assert_eq!(scores.readability_index, None);
        assert_close(scores.diversity_index, 0.5);
    }
}
