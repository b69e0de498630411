//! Vocabulary words and their dictionary synonyms.
//!
//! # Invariants
//! - A word belongs to exactly one unit for its whole lifetime.
//! - `title` may carry `_` syllable markers (`run_ning`); they are kept
//!   verbatim because unit scoring classifies on them.

use super::unit::UnitId;
use super::{optional_text, required_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type WordId = i64;

/// Delimiter separating tagged syllables inside a word title.
pub const SYLLABLE_DELIMITER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub unit_id: UnitId,
    pub title: String,
    /// Dictionary definition; absent until enrichment stores one.
    pub translation: Option<String>,
    pub topic: Option<String>,
    /// Learner progress flag.
    pub completed: bool,
}

impl Word {
    /// Returns whether the title is tagged with at least one syllable break.
    pub fn is_multi_syllable(&self) -> bool {
        is_multi_syllable(&self.title)
    }
}

/// Returns whether `title` splits into more than one segment on `_`.
pub fn is_multi_syllable(title: &str) -> bool {
    title.split(SYLLABLE_DELIMITER).nth(1).is_some()
}

/// Returns `title` with syllable markers removed, as used for dictionary lookups.
pub fn lookup_key(title: &str) -> String {
    title.replace(SYLLABLE_DELIMITER, "")
}

/// Input for adding one word to a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWord {
    pub title: String,
    pub topic: Option<String>,
}

impl NewWord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topic: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required_text("title", &self.title)?,
            topic: optional_text(self.topic.as_deref()),
        })
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPatch {
    pub title: Option<String>,
    pub translation: Option<String>,
    pub topic: Option<String>,
    pub completed: Option<bool>,
}

impl WordPatch {
    pub fn apply_to(&self, current: &Word) -> Result<Word, ValidationError> {
        let mut next = current.clone();
        if let Some(title) = self.title.as_deref() {
            next.title = required_text("title", title)?;
        }
        if self.translation.is_some() {
            next.translation = optional_text(self.translation.as_deref());
        }
        if self.topic.is_some() {
            next.topic = optional_text(self.topic.as_deref());
        }
        if let Some(completed) = self.completed {
            next.completed = completed;
        }
        Ok(next)
    }
}

/// One synonym stored for an enriched word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSynonym {
    pub id: i64,
    pub word_id: WordId,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::{is_multi_syllable, lookup_key};

    #[test]
    fn underscore_marks_multi_syllable_titles() {
        assert!(is_multi_syllable("run_ning"));
        assert!(is_multi_syllable("a_"));
        assert!(!is_multi_syllable("run"));
        assert!(!is_multi_syllable(""));
    }

    #[test]
    fn lookup_key_strips_syllable_markers() {
        assert_eq!(lookup_key("jump_ed"), "jumped");
        assert_eq!(lookup_key("cat"), "cat");
    }
}
