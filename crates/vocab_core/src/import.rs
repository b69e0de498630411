//! CSV word-list parsing for bulk unit imports.
//!
//! Accepted shape is one word per line, `title[,topic]`, with an optional
//! `title,topic` header. Quoting is not supported; titles never contain commas.

use crate::model::word::NewWord;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// 1-based line number whose title cell is blank.
    EmptyTitle { line: usize },
    /// Input contains no word rows.
    NoRows,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle { line } => write!(f, "line {line}: title cannot be empty"),
            Self::NoRows => write!(f, "import file contains no words"),
        }
    }
}

impl Error for ImportError {}

/// Parses CSV text into word inputs, preserving row order.
pub fn parse_word_rows(contents: &str) -> Result<Vec<NewWord>, ImportError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut rows = Vec::new();
    let mut header_checked = false;

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (title, topic) = match line.split_once(',') {
            Some((title, topic)) => (title.trim(), Some(topic.trim())),
            None => (line.trim(), None),
        };

        if !header_checked {
            header_checked = true;
            if title.eq_ignore_ascii_case("title") {
                continue;
            }
        }

        if title.is_empty() {
            return Err(ImportError::EmptyTitle { line: index + 1 });
        }

        let mut word = NewWord::new(title);
        if let Some(topic) = topic.filter(|topic| !topic.is_empty()) {
            word = word.with_topic(topic);
        }
        rows.push(word);
    }

    if rows.is_empty() {
        return Err(ImportError::NoRows);
    }
    Ok(rows)
}
