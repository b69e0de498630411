//! Word use cases and unit rescoring.
//!
//! # Responsibility
//! - Add, edit, delete and bulk-import words of one unit.
//! - Enrich new words through a `DictionaryClient`.
//! - Recompute and persist unit scores after every word-set mutation.
//!
//! # Invariants
//! - Mutation, re-list, scoring and score write share one
//!   `BEGIN IMMEDIATE` transaction, so concurrent writers on the same unit
//!   serialize and committed scores always match a fully applied word set.
//! - Dictionary lookups run before the transaction opens and never hold the
//!   writer lock.
//! - A bulk import rescores the unit exactly once.

use crate::dictionary::{DictionaryClient, DictionaryError, WordEntry};
use crate::import::{parse_word_rows, ImportError};
use crate::model::unit::UnitId;
use crate::model::word::{NewWord, Word, WordId, WordPatch, WordSynonym};
use crate::model::ValidationError;
use crate::repo::unit_repo::{SqliteUnitRepository, UnitRepository};
use crate::repo::word_repo::{SqliteWordRepository, WordRepository};
use crate::repo::{RepoError, RepoResult};
use crate::scoring::UnitScores;
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

#[derive(Debug)]
pub enum WordServiceError {
    UnitNotFound(UnitId),
    WordNotFound(WordId),
    /// Dictionary has no entry for this title; nothing was written.
    UnknownWord(String),
    Dictionary(DictionaryError),
    Import(ImportError),
    Repo(RepoError),
}

impl Display for WordServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnitNotFound(id) => write!(f, "unit not found: {id}"),
            Self::WordNotFound(id) => write!(f, "word not found: {id}"),
            Self::UnknownWord(title) => write!(f, "dictionary has no entry for `{title}`"),
            Self::Dictionary(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WordServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dictionary(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WordServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "unit", id } => Self::UnitNotFound(id),
            RepoError::NotFound { entity: "word", id } => Self::WordNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for WordServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

impl From<ValidationError> for WordServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Repo(value.into())
    }
}

impl From<DictionaryError> for WordServiceError {
    fn from(value: DictionaryError) -> Self {
        Self::Dictionary(value)
    }
}

impl From<ImportError> for WordServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Result of a single-word mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct WordChange {
    /// The word after the mutation; for deletes, the removed word.
    pub word: Word,
    /// Scores committed together with the mutation.
    pub scores: UnitScores,
}

/// Result of a bulk import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub imported: Vec<Word>,
    /// Titles the dictionary does not know, in file order.
    pub skipped: Vec<String>,
    pub scores: UnitScores,
}

pub struct WordService<'conn, D: DictionaryClient> {
    conn: &'conn mut Connection,
    dictionary: D,
}

impl<'conn, D: DictionaryClient> WordService<'conn, D> {
    pub fn new(conn: &'conn mut Connection, dictionary: D) -> Self {
        Self { conn, dictionary }
    }

    /// Adds one enriched word to `unit_id` and rescores the unit.
    ///
    /// # Errors
    /// - `UnitNotFound` before any dictionary call.
    /// - `UnknownWord` when the dictionary returns no entry.
    pub fn add_word(
        &mut self,
        unit_id: UnitId,
        input: &NewWord,
    ) -> Result<WordChange, WordServiceError> {
        let started_at = Instant::now();
        let input = input.normalized()?;
        self.ensure_unit(unit_id)?;

        let entry = self
            .dictionary
            .lookup(&input.title)?
            .ok_or_else(|| WordServiceError::UnknownWord(input.title.clone()))?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let word = insert_enriched(&tx, unit_id, &input, &entry)?;
        let scores = recompute_unit_scores(&tx, unit_id)?;
        tx.commit()?;

        info!(
            "event=word_add module=word_service status=ok unit_id={} word_id={} synonyms={} duration_ms={}",
            unit_id,
            word.id,
            entry.synonyms.len(),
            started_at.elapsed().as_millis()
        );
        Ok(WordChange { word, scores })
    }

    /// Applies `patch` to one word of `unit_id` and rescores the unit.
    pub fn update_word(
        &mut self,
        unit_id: UnitId,
        word_id: WordId,
        patch: &WordPatch,
    ) -> Result<WordChange, WordServiceError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let word = {
            let words = SqliteWordRepository::new(&tx);
            let current = words
                .get_word(unit_id, word_id)?
                .ok_or(WordServiceError::WordNotFound(word_id))?;
            let next = patch.apply_to(&current)?;
            words.update_word(&next)?;
            next
        };
        let scores = recompute_unit_scores(&tx, unit_id)?;
        tx.commit()?;

        info!(
            "event=word_update module=word_service status=ok unit_id={} word_id={}",
            unit_id, word_id
        );
        Ok(WordChange { word, scores })
    }

    /// Deletes one word of `unit_id` and rescores the unit.
    pub fn delete_word(
        &mut self,
        unit_id: UnitId,
        word_id: WordId,
    ) -> Result<WordChange, WordServiceError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let word = {
            let words = SqliteWordRepository::new(&tx);
            let current = words
                .get_word(unit_id, word_id)?
                .ok_or(WordServiceError::WordNotFound(word_id))?;
            words.delete_word(unit_id, word_id)?;
            current
        };
        let scores = recompute_unit_scores(&tx, unit_id)?;
        tx.commit()?;

        info!(
            "event=word_delete module=word_service status=ok unit_id={} word_id={}",
            unit_id, word_id
        );
        Ok(WordChange { word, scores })
    }

    /// Imports every word of a CSV word list into `unit_id`.
    ///
    /// All lookups complete before the first write; a dictionary failure
    /// aborts the import with nothing stored. Unknown words are skipped. The
    /// accepted words and the single rescore commit together.
    pub fn import_words(
        &mut self,
        unit_id: UnitId,
        contents: &str,
    ) -> Result<ImportReport, WordServiceError> {
        let started_at = Instant::now();
        let rows = parse_word_rows(contents)?;
        self.ensure_unit(unit_id)?;

        let mut accepted = Vec::with_capacity(rows.len());
        let mut skipped = Vec::new();
        for row in rows {
            let row = row.normalized()?;
            match self.dictionary.lookup(&row.title)? {
                Some(entry) => accepted.push((row, entry)),
                None => skipped.push(row.title),
            }
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut imported = Vec::with_capacity(accepted.len());
        for (row, entry) in &accepted {
            imported.push(insert_enriched(&tx, unit_id, row, entry)?);
        }
        let scores = recompute_unit_scores(&tx, unit_id)?;
        tx.commit()?;

        if !skipped.is_empty() {
            warn!(
                "event=word_import module=word_service status=partial unit_id={} skipped={}",
                unit_id,
                skipped.len()
            );
        }
        info!(
            "event=word_import module=word_service status=ok unit_id={} imported={} duration_ms={}",
            unit_id,
            imported.len(),
            started_at.elapsed().as_millis()
        );
        Ok(ImportReport {
            imported,
            skipped,
            scores,
        })
    }

    pub fn list_words(&self, unit_id: UnitId) -> Result<Vec<Word>, WordServiceError> {
        self.ensure_unit(unit_id)?;
        Ok(SqliteWordRepository::new(&*self.conn).list_words(unit_id)?)
    }

    pub fn list_synonyms(
        &self,
        unit_id: UnitId,
        word_id: WordId,
    ) -> Result<Vec<WordSynonym>, WordServiceError> {
        let words = SqliteWordRepository::new(&*self.conn);
        if words.get_word(unit_id, word_id)?.is_none() {
            return Err(WordServiceError::WordNotFound(word_id));
        }
        Ok(words.list_synonyms(word_id)?)
    }

    /// Rescores a unit without mutating its words.
    pub fn rescore(&mut self, unit_id: UnitId) -> Result<UnitScores, WordServiceError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let scores = recompute_unit_scores(&tx, unit_id)?;
        tx.commit()?;
        Ok(scores)
    }

    fn ensure_unit(&self, unit_id: UnitId) -> Result<(), WordServiceError> {
        if SqliteUnitRepository::new(&*self.conn).unit_exists(unit_id)? {
            Ok(())
        } else {
            Err(WordServiceError::UnitNotFound(unit_id))
        }
    }
}

/// Re-lists every word of `unit_id`, scores them and stores the result.
///
/// Callers pass the transaction that applied the word mutation so the
/// score write commits with it.
pub fn recompute_unit_scores(conn: &Connection, unit_id: UnitId) -> RepoResult<UnitScores> {
    let words = SqliteWordRepository::new(conn).list_words(unit_id)?;
    let scores = UnitScores::compute(&words);
    SqliteUnitRepository::new(conn).store_scores(unit_id, &scores)?;

    info!(
        "event=unit_rescore module=word_service status=ok unit_id={} word_count={} readability_defined={}",
        unit_id,
        words.len(),
        scores.readability_index.is_some()
    );
    Ok(scores)
}

fn insert_enriched(
    conn: &Connection,
    unit_id: UnitId,
    input: &NewWord,
    entry: &WordEntry,
) -> RepoResult<Word> {
    let words = SqliteWordRepository::new(conn);
    let word = words.create_word(unit_id, input, entry.definition.as_deref())?;
    words.add_synonyms(word.id, &entry.synonyms)?;
    Ok(word)
}
