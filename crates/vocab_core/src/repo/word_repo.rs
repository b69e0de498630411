//! Word and synonym repository contract and SQLite implementation.
//!
//! # Invariants
//! - Update and delete are scoped by `(unit_id, word_id)`; a word id that
//!   belongs to another unit reports `NotFound`.
//! - `list_words` returns the complete word set of one unit in insertion
//!   order, which is what unit scoring consumes.

use super::{bool_to_int, int_to_bool, RepoError, RepoResult};
use crate::model::unit::UnitId;
use crate::model::word::{NewWord, Word, WordId, WordSynonym};
use rusqlite::{params, Connection, Row};

const WORD_SELECT_SQL: &str =
    "SELECT id, unit_id, title, translation, topic, completed FROM words";

pub trait WordRepository {
    fn create_word(
        &self,
        unit_id: UnitId,
        input: &NewWord,
        translation: Option<&str>,
    ) -> RepoResult<Word>;
    fn get_word(&self, unit_id: UnitId, word_id: WordId) -> RepoResult<Option<Word>>;
    fn list_words(&self, unit_id: UnitId) -> RepoResult<Vec<Word>>;
    fn update_word(&self, word: &Word) -> RepoResult<()>;
    fn delete_word(&self, unit_id: UnitId, word_id: WordId) -> RepoResult<()>;
    /// Appends synonyms for one word; blank values are skipped.
    fn add_synonyms(&self, word_id: WordId, titles: &[String]) -> RepoResult<usize>;
    fn list_synonyms(&self, word_id: WordId) -> RepoResult<Vec<WordSynonym>>;
}

pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn create_word(
        &self,
        unit_id: UnitId,
        input: &NewWord,
        translation: Option<&str>,
    ) -> RepoResult<Word> {
        let input = input.normalized()?;
        self.conn.execute(
            "INSERT INTO words (unit_id, title, translation, topic) VALUES (?1, ?2, ?3, ?4);",
            params![unit_id, input.title, translation, input.topic],
        )?;

        Ok(Word {
            id: self.conn.last_insert_rowid(),
            unit_id,
            title: input.title,
            translation: translation.map(str::to_string),
            topic: input.topic,
            completed: false,
        })
    }

    fn get_word(&self, unit_id: UnitId, word_id: WordId) -> RepoResult<Option<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} WHERE id = ?1 AND unit_id = ?2;"))?;
        let mut rows = stmt.query(params![word_id, unit_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_word_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_words(&self, unit_id: UnitId) -> RepoResult<Vec<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} WHERE unit_id = ?1 ORDER BY id ASC;"))?;
        let mut rows = stmt.query([unit_id])?;
        let mut words = Vec::new();
        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }
        Ok(words)
    }

    fn update_word(&self, word: &Word) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE words
             SET
                title = ?1,
                translation = ?2,
                topic = ?3,
                completed = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5 AND unit_id = ?6;",
            params![
                word.title,
                word.translation,
                word.topic,
                bool_to_int(word.completed),
                word.id,
                word.unit_id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word",
                id: word.id,
            });
        }
        Ok(())
    }

    fn delete_word(&self, unit_id: UnitId, word_id: WordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM words WHERE id = ?1 AND unit_id = ?2;",
            params![word_id, unit_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word",
                id: word_id,
            });
        }
        Ok(())
    }

    fn add_synonyms(&self, word_id: WordId, titles: &[String]) -> RepoResult<usize> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO word_synonyms (word_id, title) VALUES (?1, ?2);")?;
        let mut inserted = 0;
        for title in titles.iter().map(|title| title.trim()) {
            if title.is_empty() {
                continue;
            }
            stmt.execute(params![word_id, title])?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn list_synonyms(&self, word_id: WordId) -> RepoResult<Vec<WordSynonym>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, word_id, title FROM word_synonyms WHERE word_id = ?1 ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([word_id])?;
        let mut synonyms = Vec::new();
        while let Some(row) = rows.next()? {
            synonyms.push(WordSynonym {
                id: row.get("id")?,
                word_id: row.get("word_id")?,
                title: row.get("title")?,
            });
        }
        Ok(synonyms)
    }
}

fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    Ok(Word {
        id: row.get("id")?,
        unit_id: row.get("unit_id")?,
        title: row.get("title")?,
        translation: row.get("translation")?,
        topic: row.get("topic")?,
        completed: int_to_bool(row.get("completed")?, "words.completed")?,
    })
}
