//! Unit repository contract and SQLite implementation.
//!
//! # Invariants
//! - `rename_unit` never touches the score columns.
//! - `store_scores` is the only writer of `readability_index` and
//!   `diversity_index`.

use super::{row_exists, RepoError, RepoResult};
use crate::model::student::StudentId;
use crate::model::unit::{NewUnit, Unit, UnitId};
use crate::model::required_text;
use crate::scoring::UnitScores;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const UNIT_SELECT_SQL: &str =
    "SELECT id, name, student_id, readability_index, diversity_index FROM units";

pub trait UnitRepository {
    fn create_unit(&self, input: &NewUnit) -> RepoResult<Unit>;
    fn get_unit(&self, id: UnitId) -> RepoResult<Option<Unit>>;
    fn list_units(&self, student_id: Option<StudentId>) -> RepoResult<Vec<Unit>>;
    fn rename_unit(&self, id: UnitId, name: &str) -> RepoResult<()>;
    fn store_scores(&self, id: UnitId, scores: &UnitScores) -> RepoResult<()>;
    fn unit_exists(&self, id: UnitId) -> RepoResult<bool>;
}

pub struct SqliteUnitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUnitRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UnitRepository for SqliteUnitRepository<'_> {
    fn create_unit(&self, input: &NewUnit) -> RepoResult<Unit> {
        let input = input.normalized()?;
        if let Some(student_id) = input.student_id {
            if !row_exists(self.conn, "students", student_id)? {
                return Err(RepoError::NotFound {
                    entity: "student",
                    id: student_id,
                });
            }
        }

        self.conn.execute(
            "INSERT INTO units (name, student_id) VALUES (?1, ?2);",
            params![input.name, input.student_id],
        )?;

        Ok(Unit {
            id: self.conn.last_insert_rowid(),
            name: input.name,
            student_id: input.student_id,
            readability_index: None,
            diversity_index: None,
        })
    }

    fn get_unit(&self, id: UnitId) -> RepoResult<Option<Unit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{UNIT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_unit_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_units(&self, student_id: Option<StudentId>) -> RepoResult<Vec<Unit>> {
        let mut sql = format!("{UNIT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(student_id) = student_id {
            sql.push_str(" AND student_id = ?");
            bind_values.push(Value::Integer(student_id));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut units = Vec::new();
        while let Some(row) = rows.next()? {
            units.push(parse_unit_row(row)?);
        }
        Ok(units)
    }

    fn rename_unit(&self, id: UnitId, name: &str) -> RepoResult<()> {
        let name = required_text("name", name)?;
        let changed = self.conn.execute(
            "UPDATE units
             SET name = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![name, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "unit", id });
        }
        Ok(())
    }

    fn store_scores(&self, id: UnitId, scores: &UnitScores) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE units
             SET
                readability_index = ?1,
                diversity_index = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![scores.readability_index, scores.diversity_index, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "unit", id });
        }
        Ok(())
    }

    fn unit_exists(&self, id: UnitId) -> RepoResult<bool> {
        row_exists(self.conn, "units", id)
    }
}

fn parse_unit_row(row: &Row<'_>) -> RepoResult<Unit> {
    Ok(Unit {
        id: row.get("id")?,
        name: row.get("name")?,
        student_id: row.get("student_id")?,
        readability_index: row.get("readability_index")?,
        diversity_index: row.get("diversity_index")?,
    })
}
