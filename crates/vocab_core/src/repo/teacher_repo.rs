//! Teacher repository contract and SQLite implementation.

use super::{bool_to_int, int_to_bool, login_conflict, RepoError, RepoResult};
use crate::model::teacher::{NewTeacher, Teacher, TeacherId};
use rusqlite::{params, Connection, Row};

const TEACHER_SELECT_SQL: &str = "SELECT id, login, full_name, email, is_active FROM teachers";

pub trait TeacherRepository {
    fn create_teacher(&self, input: &NewTeacher) -> RepoResult<Teacher>;
    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>>;
    fn list_teachers(&self) -> RepoResult<Vec<Teacher>>;
    /// Overwrites every mutable column of an existing teacher.
    fn update_teacher(&self, teacher: &Teacher) -> RepoResult<()>;
}

pub struct SqliteTeacherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeacherRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TeacherRepository for SqliteTeacherRepository<'_> {
    fn create_teacher(&self, input: &NewTeacher) -> RepoResult<Teacher> {
        let input = input.normalized()?;
        self.conn
            .execute(
                "INSERT INTO teachers (login, full_name, email) VALUES (?1, ?2, ?3);",
                params![input.login, input.full_name, input.email],
            )
            .map_err(|err| login_conflict(err, &input.login))?;

        Ok(Teacher {
            id: self.conn.last_insert_rowid(),
            login: input.login,
            full_name: input.full_name,
            email: input.email,
            is_active: true,
        })
    }

    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_teacher_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_teachers(&self) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut teachers = Vec::new();
        while let Some(row) = rows.next()? {
            teachers.push(parse_teacher_row(row)?);
        }
        Ok(teachers)
    }

    fn update_teacher(&self, teacher: &Teacher) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE teachers
                 SET
                    login = ?1,
                    full_name = ?2,
                    email = ?3,
                    is_active = ?4,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?5;",
                params![
                    teacher.login,
                    teacher.full_name,
                    teacher.email,
                    bool_to_int(teacher.is_active),
                    teacher.id,
                ],
            )
            .map_err(|err| login_conflict(err, &teacher.login))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "teacher",
                id: teacher.id,
            });
        }
        Ok(())
    }
}

fn parse_teacher_row(row: &Row<'_>) -> RepoResult<Teacher> {
    Ok(Teacher {
        id: row.get("id")?,
        login: row.get("login")?,
        full_name: row.get("full_name")?,
        email: row.get("email")?,
        is_active: int_to_bool(row.get("is_active")?, "teachers.is_active")?,
    })
}
