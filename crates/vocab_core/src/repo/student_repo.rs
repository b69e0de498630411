//! Student repository contract and SQLite implementation.

use super::{bool_to_int, int_to_bool, login_conflict, row_exists, RepoError, RepoResult};
use crate::model::student::{NewStudent, Student, StudentId};
use crate::model::teacher::TeacherId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const STUDENT_SELECT_SQL: &str =
    "SELECT id, login, full_name, is_active, teacher_id FROM students";

/// Query options for listing students.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentListQuery {
    pub teacher_id: Option<TeacherId>,
    pub active_only: bool,
}

pub trait StudentRepository {
    fn create_student(&self, input: &NewStudent) -> RepoResult<Student>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn list_students(&self, query: &StudentListQuery) -> RepoResult<Vec<Student>>;
    fn update_student(&self, student: &Student) -> RepoResult<()>;
}

pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, input: &NewStudent) -> RepoResult<Student> {
        let input = input.normalized()?;
        if let Some(teacher_id) = input.teacher_id {
            if !row_exists(self.conn, "teachers", teacher_id)? {
                return Err(RepoError::NotFound {
                    entity: "teacher",
                    id: teacher_id,
                });
            }
        }

        self.conn
            .execute(
                "INSERT INTO students (login, full_name, teacher_id) VALUES (?1, ?2, ?3);",
                params![input.login, input.full_name, input.teacher_id],
            )
            .map_err(|err| login_conflict(err, &input.login))?;

        Ok(Student {
            id: self.conn.last_insert_rowid(),
            login: input.login,
            full_name: input.full_name,
            is_active: true,
            teacher_id: input.teacher_id,
        })
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_student_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_students(&self, query: &StudentListQuery) -> RepoResult<Vec<Student>> {
        let mut sql = format!("{STUDENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(teacher_id) = query.teacher_id {
            sql.push_str(" AND teacher_id = ?");
            bind_values.push(Value::Integer(teacher_id));
        }
        if query.active_only {
            sql.push_str(" AND is_active = 1");
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn update_student(&self, student: &Student) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE students
                 SET
                    login = ?1,
                    full_name = ?2,
                    is_active = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?4;",
                params![
                    student.login,
                    student.full_name,
                    bool_to_int(student.is_active),
                    student.id,
                ],
            )
            .map_err(|err| login_conflict(err, &student.login))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "student",
                id: student.id,
            });
        }
        Ok(())
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    Ok(Student {
        id: row.get("id")?,
        login: row.get("login")?,
        full_name: row.get("full_name")?,
        is_active: int_to_bool(row.get("is_active")?, "students.is_active")?,
        teacher_id: row.get("teacher_id")?,
    })
}
