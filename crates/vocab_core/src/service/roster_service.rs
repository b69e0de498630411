//! Teacher, student and unit use cases.
//!
//! # Invariants
//! - Updates use patch semantics: read, apply, validate, write.
//! - Unit scores are never part of a roster update.

use crate::model::student::{NewStudent, Student, StudentId, StudentPatch};
use crate::model::teacher::{NewTeacher, Teacher, TeacherId, TeacherPatch};
use crate::model::unit::{NewUnit, Unit, UnitId};
use crate::repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
use crate::repo::teacher_repo::{SqliteTeacherRepository, TeacherRepository};
use crate::repo::unit_repo::{SqliteUnitRepository, UnitRepository};
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::Connection;

pub struct RosterService<'conn> {
    teachers: SqliteTeacherRepository<'conn>,
    students: SqliteStudentRepository<'conn>,
    units: SqliteUnitRepository<'conn>,
}

impl<'conn> RosterService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            teachers: SqliteTeacherRepository::new(conn),
            students: SqliteStudentRepository::new(conn),
            units: SqliteUnitRepository::new(conn),
        }
    }

    pub fn create_teacher(&self, input: &NewTeacher) -> RepoResult<Teacher> {
        let teacher = self.teachers.create_teacher(input)?;
        info!(
            "event=teacher_create module=roster_service status=ok teacher_id={}",
            teacher.id
        );
        Ok(teacher)
    }

    pub fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>> {
        self.teachers.get_teacher(id)
    }

    pub fn list_teachers(&self) -> RepoResult<Vec<Teacher>> {
        self.teachers.list_teachers()
    }

    pub fn update_teacher(&self, id: TeacherId, patch: &TeacherPatch) -> RepoResult<Teacher> {
        let current = self
            .teachers
            .get_teacher(id)?
            .ok_or(RepoError::NotFound {
                entity: "teacher",
                id,
            })?;
        let next = patch.apply_to(&current)?;
        self.teachers.update_teacher(&next)?;
        Ok(next)
    }

    pub fn create_student(&self, input: &NewStudent) -> RepoResult<Student> {
        let student = self.students.create_student(input)?;
        info!(
            "event=student_create module=roster_service status=ok student_id={}",
            student.id
        );
        Ok(student)
    }

    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.students.get_student(id)
    }

    /// Lists students, optionally only those owned by `teacher_id`.
    pub fn list_students(&self, teacher_id: Option<TeacherId>) -> RepoResult<Vec<Student>> {
        self.students.list_students(&StudentListQuery {
            teacher_id,
            ..StudentListQuery::default()
        })
    }

    pub fn update_student(&self, id: StudentId, patch: &StudentPatch) -> RepoResult<Student> {
        let current = self
            .students
            .get_student(id)?
            .ok_or(RepoError::NotFound {
                entity: "student",
                id,
            })?;
        let next = patch.apply_to(&current)?;
        self.students.update_student(&next)?;
        Ok(next)
    }

    pub fn create_unit(&self, input: &NewUnit) -> RepoResult<Unit> {
        let unit = self.units.create_unit(input)?;
        info!(
            "event=unit_create module=roster_service status=ok unit_id={}",
            unit.id
        );
        Ok(unit)
    }

    pub fn get_unit(&self, id: UnitId) -> RepoResult<Option<Unit>> {
        self.units.get_unit(id)
    }

    pub fn list_units(&self, student_id: Option<StudentId>) -> RepoResult<Vec<Unit>> {
        self.units.list_units(student_id)
    }

    pub fn rename_unit(&self, id: UnitId, name: &str) -> RepoResult<Unit> {
        self.units.rename_unit(id, name)?;
        self.units
            .get_unit(id)?
            .ok_or(RepoError::NotFound { entity: "unit", id })
    }
}
