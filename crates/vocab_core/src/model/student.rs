//! Student accounts.

use super::required_text;
use super::teacher::TeacherId;
use super::ValidationError;
use serde::{Deserialize, Serialize};

pub type StudentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub login: String,
    pub full_name: String,
    pub is_active: bool,
    /// Owning teacher, if assigned.
    pub teacher_id: Option<TeacherId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub login: String,
    pub full_name: String,
    pub teacher_id: Option<TeacherId>,
}

impl NewStudent {
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            login: required_text("login", &self.login)?,
            full_name: required_text("full_name", &self.full_name)?,
            teacher_id: self.teacher_id,
        })
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub login: Option<String>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}

impl StudentPatch {
    pub fn apply_to(&self, current: &Student) -> Result<Student, ValidationError> {
        let mut next = current.clone();
        if let Some(login) = self.login.as_deref() {
            next.login = required_text("login", login)?;
        }
        if let Some(full_name) = self.full_name.as_deref() {
            next.full_name = required_text("full_name", full_name)?;
        }
        if let Some(is_active) = self.is_active {
            next.is_active = is_active;
        }
        Ok(next)
    }
}
