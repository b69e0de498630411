//! Teacher accounts.

use super::{optional_text, required_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type TeacherId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    /// Unique sign-in name.
    pub login: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_active: bool,
}

/// Input for creating a teacher. New teachers start active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTeacher {
    pub login: String,
    pub full_name: String,
    pub email: Option<String>,
}

impl NewTeacher {
    /// Returns a trimmed copy, or the first validation failure.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            login: required_text("login", &self.login)?,
            full_name: required_text("full_name", &self.full_name)?,
            email: normalize_email(self.email.as_deref())?,
        })
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherPatch {
    pub login: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl TeacherPatch {
    /// Applies this patch on top of `current` and validates the result.
    pub fn apply_to(&self, current: &Teacher) -> Result<Teacher, ValidationError> {
        let mut next = current.clone();
        if let Some(login) = self.login.as_deref() {
            next.login = required_text("login", login)?;
        }
        if let Some(full_name) = self.full_name.as_deref() {
            next.full_name = required_text("full_name", full_name)?;
        }
        if self.email.is_some() {
            next.email = normalize_email(self.email.as_deref())?;
        }
        if let Some(is_active) = self.is_active {
            next.is_active = is_active;
        }
        Ok(next)
    }
}

fn normalize_email(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(email) = optional_text(value) else {
        return Ok(None);
    };
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(Some(email)),
        _ => Err(ValidationError::InvalidEmail(email)),
    }
}
