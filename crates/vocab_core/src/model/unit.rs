//! Vocabulary units.
//!
//! # Invariants
//! - `readability_index` and `diversity_index` are `None` until the first
//!   scoring run, and afterwards always describe the unit's current word set.
//! - `readability_index` stays `None` while the unit has no plain word.

use super::required_text;
use super::student::StudentId;
use super::ValidationError;
use serde::{Deserialize, Serialize};

pub type UnitId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    /// Student the unit is assigned to, if any.
    pub student_id: Option<StudentId>,
    pub readability_index: Option<f64>,
    pub diversity_index: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUnit {
    pub name: String,
    pub student_id: Option<StudentId>,
}

impl NewUnit {
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", &self.name)?,
            student_id: self.student_id,
        })
    }
}
