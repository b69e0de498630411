//! Core domain logic for the vocabulary unit backend.
//! This crate owns storage, word enrichment and unit scoring.

pub mod config;
pub mod db;
pub mod dictionary;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scoring;
pub mod service;

pub use config::{load_config, AppConfig, ConfigError, ConfigLoader, DictionaryConfig};
pub use dictionary::{
    DictionaryClient, DictionaryError, HttpDictionaryClient, OfflineDictionary, WordEntry,
};
pub use import::{parse_word_rows, ImportError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::student::{NewStudent, Student, StudentId, StudentPatch};
pub use model::teacher::{NewTeacher, Teacher, TeacherId, TeacherPatch};
pub use model::unit::{NewUnit, Unit, UnitId};
pub use model::word::{NewWord, Word, WordId, WordPatch, WordSynonym};
pub use model::ValidationError;
pub use repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
pub use repo::teacher_repo::{SqliteTeacherRepository, TeacherRepository};
pub use repo::unit_repo::{SqliteUnitRepository, UnitRepository};
pub use repo::word_repo::{SqliteWordRepository, WordRepository};
pub use repo::{RepoError, RepoResult};
pub use scoring::{
    compute_diversity_index, compute_readability_index, ScoringError, Titled, UnitScores,
};
pub use service::roster_service::RosterService;
pub use service::word_service::{
    recompute_unit_scores, ImportReport, WordChange, WordService, WordServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
