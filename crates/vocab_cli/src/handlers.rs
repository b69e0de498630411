//! Command handlers.
//!
//! Each handler runs one core use case and prints its result.

use crate::commands::{
    AccountFields, StudentCommands, TeacherCommands, UnitCommands, WordCommands,
};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use serde_json::json;
use vocab_core::{
    DictionaryClient, NewStudent, NewTeacher, NewUnit, NewWord, OfflineDictionary, RosterService, Student,
    StudentPatch, Teacher, TeacherPatch, Unit, UnitScores, Word, WordPatch, WordService,
};

/// Output mode selected by `--json`.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn emit(&self, value: serde_json::Value, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

pub fn teacher(conn: &Connection, command: TeacherCommands, out: Output) -> Result<()> {
    let roster = RosterService::new(conn);
    match command {
        TeacherCommands::Add {
            login,
            full_name,
            email,
        } => {
            let teacher = roster.create_teacher(&NewTeacher {
                login,
                full_name,
                email,
            })?;
            out.emit(json!(teacher), || teacher_line(&teacher))
        }
        TeacherCommands::List => {
            let teachers = roster.list_teachers()?;
            out.emit(json!(teachers), || {
                join_lines(teachers.iter().map(teacher_line))
            })
        }
        TeacherCommands::Update { id, fields, email } => {
            let AccountFields {
                login,
                full_name,
                active,
            } = fields;
            let teacher = roster.update_teacher(
                id,
                &TeacherPatch {
                    login,
                    full_name,
                    email,
                    is_active: active,
                },
            )?;
            out.emit(json!(teacher), || teacher_line(&teacher))
        }
    }
}

pub fn student(conn: &Connection, command: StudentCommands, out: Output) -> Result<()> {
    let roster = RosterService::new(conn);
    match command {
        StudentCommands::Add {
            login,
            full_name,
            teacher,
        } => {
            let student = roster.create_student(&NewStudent {
                login,
                full_name,
                teacher_id: teacher,
            })?;
            out.emit(json!(student), || student_line(&student))
        }
        StudentCommands::List { teacher } => {
            let students = roster.list_students(teacher)?;
            out.emit(json!(students), || {
                join_lines(students.iter().map(student_line))
            })
        }
        StudentCommands::Update { id, fields } => {
            let student = roster.update_student(
                id,
                &StudentPatch {
                    login: fields.login,
                    full_name: fields.full_name,
                    is_active: fields.active,
                },
            )?;
            out.emit(json!(student), || student_line(&student))
        }
    }
}

pub fn unit(conn: &mut Connection, command: UnitCommands, out: Output) -> Result<()> {
    match command {
        UnitCommands::Add { name, student } => {
            let unit = RosterService::new(conn).create_unit(&NewUnit {
                name,
                student_id: student,
            })?;
            out.emit(json!(unit), || unit_line(&unit))
        }
        UnitCommands::List { student } => {
            let units = RosterService::new(conn).list_units(student)?;
            out.emit(json!(units), || join_lines(units.iter().map(unit_line)))
        }
        UnitCommands::Show { id } => {
            let unit = RosterService::new(conn)
                .get_unit(id)?
                .ok_or_else(|| anyhow!("unit not found: {id}"))?;
            out.emit(json!(unit), || unit_line(&unit))
        }
        UnitCommands::Rename { id, name } => {
            let unit = RosterService::new(conn).rename_unit(id, &name)?;
            out.emit(json!(unit), || unit_line(&unit))
        }
        UnitCommands::Rescore { id } => {
            // Rescoring reads no dictionary data.
            let scores = WordService::new(conn, OfflineDictionary).rescore(id)?;
            out.emit(json!(scores), || scores_line(&scores))
        }
    }
}

pub fn word<D: DictionaryClient>(
    conn: &mut Connection,
    dictionary: D,
    command: WordCommands,
    out: Output,
) -> Result<()> {
    let mut service = WordService::new(conn, dictionary);
    match command {
        WordCommands::Add { unit, title, topic } => {
            let input = NewWord { title, topic };
            let change = service.add_word(unit, &input)?;
            out.emit(json!({ "word": change.word, "scores": change.scores }), || {
                format!("{}\n{}", word_line(&change.word), scores_line(&change.scores))
            })
        }
        WordCommands::List { unit } => {
            let words = service.list_words(unit)?;
            out.emit(json!(words), || join_lines(words.iter().map(word_line)))
        }
        WordCommands::Synonyms { unit, word } => {
            let synonyms = service.list_synonyms(unit, word)?;
            out.emit(json!(synonyms), || {
                join_lines(synonyms.iter().map(|synonym| synonym.title.clone()))
            })
        }
        WordCommands::Update {
            unit,
            word,
            title,
            translation,
            topic,
            completed,
        } => {
            let patch = WordPatch {
                title,
                translation,
                topic,
                completed,
            };
            let change = service.update_word(unit, word, &patch)?;
            out.emit(json!({ "word": change.word, "scores": change.scores }), || {
                format!("{}\n{}", word_line(&change.word), scores_line(&change.scores))
            })
        }
        WordCommands::Delete { unit, word } => {
            let change = service.delete_word(unit, word)?;
            out.emit(json!({ "deleted": change.word.id, "scores": change.scores }), || {
                format!("deleted word {}\n{}", change.word.id, scores_line(&change.scores))
            })
        }
        WordCommands::Import { unit, file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let report = service.import_words(unit, &contents)?;
            out.emit(
                json!({
                    "imported": report.imported,
                    "skipped": report.skipped,
                    "scores": report.scores,
                }),
                || {
                    let mut text = format!("imported {} word(s)", report.imported.len());
                    if !report.skipped.is_empty() {
                        text.push_str(&format!("\nskipped: {}", report.skipped.join(", ")));
                    }
                    text.push('\n');
                    text.push_str(&scores_line(&report.scores));
                    text
                },
            )
        }
    }
}

fn join_lines(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

fn teacher_line(teacher: &Teacher) -> String {
    format!(
        "#{} {} ({}){}{}",
        teacher.id,
        teacher.login,
        teacher.full_name,
        teacher
            .email
            .as_deref()
            .map(|email| format!(" <{email}>"))
            .unwrap_or_default(),
        if teacher.is_active { "" } else { " [inactive]" }
    )
}

fn student_line(student: &Student) -> String {
    format!(
        "#{} {} ({}){}{}",
        student.id,
        student.login,
        student.full_name,
        student
            .teacher_id
            .map(|id| format!(" teacher=#{id}"))
            .unwrap_or_default(),
        if student.is_active { "" } else { " [inactive]" }
    )
}

fn unit_line(unit: &Unit) -> String {
    format!(
        "#{} {} readability={} diversity={}",
        unit.id,
        unit.name,
        format_score(unit.readability_index),
        format_score(unit.diversity_index)
    )
}

fn word_line(word: &Word) -> String {
    format!(
        "#{} {}{}{}: {}",
        word.id,
        word.title,
        word.topic
            .as_deref()
            .map(|topic| format!(" [{topic}]"))
            .unwrap_or_default(),
        if word.completed { " [done]" } else { "" },
        word.translation.as_deref().unwrap_or("-")
    )
}

fn scores_line(scores: &UnitScores) -> String {
    format!(
        "readability={} diversity={}",
        format_score(scores.readability_index),
        format_score(Some(scores.diversity_index))
    )
}

fn format_score(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| format!("{value:.3}"))
}
