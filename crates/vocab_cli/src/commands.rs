//! Command tree for the `vocab` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vocab")]
#[command(about = "Manage teachers, students and scored vocabulary units", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Skip dictionary lookups; new words are stored without definitions
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Teacher accounts
    #[command(subcommand)]
    Teacher(TeacherCommands),

    /// Student accounts
    #[command(subcommand)]
    Student(StudentCommands),

    /// Vocabulary units
    #[command(subcommand)]
    Unit(UnitCommands),

    /// Words inside a unit
    #[command(subcommand)]
    Word(WordCommands),
}

#[derive(Subcommand)]
pub enum TeacherCommands {
    /// Create a teacher
    Add {
        #[arg(long)]
        login: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// List teachers
    List,
    /// Update a teacher
    Update {
        id: i64,
        #[command(flatten)]
        fields: AccountFields,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum StudentCommands {
    /// Create a student
    Add {
        #[arg(long)]
        login: String,
        #[arg(long)]
        full_name: String,
        /// Owning teacher id
        #[arg(long)]
        teacher: Option<i64>,
    },
    /// List students
    List {
        #[arg(long)]
        teacher: Option<i64>,
    },
    /// Update a student
    Update {
        id: i64,
        #[command(flatten)]
        fields: AccountFields,
    },
}

#[derive(Args)]
pub struct AccountFields {
    #[arg(long)]
    pub login: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Create a unit
    Add {
        #[arg(long)]
        name: String,
        /// Student the unit is assigned to
        #[arg(long)]
        student: Option<i64>,
    },
    /// List units
    List {
        #[arg(long)]
        student: Option<i64>,
    },
    /// Show one unit with its scores
    Show { id: i64 },
    /// Rename a unit
    Rename {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Recompute a unit's scores from its current words
    Rescore { id: i64 },
}

#[derive(Subcommand)]
pub enum WordCommands {
    /// Add an enriched word and rescore the unit
    Add {
        unit: i64,
        /// Title, with `_` marking syllable breaks
        title: String,
        #[arg(long)]
        topic: Option<String>,
    },
    /// List words of a unit
    List { unit: i64 },
    /// Show synonyms of a word
    Synonyms { unit: i64, word: i64 },
    /// Update a word and rescore the unit
    Update {
        unit: i64,
        word: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete a word and rescore the unit
    Delete { unit: i64, word: i64 },
    /// Import a `title[,topic]` CSV file and rescore the unit once
    Import { unit: i64, file: PathBuf },
}
