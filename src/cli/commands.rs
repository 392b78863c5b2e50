//! Command definitions for the dayplan CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::planner::{NoteOrder, Priority, TaskKind, TaskOrder};
use crate::types::TimerMode;

// ============================================================================
// CLI Structure
// ============================================================================

/// dayplan - a daily planner with a focus timer
#[derive(Parser, Debug)]
#[command(
    name = "dayplan",
    version,
    about = "Daily planner CLI with a focus timer",
    long_about = "Plan your day from the terminal: a focus timer with short and long\n\
                  breaks, per-day task lists, quick notes, and a daily summary.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start or resume the focus timer
    Start,

    /// Pause the focus timer
    Pause,

    /// Reset the current countdown to its full duration
    Reset,

    /// Switch the timer mode
    Mode {
        /// Target mode
        #[arg(value_enum)]
        mode: TimerMode,
    },

    /// Show the current timer status
    Status,

    /// Configure timer durations
    Set(SetArgs),

    /// Enable or disable the completion chime
    Sound {
        /// Desired chime state
        #[arg(value_enum)]
        state: SoundState,
    },

    /// Manage tasks for a day
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Manage quick notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Show the summary for one day
    Summary {
        /// Date to summarize (YYYY-MM-DD, defaults to today)
        #[arg(value_parser = validate_date)]
        date: Option<String>,
    },

    /// Show overall task statistics
    Stats,

    /// Sign in
    Login {
        /// Email address
        email: String,

        /// Display name shown in greetings
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Sign out and stop the timer
    Logout,

    /// Run as daemon (background service)
    #[command(hide = true)]
    Daemon {
        /// Disable the completion chime
        #[arg(long)]
        no_sound: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Chime state for the sound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SoundState {
    /// Play a chime on completion
    On,
    /// Stay silent
    Off,
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Arguments for the set command
#[derive(Args, Debug, Clone, Default)]
pub struct SetArgs {
    /// Focus duration in minutes (1-120)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub focus: Option<u32>,

    /// Short break duration in minutes (1-60)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub short_break: Option<u32>,

    /// Long break duration in minutes (1-60)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: Option<u32>,
}

// ============================================================================
// Task Subcommands
// ============================================================================

/// Task management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommands {
    /// Add a task to a day's plan
    Add(TaskAddArgs),

    /// List the tasks planned for a day
    List(TaskListArgs),

    /// Toggle a task's completion state
    Done {
        /// Task id
        id: String,

        /// Date the task is planned for (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = validate_date)]
        date: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,

        /// Date the task is planned for (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = validate_date)]
        date: Option<String>,
    },
}

/// Arguments for the task add command
#[derive(Args, Debug, Clone)]
pub struct TaskAddArgs {
    /// Task title (1-100 characters)
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Start time (HH:MM)
    #[arg(short = 't', long, value_parser = validate_clock)]
    pub start: String,

    /// End time (HH:MM, must be after start)
    #[arg(short, long, value_parser = validate_clock)]
    pub end: String,

    /// Task category
    #[arg(short, long, value_enum, default_value = "general")]
    pub kind: TaskKind,

    /// Task priority
    #[arg(short, long, value_enum, default_value = "medium")]
    pub priority: Priority,

    /// Free-form description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Date to plan the task for (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = validate_date)]
    pub date: Option<String>,
}

/// Arguments for the task list command
#[derive(Args, Debug, Clone)]
pub struct TaskListArgs {
    /// Date to list (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = validate_date)]
    pub date: Option<String>,

    /// Only show tasks of this category
    #[arg(short, long, value_enum)]
    pub kind: Option<TaskKind>,

    /// Only show tasks of this priority
    #[arg(short, long, value_enum)]
    pub priority: Option<Priority>,

    /// Only show tasks whose title or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(short, long, value_enum, default_value = "time")]
    pub order: TaskOrder,
}

// ============================================================================
// Note Subcommands
// ============================================================================

/// Note management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum NoteCommands {
    /// Add a quick note
    Add {
        /// Note content
        #[arg(value_parser = validate_content)]
        content: String,
    },

    /// List notes
    List {
        /// Only show notes containing this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(short, long, value_enum, default_value = "newest")]
        order: NoteOrder,
    },

    /// Replace a note's content
    Edit {
        /// Note id
        id: String,

        /// New content
        #[arg(value_parser = validate_content)]
        content: String,
    },

    /// Delete a note
    Delete {
        /// Note id
        id: String,
    },
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates a task title.
///
/// - Must not be empty
/// - Must not exceed 100 characters
fn validate_title(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("title must not be empty".to_string());
    }
    if s.chars().count() > 100 {
        return Err("title must be at most 100 characters".to_string());
    }
    Ok(s.to_string())
}

/// Validates note content (must not be blank).
fn validate_content(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("content must not be empty".to_string());
    }
    Ok(s.to_string())
}

/// Validates a clock time in HH:MM form.
fn validate_clock(s: &str) -> Result<String, String> {
    chrono::NaiveTime::parse_from_str(s, "%H:%M")
        .map(|_| s.to_string())
        .map_err(|_| format!("invalid time '{}', expected HH:MM", s))
}

/// Validates a calendar date in YYYY-MM-DD form.
fn validate_date(s: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|_| s.to_string())
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

// ============================================================================
// Tests
// ============================================================================
