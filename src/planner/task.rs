//! Task entity and its client-side filtering and ordering.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// TaskKind / Priority
// ============================================================================

/// Category a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum TaskKind {
    Work,
    Personal,
    Study,
    General,
    Other,
}

impl TaskKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Work => "Work",
            TaskKind::Personal => "Personal",
            TaskKind::Study => "Study",
            TaskKind::General => "General",
            TaskKind::Other => "Other",
        }
    }
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::General
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Returns the string representation of the priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

// ============================================================================
// TaskError
// ============================================================================

/// Validation errors raised at task creation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    /// Title is empty or whitespace
    #[error("task title must not be empty")]
    EmptyTitle,

    /// Title exceeds the length limit
    #[error("task title must be at most 100 characters")]
    TitleTooLong,

    /// A time string could not be parsed
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// End time is not strictly after the start time
    #[error("end time must be after start time")]
    EndNotAfterStart,
}

// ============================================================================
// Task
// ============================================================================

/// A single task, grouped by calendar date in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id, assigned at creation
    pub id: Uuid,
    /// Short title
    pub title: String,
    /// Category
    pub kind: TaskKind,
    /// Priority level
    pub priority: Priority,
    /// Start of the planned time window, "HH:MM"
    #[serde(rename = "startTime")]
    pub start_time: String,
    /// End of the planned time window, "HH:MM"
    #[serde(rename = "endTime")]
    pub end_time: String,
    /// Optional free-form description
    #[serde(default)]
    pub description: String,
    /// Completion flag, toggled by the user
    pub completed: bool,
    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<Utc>,
}

impl Task {
    /// Creates a new task, validating the title and time window.
    ///
    /// The end time must be strictly after the start time; this is
    /// enforced here, at input time, and never retroactively.
    pub fn new(
        title: impl Into<String>,
        kind: TaskKind,
        priority: Priority,
        start_time: &str,
        end_time: &str,
        description: impl Into<String>,
    ) -> Result<Self, TaskError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if title.chars().count() > 100 {
            return Err(TaskError::TitleTooLong);
        }

        let start = parse_clock(start_time)?;
        let end = parse_clock(end_time)?;
        if end <= start {
            return Err(TaskError::EndNotAfterStart);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            kind,
            priority,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            description: description.into(),
            completed: false,
            created_at: Utc::now(),
        })
    }

    /// True if the task matches a free-text search (title or description,
    /// case-insensitive).
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Parses an "HH:MM" clock string.
pub fn parse_clock(s: &str) -> Result<NaiveTime, TaskError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| TaskError::InvalidTime(s.to_string()))
}

/// Formats a calendar date as the store's grouping key ("YYYY-MM-DD").
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Filtering & ordering
// ============================================================================

/// Client-side task filter: by kind, priority, and free-text search.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub kind: Option<TaskKind>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

impl TaskFilter {
    /// True if the task passes every active criterion.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(kind) = self.kind {
            if task.kind != kind {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !task.matches_search(search) {
                return false;
            }
        }
        true
    }

    /// Applies the filter to a task list, preserving order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Sort order for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TaskOrder {
    /// By planned start time, earliest first
    Time,
    /// By creation timestamp, newest first
    Recent,
}

/// Sorts tasks in place according to the requested order.
pub fn sort_tasks(tasks: &mut [Task], order: TaskOrder) {
    match order {
        TaskOrder::Time => tasks.sort_by(|a, b| a.start_time.cmp(&b.start_time)),
        TaskOrder::Recent => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

// ============================================================================
// Tests
// ============================================================================
