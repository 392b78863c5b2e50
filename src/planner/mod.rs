//! Planner domain model.
//!
//! This module contains the entities the planner manages and the pure
//! aggregation logic over them:
//! - `task`: per-date tasks with kind, priority and time window
//! - `note`: free-form notes with a palette color tag
//! - `session`: completed focus sessions and their daily totals
//! - `summary`: on-demand task statistics and daily summaries

pub mod note;
pub mod session;
pub mod summary;
pub mod task;

pub use note::{sort_notes, Note, NoteOrder};
pub use session::{daily_focus, focus_by_date, total_focus, DailyFocus, FocusSession};
pub use summary::{daily_summary, task_stats, DailySummary, KindCounts, PriorityCounts, TaskStats};
pub use task::{date_key, sort_tasks, Priority, Task, TaskError, TaskFilter, TaskKind, TaskOrder};
