//! On-demand summary and analytics aggregates.
//!
//! Everything here is a pure function of the stored collections; nothing is
//! cached or persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::session::{daily_focus, DailyFocus, FocusSession};
use super::task::{date_key, Priority, Task, TaskKind};

// ============================================================================
// Counts
// ============================================================================

/// Task counts per priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Task counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub work: usize,
    pub personal: usize,
    pub study: usize,
    pub general: usize,
    pub other: usize,
}

// ============================================================================
// TaskStats
// ============================================================================

/// Overall task statistics across every stored date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Total number of tasks
    pub total: usize,
    /// Number of completed tasks
    pub completed: usize,
    /// Distribution by priority
    pub by_priority: PriorityCounts,
    /// Distribution by kind
    pub by_kind: KindCounts,
}

impl TaskStats {
    /// Completion rate as a whole percentage; 0 when there are no tasks.
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed * 100 / self.total) as u32
    }
}

/// Computes overall task statistics from the per-date collection.
pub fn task_stats(tasks_by_date: &BTreeMap<String, Vec<Task>>) -> TaskStats {
    let mut stats = TaskStats::default();
    for tasks in tasks_by_date.values() {
        for task in tasks {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            }
            match task.priority {
                Priority::High => stats.by_priority.high += 1,
                Priority::Medium => stats.by_priority.medium += 1,
                Priority::Low => stats.by_priority.low += 1,
            }
            match task.kind {
                TaskKind::Work => stats.by_kind.work += 1,
                TaskKind::Personal => stats.by_kind.personal += 1,
                TaskKind::Study => stats.by_kind.study += 1,
                TaskKind::General => stats.by_kind.general += 1,
                TaskKind::Other => stats.by_kind.other += 1,
            }
        }
    }
    stats
}

// ============================================================================
// DailySummary
// ============================================================================

/// A single day's summary: task progress plus focus totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    /// Date key, "YYYY-MM-DD"
    pub date: String,
    /// Tasks planned for the day
    pub tasks_total: usize,
    /// Completed tasks for the day
    pub tasks_completed: usize,
    /// Focus totals for the day
    pub focus: DailyFocus,
}

/// Builds the summary for one calendar date.
pub fn daily_summary(
    tasks_by_date: &BTreeMap<String, Vec<Task>>,
    sessions: &[FocusSession],
    date: NaiveDate,
) -> DailySummary {
    let key = date_key(date);
    let tasks = tasks_by_date.get(&key).map(Vec::as_slice).unwrap_or(&[]);
    DailySummary {
        date: key,
        tasks_total: tasks.len(),
        tasks_completed: tasks.iter().filter(|t| t.completed).count(),
        focus: daily_focus(sessions, date),
    }
}

// ============================================================================
// Tests
// ============================================================================
