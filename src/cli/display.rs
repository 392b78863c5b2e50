//! Display utilities for the dayplan CLI.
//!
//! This module provides formatted output for:
//! - Timer command confirmations and status
//! - Task and note listings
//! - Daily summary and statistics
//! - Error messages

use crate::planner::{focus_by_date, total_focus, DailySummary, FocusSession, Note, Task, TaskStats};
use crate::types::IpcResponse;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the confirmation for a timer command, with the remaining time
    /// when the daemon reported one.
    pub fn show_timer_response(response: &IpcResponse) {
        println!("{}", response.message);

        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                println!("  Remaining: {}:{:02}", minutes, seconds);
            }
        }
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        println!("Focus timer");
        println!("-----------");

        let Some(data) = &response.data else {
            println!("No status available");
            return;
        };

        let mode = data.mode.as_deref().unwrap_or("unknown");
        let mode_display = match mode {
            "focus" => "Focus",
            "short_break" => "Short break",
            "long_break" => "Long break",
            _ => mode,
        };
        println!("Mode: {}", mode_display);

        if let Some(remaining) = data.remaining_seconds {
            let (minutes, seconds) = Self::format_time(remaining);
            println!("Remaining: {}:{:02}", minutes, seconds);
        }
        if let Some(running) = data.is_running {
            println!("State: {}", if running { "running" } else { "paused" });
        }
        if let Some(enabled) = data.sound_enabled {
            println!("Chime: {}", if enabled { "on" } else { "off" });
        }

        if let (Some(total), Some(sessions)) = (data.today_focus_seconds, data.today_sessions) {
            let minutes = total / 60;
            println!(
                "Today: {} min across {} session{}",
                minutes,
                sessions,
                if sessions == 1 { "" } else { "s" }
            );
        }
    }

    /// Shows a task listing for one day.
    pub fn show_tasks(date: &str, tasks: &[Task]) {
        println!("Tasks for {}", date);

        if tasks.is_empty() {
            println!("  (none)");
            return;
        }

        for task in tasks {
            let mark = if task.completed { "x" } else { " " };
            println!(
                "  [{}] {}-{}  {}  ({}, {})",
                mark,
                task.start_time,
                task.end_time,
                task.title,
                task.kind.as_str(),
                task.priority.as_str()
            );
            if !task.description.is_empty() {
                println!("      {}", task.description);
            }
            println!("      id: {}", task.id);
        }
    }

    /// Shows a note listing.
    pub fn show_notes(notes: &[Note]) {
        if notes.is_empty() {
            println!("No notes");
            return;
        }

        for note in notes {
            println!("- {}", note.content);
            println!("  id: {}  created: {}", note.id, note.created_at.format("%Y-%m-%d %H:%M"));
        }
    }

    /// Shows the daily summary.
    pub fn show_summary(summary: &DailySummary) {
        println!("Summary for {}", summary.date);
        println!(
            "  Tasks: {}/{} completed",
            summary.tasks_completed, summary.tasks_total
        );
        println!(
            "  Focus: {} min across {} session{}",
            summary.focus.total_seconds / 60,
            summary.focus.session_count,
            if summary.focus.session_count == 1 {
                ""
            } else {
                "s"
            }
        );
    }

    /// Shows overall task statistics.
    pub fn show_stats(stats: &TaskStats) {
        println!("Task statistics");
        println!("  Total: {}", stats.total);
        println!(
            "  Completed: {} ({}%)",
            stats.completed,
            stats.completion_rate()
        );
        println!(
            "  By priority: {} high, {} medium, {} low",
            stats.by_priority.high, stats.by_priority.medium, stats.by_priority.low
        );
        println!(
            "  By kind: {} work, {} personal, {} study, {} general, {} other",
            stats.by_kind.work,
            stats.by_kind.personal,
            stats.by_kind.study,
            stats.by_kind.general,
            stats.by_kind.other
        );
    }

    /// Shows recorded focus totals, overall and per day.
    pub fn show_focus_stats(sessions: &[FocusSession]) {
        println!("Focus history");
        let overall = total_focus(sessions);
        println!(
            "  Total: {} min across {} session{}",
            overall.total_seconds / 60,
            overall.session_count,
            if overall.session_count == 1 { "" } else { "s" }
        );

        for (date, focus) in focus_by_date(sessions) {
            println!(
                "  {}: {} min ({} session{})",
                date,
                focus.total_seconds / 60,
                focus.session_count,
                if focus.session_count == 1 { "" } else { "s" }
            );
        }
    }

    /// Shows a sign-in greeting.
    pub fn show_login_success(username: &str) {
        println!("Signed in. Welcome, {}!", username);
    }

    /// Shows the sign-out confirmation.
    pub fn show_logout_success() {
        println!("Signed out");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
