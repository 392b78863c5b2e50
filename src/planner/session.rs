//! Completed focus sessions and their on-demand aggregation.
//!
//! Sessions form an append-only log; aggregates are always recomputed by
//! summing over the stored collection, so they can never drift from it.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::date_key;

// ============================================================================
// FocusSession
// ============================================================================

/// One completed focus interval. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Unique id, assigned at creation
    pub id: Uuid,
    /// Length of the completed interval
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u32,
    /// Calendar date the session completed on, "YYYY-MM-DD"
    pub date: String,
    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FocusSession {
    /// Creates a session record for the given date.
    pub fn new(duration_seconds: u32, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            duration_seconds,
            date: date_key(date),
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Focus totals for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyFocus {
    /// Sum of session durations
    pub total_seconds: u64,
    /// Number of sessions
    pub session_count: u64,
}

/// Sums the sessions recorded on one calendar date.
pub fn daily_focus(sessions: &[FocusSession], date: NaiveDate) -> DailyFocus {
    let key = date_key(date);
    sessions
        .iter()
        .filter(|s| s.date == key)
        .fold(DailyFocus::default(), |acc, s| DailyFocus {
            total_seconds: acc.total_seconds + u64::from(s.duration_seconds),
            session_count: acc.session_count + 1,
        })
}

/// Groups all sessions into per-day totals, keyed by date string.
pub fn focus_by_date(sessions: &[FocusSession]) -> BTreeMap<String, DailyFocus> {
    let mut by_date: BTreeMap<String, DailyFocus> = BTreeMap::new();
    for session in sessions {
        let entry = by_date.entry(session.date.clone()).or_default();
        entry.total_seconds += u64::from(session.duration_seconds);
        entry.session_count += 1;
    }
    by_date
}

/// Sums all sessions ever recorded.
pub fn total_focus(sessions: &[FocusSession]) -> DailyFocus {
    sessions
        .iter()
        .fold(DailyFocus::default(), |acc, s| DailyFocus {
            total_seconds: acc.total_seconds + u64::from(s.duration_seconds),
            session_count: acc.session_count + 1,
        })
}

// ============================================================================
// Tests
// ============================================================================
