//! Note entity with a palette-derived color tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed palette of color tags a note can carry.
///
/// The tag is presentation metadata only; it is assigned at creation and
/// never changes, even when the content is edited.
pub const COLOR_TAGS: &[&str] = &[
    "yellow", "blue", "green", "pink", "purple", "indigo", "orange", "red", "teal", "lime",
    "fuchsia", "gray", "cyan", "amber", "emerald", "rose",
];

// ============================================================================
// Note
// ============================================================================

/// A free-form note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique id, assigned at creation
    pub id: Uuid,
    /// Note body
    pub content: String,
    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Set on every edit; absent for never-edited notes
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Palette color tag
    #[serde(rename = "colorTag")]
    pub color_tag: String,
}

impl Note {
    /// Creates a new note with a color tag derived from its id.
    pub fn new(content: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let color_tag = COLOR_TAGS[id.as_bytes()[0] as usize % COLOR_TAGS.len()].to_string();
        Self {
            id,
            content: content.into(),
            created_at: Utc::now(),
            updated_at: None,
            color_tag,
        }
    }

    /// Replaces the content and stamps the edit time.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = Some(Utc::now());
    }

    /// True if the content matches a free-text search (case-insensitive).
    pub fn matches_search(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NoteOrder {
    /// Most recently created first
    Newest,
    /// Oldest first
    Oldest,
}

/// Sorts notes in place by creation time.
pub fn sort_notes(notes: &mut [Note], order: NoteOrder) {
    match order {
        NoteOrder::Newest => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        NoteOrder::Oldest => notes.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

// ============================================================================
// Tests
// ============================================================================
