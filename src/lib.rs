//! dayplan library
//!
//! This library provides the core functionality for the dayplan CLI.
//! It includes:
//! - Timer engine for focus intervals and breaks
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Task, note, and focus-session domain logic with summaries
//! - Flat JSON store shared by the CLI and the daemon
//! - Sign-in boundary behind the IdentityProvider trait
//! - Chime playback for completed intervals

pub mod auth;
pub mod cli;
pub mod daemon;
pub mod planner;
pub mod sound;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    IpcRequest, IpcResponse, ResponseData, SetParams, TimerDurations, TimerMode, TimerState,
};

// Re-export auth types
pub use auth::{AuthError, Credentials, IdentityProvider, MockIdentityProvider, SessionContext};

// Re-export planner types
pub use planner::{
    daily_summary, task_stats, DailySummary, FocusSession, Note, Priority, Task, TaskKind,
    TaskStats,
};

// Re-export store types
pub use store::{JsonStore, NoteRepository, SessionLog, StoreError, TaskRepository};

// Re-export sound types
pub use sound::{create_player, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer};
