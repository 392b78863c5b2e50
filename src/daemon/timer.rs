//! Timer engine for the focus timer.
//!
//! This module provides the core timer behavior:
//! - Mode transitions (Focus → ShortBreak, breaks → Focus)
//! - One-second countdown driven by the daemon's ticker task
//! - Event firing for session recording and the completion chime
//! - Completion always stops the countdown; the user resumes manually

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::types::{SetParams, TimerDurations, TimerMode, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for session recording and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Mode being counted down
        mode: TimerMode,
    },
    /// Countdown paused
    Paused,
    /// Countdown reset to the full configured duration
    Reset,
    /// Mode switched by the user
    ModeChanged {
        /// New mode
        mode: TimerMode,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// A focus interval ran to completion
    FocusCompleted {
        /// Configured focus duration at completion time
        duration_seconds: u32,
    },
    /// A break interval ran to completion
    BreakCompleted {
        /// Which break finished
        mode: TimerMode,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state and emits events.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new engine with the given durations and event channel.
    pub fn new(durations: TimerDurations, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(durations),
            event_tx,
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Called once per second by the daemon's ticker task while it holds
    /// the engine lock. No-op when the timer is not running.
    pub fn tick_once(&mut self) -> Result<()> {
        if !self.state.is_running {
            return Ok(());
        }

        let completed = self.state.tick();

        self.event_tx
            .send(TimerEvent::Tick {
                remaining_seconds: self.state.remaining_seconds,
            })
            .context("Failed to send tick event")?;

        if completed {
            self.handle_interval_complete()?;
        }

        Ok(())
    }

    /// Handles interval completion (mode transitions).
    ///
    /// Exactly one completion event fires per natural completion. Mode
    /// switches and resets never reach this path.
    fn handle_interval_complete(&mut self) -> Result<()> {
        let finished = self.state.mode;

        match finished {
            TimerMode::Focus => {
                // The session length is the configured focus duration, not
                // wall-clock time spent across pauses.
                let duration_seconds = self.state.durations.focus_seconds;

                self.event_tx
                    .send(TimerEvent::FocusCompleted { duration_seconds })
                    .context("Failed to send focus completed event")?;
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => {
                self.event_tx
                    .send(TimerEvent::BreakCompleted { mode: finished })
                    .context("Failed to send break completed event")?;
            }
        }

        // Enter the next mode stopped; the user resumes manually.
        self.state.advance();

        Ok(())
    }

    /// Starts or resumes the countdown. Idempotent: starting a running
    /// timer is a no-op and fires no event.
    pub fn start(&mut self) -> Result<()> {
        if self.state.is_running {
            return Ok(());
        }

        self.state.start();

        self.event_tx
            .send(TimerEvent::Started {
                mode: self.state.mode,
            })
            .context("Failed to send started event")?;

        Ok(())
    }

    /// Pauses the countdown, freezing the remaining time. Idempotent:
    /// pausing an idle timer is a no-op and fires no event.
    pub fn pause(&mut self) -> Result<()> {
        if !self.state.is_running {
            return Ok(());
        }

        self.state.pause();

        self.event_tx
            .send(TimerEvent::Paused)
            .context("Failed to send paused event")?;

        Ok(())
    }

    /// Stops the countdown and restores the full duration for the current
    /// mode.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset();

        self.event_tx
            .send(TimerEvent::Reset)
            .context("Failed to send reset event")?;

        Ok(())
    }

    /// Switches to a new mode. Always stops the countdown, even when
    /// switching to the mode already active.
    pub fn change_mode(&mut self, mode: TimerMode) -> Result<()> {
        self.state.change_mode(mode);

        self.event_tx
            .send(TimerEvent::ModeChanged { mode })
            .context("Failed to send mode changed event")?;

        Ok(())
    }

    /// Applies duration overrides after validating the resulting table.
    ///
    /// All overrides are applied atomically: an invalid combination leaves
    /// the current durations untouched.
    pub fn set_durations(&mut self, params: &SetParams) -> Result<()> {
        let mut durations = self.state.durations.clone();
        if let Some(minutes) = params.focus_minutes {
            durations.set(TimerMode::Focus, minutes * 60);
        }
        if let Some(minutes) = params.short_break_minutes {
            durations.set(TimerMode::ShortBreak, minutes * 60);
        }
        if let Some(minutes) = params.long_break_minutes {
            durations.set(TimerMode::LongBreak, minutes * 60);
        }

        if let Err(message) = durations.validate() {
            anyhow::bail!(message);
        }

        // Only touch the modes actually overridden, so an untouched mode's
        // frozen countdown survives.
        if params.focus_minutes.is_some() {
            self.state.set_duration(TimerMode::Focus, durations.get(TimerMode::Focus));
        }
        if params.short_break_minutes.is_some() {
            self.state.set_duration(TimerMode::ShortBreak, durations.get(TimerMode::ShortBreak));
        }
        if params.long_break_minutes.is_some() {
            self.state.set_duration(TimerMode::LongBreak, durations.get(TimerMode::LongBreak));
        }

        Ok(())
    }

    /// Toggles the audible completion cue.
    pub fn set_sound(&mut self, enabled: bool) {
        self.state.sound_enabled = enabled;
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
