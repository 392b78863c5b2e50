//! Core data types for the dayplan timer.
//!
//! This module defines the data structures used for:
//! - Timer state management (mode, countdown, run flag)
//! - Per-mode duration configuration with validation
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerMode
// ============================================================================

/// The timer's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Concentrated work interval
    Focus,
    /// Short break between focus intervals
    ShortBreak,
    /// Longer break, entered manually
    LongBreak,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Returns the mode entered after this one completes naturally.
    ///
    /// Breaks always hand back to focus; a completed focus interval leads
    /// into a short break. Long breaks are only reachable by a manual
    /// mode switch.
    pub fn next(&self) -> TimerMode {
        match self {
            TimerMode::Focus => TimerMode::ShortBreak,
            TimerMode::ShortBreak => TimerMode::Focus,
            TimerMode::LongBreak => TimerMode::Focus,
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Focus
    }
}

// ============================================================================
// TimerDurations
// ============================================================================

/// Configured countdown length per mode, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDurations {
    /// Focus interval length (60-7200 seconds)
    pub focus_seconds: u32,
    /// Short break length (60-3600 seconds)
    pub short_break_seconds: u32,
    /// Long break length (60-3600 seconds)
    pub long_break_seconds: u32,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            focus_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
        }
    }
}

impl TimerDurations {
    /// Returns the configured duration for the given mode.
    pub fn get(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_seconds,
            TimerMode::ShortBreak => self.short_break_seconds,
            TimerMode::LongBreak => self.long_break_seconds,
        }
    }

    /// Sets the configured duration for the given mode.
    pub fn set(&mut self, mode: TimerMode, seconds: u32) {
        match mode {
            TimerMode::Focus => self.focus_seconds = seconds,
            TimerMode::ShortBreak => self.short_break_seconds = seconds,
            TimerMode::LongBreak => self.long_break_seconds = seconds,
        }
    }

    /// Validates the configured durations.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.focus_seconds < 60 || self.focus_seconds > 120 * 60 {
            return Err("focus duration must be between 1 and 120 minutes".to_string());
        }
        if self.short_break_seconds < 60 || self.short_break_seconds > 60 * 60 {
            return Err("short break duration must be between 1 and 60 minutes".to_string());
        }
        if self.long_break_seconds < 60 || self.long_break_seconds > 60 * 60 {
            return Err("long break duration must be between 1 and 60 minutes".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The full state of the focus timer.
///
/// `is_running` is orthogonal to the mode: pausing freezes the countdown
/// without leaving the current mode. The state is owned by the daemon and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    /// Active mode
    pub mode: TimerMode,
    /// Seconds left in the current interval
    pub remaining_seconds: u32,
    /// Whether the countdown is ticking
    pub is_running: bool,
    /// Configured duration per mode
    pub durations: TimerDurations,
    /// Whether the completion chime is enabled
    pub sound_enabled: bool,
}

impl TimerState {
    /// Creates a new state: focus mode, full countdown, not running.
    pub fn new(durations: TimerDurations) -> Self {
        let remaining_seconds = durations.get(TimerMode::Focus);
        Self {
            mode: TimerMode::Focus,
            remaining_seconds,
            is_running: false,
            durations,
            sound_enabled: true,
        }
    }

    /// Starts the countdown. No-op if already running.
    pub fn start(&mut self) {
        self.is_running = true;
    }

    /// Pauses the countdown, freezing the remaining time. No-op if not
    /// running.
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Stops the countdown and restores the full configured duration for
    /// the current mode.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_seconds = self.durations.get(self.mode);
    }

    /// Switches to a new mode. Always stops the countdown; a manual mode
    /// switch never auto-continues.
    pub fn change_mode(&mut self, mode: TimerMode) {
        self.is_running = false;
        self.mode = mode;
        self.remaining_seconds = self.durations.get(mode);
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the interval has completed (reached 0).
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Applies the natural completion transition: enter the next mode with
    /// its full duration, stopped. The user must manually resume.
    pub fn advance(&mut self) {
        let next = self.mode.next();
        self.mode = next;
        self.remaining_seconds = self.durations.get(next);
        self.is_running = false;
    }

    /// Updates the configured duration for one mode.
    ///
    /// If that mode is active and the timer is idle, the remaining time is
    /// updated immediately; otherwise only future activations are affected.
    pub fn set_duration(&mut self, mode: TimerMode, seconds: u32) {
        self.durations.set(mode, seconds);
        if mode == self.mode && !self.is_running {
            self.remaining_seconds = seconds;
        }
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// Duration overrides for the set command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetParams {
    /// Focus duration in minutes
    #[serde(rename = "focusMinutes", skip_serializing_if = "Option::is_none")]
    pub focus_minutes: Option<u32>,
    /// Short break duration in minutes
    #[serde(rename = "shortBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub short_break_minutes: Option<u32>,
    /// Long break duration in minutes
    #[serde(rename = "longBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<u32>,
}

impl SetParams {
    /// Returns true if no override is present.
    pub fn is_empty(&self) -> bool {
        self.focus_minutes.is_none()
            && self.short_break_minutes.is_none()
            && self.long_break_minutes.is_none()
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum IpcRequest {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop and restore the full duration of the current mode
    Reset,
    /// Switch to a different mode
    Mode {
        /// Target mode
        mode: TimerMode,
    },
    /// Update configured durations
    Set {
        /// Duration overrides
        #[serde(flatten)]
        params: SetParams,
    },
    /// Enable or disable the completion chime
    Sound {
        /// Desired chime state
        enabled: bool,
    },
    /// Query the current timer state
    Status,
    /// End the session: stop the timer and clear the session keys
    Logout,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    /// Active mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Run flag
    #[serde(rename = "isRunning", skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    /// Chime state
    #[serde(rename = "soundEnabled", skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    /// Total focus seconds recorded today
    #[serde(rename = "todayFocusSeconds", skip_serializing_if = "Option::is_none")]
    pub today_focus_seconds: Option<u64>,
    /// Number of sessions recorded today
    #[serde(rename = "todaySessions", skip_serializing_if = "Option::is_none")]
    pub today_sessions: Option<u64>,
}

impl ResponseData {
    /// Creates response data from timer state.
    pub fn from_timer_state(state: &TimerState) -> Self {
        Self {
            mode: Some(state.mode.as_str().to_string()),
            remaining_seconds: Some(state.remaining_seconds),
            is_running: Some(state.is_running),
            sound_enabled: Some(state.sound_enabled),
            today_focus_seconds: None,
            today_sessions: None,
        }
    }

    /// Attaches today's focus totals.
    pub fn with_today(mut self, total_seconds: u64, sessions: u64) -> Self {
        self.today_focus_seconds = Some(total_seconds);
        self.today_sessions = Some(sessions);
        self
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // TimerMode Tests
    // ------------------------------------------------------------------------

    mod timer_mode_tests {
        use super::*;

        #[test]
        fn test_default_is_focus() {
            assert_eq!(TimerMode::default(), TimerMode::Focus);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(TimerMode::Focus.as_str(), "focus");
            assert_eq!(TimerMode::ShortBreak.as_str(), "short_break");
            assert_eq!(TimerMode::LongBreak.as_str(), "long_break");
        }

        #[test]
        fn test_transition_policy() {
            assert_eq!(TimerMode::Focus.next(), TimerMode::ShortBreak);
            assert_eq!(TimerMode::ShortBreak.next(), TimerMode::Focus);
            assert_eq!(TimerMode::LongBreak.next(), TimerMode::Focus);
        }

        #[test]
        fn test_serialize_deserialize() {
            let mode = TimerMode::ShortBreak;
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, "\"short_break\"");

            let deserialized: TimerMode = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, TimerMode::ShortBreak);
        }
    }

    // ------------------------------------------------------------------------
    // TimerDurations Tests
    // ------------------------------------------------------------------------

    mod timer_durations_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let durations = TimerDurations::default();
            assert_eq!(durations.focus_seconds, 25 * 60);
            assert_eq!(durations.short_break_seconds, 5 * 60);
            assert_eq!(durations.long_break_seconds, 15 * 60);
        }

        #[test]
        fn test_get_per_mode() {
            let durations = TimerDurations::default();
            assert_eq!(durations.get(TimerMode::Focus), 25 * 60);
            assert_eq!(durations.get(TimerMode::ShortBreak), 5 * 60);
            assert_eq!(durations.get(TimerMode::LongBreak), 15 * 60);
        }

        #[test]
        fn test_set_per_mode() {
            let mut durations = TimerDurations::default();
            durations.set(TimerMode::Focus, 30 * 60);
            durations.set(TimerMode::ShortBreak, 10 * 60);
            durations.set(TimerMode::LongBreak, 20 * 60);

            assert_eq!(durations.focus_seconds, 30 * 60);
            assert_eq!(durations.short_break_seconds, 10 * 60);
            assert_eq!(durations.long_break_seconds, 20 * 60);
        }

        #[test]
        fn test_validate_success() {
            assert!(TimerDurations::default().validate().is_ok());
        }

        #[test]
        fn test_validate_boundary_values() {
            let durations = TimerDurations {
                focus_seconds: 60,
                short_break_seconds: 60,
                long_break_seconds: 60,
            };
            assert!(durations.validate().is_ok());

            let durations = TimerDurations {
                focus_seconds: 120 * 60,
                short_break_seconds: 60 * 60,
                long_break_seconds: 60 * 60,
            };
            assert!(durations.validate().is_ok());
        }

        #[test]
        fn test_validate_focus_too_low() {
            let durations = TimerDurations {
                focus_seconds: 59,
                ..Default::default()
            };
            assert!(durations.validate().is_err());
        }

        #[test]
        fn test_validate_focus_too_high() {
            let durations = TimerDurations {
                focus_seconds: 120 * 60 + 1,
                ..Default::default()
            };
            assert!(durations.validate().is_err());
        }

        #[test]
        fn test_validate_break_out_of_range() {
            let durations = TimerDurations {
                short_break_seconds: 0,
                ..Default::default()
            };
            assert!(durations.validate().is_err());

            let durations = TimerDurations {
                long_break_seconds: 60 * 60 + 1,
                ..Default::default()
            };
            assert!(durations.validate().is_err());
        }

        #[test]
        fn test_serialize_deserialize() {
            let durations = TimerDurations {
                focus_seconds: 1800,
                short_break_seconds: 600,
                long_break_seconds: 1200,
            };

            let json = serde_json::to_string(&durations).unwrap();
            let deserialized: TimerDurations = serde_json::from_str(&json).unwrap();
            assert_eq!(durations, deserialized);
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let state = TimerState::new(TimerDurations::default());

            assert_eq!(state.mode, TimerMode::Focus);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert!(!state.is_running);
            assert!(state.sound_enabled);
        }

        #[test]
        fn test_start_and_pause() {
            let mut state = TimerState::new(TimerDurations::default());

            state.start();
            assert!(state.is_running);

            state.pause();
            assert!(!state.is_running);
            assert_eq!(state.remaining_seconds, 25 * 60);
        }

        #[test]
        fn test_start_is_idempotent() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            let before = state.clone();

            state.start();

            assert_eq!(state.remaining_seconds, before.remaining_seconds);
            assert_eq!(state.mode, before.mode);
            assert!(state.is_running);
        }

        #[test]
        fn test_pause_is_idempotent() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 100;
            state.pause();

            state.pause();

            assert!(!state.is_running);
            assert_eq!(state.remaining_seconds, 100);
        }

        #[test]
        fn test_reset_restores_full_duration() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 42;

            state.reset();

            assert!(!state.is_running);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert_eq!(state.mode, TimerMode::Focus);
        }

        #[test]
        fn test_change_mode_stops_timer() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();

            state.change_mode(TimerMode::LongBreak);

            assert!(!state.is_running);
            assert_eq!(state.mode, TimerMode::LongBreak);
            assert_eq!(state.remaining_seconds, 15 * 60);
        }

        #[test]
        fn test_change_mode_same_mode_resets() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 10;

            state.change_mode(TimerMode::Focus);

            assert!(!state.is_running);
            assert_eq!(state.remaining_seconds, 25 * 60);
        }

        #[test]
        fn test_tick() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 2;

            assert!(!state.tick());
            assert_eq!(state.remaining_seconds, 1);

            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_tick_at_zero_stays_at_zero() {
            let mut state = TimerState::new(TimerDurations::default());
            state.remaining_seconds = 0;

            assert!(state.tick());
            assert_eq!(state.remaining_seconds, 0);
        }

        #[test]
        fn test_advance_from_focus() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 0;

            state.advance();

            assert_eq!(state.mode, TimerMode::ShortBreak);
            assert_eq!(state.remaining_seconds, 5 * 60);
            assert!(!state.is_running);
        }

        #[test]
        fn test_advance_from_breaks() {
            let mut state = TimerState::new(TimerDurations::default());

            state.change_mode(TimerMode::ShortBreak);
            state.advance();
            assert_eq!(state.mode, TimerMode::Focus);
            assert!(!state.is_running);

            state.change_mode(TimerMode::LongBreak);
            state.advance();
            assert_eq!(state.mode, TimerMode::Focus);
            assert_eq!(state.remaining_seconds, 25 * 60);
        }

        #[test]
        fn test_set_duration_active_mode_idle() {
            let mut state = TimerState::new(TimerDurations::default());

            state.set_duration(TimerMode::Focus, 30 * 60);

            assert_eq!(state.durations.focus_seconds, 30 * 60);
            assert_eq!(state.remaining_seconds, 30 * 60);
        }

        #[test]
        fn test_set_duration_active_mode_running_defers() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 1000;

            state.set_duration(TimerMode::Focus, 30 * 60);

            assert_eq!(state.durations.focus_seconds, 30 * 60);
            // Running countdown is untouched; only future activations change.
            assert_eq!(state.remaining_seconds, 1000);
        }

        #[test]
        fn test_set_duration_other_mode_defers() {
            let mut state = TimerState::new(TimerDurations::default());

            state.set_duration(TimerMode::ShortBreak, 10 * 60);

            assert_eq!(state.remaining_seconds, 25 * 60);
            state.change_mode(TimerMode::ShortBreak);
            assert_eq!(state.remaining_seconds, 10 * 60);
        }

        #[test]
        fn test_remaining_stays_in_range_under_op_sequences() {
            let mut state = TimerState::new(TimerDurations::default());
            let bound = |s: &TimerState| s.remaining_seconds <= s.durations.get(s.mode);

            state.start();
            assert!(bound(&state));
            for _ in 0..100 {
                state.tick();
                assert!(bound(&state));
            }
            state.pause();
            assert!(bound(&state));
            state.change_mode(TimerMode::ShortBreak);
            assert!(bound(&state));
            state.reset();
            assert!(bound(&state));
            state.change_mode(TimerMode::LongBreak);
            assert!(bound(&state));
        }

        #[test]
        fn test_serialize_deserialize() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 1234;

            let json = serde_json::to_string(&state).unwrap();
            let deserialized: TimerState = serde_json::from_str(&json).unwrap();

            assert_eq!(deserialized.mode, TimerMode::Focus);
            assert_eq!(deserialized.remaining_seconds, 1234);
            assert!(deserialized.is_running);
        }
    }

    // ------------------------------------------------------------------------
    // IPC Types Tests
    // ------------------------------------------------------------------------

    mod ipc_tests {
        use super::*;

        #[test]
        fn test_set_params_is_empty() {
            assert!(SetParams::default().is_empty());
            assert!(!SetParams {
                focus_minutes: Some(30),
                ..Default::default()
            }
            .is_empty());
        }

        #[test]
        fn test_request_start_serialize() {
            let json = serde_json::to_string(&IpcRequest::Start).unwrap();
            assert_eq!(json, r#"{"command":"start"}"#);
        }

        #[test]
        fn test_request_mode_serialize() {
            let request = IpcRequest::Mode {
                mode: TimerMode::ShortBreak,
            };
            let json = serde_json::to_string(&request).unwrap();
            assert_eq!(json, r#"{"command":"mode","mode":"short_break"}"#);
        }

        #[test]
        fn test_request_set_serialize() {
            let request = IpcRequest::Set {
                params: SetParams {
                    focus_minutes: Some(30),
                    short_break_minutes: Some(10),
                    long_break_minutes: None,
                },
            };
            let json = serde_json::to_string(&request).unwrap();
            assert!(json.contains("\"command\":\"set\""));
            assert!(json.contains("\"focusMinutes\":30"));
            assert!(json.contains("\"shortBreakMinutes\":10"));
            assert!(!json.contains("longBreakMinutes"));
        }

        #[test]
        fn test_request_set_deserialize() {
            let json = r#"{"command":"set","focusMinutes":45}"#;
            let request: IpcRequest = serde_json::from_str(json).unwrap();
            match request {
                IpcRequest::Set { params } => {
                    assert_eq!(params.focus_minutes, Some(45));
                    assert!(params.short_break_minutes.is_none());
                }
                _ => panic!("Expected Set request"),
            }
        }

        #[test]
        fn test_request_sound_round_trip() {
            let json = r#"{"command":"sound","enabled":false}"#;
            let request: IpcRequest = serde_json::from_str(json).unwrap();
            assert!(matches!(request, IpcRequest::Sound { enabled: false }));
        }

        #[test]
        fn test_request_all_commands_deserialize() {
            let commands = vec![
                r#"{"command":"start"}"#,
                r#"{"command":"pause"}"#,
                r#"{"command":"reset"}"#,
                r#"{"command":"mode","mode":"focus"}"#,
                r#"{"command":"set"}"#,
                r#"{"command":"sound","enabled":true}"#,
                r#"{"command":"status"}"#,
                r#"{"command":"logout"}"#,
            ];
            for json in commands {
                let parsed: Result<IpcRequest, _> = serde_json::from_str(json);
                assert!(parsed.is_ok(), "failed to parse: {}", json);
            }
        }

        #[test]
        fn test_response_data_from_timer_state() {
            let mut state = TimerState::new(TimerDurations::default());
            state.start();
            state.remaining_seconds = 1200;

            let data = ResponseData::from_timer_state(&state);

            assert_eq!(data.mode, Some("focus".to_string()));
            assert_eq!(data.remaining_seconds, Some(1200));
            assert_eq!(data.is_running, Some(true));
            assert_eq!(data.sound_enabled, Some(true));
            assert!(data.today_focus_seconds.is_none());
        }

        #[test]
        fn test_response_data_with_today() {
            let state = TimerState::new(TimerDurations::default());
            let data = ResponseData::from_timer_state(&state).with_today(1500, 2);

            assert_eq!(data.today_focus_seconds, Some(1500));
            assert_eq!(data.today_sessions, Some(2));
        }

        #[test]
        fn test_response_success_and_error() {
            let response = IpcResponse::success("Timer started", None);
            assert_eq!(response.status, "success");
            assert_eq!(response.message, "Timer started");
            assert!(response.data.is_none());

            let response = IpcResponse::error("not signed in");
            assert_eq!(response.status, "error");
            assert_eq!(response.message, "not signed in");
        }

        #[test]
        fn test_response_serialize_skips_absent_fields() {
            let response = IpcResponse::success(
                "OK",
                Some(ResponseData {
                    mode: Some("focus".to_string()),
                    remaining_seconds: Some(1500),
                    is_running: Some(false),
                    sound_enabled: None,
                    today_focus_seconds: None,
                    today_sessions: None,
                }),
            );

            let json = serde_json::to_string(&response).unwrap();
            assert!(json.contains("\"remainingSeconds\":1500"));
            assert!(!json.contains("todayFocusSeconds"));
            assert!(!json.contains("soundEnabled"));
        }
    }
}
