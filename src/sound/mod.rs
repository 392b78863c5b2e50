//! Audible cue for completed timer intervals.
//!
//! The daemon plays a short chime when an interval finishes. Playback is
//! best-effort: on machines without an audio device the daemon keeps
//! running with a silent player and logs a warning.

mod error;
mod player;

use std::sync::Arc;

use tracing::warn;

pub use error::SoundError;
pub use player::RodioSoundPlayer;

/// Trait for chime playback implementations.
///
/// Abstracts the audio layer so the daemon can run with a real player,
/// a silent fallback, or a mock in tests.
pub trait SoundPlayer {
    /// Plays the completion chime. Non-blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play_chime(&self) -> Result<(), SoundError>;

    /// Returns true if playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables playback.
    fn enable(&self);

    /// Disables playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play_chime(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::play_chime(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    chime_count: std::sync::atomic::AtomicUsize,
    disabled: std::sync::atomic::AtomicBool,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of chimes actually played (disabled calls do not count).
    #[must_use]
    pub fn chime_count(&self) -> usize {
        self.chime_count.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play_chime(&self) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(std::sync::atomic::Ordering::SeqCst) {
            return Ok(());
        }
        self.chime_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

/// Creates a sound player, falling back to a silent one when no audio
/// device is available.
///
/// The fallback keeps the daemon functional on headless machines; a
/// warning is logged so the missing chime is explained.
#[must_use]
pub fn create_player(disabled: bool) -> Arc<dyn SoundPlayer + Send + Sync> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Arc::new(player),
        Err(e) => {
            warn!("Audio not available, chime disabled: {}", e);
            let silent = MockSoundPlayer::new();
            silent.disable();
            Arc::new(silent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts_chimes() {
        let player = MockSoundPlayer::new();
        player.play_chime().unwrap();
        player.play_chime().unwrap();
        assert_eq!(player.chime_count(), 2);
    }

    #[test]
    fn test_mock_disabled_skips_count() {
        let player = MockSoundPlayer::new();
        player.disable();
        player.play_chime().unwrap();
        assert_eq!(player.chime_count(), 0);
        assert!(player.is_disabled());
    }

    #[test]
    fn test_mock_failure() {
        let player = MockSoundPlayer::new();
        player.set_should_fail(true);
        assert!(player.play_chime().is_err());
    }

    #[test]
    fn test_create_player_never_panics() {
        // Returns a silent fallback in environments without audio.
        let player = create_player(true);
        assert!(player.play_chime().is_ok());
    }
}
