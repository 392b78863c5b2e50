//! Sound playback error types.

use thiserror::Error;

/// Errors raised by the audio layer.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device could be opened.
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The output stream rejected a new sink.
    #[error("Audio stream error: {0}")]
    StreamError(String),

    /// Playback failed after the stream was set up.
    #[error("Playback failed: {0}")]
    PlaybackError(String),
}
