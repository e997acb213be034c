//! Audio-related small types.
//!
//! This module defines the command set accepted by the audio thread, the
//! notifications it emits back, and the error type for loading sources.

use thiserror::Error;

/// Identifies one binding of a url to the playback element.
pub type SourceId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Replace the current source. Stops whatever is playing.
    Load { source: SourceId, url: String },
    /// Start or resume playback of the current source.
    Play,
    /// Pause playback.
    Pause,
    /// Stop playback and exit the audio thread.
    Quit,
}

/// Something the playback element reports back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback actually started.
    Play,
    /// Playback actually paused (including at end of track).
    Pause,
    /// Current playback position in seconds.
    TimeUpdate(f64),
    /// Source metadata is known; carries the duration in seconds (NaN when unknown).
    LoadedMetadata(f64),
    /// The source played to its end.
    Ended,
    /// A play request could not be honoured.
    PlayRejected(String),
}

impl MediaEvent {
    /// Progress events are only delivered while a listener is subscribed.
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            MediaEvent::TimeUpdate(_) | MediaEvent::LoadedMetadata(_) | MediaEvent::Ended
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaNotification {
    pub source: SourceId,
    pub event: MediaEvent,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    #[error("failed to fetch source: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("source returned HTTP {0}")]
    Status(u16),

    #[error("failed to decode source: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
