//! Audio-related small types.
//!
//! Events raised by a backend, the play request ticket and the error type
//! shared by every backend.

use std::path::PathBuf;

use thiserror::Error;

/// Which transport icon is showing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Identifies one `play()` request so its late resolution can be matched up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayTicket(pub u64);

/// What happened to a settled play request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started and the pause icon is showing.
    Started,
    /// The backend refused to start; nothing changed.
    Rejected,
    /// A newer play, a pause or a reload superseded this request.
    Stale,
}

#[derive(Debug)]
pub enum MediaEvent {
    /// Playback position moved.
    TimeAdvanced,
    /// The duration of the loaded source became known.
    MetadataLoaded,
    /// The loaded source played to its natural end.
    Ended,
    /// A play request resolved.
    PlaySettled {
        ticket: PlayTicket,
        result: Result<(), PlaybackError>,
    },
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no source loaded")]
    NoSource,

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("audio output unavailable: {0}")]
    Output(String),
}
