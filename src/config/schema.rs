use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::{Track, default_tracks};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/accelerando/config.toml` or `~/.config/accelerando/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ACCELERANDO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub ramp: RampSettings,
    pub logging: LoggingSettings,
    /// The playlist, in play order.
    pub tracks: Vec<Track>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            ui: UiSettings::default(),
            controls: ControlsSettings::default(),
            ramp: RampSettings::default(),
            logging: LoggingSettings::default(),
            tracks: default_tracks(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Directory holding the audio files, relative to the asset root.
    pub audio_dir: String,
    /// Directory holding the cover art, relative to the asset root.
    pub art_dir: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            audio_dir: "songs".to_string(),
            art_dir: "albumart".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered as the title of the top box.
    pub header_text: String,
    /// Line shown under the current track title.
    pub subtitle: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " accelerando ".to_string(),
            subtitle: "Locally stored, free-to-use track".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seconds skipped by the left/right arrow keys.
    pub seek_seconds: f64,
    /// Event loop tick in milliseconds; also how often playback time is sampled.
    pub tick_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 10.0,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RampSettings {
    /// How much the playback rate grows between the start and the end of a track.
    ///
    /// `1.0` climbs from 1.00x to 2.00x; `0.0` disables the ramp.
    pub rate_increase_per_track: f64,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            rate_increase_per_track: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file. Nothing is logged when unset, since the terminal belongs to the UI.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `"accelerando=debug"`.
    /// `ACCELERANDO_LOG` takes precedence.
    pub filter: Option<String>,
}
