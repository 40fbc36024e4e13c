use std::path::{Path, PathBuf};

use crate::config::PlayerSettings;

use super::model::Track;

/// Resolves track file references against the static asset directories.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
    audio_dir: PathBuf,
    art_dir: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>, settings: &PlayerSettings) -> Self {
        Self {
            root: root.into(),
            audio_dir: PathBuf::from(&settings.audio_dir),
            art_dir: PathBuf::from(&settings.art_dir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{audio_dir}/{track.file}`
    pub fn audio_path(&self, track: &Track) -> PathBuf {
        self.root.join(&self.audio_dir).join(&track.file)
    }

    /// `{root}/{art_dir}/{track.art}`
    pub fn art_path(&self, track: &Track) -> PathBuf {
        self.root.join(&self.art_dir).join(&track.art)
    }
}
