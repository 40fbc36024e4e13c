use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One playable item, as listed in the `[[tracks]]` config array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Track {
    pub title: String,
    /// Audio file name, relative to the audio directory.
    pub file: String,
    /// Cover art file name, relative to the art directory.
    pub art: String,
}

impl Track {
    pub fn new(title: &str, file: &str, art: &str) -> Self {
        Self {
            title: title.to_string(),
            file: file.to_string(),
            art: art.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("the track catalog is empty; add at least one [[tracks]] entry")]
    Empty,
}

/// Ordered, immutable list of tracks. Never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, failing when `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { tracks })
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    /// Wrap any index (negative or past the end) into `0..count()`.
    pub fn normalize(&self, index: isize) -> usize {
        index.rem_euclid(self.tracks.len() as isize) as usize
    }

    /// Track at `index`, wrapping out-of-range indices.
    pub fn get(&self, index: usize) -> &Track {
        &self.tracks[index % self.tracks.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

/// The bundled playlist used when no `[[tracks]]` are configured.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("Aidan", "Aidan.mp3", "Aidan.jpg"),
        Track::new("Autumn Sun", "autumn_sun.mp3", "autumn_sun.png"),
        Track::new(
            "Better Days",
            "Better Days - LAKEY INSPIRED.mp3",
            "Better Days.jpg",
        ),
        Track::new("Polarity", "Polarity.mp3", "Polarity.jpg"),
        Track::new("Best Part of Me (Cover)", "best_part_of_me.mp3", "BestPart.jpg"),
        Track::new(
            "I Can't Make You Love Me (Cover)",
            "i_cant_make_you_love_me_cover.mp3",
            "i_cant_make_you_love_me_cover.jpeg",
        ),
        Track::new("Just Relax", "just_relax.mp3", "justRelax_img.jpeg"),
        Track::new(
            "Paranormal is Real",
            "paranormal-is-real-leonell-cassio.mp3",
            "paranormal_real_500.jpg",
        ),
    ]
}
