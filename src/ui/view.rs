use crate::app::{App, fuzzy_match_positions};
use crate::audio::ramp::known_duration;
use crate::audio::{MediaBackend, PlaybackState};
use crate::config::UiSettings;

/// One playlist entry as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistRow {
    pub title: String,
    /// `"Playing"` for the current track, `"Ready"` otherwise.
    pub status: &'static str,
    pub current: bool,
}

/// The jump prompt as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptView {
    pub query: String,
    pub matches: usize,
    /// Title Enter would play, matched characters uppercased.
    pub best: Option<String>,
}

/// Everything the screen shows, recomputed from scratch on every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub header: String,
    pub title: String,
    pub subtitle: String,
    pub cover_art: String,
    pub cover_alt: String,
    pub playlist: Vec<PlaylistRow>,
    pub current_index: usize,
    pub progress_percent: f64,
    pub elapsed_label: String,
    pub duration_label: String,
    pub rate_label: String,
    pub play_icon_visible: bool,
    pub pause_icon_visible: bool,
    pub muted: bool,
    pub prompt: Option<PromptView>,
}

impl ViewModel {
    pub fn project<B: MediaBackend>(app: &App<B>, ui: &UiSettings) -> Self {
        let engine = app.engine();
        let track = app.current_track();
        let current_index = app.current_index();

        let playlist = app
            .catalog()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let current = i == current_index;
                PlaylistRow {
                    title: t.title.clone(),
                    status: if current { "Playing" } else { "Ready" },
                    current,
                }
            })
            .collect();

        let prompt = app.prompt().map(|p| {
            let matches = p.matches(app.catalog());
            let query = p.query.trim();
            PromptView {
                query: p.query.clone(),
                matches: matches.len(),
                best: matches.first().map(|&i| {
                    let title = &app.catalog().get(i).title;
                    match fuzzy_match_positions(title, query) {
                        Some(positions) => highlight_matches(title, &positions),
                        None => title.clone(),
                    }
                }),
            }
        });

        let playing = engine.icon() == PlaybackState::Playing;

        Self {
            header: ui.header_text.clone(),
            title: track.title.clone(),
            subtitle: ui.subtitle.clone(),
            cover_art: app.assets().art_path(track).display().to_string(),
            cover_alt: format!("{} cover art", track.title),
            playlist,
            current_index,
            progress_percent: progress_percent(engine.current_time(), engine.duration()),
            elapsed_label: format_time(engine.current_time()),
            duration_label: format_time(engine.duration().unwrap_or(f64::NAN)),
            rate_label: format_rate(engine.rate()),
            play_icon_visible: !playing,
            pause_icon_visible: playing,
            muted: engine.muted(),
            prompt,
        }
    }
}

/// Format seconds as `M:SS`. Non-finite and negative times render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// Uppercase the characters of `title` at `positions` (character indices, ascending).
pub fn highlight_matches(title: &str, positions: &[usize]) -> String {
    let mut rendered = String::with_capacity(title.len());
    let mut pos_iter = positions.iter().copied();
    let mut next_pos = pos_iter.next();

    for (ci, ch) in title.chars().enumerate() {
        if next_pos == Some(ci) {
            rendered.extend(ch.to_uppercase());
            next_pos = pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

/// Format a playback rate as `N.NNx`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}x", rate)
}

/// Fill percentage of the progress bar; `0` while the duration is unknown.
pub fn progress_percent(current_time: f64, duration: Option<f64>) -> f64 {
    match known_duration(duration) {
        Some(d) if current_time.is_finite() => (current_time / d * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}
