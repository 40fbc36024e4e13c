//! Application model: `App`, the transport controller.
//!
//! The `App` struct holds the catalog, the playback engine and the current
//! track index. Every user intent and every engine event goes through it.

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::audio::{MediaBackend, MediaEvent, PlayTicket, PlaybackEngine};
use crate::catalog::{AssetPaths, Catalog, Track};
use crate::config::Settings;

use super::input::{Intent, intent_for_key};
use super::prompt::{JumpPrompt, PromptAction};

/// Whether the event loop should keep going after handling input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The main application model.
pub struct App<B: MediaBackend> {
    catalog: Catalog,
    assets: AssetPaths,
    engine: PlaybackEngine<B>,
    current: usize,
    seek_seconds: f64,
    prompt: Option<JumpPrompt>,
}

impl<B: MediaBackend> App<B> {
    /// Create the controller and load the first track (without playing it).
    pub fn new(catalog: Catalog, assets: AssetPaths, backend: B, settings: &Settings) -> Self {
        let engine = PlaybackEngine::new(backend, settings.ramp.rate_increase_per_track);
        let mut app = Self {
            catalog,
            assets,
            engine,
            current: 0,
            seek_seconds: settings.controls.seek_seconds,
            prompt: None,
        };
        app.load_track(0);
        app
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    pub fn engine(&self) -> &PlaybackEngine<B> {
        &self.engine
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &Track {
        self.catalog.get(self.current)
    }

    /// The jump prompt, when it has focus.
    pub fn prompt(&self) -> Option<&JumpPrompt> {
        self.prompt.as_ref()
    }

    /// Bind the engine to the track at `index` (wrapped into the catalog).
    pub fn load_track(&mut self, index: isize) {
        self.current = self.catalog.normalize(index);
        let track = self.catalog.get(self.current);
        let path = self.assets.audio_path(track);
        info!(index = self.current, title = %track.title, "loading track");
        self.engine.load(&path);
    }

    pub fn play(&mut self) -> PlayTicket {
        self.engine.play()
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn toggle_play(&mut self) {
        self.engine.toggle_play();
    }

    pub fn toggle_muted(&mut self) {
        self.engine.toggle_muted();
    }

    pub fn skip(&mut self, delta: f64) {
        self.engine.skip(delta);
    }

    pub fn seek_to(&mut self, position: f64) {
        self.engine.seek_to(position);
    }

    pub fn next(&mut self) {
        self.load_track(self.current as isize + 1);
        self.play();
    }

    pub fn previous(&mut self) {
        self.load_track(self.current as isize - 1);
        self.play();
    }

    /// Load and play the clicked playlist entry, restarting it if it is current.
    pub fn playlist_item_selected(&mut self, index: usize) {
        self.load_track(index as isize);
        self.play();
    }

    /// Seek to the clicked fraction of the progress bar.
    ///
    /// `offset` is the click position from the bar's left edge and `width`
    /// the bar's extent, in the same unit.
    pub fn progress_bar_clicked(&mut self, offset: f64, width: f64) {
        let Some(duration) = crate::audio::ramp::known_duration(self.engine.duration()) else {
            return;
        };
        if width <= 0.0 {
            return;
        }
        let ratio = offset / width;
        self.engine.seek_to(ratio * duration);
    }

    pub fn apply(&mut self, intent: Intent) -> Flow {
        debug!(?intent, "applying intent");
        match intent {
            Intent::TogglePlay => self.toggle_play(),
            Intent::Play => {
                if self.engine.paused() {
                    self.play();
                }
            }
            Intent::Pause => {
                if !self.engine.paused() {
                    self.pause();
                }
            }
            Intent::ToggleMute => self.toggle_muted(),
            Intent::SkipForward => self.skip(self.seek_seconds),
            Intent::SkipBackward => self.skip(-self.seek_seconds),
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::OpenJump => self.prompt = Some(JumpPrompt::new()),
            Intent::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Route a key press: to the prompt when it has focus, else to the transport.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        if let Some(prompt) = self.prompt.as_mut() {
            match prompt.handle_key(key, &self.catalog) {
                PromptAction::Editing => {}
                PromptAction::Cancel => self.prompt = None,
                PromptAction::Select(index) => {
                    self.prompt = None;
                    self.playlist_item_selected(index);
                }
            }
            return Flow::Continue;
        }

        match intent_for_key(key) {
            Some(intent) => self.apply(intent),
            None => Flow::Continue,
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeAdvanced => self.engine.on_time_advanced(),
            MediaEvent::MetadataLoaded => {
                debug!(duration = ?self.engine.duration(), "metadata loaded");
            }
            MediaEvent::Ended => self.next(),
            MediaEvent::PlaySettled { ticket, result } => {
                self.engine.settle(ticket, result);
            }
        }
    }

    /// Drain and dispatch pending engine events. Returns whether any arrived.
    pub fn pump_events(&mut self) -> bool {
        let events = self.engine.poll_events();
        let any = !events.is_empty();
        for event in events {
            self.handle_media_event(event);
        }
        any
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        self.engine.backend_mut()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        self.engine.backend()
    }
}
