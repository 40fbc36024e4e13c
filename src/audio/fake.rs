//! Scripted `MediaBackend` for tests.
//!
//! Plays nothing; tests move time, deliver metadata and decide how play
//! requests resolve.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::backend::MediaBackend;
use super::types::{MediaEvent, PlayTicket, PlaybackError};

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub loaded: Vec<PathBuf>,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub paused: bool,
    pub muted: bool,
    pub rate: f64,
    pub play_requests: Vec<PlayTicket>,
    /// Settle play requests on the next poll instead of waiting for `settle`.
    pub auto_settle: bool,
    /// Whether automatically settled requests are rejected.
    pub reject_play: bool,
    pub seeks: Vec<f64>,
    pending: Vec<PlayTicket>,
    events: VecDeque<MediaEvent>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            paused: true,
            rate: 1.0,
            auto_settle: true,
            ..Self::default()
        }
    }

    /// Like a media element with no user gesture yet: every play is refused.
    pub fn rejecting() -> Self {
        Self {
            reject_play: true,
            ..Self::new()
        }
    }

    /// Play requests stay pending until `settle` is called.
    pub fn manual() -> Self {
        Self {
            auto_settle: false,
            ..Self::new()
        }
    }

    pub fn load_metadata(&mut self, duration: f64) {
        self.duration = Some(duration);
        self.events.push_back(MediaEvent::MetadataLoaded);
    }

    pub fn advance_to(&mut self, time: f64) {
        self.current_time = time;
        self.events.push_back(MediaEvent::TimeAdvanced);
    }

    pub fn finish(&mut self) {
        if let Some(d) = self.duration {
            self.current_time = d;
        }
        self.paused = true;
        self.events.push_back(MediaEvent::Ended);
    }

    /// Resolve an outstanding play request.
    pub fn settle(&mut self, ticket: PlayTicket, ok: bool) {
        self.pending.retain(|t| *t != ticket);
        let result = if ok {
            self.paused = false;
            Ok(())
        } else {
            Err(PlaybackError::Output("playback not allowed".to_string()))
        };
        self.events
            .push_back(MediaEvent::PlaySettled { ticket, result });
    }

    pub fn pending(&self) -> &[PlayTicket] {
        &self.pending
    }
}

impl MediaBackend for FakeBackend {
    fn load(&mut self, source: &Path) {
        self.loaded.push(source.to_path_buf());
        self.current_time = 0.0;
        self.duration = None;
        self.paused = true;
        self.pending.clear();
        self.events.clear();
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.play_requests.push(ticket);
        if self.auto_settle {
            let ok = !self.reject_play;
            self.settle(ticket, ok);
        } else {
            self.pending.push(ticket);
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn seek(&mut self, position: f64) {
        self.seeks.push(position);
        self.current_time = position;
        self.events.push_back(MediaEvent::TimeAdvanced);
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }
}
