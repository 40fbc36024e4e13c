use std::path::Path;

use tracing::{debug, trace};

use super::backend::MediaBackend;
use super::ramp::{known_duration, playback_rate};
use super::types::{MediaEvent, PlayOutcome, PlayTicket, PlaybackError, PlaybackState};

/// Transport wrapper around one `MediaBackend`.
pub struct PlaybackEngine<B: MediaBackend> {
    backend: B,
    rate: f64,
    rate_increase: f64,
    icon: PlaybackState,
    pending_play: Option<PlayTicket>,
    next_ticket: u64,
}

impl<B: MediaBackend> PlaybackEngine<B> {
    pub fn new(backend: B, rate_increase: f64) -> Self {
        Self {
            backend,
            rate: 1.0,
            rate_increase,
            icon: PlaybackState::Paused,
            pending_play: None,
            next_ticket: 0,
        }
    }

    /// Bind `source` and reset the rate. Any in-flight play request is dropped.
    pub fn load(&mut self, source: &Path) {
        debug!(source = %source.display(), "loading source");
        self.pending_play = None;
        self.backend.load(source);
        self.rate = 1.0;
        self.backend.set_rate(1.0);
    }

    /// Ask the backend to start. The outcome arrives later as a settled ticket.
    pub fn play(&mut self) -> PlayTicket {
        self.next_ticket += 1;
        let ticket = PlayTicket(self.next_ticket);
        self.pending_play = Some(ticket);
        self.backend.play(ticket);
        ticket
    }

    /// Apply the resolution of a play request.
    ///
    /// Only the latest outstanding request may flip the icon; a rejection is
    /// swallowed and leaves everything as it was.
    pub fn settle(
        &mut self,
        ticket: PlayTicket,
        result: Result<(), PlaybackError>,
    ) -> PlayOutcome {
        if self.pending_play != Some(ticket) {
            trace!(?ticket, "ignoring stale play resolution");
            return PlayOutcome::Stale;
        }
        self.pending_play = None;

        match result {
            Ok(()) => {
                self.icon = PlaybackState::Playing;
                PlayOutcome::Started
            }
            Err(e) => {
                debug!(?ticket, error = %e, "play request rejected");
                PlayOutcome::Rejected
            }
        }
    }

    pub fn pause(&mut self) {
        self.pending_play = None;
        self.backend.pause();
        self.icon = PlaybackState::Paused;
    }

    /// Pause when playing, otherwise request playback.
    pub fn toggle_play(&mut self) -> Option<PlayTicket> {
        if self.backend.paused() {
            Some(self.play())
        } else {
            self.pause();
            None
        }
    }

    /// Seek to `time`, clamped into the track. No-op while the duration is unknown.
    pub fn seek_to(&mut self, time: f64) {
        let Some(duration) = known_duration(self.backend.duration()) else {
            return;
        };
        if time.is_nan() {
            return;
        }
        self.backend.seek(time.clamp(0.0, duration));
    }

    /// Move `delta` seconds relative to the current position.
    pub fn skip(&mut self, delta: f64) {
        if known_duration(self.backend.duration()).is_none() {
            return;
        }
        let target = self.backend.current_time() + delta;
        self.seek_to(target);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.backend.set_muted(muted);
    }

    pub fn toggle_muted(&mut self) {
        let muted = !self.backend.muted();
        self.set_muted(muted);
    }

    /// Recompute the rate from progress; left unchanged while the duration is unknown.
    pub fn on_time_advanced(&mut self) {
        let Some(rate) = playback_rate(
            self.backend.current_time(),
            self.backend.duration(),
            self.rate_increase,
        ) else {
            return;
        };
        if rate != self.rate {
            self.rate = rate;
            self.backend.set_rate(rate);
        }
    }

    pub fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.backend.poll_events()
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn rate_increase(&self) -> f64 {
        self.rate_increase
    }

    pub fn icon(&self) -> PlaybackState {
        self.icon
    }

    pub fn current_time(&self) -> f64 {
        self.backend.current_time()
    }

    pub fn duration(&self) -> Option<f64> {
        self.backend.duration()
    }

    pub fn paused(&self) -> bool {
        self.backend.paused()
    }

    pub fn muted(&self) -> bool {
        self.backend.muted()
    }

    #[cfg(test)]
    pub(crate) fn has_pending_play(&self) -> bool {
        self.pending_play.is_some()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
