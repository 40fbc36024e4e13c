use std::path::Path;

use super::types::{MediaEvent, PlayTicket};

/// The media primitive the engine drives: one bound source at a time.
///
/// Times are in seconds. Play requests resolve asynchronously through a
/// `MediaEvent::PlaySettled` carrying the same ticket, delivered by a later
/// `poll_events` call.
pub trait MediaBackend {
    /// Bind `source`, dropping the previous one. Position restarts at zero.
    fn load(&mut self, source: &Path);

    fn play(&mut self, ticket: PlayTicket);

    fn pause(&mut self);

    fn seek(&mut self, position: f64);

    fn set_rate(&mut self, rate: f64);

    fn set_muted(&mut self, muted: bool);

    fn current_time(&self) -> f64;

    /// `None` until the source's metadata is known.
    fn duration(&self) -> Option<f64>;

    fn paused(&self) -> bool;

    fn muted(&self) -> bool;

    /// Drain events raised since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
