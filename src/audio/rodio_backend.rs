use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::backend::MediaBackend;
use super::sink::{create_sink_at, probe_duration};
use super::types::{MediaEvent, PlayTicket, PlaybackError};

/// Position bookkeeping for the current sink, independent of the device.
///
/// A sink starts its source at the position it was built for. `Sink::get_pos`
/// counts output time, which runs faster than source time while the speed is
/// raised, so source time is integrated across rate changes.
#[derive(Debug)]
pub(super) struct Timeline {
    duration: Option<f64>,
    rate: f64,
    // Source seconds reached when the sink had played `anchor_played`.
    anchor_source: f64,
    anchor_played: Duration,
    last_reported: Option<f64>,
    ended: bool,
}

impl Timeline {
    pub(super) fn new(duration: Option<f64>, rate: f64) -> Self {
        Self {
            duration,
            rate,
            anchor_source: 0.0,
            anchor_played: Duration::ZERO,
            last_reported: None,
            ended: false,
        }
    }

    pub(super) fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// A fresh sink now starts at `at` seconds of the source.
    pub(super) fn restart_at(&mut self, at: f64) {
        self.anchor_source = at;
        self.anchor_played = Duration::ZERO;
        self.last_reported = None;
        self.ended = false;
    }

    /// The speed changes after the sink has played `played`.
    pub(super) fn set_rate(&mut self, played: Duration, rate: f64) {
        self.anchor_source = self.source_time(played);
        self.anchor_played = played;
        self.rate = rate;
    }

    fn source_time(&self, played: Duration) -> f64 {
        let since = played.saturating_sub(self.anchor_played).as_secs_f64();
        self.anchor_source + since * self.rate
    }

    /// Source position for a sink that has played `played`, kept within the track.
    pub(super) fn current_time(&self, played: Duration) -> f64 {
        let t = self.source_time(played).max(0.0);
        match self.duration {
            Some(d) => t.min(d),
            None => t,
        }
    }

    /// Turn one look at the sink into at most one event. `Ended` is raised
    /// once per drain; a restart re-arms it.
    pub(super) fn observe(
        &mut self,
        drained: bool,
        paused: bool,
        played: Duration,
    ) -> Option<MediaEvent> {
        if drained {
            if self.ended {
                return None;
            }
            self.ended = true;
            return Some(MediaEvent::Ended);
        }
        if paused {
            return None;
        }
        let t = self.current_time(played);
        if self.last_reported == Some(t) {
            return None;
        }
        self.last_reported = Some(t);
        Some(MediaEvent::TimeAdvanced)
    }
}

/// Source position for a seek request; anything unusable lands on zero.
pub(super) fn seek_target(position: f64) -> Duration {
    Duration::try_from_secs_f64(position.max(0.0)).unwrap_or(Duration::ZERO)
}

/// How a play request resolves: fine when a sink is ready, otherwise the
/// recorded load failure (reported once), otherwise `NoSource`.
pub(super) fn play_settlement(
    sink_ready: bool,
    load_error: &mut Option<PlaybackError>,
) -> Result<(), PlaybackError> {
    if sink_ready {
        Ok(())
    } else {
        Err(load_error.take().unwrap_or(PlaybackError::NoSource))
    }
}

/// `MediaBackend` playing through the default output device.
pub struct RodioBackend {
    // Keeps the device open; `None` when mixing into a detached mixer.
    _stream: Option<OutputStream>,
    mixer: Mixer,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    load_error: Option<PlaybackError>,
    timeline: Timeline,
    rate: f64,
    muted: bool,
    events: VecDeque<MediaEvent>,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mixer = stream.mixer().clone();
        Ok(Self::with_mixer(Some(stream), mixer))
    }

    /// Play into `mixer` without an output device; the caller pulls samples.
    #[cfg(test)]
    pub(crate) fn detached(mixer: Mixer) -> Self {
        Self::with_mixer(None, mixer)
    }

    fn with_mixer(stream: Option<OutputStream>, mixer: Mixer) -> Self {
        Self {
            _stream: stream,
            mixer,
            sink: None,
            source: None,
            load_error: None,
            timeline: Timeline::new(None, 1.0),
            rate: 1.0,
            muted: false,
            events: VecDeque::new(),
        }
    }

    fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { 1.0 }
    }

    fn played(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    // Replace the sink with one that starts at `at`, keeping pause/rate/volume.
    fn rebuild_at(&mut self, at: Duration) {
        let Some(path) = self.source.clone() else {
            return;
        };
        let was_paused = self.paused();
        match create_sink_at(&self.mixer, &path, at) {
            Ok(prepared) => {
                if let Some(old) = self.sink.take() {
                    old.stop();
                }
                prepared.sink.set_speed(self.rate as f32);
                prepared.sink.set_volume(self.volume());
                if !was_paused {
                    prepared.sink.play();
                }
                self.sink = Some(prepared.sink);
                self.timeline.restart_at(at.as_secs_f64());
            }
            Err(e) => warn!(error = %e, "failed to rebuild sink"),
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, source: &Path) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = Some(source.to_path_buf());
        self.load_error = None;
        self.timeline = Timeline::new(None, self.rate);
        // Settlements for the previous source are meaningless now.
        self.events.clear();

        match create_sink_at(&self.mixer, source, Duration::ZERO) {
            Ok(prepared) => {
                prepared.sink.set_speed(self.rate as f32);
                prepared.sink.set_volume(self.volume());
                self.sink = Some(prepared.sink);

                let duration = prepared
                    .duration
                    .or_else(|| probe_duration(source))
                    .map(|d| d.as_secs_f64());
                self.timeline = Timeline::new(duration, self.rate);
                if duration.is_some() {
                    self.events.push_back(MediaEvent::MetadataLoaded);
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to load source");
                self.load_error = Some(e);
            }
        }
    }

    fn play(&mut self, ticket: PlayTicket) {
        if self.sink.as_ref().is_some_and(Sink::empty) {
            // Finished sources restart from the top, like a media element.
            self.rebuild_at(Duration::ZERO);
        }
        let result = play_settlement(self.sink.is_some(), &mut self.load_error);
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
        self.events
            .push_back(MediaEvent::PlaySettled { ticket, result });
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn seek(&mut self, position: f64) {
        if self.sink.is_none() {
            return;
        }
        // A fresh sink skipped to the target keeps the reported position and
        // the audio on the same timeline.
        let target = seek_target(position);
        debug!(?target, "seeking by rebuilding the sink");
        self.rebuild_at(target);
        self.events.push_back(MediaEvent::TimeAdvanced);
    }

    fn set_rate(&mut self, rate: f64) {
        let played = self.played();
        self.timeline.set_rate(played, rate);
        self.rate = rate;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_speed(rate as f32);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let volume = self.volume();
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn current_time(&self) -> f64 {
        self.timeline.current_time(self.played())
    }

    fn duration(&self) -> Option<f64> {
        self.timeline.duration()
    }

    fn paused(&self) -> bool {
        self.sink
            .as_ref()
            .is_none_or(|s| s.is_paused() || s.empty())
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if let Some(sink) = self.sink.as_ref() {
            let observed = self
                .timeline
                .observe(sink.empty(), sink.is_paused(), sink.get_pos());
            if let Some(event) = observed {
                self.events.push_back(event);
            }
        }
        self.events.drain(..).collect()
    }
}
