use crate::app::App;
use crate::audio::MediaBackend;
use crate::audio::ramp::known_duration;
use crate::mpris::MprisHandle;

pub fn update_mpris<B: MediaBackend>(mpris: &MprisHandle, app: &App<B>) {
    let track = app.current_track();
    let engine = app.engine();
    mpris.set_track_metadata(
        app.current_index(),
        track,
        &app.assets().audio_path(track),
        &app.assets().art_path(track),
        known_duration(engine.duration()),
    );
    mpris.set_playback(engine.icon());
    mpris.set_rate(engine.rate());
    mpris.set_position(engine.current_time());
}
