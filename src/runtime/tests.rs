use super::event_loop::{handle_control_cmd, handle_hit};
use super::logging::{filter_directives, init};
use crate::app::{App, Flow};
use crate::audio::PlaybackState;
use crate::audio::fake::FakeBackend;
use crate::catalog::{AssetPaths, Catalog, Track};
use crate::config::{LoggingSettings, Settings};
use crate::mpris::ControlCmd;
use crate::ui::Hit;

fn app() -> App<FakeBackend> {
    let settings = Settings::default();
    let catalog = Catalog::new(vec![
        Track::new("Alpha", "alpha.mp3", "alpha.jpg"),
        Track::new("Beta", "beta.mp3", "beta.jpg"),
        Track::new("Gamma", "gamma.mp3", "gamma.jpg"),
    ])
    .unwrap();
    let assets = AssetPaths::new("/music", &settings.player);
    App::new(catalog, assets, FakeBackend::new(), &settings)
}

#[test]
fn control_commands_drive_transport() {
    let mut app = app();

    assert_eq!(handle_control_cmd(ControlCmd::PlayPause, &mut app), Flow::Continue);
    app.pump_events();
    assert_eq!(app.engine().icon(), PlaybackState::Playing);

    // Play while already playing does not issue another request.
    handle_control_cmd(ControlCmd::Play, &mut app);
    assert_eq!(app.backend().play_requests.len(), 1);

    handle_control_cmd(ControlCmd::Pause, &mut app);
    assert_eq!(app.engine().icon(), PlaybackState::Paused);

    handle_control_cmd(ControlCmd::Prev, &mut app);
    assert_eq!(app.current_index(), 2);
    handle_control_cmd(ControlCmd::Next, &mut app);
    assert_eq!(app.current_index(), 0);

    assert_eq!(handle_control_cmd(ControlCmd::Quit, &mut app), Flow::Quit);
}

#[test]
fn control_seek_is_relative() {
    let mut app = app();
    app.backend_mut().load_metadata(100.0);
    app.backend_mut().advance_to(40.0);
    app.pump_events();

    handle_control_cmd(ControlCmd::Seek(-15.0), &mut app);
    handle_control_cmd(ControlCmd::Seek(500.0), &mut app);
    assert_eq!(app.backend().seeks, vec![25.0, 100.0]);
}

#[test]
fn control_set_position_is_absolute() {
    let mut app = app();
    app.backend_mut().load_metadata(100.0);
    app.backend_mut().advance_to(40.0);
    app.pump_events();

    assert_eq!(
        handle_control_cmd(ControlCmd::SetPosition(12.5), &mut app),
        Flow::Continue
    );
    assert_eq!(app.backend().seeks, vec![12.5]);
    assert_eq!(app.engine().current_time(), 12.5);
}

#[test]
fn clicks_drive_transport() {
    let mut app = app();
    app.backend_mut().load_metadata(200.0);

    handle_hit(Hit::Progress { offset: 10.0, width: 40.0 }, &mut app);
    assert_eq!(app.backend().seeks, vec![50.0]);

    handle_hit(Hit::Playlist(1), &mut app);
    assert_eq!(app.current_index(), 1);

    handle_hit(Hit::Next, &mut app);
    assert_eq!(app.current_index(), 2);
    handle_hit(Hit::Previous, &mut app);
    assert_eq!(app.current_index(), 1);

    app.pump_events();
    assert_eq!(app.engine().icon(), PlaybackState::Playing);
    handle_hit(Hit::PlayPause, &mut app);
    assert_eq!(app.engine().icon(), PlaybackState::Paused);
}

#[test]
fn filter_prefers_env_then_config() {
    assert_eq!(
        filter_directives(Some("debug".to_string()), Some("warn")),
        "debug"
    );
    assert_eq!(filter_directives(Some("  ".to_string()), Some("warn")), "warn");
    assert_eq!(filter_directives(None, Some("accelerando=trace")), "accelerando=trace");
    assert_eq!(filter_directives(None, None), "info");
}

#[test]
fn logging_without_file_installs_nothing() {
    let settings = LoggingSettings::default();
    assert!(!init(&settings).unwrap());
}
