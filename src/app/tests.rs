use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::input::intent_for_key;
use super::*;
use crate::audio::PlaybackState;
use crate::audio::fake::FakeBackend;
use crate::catalog::{AssetPaths, Catalog, Track};
use crate::config::Settings;

fn t(title: &str) -> Track {
    let stem = title.to_ascii_lowercase().replace(' ', "_");
    Track::new(title, &format!("{stem}.mp3"), &format!("{stem}.jpg"))
}

fn app_with(backend: FakeBackend, titles: &[&str]) -> App<FakeBackend> {
    let settings = Settings::default();
    let catalog = Catalog::new(titles.iter().map(|s| t(s)).collect()).unwrap();
    let assets = AssetPaths::new("/music", &settings.player);
    App::new(catalog, assets, backend, &settings)
}

fn app(titles: &[&str]) -> App<FakeBackend> {
    app_with(FakeBackend::new(), titles)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn new_loads_first_track_without_playing() {
    let app = app(&["Alpha", "Beta", "Gamma"]);
    assert_eq!(app.current_index(), 0);
    assert_eq!(
        app.backend().loaded,
        vec![PathBuf::from("/music/songs/alpha.mp3")]
    );
    assert!(app.backend().play_requests.is_empty());
    assert_eq!(app.engine().icon(), PlaybackState::Paused);
}

#[test]
fn next_walks_forward_and_wraps_to_first() {
    let mut app = app(&["Alpha", "Beta", "Gamma"]);
    app.next();
    app.next();
    assert_eq!(app.current_index(), 2);
    app.next();
    assert_eq!(app.current_index(), 0);
    assert_eq!(app.backend().play_requests.len(), 3);
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut app = app(&["Alpha", "Beta", "Gamma"]);
    app.previous();
    assert_eq!(app.current_index(), 2);
    assert_eq!(
        app.backend().loaded.last(),
        Some(&PathBuf::from("/music/songs/gamma.mp3"))
    );
    assert_eq!(app.backend().play_requests.len(), 1);
}

#[test]
fn ended_on_last_track_advances_to_first_and_plays() {
    let mut app = app(&["Alpha", "Beta", "Gamma"]);
    app.load_track(2);
    app.backend_mut().load_metadata(90.0);
    app.pump_events();
    let plays_before = app.backend().play_requests.len();

    app.backend_mut().finish();
    app.pump_events();

    assert_eq!(app.current_index(), 0);
    assert_eq!(app.backend().play_requests.len(), plays_before + 1);
}

#[test]
fn selecting_current_item_restarts_it() {
    let mut app = app(&["Alpha", "Beta"]);
    app.backend_mut().load_metadata(60.0);
    app.backend_mut().advance_to(30.0);
    app.pump_events();

    app.playlist_item_selected(0);
    assert_eq!(app.current_index(), 0);
    assert_eq!(app.backend().loaded.len(), 2);
    assert_eq!(app.backend().current_time, 0.0);
    assert_eq!(app.backend().play_requests.len(), 1);
}

#[test]
fn load_track_resets_rate() {
    let mut app = app(&["Alpha", "Beta"]);
    app.backend_mut().load_metadata(100.0);
    app.backend_mut().advance_to(50.0);
    app.pump_events();
    assert_eq!(app.engine().rate(), 1.5);

    app.load_track(1);
    assert_eq!(app.engine().rate(), 1.0);
}

#[test]
fn time_advance_ramps_rate_to_two_at_end() {
    let mut app = app(&["Alpha"]);
    app.backend_mut().load_metadata(200.0);
    app.backend_mut().advance_to(200.0);
    app.pump_events();
    assert_eq!(app.engine().rate(), 2.0);
    assert_eq!(app.backend().rate, 2.0);
}

#[test]
fn progress_click_edges_map_to_start_and_end() {
    let mut app = app(&["Alpha"]);
    app.backend_mut().load_metadata(180.0);
    app.pump_events();

    app.progress_bar_clicked(0.0, 40.0);
    app.progress_bar_clicked(40.0, 40.0);
    app.progress_bar_clicked(10.0, 40.0);
    assert_eq!(app.backend().seeks, vec![0.0, 180.0, 45.0]);
}

#[test]
fn unknown_duration_makes_skip_and_progress_click_noops() {
    let mut app = app(&["Alpha"]);
    app.skip(10.0);
    app.progress_bar_clicked(20.0, 40.0);
    assert!(app.backend().seeks.is_empty());
}

#[test]
fn keys_drive_the_transport() {
    let mut app = app(&["Alpha", "Beta"]);
    app.backend_mut().load_metadata(100.0);
    app.pump_events();

    assert_eq!(app.handle_key(&key(KeyCode::Char(' '))), Flow::Continue);
    app.pump_events();
    assert_eq!(app.engine().icon(), PlaybackState::Playing);

    app.handle_key(&key(KeyCode::Right));
    assert_eq!(app.backend().current_time, 10.0);
    app.handle_key(&key(KeyCode::Left));
    assert_eq!(app.backend().current_time, 0.0);

    app.handle_key(&key(KeyCode::Char('m')));
    assert!(app.engine().muted());

    app.handle_key(&key(KeyCode::Char(' ')));
    assert_eq!(app.engine().icon(), PlaybackState::Paused);

    assert_eq!(app.handle_key(&key(KeyCode::Char('q'))), Flow::Quit);
}

#[test]
fn rejected_toggle_stays_paused() {
    let mut app = app_with(FakeBackend::rejecting(), &["Alpha"]);
    app.toggle_play();
    app.pump_events();
    assert_eq!(app.engine().icon(), PlaybackState::Paused);
    assert!(app.engine().paused());
}

#[test]
fn open_prompt_swallows_transport_keys() {
    let mut app = app(&["Alpha", "Better Days", "Gamma"]);
    app.backend_mut().load_metadata(100.0);
    app.pump_events();

    app.handle_key(&key(KeyCode::Char('/')));
    assert!(app.prompt().is_some());

    for c in ['b', ' ', 'm', 'd'] {
        app.handle_key(&key(KeyCode::Char(c)));
    }
    app.handle_key(&key(KeyCode::Right));

    assert!(!app.engine().muted());
    assert!(app.backend().seeks.is_empty());
    assert!(app.backend().play_requests.is_empty());
    assert_eq!(app.prompt().map(|p| p.query.as_str()), Some("b md"));

    app.handle_key(&key(KeyCode::Backspace));
    app.handle_key(&key(KeyCode::Backspace));
    app.handle_key(&key(KeyCode::Backspace));
    app.handle_key(&key(KeyCode::Char('d')));
    app.handle_key(&key(KeyCode::Enter));

    assert!(app.prompt().is_none());
    assert_eq!(app.current_index(), 1);
    assert_eq!(app.backend().play_requests.len(), 1);
}

#[test]
fn escape_closes_prompt_without_selecting() {
    let mut app = app(&["Alpha", "Beta"]);
    app.handle_key(&key(KeyCode::Char('/')));
    app.handle_key(&key(KeyCode::Char('b')));
    app.handle_key(&key(KeyCode::Esc));
    assert!(app.prompt().is_none());
    assert_eq!(app.current_index(), 0);
    assert!(app.backend().play_requests.is_empty());
}

#[test]
fn enter_with_no_match_keeps_prompt_open() {
    let mut app = app(&["Alpha", "Beta"]);
    app.handle_key(&key(KeyCode::Char('/')));
    app.handle_key(&key(KeyCode::Char('z')));
    app.handle_key(&key(KeyCode::Enter));
    assert!(app.prompt().is_some());
}

#[test]
fn fuzzy_match_simple() {
    let title = "Hello World";
    assert!(fuzzy_match_positions(title, "hw").is_some());
    assert!(fuzzy_match_positions(title, "ello").is_some());
    assert!(fuzzy_match_positions(title, "xyz").is_none());
    assert_eq!(fuzzy_match_positions(title, "HW"), Some(vec![0, 6]));
}

#[test]
fn media_key_intents_respect_current_state() {
    let mut app = app(&["Alpha"]);
    app.apply(Intent::Pause);
    assert!(app.backend().play_requests.is_empty());

    app.apply(Intent::Play);
    app.pump_events();
    assert_eq!(app.backend().play_requests.len(), 1);

    app.apply(Intent::Play);
    assert_eq!(app.backend().play_requests.len(), 1);

    app.apply(Intent::Pause);
    assert_eq!(app.engine().icon(), PlaybackState::Paused);
}

#[test]
fn ctrl_c_quits_and_unbound_keys_are_ignored() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(intent_for_key(&ctrl_c), Some(Intent::Quit));
    assert_eq!(intent_for_key(&key(KeyCode::Char('x'))), None);
    assert_eq!(intent_for_key(&key(KeyCode::Char(' '))), Some(Intent::TogglePlay));
}
