use std::io::Stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Flow, Intent};
use crate::audio::MediaBackend;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui::{self, Hit, HitAreas, ViewModel};

/// Route a media-key command into the controller.
pub(super) fn handle_control_cmd<B: MediaBackend>(cmd: ControlCmd, app: &mut App<B>) -> Flow {
    debug!(?cmd, "control command");
    let intent = match cmd {
        ControlCmd::Quit => Intent::Quit,
        ControlCmd::Play => Intent::Play,
        ControlCmd::Pause => Intent::Pause,
        ControlCmd::PlayPause => Intent::TogglePlay,
        ControlCmd::Next => Intent::Next,
        ControlCmd::Prev => Intent::Previous,
        ControlCmd::Seek(delta) => {
            app.skip(delta);
            return Flow::Continue;
        }
        ControlCmd::SetPosition(position) => {
            app.seek_to(position);
            return Flow::Continue;
        }
    };
    app.apply(intent)
}

/// Route a click on something drawn last frame.
pub(super) fn handle_hit<B: MediaBackend>(hit: Hit, app: &mut App<B>) {
    debug!(?hit, "click");
    match hit {
        Hit::Previous => app.previous(),
        Hit::PlayPause => app.toggle_play(),
        Hit::Next => app.next(),
        Hit::Progress { offset, width } => app.progress_bar_clicked(offset, width),
        Hit::Playlist(index) => app.playlist_item_selected(index),
    }
}

/// Main terminal event loop: drains engine events, redraws, then handles
/// media keys and terminal input. Returns `Ok(())` when shutdown is requested.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    // The input poll timeout doubles as the time-advance cadence.
    let tick = Duration::from_millis(settings.controls.tick_ms);
    let mut hits = HitAreas::default();
    let mut dirty = true;

    loop {
        if app.pump_events() {
            dirty = true;
        }

        // Keep MPRIS in sync even when changes come from media keys or auto-advance.
        if dirty {
            update_mpris(mpris, app);
            dirty = false;
        }

        let view = ViewModel::project(app, &settings.ui);
        terminal.draw(|f| hits = ui::draw(f, &view))?;

        while let Ok(cmd) = control_rx.try_recv() {
            dirty = true;
            if handle_control_cmd(cmd, app) == Flow::Quit {
                return Ok(());
            }
        }

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    dirty = true;
                    if app.handle_key(&key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(hit) = hits.hit(mouse.column, mouse.row) {
                        dirty = true;
                        handle_hit(hit, app);
                    }
                }
                _ => {}
            }
        }
    }
}
