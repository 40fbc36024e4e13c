use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use tracing::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::audio::PlaybackState;
use crate::catalog::Track;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.accelerando";

/// Requests coming in from the session bus, drained by the event loop.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Next,
    Prev,
    /// Relative seek in seconds.
    Seek(f64),
    /// Absolute seek in seconds.
    SetPosition(f64),
}

#[derive(Debug)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    url: Option<String>,
    art_url: Option<String>,
    length_micros: Option<i64>,
    position_micros: i64,
    track_id: Option<ObjectPath<'static>>,
    rate: f64,
    max_rate: f64,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            playback: PlaybackState::Paused,
            title: None,
            url: None,
            art_url: None,
            length_micros: None,
            position_micros: 0,
            track_id: None,
            rate: 1.0,
            max_rate: 1.0,
        }
    }
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn micros(seconds: f64) -> i64 {
    (seconds * 1_000_000.0) as i64
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    /// Publish the bound track. `duration` is in seconds, when known.
    pub fn set_track_metadata(
        &self,
        index: usize,
        track: &Track,
        audio: &Path,
        art: &Path,
        duration: Option<f64>,
    ) {
        if let Ok(mut s) = self.state.lock() {
            s.title = Some(track.title.clone());
            s.url = Some(file_url(audio));
            s.art_url = Some(file_url(art));
            s.length_micros = duration.map(micros);
            s.track_id = ObjectPath::try_from(format!("{OBJECT_PATH}/track/{index}"))
                .ok()
                .map(|p| p.into_owned());
        }
    }

    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_rate(&self, rate: f64) {
        if let Ok(mut s) = self.state.lock() {
            s.rate = rate;
        }
    }

    pub fn set_position(&self, seconds: f64) {
        if let Ok(mut s) = self.state.lock() {
            s.position_micros = if seconds.is_finite() {
                micros(seconds.max(0.0))
            } else {
                0
            };
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "accelerando"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec!["audio/mpeg".to_string()]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    /// There is no stopped state; stopping pauses in place.
    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn seek(&self, offset: i64) {
        let _ = self.tx.send(ControlCmd::Seek(offset as f64 / 1_000_000.0));
    }

    /// Ignored unless `track_id` is the current track and `position` lies
    /// within it.
    fn set_position(&self, track_id: OwnedObjectPath, position: i64) {
        let Ok(s) = self.state.lock() else {
            return;
        };
        let current = s.track_id.as_ref().map(|p| p.as_str());
        if current != Some(track_id.as_str()) || position < 0 {
            return;
        }
        if s.length_micros.is_some_and(|len| position > len) {
            return;
        }
        let _ = self
            .tx
            .send(ControlCmd::SetPosition(position as f64 / 1_000_000.0));
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Paused";
        };
        match s.playback {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        self.state.lock().map(|s| s.rate).unwrap_or(1.0)
    }

    #[zbus(property)]
    fn minimum_rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn maximum_rate(&self) -> f64 {
        self.state.lock().map(|s| s.max_rate).unwrap_or(1.0)
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        self.state.lock().map(|s| s.position_micros).unwrap_or(0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut put = |key: &str, value: Value<'_>| {
            if let Ok(v) = OwnedValue::try_from(value) {
                map.insert(key.to_string(), v);
            }
        };

        if let Some(id) = &s.track_id {
            put("mpris:trackid", Value::from(id.clone()));
        }
        if let Some(title) = &s.title {
            put("xesam:title", Value::from(title.clone()));
        }
        if let Some(url) = &s.url {
            put("xesam:url", Value::from(url.clone()));
        }
        if let Some(art) = &s.art_url {
            put("mpris:artUrl", Value::from(art.clone()));
        }
        if let Some(len) = s.length_micros {
            put("mpris:length", Value::from(len));
        }
        map
    }
}

/// Serve MPRIS on the session bus from a background thread.
///
/// `max_rate` is the rate a track reaches at its end. Failing to reach the
/// bus is logged and otherwise ignored; the handle still accepts updates.
pub fn spawn_mpris(tx: Sender<ControlCmd>, max_rate: f64) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState {
        max_rate,
        ..SharedState::default()
    }));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!(error = %e, "mpris: failed to connect to session bus");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                warn!(error = %e, "mpris: failed to acquire name");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                warn!(error = %e, "mpris: failed to register root iface");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!(error = %e, "mpris: failed to register player iface");
                return;
            }

            info!(name = BUS_NAME, "mpris service registered");

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
