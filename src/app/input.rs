use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A user request, independent of how it was made (key, click, media key).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    TogglePlay,
    Play,
    Pause,
    ToggleMute,
    SkipForward,
    SkipBackward,
    Next,
    Previous,
    OpenJump,
    Quit,
}

/// Map a key press to a transport intent.
///
/// Returns `None` for unbound keys. Callers must not consult this while a
/// text-entry control has focus.
pub fn intent_for_key(key: &KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => Some(Intent::TogglePlay),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ToggleMute),
        KeyCode::Right => Some(Intent::SkipForward),
        KeyCode::Left => Some(Intent::SkipBackward),
        KeyCode::Char('l') => Some(Intent::Next),
        KeyCode::Char('h') => Some(Intent::Previous),
        KeyCode::Char('/') => Some(Intent::OpenJump),
        KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}
