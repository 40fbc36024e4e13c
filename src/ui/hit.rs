use ratatui::layout::Rect;

/// Something clickable under the mouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Previous,
    PlayPause,
    Next,
    /// Click on the progress bar, `offset` cells from its left edge out of `width`.
    Progress { offset: f64, width: f64 },
    /// Click on a playlist row, by catalog index.
    Playlist(usize),
}

/// Where the clickable parts of the last frame were drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub previous: Rect,
    pub play_pause: Rect,
    pub next: Rect,
    pub progress: Rect,
    /// Inner area of the playlist box; one row per track.
    pub playlist: Rect,
    /// Catalog index of the first visible playlist row.
    pub playlist_start: usize,
    pub playlist_len: usize,
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x
        && row >= r.y
        && u32::from(column) < u32::from(r.x) + u32::from(r.width)
        && u32::from(row) < u32::from(r.y) + u32::from(r.height)
}

impl HitAreas {
    /// Map a mouse position to what was drawn there.
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        if contains(self.previous, column, row) {
            return Some(Hit::Previous);
        }
        if contains(self.play_pause, column, row) {
            return Some(Hit::PlayPause);
        }
        if contains(self.next, column, row) {
            return Some(Hit::Next);
        }
        if contains(self.progress, column, row) {
            // The last cell counts as the right edge, so both edges are reachable.
            let width = self.progress.width.saturating_sub(1).max(1);
            return Some(Hit::Progress {
                offset: f64::from(column - self.progress.x),
                width: f64::from(width),
            });
        }
        if contains(self.playlist, column, row) {
            let index = self.playlist_start + usize::from(row - self.playlist.y);
            if index < self.playlist_len {
                return Some(Hit::Playlist(index));
            }
        }
        None
    }
}

/// Visible window `(start, end, selected_pos_in_visible)` of `total` rows in
/// `height` lines, centring `selected` when the list does not fit.
pub(super) fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}
