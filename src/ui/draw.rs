use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use super::hit::{HitAreas, visible_window};
use super::view::ViewModel;

const CONTROLS: [(&str, &str); 7] = [
    ("space", "play/pause"),
    ("h/l", "prev/next"),
    ("←/→", "seek"),
    ("m", "mute"),
    ("/", "jump"),
    ("click", "bar/list/buttons"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI from `view` and return the clickable areas.
pub fn draw(frame: &mut Frame, view: &ViewModel) -> HitAreas {
    let mut hits = HitAreas::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Now playing
    let now_playing = Paragraph::new(vec![
        Line::from(view.title.as_str().bold()),
        Line::from(view.subtitle.as_str().italic()),
        Line::from(format!("Cover: {} ({})", view.cover_art, view.cover_alt).dim()),
    ])
    .block(
        Block::bordered()
            .padding(left_pad())
            .title(view.header.as_str())
            .title_alignment(Alignment::Center),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[0]);

    // Transport buttons + rate
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(1),
        ])
        .split(chunks[1]);

    let play_pause_label = if view.pause_icon_visible {
        "⏸ pause"
    } else {
        "▶ play"
    };
    for (area, label) in [
        (row[0], "⏮ prev"),
        (row[1], play_pause_label),
        (row[2], "next ⏭"),
    ] {
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, area);
    }
    hits.previous = row[0];
    hits.play_pause = row[1];
    hits.next = row[2];

    let mut rate_line = vec![Span::raw("rate "), view.rate_label.as_str().bold()];
    if view.muted {
        rate_line.push(Span::raw(" • "));
        rate_line.push("muted".reversed());
    }
    let rate = Paragraph::new(Line::from(rate_line))
        .alignment(Alignment::Right)
        .block(Block::bordered().padding(left_pad()));
    frame.render_widget(rate, row[3]);

    // Progress
    let progress_block = Block::bordered().title(" progress ");
    let progress_inner = progress_block.inner(chunks[2]);
    frame.render_widget(progress_block, chunks[2]);
    let bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(7),
        ])
        .split(progress_inner);

    frame.render_widget(
        Paragraph::new(view.elapsed_label.as_str()).alignment(Alignment::Center),
        bar[0],
    );
    let ratio = (view.progress_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .ratio(if ratio.is_finite() { ratio } else { 0.0 })
        .label(format!("{:.0}%", view.progress_percent))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(gauge, bar[1]);
    frame.render_widget(
        Paragraph::new(view.duration_label.as_str()).alignment(Alignment::Center),
        bar[2],
    );
    hits.progress = bar[1];

    // Playlist
    {
        let list_block = Block::default().borders(Borders::ALL).title(" playlist ");
        let list_area = list_block.inner(chunks[3]);

        // Only build ListItems for the visible window, centred on the current track.
        let total = view.playlist.len();
        let (start, end, current_pos) =
            visible_window(total, list_area.height as usize, view.current_index);

        let width = list_area.width as usize;
        let items: Vec<ListItem> = view.playlist[start..end]
            .iter()
            .map(|row| {
                let title = if row.current {
                    row.title.as_str().bold().yellow()
                } else {
                    Span::raw(row.title.as_str())
                };
                let used = row.title.chars().count() + row.status.len() + 2;
                let gap = " ".repeat(width.saturating_sub(used).max(1));
                ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    title,
                    Span::raw(gap),
                    row.status.dim(),
                ]))
            })
            .collect();

        let list = List::new(items).block(list_block);
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(current_pos));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);

        hits.playlist = list_area;
        hits.playlist_start = start;
        hits.playlist_len = total;
    }

    // Jump prompt overlay (keeps the list visible under it)
    if let Some(prompt) = &view.prompt {
        let popup_area = centered_rect_sized(60, 5, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let hint = match &prompt.best {
            Some(best) => format!("enter plays: {} ({} matching)", best, prompt.matches),
            None => "no matching track".to_string(),
        };
        let body = Paragraph::new(vec![
            Line::from(format!("/{}", prompt.query)),
            Line::from(hint.dim()),
        ])
        .block(
            Block::default()
                .padding(left_pad())
                .borders(Borders::ALL)
                .title(" jump (esc closes) "),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(body, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    hits
}
