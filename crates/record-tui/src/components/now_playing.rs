//! Now-playing box — current track of the selected station plus search links.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::browser::BrowserState;
use crate::theme::{style_border, C_ACCENT, C_LINK, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY};

/// Rows the box needs, borders included.
pub const HEIGHT: u16 = 7;

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    fetched_at: Option<DateTime<Local>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style_border())
        .title(Span::styled(
            " now playing ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(lines(state, fetched_at)).block(block), area);
}

fn lines(state: &BrowserState, fetched_at: Option<DateTime<Local>>) -> Vec<Line<'static>> {
    let Some(station) = state.selected_station() else {
        return vec![Line::from(Span::styled(
            " nothing playing, Enter plays the station under the cursor",
            Style::default().fg(C_MUTED),
        ))];
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(" ♪ ", Style::default().fg(C_PLAYING)),
        Span::styled(
            station.title.clone(),
            Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD),
        ),
    ])];

    let Some(track) = &state.now_playing else {
        lines.push(Line::from(Span::styled(
            "   waiting for track info…",
            Style::default().fg(C_MUTED),
        )));
        return lines;
    };

    let mut track_line = vec![Span::styled(
        format!("   {}", track.display()),
        Style::default().fg(C_PRIMARY),
    )];
    if !track.time_formatted.is_empty() {
        track_line.push(Span::styled(
            format!("  ({})", track.time_formatted),
            Style::default().fg(C_SECONDARY),
        ));
    }
    lines.push(Line::from(track_line));

    for (service, url) in track.search_links() {
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<9}", service), Style::default().fg(C_SECONDARY)),
            Span::styled(url, Style::default().fg(C_LINK)),
        ]));
    }

    if let Some(at) = fetched_at {
        lines.push(Line::from(Span::styled(
            format!("   updated {}", at.format("%H:%M:%S")),
            Style::default().fg(C_MUTED),
        )));
    }
    lines
}
