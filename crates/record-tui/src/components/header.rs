//! Header component — one-row top bar: title, playing station, favorites
//! badge, volume.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::browser::BrowserState;
use crate::theme::{C_ACCENT, C_FAVORITE, C_MUTED, C_PLAYING, C_SECONDARY};

/// `playing` is false once mpv has exited, even if a station is still selected.
pub fn draw(frame: &mut Frame, area: Rect, state: &BrowserState, volume: u8, playing: bool) {
    let left = build_left(state, playing);
    let right = format!("vol {:>3}% ", volume);

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let pad = (area.width as usize).saturating_sub(left_width + right.width());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(right, Style::default().fg(C_SECONDARY)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn build_left(state: &BrowserState, playing: bool) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        " ◉ RADIO RECORD",
        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
    )];

    if let Some(station) = state.selected_station() {
        spans.push(Span::styled("  ·  ", Style::default().fg(C_MUTED)));
        let (marker, color) = if playing {
            ("♪", C_PLAYING)
        } else {
            ("■", C_MUTED)
        };
        spans.push(Span::styled(
            format!("{} {}", marker, station.title),
            Style::default().fg(color),
        ));
    }

    if state.favorites_only {
        spans.push(Span::styled("  ·  ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled(
            "♥ favorites only",
            Style::default().fg(C_FAVORITE).add_modifier(Modifier::BOLD),
        ));
    }
    spans
}
