//! Status bar — list position, search progress, mode and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::browser::{BrowserState, Mode};
use crate::theme::{C_MODE_HELP, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED, C_SECONDARY};

pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "BROWSE",
        Mode::SearchEntry => "SEARCH",
        Mode::HelpOverlay => "HELP",
    }
}

fn mode_color(mode: Mode) -> ratatui::style::Color {
    match mode {
        Mode::Normal => C_MODE_NORMAL,
        Mode::SearchEntry => C_MODE_SEARCH,
        Mode::HelpOverlay => C_MODE_HELP,
    }
}

/// "cursor/total stations", plus "search i/n" while matches exist.
pub fn position_text(state: &BrowserState) -> String {
    let total = state.visible.len();
    let cursor = if total == 0 {
        0
    } else {
        state.cursor.position() + 1
    };
    let mut text = format!("{}/{} stations", cursor, total);
    let matches = state.search.matches().len();
    if matches > 0 {
        text.push_str(&format!(
            " │ search {}/{}",
            state.search.pointer() + 1,
            matches
        ));
    }
    text
}

pub fn draw_position_line(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let line = Line::from(Span::styled(
        format!(" {}", position_text(state)),
        Style::default().fg(C_SECONDARY),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Bottom row: mode badge, then key hints or the query being typed.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let mode = state.mode;
    let mut spans = vec![Span::styled(
        format!(" {} ", mode_label(mode)),
        Style::default()
            .fg(mode_color(mode))
            .add_modifier(Modifier::BOLD),
    )];

    match mode {
        Mode::SearchEntry => {
            spans.push(Span::styled(
                format!(" /{}▌", state.search.query()),
                Style::default().fg(C_MODE_SEARCH),
            ));
            spans.push(Span::styled(
                "  Enter keep  Esc cancel",
                Style::default().fg(C_MUTED),
            ));
        }
        Mode::Normal | Mode::HelpOverlay => spans.push(Span::styled(
            " ↑↓/jk move  Enter play  s stop  Tab genre  f fav  F favs only  / search  n/N next/prev  +/- vol  ? help  q quit",
            Style::default().fg(C_MUTED),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
