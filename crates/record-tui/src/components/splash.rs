//! Full-screen states shown before the catalog is usable.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::help_overlay::centered_rect;
use crate::theme::{C_ACCENT, C_ERROR, C_MUTED, C_SECONDARY};

pub fn draw_loading(frame: &mut Frame, area: Rect, base_url: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "◉ RADIO RECORD",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "loading stations…",
            Style::default().fg(C_SECONDARY),
        )),
        Line::from(Span::styled(base_url.to_string(), Style::default().fg(C_MUTED))),
    ];
    let popup = centered_rect(60, lines.len() as u16, area);
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        popup,
    );
}

/// Catalog failures are terminal: show the reason and how to leave.
pub fn draw_failed(frame: &mut Frame, area: Rect, message: &str, log_path: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "could not load the station list",
            Style::default().fg(C_ERROR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(C_SECONDARY))),
        Line::from(""),
        Line::from(Span::styled(
            format!("details in {}", log_path),
            Style::default().fg(C_MUTED),
        )),
        Line::from(Span::styled("press q to quit", Style::default().fg(C_MUTED))),
    ];
    let popup = centered_rect(70, lines.len() as u16 + 2, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_ERROR)),
            ),
        popup,
    );
}
