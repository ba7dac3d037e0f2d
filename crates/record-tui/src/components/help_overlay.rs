//! Help overlay — centered popup with the key reference. Any key closes it.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::{C_ACCENT, C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY};

pub fn draw(frame: &mut Frame, area: Rect) {
    let help_lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " keyboard shortcuts",
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" navigation"),
        help_row("↑ / ↓  or  k / j", "move cursor"),
        help_row("g / G", "first / last station"),
        help_row("tab / shift-tab", "next / previous genre"),
        help_row("0", "back to All, favorites filter off"),
        Line::from(""),
        section(" playback"),
        help_row("enter / space", "play station under cursor"),
        help_row("1 … 9", "play favorite by number"),
        help_row("s", "stop"),
        help_row("+ / -", "volume up / down"),
        Line::from(""),
        section(" favorites & search"),
        help_row("f", "toggle favorite"),
        help_row("F", "show favorites only"),
        help_row("/", "search titles and descriptions"),
        help_row("n / N", "next / previous match"),
        help_row("esc", "clear search"),
        Line::from(""),
        help_row("?", "this help"),
        help_row("q / ctrl+c", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            " press any key to close",
            Style::default().fg(C_MUTED),
        )),
    ];

    let popup = centered_rect(60, help_lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(help_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(C_PANEL_BORDER))
                .title(Span::styled(" help ", Style::default().fg(C_ACCENT)))
                .style(Style::default().bg(ratatui::style::Color::Rgb(18, 18, 26))),
        ),
        popup,
    );
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<18}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
