//! Genre tab strip. When the tabs don't fit, a window around the active tab
//! is shown with arrows marking the hidden ends.

use std::ops::Range;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::browser::BrowserState;
use crate::theme::{C_ACCENT, C_MUTED, C_SECONDARY};

const SEPARATOR: &str = " │ ";

pub fn draw(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let mut labels = vec!["All"];
    labels.extend(state.catalog.genres().iter().map(String::as_str));
    let active = state
        .tab
        .position(state.catalog.genres())
        .map_or(0, |p| p + 1);

    // room for the "‹ " / " ›" overflow markers on both sides
    let budget = (area.width as usize).saturating_sub(4);
    let widths: Vec<usize> = labels
        .iter()
        .map(|l| l.width() + 2 + SEPARATOR.width())
        .collect();
    let window = tab_window(&widths, active, budget);

    let mut spans = Vec::new();
    spans.push(Span::styled(
        if window.start > 0 { "‹ " } else { "  " },
        Style::default().fg(C_MUTED),
    ));
    for i in window.clone() {
        if i > window.start {
            spans.push(Span::styled(SEPARATOR, Style::default().fg(C_MUTED)));
        }
        let style = if i == active {
            Style::default()
                .fg(C_ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        spans.push(Span::styled(format!(" {} ", labels[i]), style));
    }
    if window.end < labels.len() {
        spans.push(Span::styled(" ›", Style::default().fg(C_MUTED)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Widest contiguous run of tabs containing `active` whose widths fit in
/// `max`. Grows right then left, one tab at a time.
pub fn tab_window(widths: &[usize], active: usize, max: usize) -> Range<usize> {
    if widths.is_empty() {
        return 0..0;
    }
    let active = active.min(widths.len() - 1);
    let (mut start, mut end) = (active, active + 1);
    let mut used = widths[active];
    loop {
        let mut grew = false;
        if end < widths.len() && used + widths[end] <= max {
            used += widths[end];
            end += 1;
            grew = true;
        }
        if start > 0 && used + widths[start - 1] <= max {
            start -= 1;
            used += widths[start];
            grew = true;
        }
        if !grew {
            break;
        }
    }
    start..end
}
