//! StationList component — the visible stations with cursor, playing and
//! favorite markers, quick-select hotkeys and search highlighting.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use record_proto::prefs::PreferenceStore;
use record_proto::protocol::Station;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::browser::search::match_spans;
use crate::browser::BrowserState;
use crate::theme::{
    style_border, style_match, C_ACCENT, C_FAVORITE, C_MUTED, C_NUMBER_HINT, C_PLAYING,
    C_PRIMARY, C_SECONDARY, C_SELECTION_BG,
};

/// Quick-select slots map to the first nine favorites.
const QUICK_SLOTS: usize = 9;

pub struct StationList {
    list_state: ListState,
}

impl StationList {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    pub fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &BrowserState,
        prefs: &dyn PreferenceStore,
    ) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(style_border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.visible.is_empty() {
            let msg = if state.favorites_only {
                "  no favorites here (f marks the station under the cursor)"
            } else {
                "  no stations in this tab"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let width = inner.width as usize;
        let items: Vec<ListItem> = state
            .visible
            .iter()
            .enumerate()
            .filter_map(|(pos, &idx)| {
                let station = state.catalog.station(idx)?;
                Some(render_row(pos, idx, station, state, prefs, width))
            })
            .collect();

        self.list_state.select(Some(state.cursor.position()));
        frame.render_stateful_widget(List::new(items), inner, &mut self.list_state);
    }
}

impl Default for StationList {
    fn default() -> Self {
        Self::new()
    }
}

/// 1-based quick-select digit for a favorite, if it has one.
pub fn hotkey_for(station_id: i64, favorites: &[i64]) -> Option<usize> {
    favorites
        .iter()
        .take(QUICK_SLOTS)
        .position(|&id| id == station_id)
        .map(|slot| slot + 1)
}

fn render_row(
    pos: usize,
    station_idx: usize,
    station: &Station,
    state: &BrowserState,
    prefs: &dyn PreferenceStore,
    width: usize,
) -> ListItem<'static> {
    let under_cursor = pos == state.cursor.position();
    let playing = state.selection == Some(station_idx);
    let favorite = prefs.is_favorite(station.id);

    let cursor_mark = if under_cursor { "▸" } else { " " };
    let play_mark = if playing { "♪" } else { " " };
    let fav_mark = if favorite { "♥" } else { " " };
    let hotkey = hotkey_for(station.id, prefs.favorites())
        .map(|n| format!("[{n}]"))
        .unwrap_or_else(|| "   ".to_string());

    let title_style = if playing {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else if under_cursor {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY)
    };

    let prefix = format!("{}{} {:>3}. ", cursor_mark, play_mark, pos + 1);
    let mut spans = vec![
        Span::styled(
            prefix.clone(),
            Style::default().fg(if under_cursor { C_ACCENT } else { C_MUTED }),
        ),
        Span::styled(fav_mark, Style::default().fg(C_FAVORITE)),
        Span::styled(hotkey.clone(), Style::default().fg(C_NUMBER_HINT)),
        Span::raw(" "),
    ];
    let used = prefix.width() + fav_mark.width() + hotkey.width() + 1;

    let query = state.search.query();
    let title = truncate_to_width(&station.title, width.saturating_sub(used));
    let title_width = title.width();
    spans.extend(highlighted(title, query, title_style));

    let room = width.saturating_sub(used + title_width + 2);
    if room > 1 && !station.tooltip.is_empty() {
        spans.push(Span::raw("  "));
        spans.extend(highlighted(
            truncate_to_width(&station.tooltip, room),
            query,
            Style::default().fg(C_SECONDARY),
        ));
    }

    let item = ListItem::new(Line::from(spans));
    if under_cursor {
        item.style(Style::default().bg(C_SELECTION_BG))
    } else {
        item
    }
}

/// Split `text` into spans with the query occurrences picked out.
fn highlighted(text: String, query: &str, base: Style) -> Vec<Span<'static>> {
    let ranges = match_spans(&text, query);
    if ranges.is_empty() {
        return vec![Span::styled(text, base)];
    }
    let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut at = 0;
    for range in ranges {
        if range.start > at {
            spans.push(Span::styled(text[at..range.start].to_string(), base));
        }
        spans.push(Span::styled(text[range.clone()].to_string(), style_match()));
        at = range.end;
    }
    if at < text.len() {
        spans.push(Span::styled(text[at..].to_string(), base));
    }
    spans
}

/// Cut `text` to at most `max` display columns, ending in "…" when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
