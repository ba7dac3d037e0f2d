//! Color palette and style constants for the Record browser.

use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(255, 102, 0); // Record orange
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(40, 30, 24);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_MATCH_BG: Color = Color::Rgb(90, 60, 0);
pub const C_FAVORITE: Color = Color::Rgb(255, 95, 135);
pub const C_LINK: Color = Color::Rgb(80, 140, 200);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_SEARCH: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_HELP: Color = Color::Rgb(255, 102, 0);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_match() -> Style {
    Style::default().bg(C_MATCH_BG).fg(C_FILTER_FG)
}

pub fn style_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
