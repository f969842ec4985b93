//! Glyphs and styles for priorities, statuses and chrome

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{Priority, Status};

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const SELECTED_BG: Color = Color::Rgb(49, 50, 68);

pub fn priority_glyph(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "○",
        Priority::Medium => "◐",
        Priority::High => "●",
        Priority::Critical => "◉",
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Blue,
        Priority::Medium => Color::Green,
        Priority::High => Color::Yellow,
        Priority::Critical => Color::Red,
    }
}

pub fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::Todo => "☐",
        Status::InProgress => "◷",
        Status::Blocked => "⊘",
        Status::Done => "☑",
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::White,
        Status::InProgress => Color::Yellow,
        Status::Blocked => Color::Red,
        Status::Done => Color::DarkGray,
    }
}

pub fn priority_style(priority: Priority) -> Style {
    Style::default().fg(priority_color(priority))
}

pub fn status_style(status: Status) -> Style {
    Style::default().fg(status_color(status))
}

/// Title style; done tasks are dimmed and struck through
pub fn title_style(status: Status) -> Style {
    match status {
        Status::Done => Style::default()
            .fg(MUTED)
            .add_modifier(Modifier::CROSSED_OUT),
        _ => Style::default(),
    }
}

pub fn header_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tag_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub fn selected_style() -> Style {
    Style::default().bg(SELECTED_BG).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}
