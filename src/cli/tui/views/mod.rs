//! TUI views
//!
//! Every frame is header, optional search bar, the active view and a footer,
//! with the modal dialogs drawn on top.

pub mod kanban;
pub mod list;
pub mod overlay;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, Mode};
use super::theme;
use super::utils::truncate_to_width;
use super::ViewMode;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let searching = matches!(app.mode(), Mode::Search);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                             // Header
            Constraint::Length(if searching { 3 } else { 0 }), // Search bar
            Constraint::Min(3),                                // Content
            Constraint::Length(1),                             // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    if searching {
        draw_search_bar(frame, app, chunks[1]);
    }

    match app.view_mode() {
        ViewMode::List => list::draw(frame, app, chunks[2]),
        ViewMode::Kanban => kanban::draw(frame, app, chunks[2]),
    }

    draw_footer(frame, app, chunks[3]);

    match app.mode() {
        Mode::Form(form) => overlay::draw_form(frame, form),
        Mode::Help => overlay::draw_help(frame),
        Mode::ConfirmDelete(id) => {
            let title = app
                .tasks()
                .iter()
                .find(|t| &t.id == id)
                .map(|t| t.title.as_str())
                .unwrap_or_default();
            overlay::draw_confirm(frame, title);
        }
        Mode::TagInput { input, .. } => overlay::draw_tag_input(frame, input),
        Mode::Normal | Mode::Search => {}
    }
}

/// App name, file path, task count and view tabs
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(format!(" {} ", label), theme::selected_style().fg(theme::ACCENT))
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(theme::MUTED))
        }
    };

    let count = format!(" {} tasks ", app.tasks().len());
    let tabs = [
        tab("List", app.view_mode() == ViewMode::List),
        tab("Kanban", app.view_mode() == ViewMode::Kanban),
    ];
    let fixed: usize = "lazy-todo ".len()
        + count.len()
        + tabs.iter().map(|s| s.content.chars().count()).sum::<usize>();
    let path_width = (area.width as usize).saturating_sub(fixed + 2);
    let path = truncate_to_width(&app.path().display().to_string(), path_width);

    let mut spans = vec![
        Span::styled("lazy-todo ", theme::header_style()),
        Span::styled(path, Style::default().fg(theme::MUTED)),
        Span::raw(count),
    ];
    spans.extend(tabs);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (before, after) = app.search().split_at_cursor();
    let line = Line::from(vec![
        Span::styled("/ ", Style::default().fg(theme::ACCENT)),
        Span::raw(before.to_string()),
        Span::styled("█", Style::default().fg(theme::ACCENT)),
        Span::raw(after.to_string()),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(theme::border_style(true)),
    );
    frame.render_widget(paragraph, area);
}

/// Key hints for the current mode, or the status message if one is showing
fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message() {
        Some(message) => {
            let style = if message.starts_with("Error") || message.starts_with("Failed") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Line::from(Span::styled(message.to_string(), style))
        }
        None => Line::from(Span::styled(
            hints(app).to_string(),
            Style::default().fg(theme::MUTED),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn hints(app: &App) -> &'static str {
    match (app.mode(), app.view_mode()) {
        (Mode::Normal, ViewMode::List) => {
            "j/k:move a:add e:edit d:delete p:priority t:tag 1-4:status g:group /:search Tab:kanban ?:help q:quit"
        }
        (Mode::Normal, ViewMode::Kanban) => {
            "h/l:column j/k:move H/L:move task a:add e:edit g:group /:search Tab:list ?:help q:quit"
        }
        (Mode::Search, _) => "Type to filter  Enter:keep  Esc:clear",
        (Mode::Form(_), _) => "Tab:next field  ←/→:change  Enter:confirm  Esc:cancel",
        (Mode::ConfirmDelete(_), _) => "y:delete  n:cancel",
        (Mode::TagInput { .. }, _) => "Enter:toggle tag  Esc:cancel",
        (Mode::Help, _) => "?/Esc:close",
    }
}
