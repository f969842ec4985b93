//! Modal dialogs drawn over the active view

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::cli::tui::form::{FormField, TaskForm};
use crate::cli::tui::input::TextInput;
use crate::cli::tui::theme;
use crate::cli::tui::utils::{centered_rect, truncate_to_width};
use crate::domain::{Priority, Status};

/// Key bindings listed in the help dialog
const KEY_BINDINGS: &[(&str, &str)] = &[
    ("j/k ↑/↓", "Move selection"),
    ("h/l ←/→", "Switch column (kanban)"),
    ("H/L", "Move task to adjacent column (kanban)"),
    ("a", "Add task"),
    ("e/Enter", "Edit task"),
    ("d/Del", "Delete task"),
    ("p", "Cycle priority"),
    ("t", "Toggle tag"),
    ("1-4", "Set status"),
    ("g", "Cycle grouping"),
    ("/", "Search"),
    ("Tab", "Toggle list/kanban"),
    ("r", "Reload from disk"),
    ("o", "Open task file in editor"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];

fn dialog(frame: &mut Frame, title: &str, width: u16, height: u16) -> Rect {
    let area = centered_rect(width, height, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(theme::border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub fn draw_help(frame: &mut Frame) {
    let inner = dialog(frame, "Help", 56, KEY_BINDINGS.len() as u16 + 2);
    let lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<10}", keys), Style::default().fg(theme::ACCENT)),
                Span::raw(*action),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn draw_confirm(frame: &mut Frame, title: &str) {
    let inner = dialog(frame, "Delete task", 50, 5);
    let width = inner.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(format!("Delete \"{}\"?", truncate_to_width(title, width.saturating_sub(10)))),
        Line::default(),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" yes   "),
            Span::styled("n", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" no"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

pub fn draw_tag_input(frame: &mut Frame, input: &TextInput) {
    let inner = dialog(frame, "Toggle tag", 40, 3);
    let mut line = input_line(input, true);
    if input.is_empty() {
        line.spans.push(Span::styled(" tag name", Style::default().fg(theme::MUTED)));
    }
    frame.render_widget(Paragraph::new(line), inner);
}

pub fn draw_form(frame: &mut Frame, form: &TaskForm) {
    let title = if form.is_edit() { "Edit task" } else { "New task" };
    let inner = dialog(frame, title, 64, 14);

    let label = |text: &'static str, field: FormField| {
        let style = if form.focus == field {
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::MUTED)
        };
        Span::styled(format!("{:<13}", text), style)
    };

    let text_row = |text: &'static str, field: FormField, input: &TextInput| {
        let mut spans = vec![label(text, field)];
        spans.extend(input_line(input, form.focus == field).spans);
        Line::from(spans)
    };

    let priority = Priority::ALL
        .iter()
        .map(|p| choice(p.label(), *p == form.priority, theme::priority_style(*p)));
    let status = Status::ALL
        .iter()
        .map(|s| choice(s.label(), *s == form.status, theme::status_style(*s)));

    let button = |text: &'static str, field: FormField| {
        if form.focus == field {
            Span::styled(format!("[ {} ]", text), theme::selected_style().fg(theme::ACCENT))
        } else {
            Span::raw(format!("[ {} ]", text))
        }
    };

    let mut lines = vec![
        text_row("Title", FormField::Title, &form.title),
        Line::default(),
        text_row("Description", FormField::Description, &form.description),
        Line::default(),
        text_row("Tags", FormField::Tags, &form.tags),
        Line::default(),
        Line::from(std::iter::once(label("Priority", FormField::Priority)).chain(priority).collect::<Vec<_>>()),
        Line::from(std::iter::once(label("Status", FormField::Status)).chain(status).collect::<Vec<_>>()),
        Line::default(),
        Line::from(vec![
            button("Submit", FormField::Submit),
            Span::raw("  "),
            button("Cancel", FormField::Cancel),
        ]),
    ];
    if !form.is_valid() {
        lines.push(Line::from(Span::styled(
            "Title is required",
            Style::default().fg(theme::MUTED),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn choice(label: &'static str, selected: bool, style: Style) -> Span<'static> {
    if selected {
        Span::styled(format!("‹{}› ", label), style.add_modifier(Modifier::BOLD | Modifier::REVERSED))
    } else {
        Span::styled(format!(" {}  ", label), Style::default().fg(theme::MUTED))
    }
}

/// Input text with a block cursor when focused
fn input_line(input: &TextInput, focused: bool) -> Line<'static> {
    if !focused {
        return Line::from(input.value().to_string());
    }
    let (before, after) = input.split_at_cursor();
    Line::from(vec![
        Span::raw(before.to_string()),
        Span::styled("█", Style::default().fg(theme::ACCENT)),
        Span::raw(after.to_string()),
    ])
}
