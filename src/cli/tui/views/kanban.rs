//! Kanban view: one column per status

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::App;
use crate::cli::tui::kanban::{KanbanColumn, COLUMN_COUNT};
use crate::cli::tui::organize::DisplayItem;
use crate::cli::tui::theme;
use crate::cli::tui::utils::{scroll_offset, truncate_spans, truncate_to_width};
use crate::domain::Task;

/// Tags shown on a card before the rest collapse into `…`
const MAX_CARD_TAGS: usize = 2;

/// Draw the kanban board into `area`
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.kanban();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, COLUMN_COUNT as u32); COLUMN_COUNT])
        .split(area);

    for (i, column) in view.columns().iter().enumerate() {
        draw_column(frame, app, column, i == view.active_column(), columns[i]);
    }
}

fn draw_column(frame: &mut Frame, app: &App, column: &KanbanColumn, active: bool, area: Rect) {
    let status = column.status();
    let title = format!(" {} ({}) ", status.label(), column.task_count());
    let border = if active {
        theme::border_style(true)
    } else {
        Style::default().fg(theme::status_color(status))
    };

    let block = Block::default()
        .title(Span::styled(title, theme::status_style(status).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    // Cards take two rows
    let capacity = (inner.height as usize / 2).max(1);
    let offset = scroll_offset(column.cursor(), capacity);

    let mut lines: Vec<Line> = Vec::new();
    for (pos, item) in column.items().iter().enumerate().skip(offset) {
        if lines.len() + 1 > inner.height as usize {
            break;
        }
        match item {
            DisplayItem::Header { .. } => {
                let title = item.header_title().unwrap_or_default();
                lines.push(Line::from(Span::styled(
                    truncate_to_width(&format!("▸ {}", title), width),
                    theme::header_style(),
                )));
            }
            DisplayItem::Task(index) => {
                let Some(task) = app.tasks().get(*index) else {
                    continue;
                };
                let selected = active && pos == column.cursor();
                for line in card_lines(task, width) {
                    lines.push(if selected {
                        line.style(theme::selected_style())
                    } else {
                        line
                    });
                }
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Glyph and title on the first row, up to two tags on the second
pub fn card_lines(task: &Task, width: usize) -> [Line<'static>; 2] {
    let title = vec![
        Span::styled(
            format!("{} ", theme::priority_glyph(task.priority)),
            theme::priority_style(task.priority),
        ),
        Span::styled(task.title.clone(), theme::title_style(task.status)),
    ];

    let mut tags: Vec<String> = task
        .tags
        .iter()
        .take(MAX_CARD_TAGS)
        .map(|t| format!("#{}", t))
        .collect();
    if task.tags.len() > MAX_CARD_TAGS {
        tags.push("…".to_string());
    }
    let tags = vec![Span::styled(format!("  {}", tags.join(" ")), theme::tag_style())];

    [
        Line::from(truncate_spans(title, width)),
        Line::from(truncate_spans(tags, width)),
    ]
}
