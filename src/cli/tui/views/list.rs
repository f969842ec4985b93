//! List view: every filtered task in one scrolling list

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::App;
use crate::cli::tui::organize::DisplayItem;
use crate::cli::tui::theme;
use crate::cli::tui::utils::{display_width, scroll_offset, truncate_spans};
use crate::domain::{GroupBy, Task};

/// Draw the list view into `area`
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.list();

    let mut title = String::from(" Tasks ");
    if view.group_by() != GroupBy::None {
        title.push_str(&format!("· by {} ", view.group_by().label()));
    }
    if !view.filter().is_empty() {
        title.push_str(&format!("· \"{}\" ", view.filter()));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.items().is_empty() {
        let hint = if app.tasks().is_empty() {
            "No tasks yet. Press 'a' to add one."
        } else {
            "No tasks match the filter."
        };
        let paragraph = Paragraph::new(hint).style(Style::default().fg(theme::MUTED));
        frame.render_widget(paragraph, inner);
        return;
    }

    let visible = inner.height as usize;
    let offset = scroll_offset(view.cursor(), visible);
    let width = inner.width as usize;

    let lines: Vec<Line> = view
        .items()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(pos, item)| match item {
            DisplayItem::Header { .. } => header_line(item, width),
            DisplayItem::Task(index) => match app.tasks().get(*index) {
                Some(task) => {
                    let line = task_line(task, width);
                    if pos == view.cursor() {
                        line.style(theme::selected_style())
                    } else {
                        line
                    }
                }
                None => Line::default(),
            },
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn header_line(item: &DisplayItem, width: usize) -> Line<'static> {
    let title = item.header_title().unwrap_or_default();
    let spans = vec![Span::styled(format!("▸ {}", title), theme::header_style())];
    Line::from(truncate_spans(spans, width))
}

/// Priority glyph, status glyph, title and tags on the left; the status label
/// right-aligned. The left part is cut first when the row is too narrow.
pub fn task_line(task: &Task, width: usize) -> Line<'static> {
    let mut left = vec![
        Span::styled(
            format!(" {} ", theme::priority_glyph(task.priority)),
            theme::priority_style(task.priority),
        ),
        Span::styled(
            format!("{} ", theme::status_glyph(task.status)),
            theme::status_style(task.status),
        ),
        Span::styled(task.title.clone(), theme::title_style(task.status)),
    ];
    for tag in &task.tags {
        left.push(Span::styled(format!(" #{}", tag), theme::tag_style()));
    }

    let label = format!(" {} ", task.status.label());
    let label_width = display_width(&label);
    if width <= label_width {
        return Line::from(truncate_spans(left, width));
    }

    let left = truncate_spans(left, width - label_width);
    let used: usize = left.iter().map(|s| display_width(&s.content)).sum();
    let padding = width - label_width - used;

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(label, theme::status_style(task.status)));
    Line::from(spans)
}
