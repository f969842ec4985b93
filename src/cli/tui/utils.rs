//! Shared utilities for TUI views

use ratatui::layout::Rect;
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Display width of a string in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_width` terminal cells, ending in `…`
/// if anything was cut
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    cut_with_ellipsis(s, max_width)
}

/// Keeps as much of `s` as fits in `max_width - 1` cells and appends `…`
fn cut_with_ellipsis(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push(ELLIPSIS);
    result
}

/// Truncate a run of styled spans to `max_width` cells as a whole.
///
/// Spans past the cut are dropped and the span that crosses it is shortened
/// with a trailing `…` in its own style.
pub fn truncate_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Span<'static>> {
    let total: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if total <= max_width {
        return spans;
    }

    let mut remaining = max_width;
    let mut result = Vec::new();
    for span in spans {
        let w = display_width(&span.content);
        // Leave one cell for the ellipsis
        if w < remaining {
            remaining -= w;
            result.push(span);
            continue;
        }
        let cut = cut_with_ellipsis(&span.content, remaining);
        if !cut.is_empty() {
            result.push(Span::styled(cut, span.style));
        }
        break;
    }
    result
}

/// First visible row so that `cursor` is inside a window of `visible` rows.
///
/// The window stays at the top until the cursor passes the last row, then
/// tracks it so the cursor sits on the last visible row.
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 || cursor < visible {
        0
    } else {
        cursor + 1 - visible
    }
}

/// A rectangle of at most `width` x `height` centred in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
