//! Filtering and grouping of the task collection into displayable items
//!
//! The output is a pure function of (tasks, filter, grouping): task references
//! interleaved with group headers. Headers only appear in front of a group with
//! at least one member.
//!
//! Group order:
//! - `Status` / `Priority`: fixed natural order, restricted to present groups
//! - `Tag`: first-seen order of each task's *first* tag while scanning the
//!   filtered tasks in collection order; untagged tasks share one group

use crate::domain::{GroupBy, Priority, Status, Task};

use super::cursor::Selectable;

/// Label of the group holding tasks without tags
pub const NO_TAG_LABEL: &str = "No tag";

/// One row of an organized view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    /// Non-selectable group header
    Header { label: String, count: usize },
    /// Index into the task collection
    Task(usize),
}

impl DisplayItem {
    /// Index into the task collection, if this is a task row
    pub fn task_index(&self) -> Option<usize> {
        match self {
            DisplayItem::Task(index) => Some(*index),
            DisplayItem::Header { .. } => None,
        }
    }

    /// Header text including the member count, e.g. `Todo (2)`
    pub fn header_title(&self) -> Option<String> {
        match self {
            DisplayItem::Header { label, count } => Some(format!("{} ({})", label, count)),
            DisplayItem::Task(_) => None,
        }
    }
}

impl Selectable for DisplayItem {
    fn is_selectable(&self) -> bool {
        matches!(self, DisplayItem::Task(_))
    }
}

/// Organizes the whole collection for the list view
pub fn organize(tasks: &[Task], filter: &str, group_by: GroupBy) -> Vec<DisplayItem> {
    let passing = filter_indices(tasks, filter, |_| true);
    group(tasks, &passing, group_by)
}

/// Organizes the tasks of one kanban column.
///
/// Status grouping is meaningless inside a column and degrades to no grouping.
pub fn organize_column(
    tasks: &[Task],
    filter: &str,
    group_by: GroupBy,
    status: Status,
) -> Vec<DisplayItem> {
    let passing = filter_indices(tasks, filter, |t| t.status == status);
    let group_by = match group_by {
        GroupBy::Status => GroupBy::None,
        other => other,
    };
    group(tasks, &passing, group_by)
}

/// Indices of tasks matching the filter (case-insensitive) and `keep`
fn filter_indices(tasks: &[Task], filter: &str, keep: impl Fn(&Task) -> bool) -> Vec<usize> {
    let needle = filter.to_lowercase();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| keep(t) && t.matches(&needle))
        .map(|(i, _)| i)
        .collect()
}

fn group(tasks: &[Task], passing: &[usize], group_by: GroupBy) -> Vec<DisplayItem> {
    match group_by {
        GroupBy::None => passing.iter().map(|&i| DisplayItem::Task(i)).collect(),
        GroupBy::Status => {
            let groups = Status::ALL.iter().map(|&status| {
                let members = members_where(tasks, passing, |t| t.status == status);
                (status.label().to_string(), members)
            });
            emit(groups)
        }
        GroupBy::Priority => {
            let groups = Priority::ALL.iter().map(|&priority| {
                let members = members_where(tasks, passing, |t| t.priority == priority);
                (priority.label().to_string(), members)
            });
            emit(groups)
        }
        GroupBy::Tag => {
            let mut groups: Vec<(Option<&str>, Vec<usize>)> = Vec::new();
            for &i in passing {
                let key = tasks[i].primary_tag();
                match groups.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, members)) => members.push(i),
                    None => groups.push((key, vec![i])),
                }
            }
            emit(groups.into_iter().map(|(key, members)| {
                (key.unwrap_or(NO_TAG_LABEL).to_string(), members)
            }))
        }
    }
}

fn members_where(tasks: &[Task], passing: &[usize], pred: impl Fn(&Task) -> bool) -> Vec<usize> {
    passing.iter().copied().filter(|&i| pred(&tasks[i])).collect()
}

/// Flattens groups into header + members, skipping empty groups
fn emit(groups: impl Iterator<Item = (String, Vec<usize>)>) -> Vec<DisplayItem> {
    let mut items = Vec::new();
    for (label, members) in groups {
        if members.is_empty() {
            continue;
        }
        items.push(DisplayItem::Header {
            label,
            count: members.len(),
        });
        items.extend(members.into_iter().map(DisplayItem::Task));
    }
    items
}
