//! Flat list view state: one organized sequence and one cursor over the
//! whole filtered task collection

use crate::domain::{GroupBy, Task};

use super::cursor::Cursor;
use super::organize::{organize, DisplayItem};

#[derive(Debug, Default)]
pub struct ListView {
    filter: String,
    group_by: GroupBy,
    items: Vec<DisplayItem>,
    cursor: Cursor,
}

impl ListView {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            ..Self::default()
        }
    }

    /// Rebuilds the organized sequence after the collection changed
    pub fn set_tasks(&mut self, tasks: &[Task]) {
        self.items = organize(tasks, &self.filter, self.group_by);
        self.cursor.clamp(&self.items);
    }

    /// Applies a new filter, starting the selection from the top
    pub fn set_filter(&mut self, filter: &str, tasks: &[Task]) {
        self.filter = filter.to_string();
        self.cursor.reset();
        self.set_tasks(tasks);
    }

    pub fn set_group_by(&mut self, group_by: GroupBy, tasks: &[Task]) {
        self.group_by = group_by;
        self.set_tasks(tasks);
    }

    pub fn cycle_group_by(&mut self, tasks: &[Task]) {
        self.set_group_by(self.group_by.next(), tasks);
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up(&self.items);
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down(&self.items);
    }

    /// Index of the selected task in the collection
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor
            .selected(&self.items)
            .and_then(DisplayItem::task_index)
    }

    pub fn selected_task<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.selected_index().and_then(|i| tasks.get(i))
    }

    /// Moves the cursor onto the row showing collection index `index`, if visible
    pub fn select_task(&mut self, index: usize) {
        if let Some(pos) = self
            .items
            .iter()
            .position(|item| item.task_index() == Some(index))
        {
            self.cursor.set(pos, &self.items);
        }
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor.position()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }
}
