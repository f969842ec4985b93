//! Kanban view state
//!
//! Four columns, one per status in natural order. Each column is organized
//! and navigated independently; one column is active at a time.

use crate::domain::{GroupBy, Status, Task};

use super::cursor::Cursor;
use super::organize::{organize_column, DisplayItem};

/// Number of kanban columns
pub const COLUMN_COUNT: usize = Status::ALL.len();

/// One status column
#[derive(Debug)]
pub struct KanbanColumn {
    status: Status,
    items: Vec<DisplayItem>,
    cursor: Cursor,
}

impl KanbanColumn {
    fn new(status: Status) -> Self {
        Self {
            status,
            items: Vec::new(),
            cursor: Cursor::default(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor.position()
    }

    /// Number of tasks in the column, headers excluded
    pub fn task_count(&self) -> usize {
        self.items.iter().filter(|i| i.task_index().is_some()).count()
    }

    /// Collection index of the selected task
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor
            .selected(&self.items)
            .and_then(DisplayItem::task_index)
    }
}

#[derive(Debug)]
pub struct KanbanView {
    columns: [KanbanColumn; COLUMN_COUNT],
    active: usize,
    filter: String,
    group_by: GroupBy,
}

impl Default for KanbanView {
    fn default() -> Self {
        Self::new(GroupBy::None)
    }
}

impl KanbanView {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            columns: Status::ALL.map(KanbanColumn::new),
            active: 0,
            filter: String::new(),
            group_by,
        }
    }

    /// Re-partitions the collection into columns and clamps every cursor
    pub fn set_tasks(&mut self, tasks: &[Task]) {
        for column in &mut self.columns {
            column.items = organize_column(tasks, &self.filter, self.group_by, column.status);
            column.cursor.clamp(&column.items);
        }
    }

    /// Applies a new filter, starting every column from the top
    pub fn set_filter(&mut self, filter: &str, tasks: &[Task]) {
        self.filter = filter.to_string();
        for column in &mut self.columns {
            column.cursor.reset();
        }
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
        let column = &mut self.columns[self.active];
        column.cursor.move_up(&column.items);
    }

    pub fn move_down(&mut self) {
        let column = &mut self.columns[self.active];
        column.cursor.move_down(&column.items);
    }

    pub fn move_left(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.active + 1 < COLUMN_COUNT {
            self.active += 1;
        }
    }

    pub fn set_active_column(&mut self, column: usize) {
        self.active = column.min(COLUMN_COUNT - 1);
    }

    /// Activates the column of task `index` and selects it there
    pub fn focus_task(&mut self, tasks: &[Task], index: usize) {
        let Some(task) = tasks.get(index) else {
            return;
        };
        self.set_active_column(task.status.index());
        let column = &mut self.columns[self.active];
        if let Some(pos) = column
            .items
            .iter()
            .position(|item| item.task_index() == Some(index))
        {
            column.cursor.set(pos, &column.items);
        }
    }

    /// Collection index of the selected task in the active column
    pub fn selected_index(&self) -> Option<usize> {
        self.columns[self.active].selected_index()
    }

    pub fn selected_task<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.selected_index().and_then(|i| tasks.get(i))
    }

    /// The selected task re-statused into the column on the left.
    ///
    /// Neither the columns nor the cursor change; the caller persists the
    /// returned task and rebuilds from the fresh collection.
    pub fn move_task_left(&self, tasks: &[Task]) -> Option<Task> {
        let target = self.active.checked_sub(1)?;
        self.restatus_selected(tasks, target)
    }

    /// The selected task re-statused into the column on the right
    pub fn move_task_right(&self, tasks: &[Task]) -> Option<Task> {
        let target = self.active + 1;
        if target >= COLUMN_COUNT {
            return None;
        }
        self.restatus_selected(tasks, target)
    }

    fn restatus_selected(&self, tasks: &[Task], column: usize) -> Option<Task> {
        let mut task = self.selected_task(tasks)?.clone();
        task.status = Status::from_index(column)?;
        Some(task)
    }

    pub fn columns(&self) -> &[KanbanColumn] {
        &self.columns
    }

    pub fn active_column(&self) -> usize {
        self.active
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }
}
