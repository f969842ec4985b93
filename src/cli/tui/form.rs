//! Create/edit task form
//!
//! The form holds an in-progress draft only. Nothing reaches the task
//! collection until the draft is turned into a task and sent to storage.

use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::{parse_tags, Priority, Status, Task, TaskError};

use super::input::{TextInput, DESCRIPTION_LIMIT, TAGS_LIMIT, TITLE_LIMIT};

/// Focusable form controls, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Tags,
    Priority,
    Status,
    Submit,
    Cancel,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Tags,
            FormField::Tags => FormField::Priority,
            FormField::Priority => FormField::Status,
            FormField::Status => FormField::Submit,
            FormField::Submit => FormField::Cancel,
            FormField::Cancel => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Cancel,
            FormField::Description => FormField::Title,
            FormField::Tags => FormField::Description,
            FormField::Priority => FormField::Tags,
            FormField::Status => FormField::Priority,
            FormField::Submit => FormField::Status,
            FormField::Cancel => FormField::Submit,
        }
    }
}

/// What a key did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Keep editing
    None,
    /// Submit a valid draft
    Submit,
    /// Discard the draft
    Cancel,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    /// Task being edited; `None` when creating
    original: Option<Task>,
    pub title: TextInput,
    pub description: TextInput,
    pub tags: TextInput,
    pub priority: Priority,
    pub status: Status,
    pub focus: FormField,
}

impl TaskForm {
    /// Empty form for a new task
    pub fn create() -> Self {
        Self {
            original: None,
            title: TextInput::new(TITLE_LIMIT),
            description: TextInput::new(DESCRIPTION_LIMIT),
            tags: TextInput::new(TAGS_LIMIT),
            priority: Priority::default(),
            status: Status::default(),
            focus: FormField::Title,
        }
    }

    /// Form pre-populated from an existing task
    pub fn edit(task: &Task) -> Self {
        Self {
            original: Some(task.clone()),
            title: TextInput::with_value(&task.title, TITLE_LIMIT),
            description: TextInput::with_value(&task.description, DESCRIPTION_LIMIT),
            tags: TextInput::with_value(&task.tags.join(", "), TAGS_LIMIT),
            priority: task.priority,
            status: task.status,
            focus: FormField::Title,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    /// A draft is valid when its trimmed title is non-empty
    pub fn is_valid(&self) -> bool {
        !self.title.value().trim().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                FormField::Submit if self.is_valid() => return FormAction::Submit,
                FormField::Cancel => return FormAction::Cancel,
                FormField::Submit => {}
                _ => self.focus = self.focus.next(),
            },
            KeyCode::Left | KeyCode::Right => self.step(key.code == KeyCode::Right, key),
            _ => {
                if let Some(input) = self.focused_input() {
                    input.handle_key(key);
                }
            }
        }
        FormAction::None
    }

    /// Left/Right step the enum fields (clamped) or move the text cursor
    fn step(&mut self, forward: bool, key: KeyEvent) {
        match self.focus {
            FormField::Priority => {
                self.priority = Priority::ALL[step_index(self.priority.index(), forward)];
            }
            FormField::Status => {
                self.status = Status::ALL[step_index(self.status.index(), forward)];
            }
            _ => {
                if let Some(input) = self.focused_input() {
                    input.handle_key(key);
                }
            }
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Tags => Some(&mut self.tags),
            _ => None,
        }
    }

    /// Builds the task to persist from the draft
    pub fn to_task(&self) -> Result<Task, TaskError> {
        let title = self.title.value().trim();
        let mut task = match &self.original {
            Some(original) => {
                if title.is_empty() {
                    return Err(TaskError::EmptyTitle);
                }
                let mut task = original.clone();
                task.title = title.to_string();
                task
            }
            None => Task::new(title)?,
        };
        task.description = self.description.value().trim().to_string();
        task.tags = parse_tags(self.tags.value());
        task.priority = self.priority;
        task.status = self.status;
        Ok(task)
    }
}

/// Steps an index into a four-value enum, clamped at both ends
fn step_index(index: usize, forward: bool) -> usize {
    if forward {
        (index + 1).min(3)
    } else {
        index.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn focus(form: &mut TaskForm, field: FormField) {
        while form.focus != field {
            form.handle_key(key(KeyCode::Tab));
        }
    }

    #[test]
    fn tab_cycles_all_fields_and_wraps() {
        let mut form = TaskForm::create();
        let mut seen = vec![form.focus];
        for _ in 0..7 {
            form.handle_key(key(KeyCode::Tab));
            seen.push(form.focus);
        }
        assert_eq!(
            seen,
            vec![
                FormField::Title,
                FormField::Description,
                FormField::Tags,
                FormField::Priority,
                FormField::Status,
                FormField::Submit,
                FormField::Cancel,
                FormField::Title,
            ]
        );

        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, FormField::Cancel);
    }

    #[test]
    fn priority_and_status_clamp() {
        let mut form = TaskForm::create();
        focus(&mut form, FormField::Priority);
        for _ in 0..5 {
            form.handle_key(key(KeyCode::Right));
        }
        assert_eq!(form.priority, Priority::Critical);
        for _ in 0..5 {
            form.handle_key(key(KeyCode::Left));
        }
        assert_eq!(form.priority, Priority::Low);

        focus(&mut form, FormField::Status);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.status, Status::Todo);
        form.handle_key(key(KeyCode::Right));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.status, Status::Blocked);
    }

    #[test]
    fn empty_title_blocks_submit() {
        let mut form = TaskForm::create();
        type_str(&mut form, "   ");
        focus(&mut form, FormField::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        assert_eq!(form.focus, FormField::Submit);
        assert!(form.to_task().is_err());
    }

    #[test]
    fn submit_builds_new_task() {
        let mut form = TaskForm::create();
        type_str(&mut form, "  Buy milk ");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "two litres");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "home, errand, home,");
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Right));
        focus(&mut form, FormField::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);

        let task = form.to_task().unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "two litres");
        assert_eq!(task.tags, vec!["home", "errand"]);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::Todo);
    }

    #[test]
    fn edit_keeps_identity() {
        let mut original = Task::new("Old").unwrap();
        original.tags = vec!["a".to_string(), "b".to_string()];
        original.status = Status::Blocked;

        let mut form = TaskForm::edit(&original);
        assert!(form.is_edit());
        assert_eq!(form.tags.value(), "a, b");
        type_str(&mut form, " title");

        let task = form.to_task().unwrap();
        assert_eq!(task.id, original.id);
        assert_eq!(task.created_at, original.created_at);
        assert_eq!(task.title, "Old title");
        assert_eq!(task.status, Status::Blocked);
    }

    #[test]
    fn enter_on_text_field_advances() {
        let mut form = TaskForm::create();
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.focus, FormField::Description);
    }

    #[test]
    fn cancel_and_escape() {
        let mut form = TaskForm::create();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
        focus(&mut form, FormField::Cancel);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Cancel);
    }
}
