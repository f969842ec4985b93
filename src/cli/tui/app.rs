//! TUI application state and the modal key handling

use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{Event, EventHandler};
use super::form::{FormAction, TaskForm};
use super::input::{TextInput, SEARCH_LIMIT, TAG_LIMIT};
use super::kanban::KanbanView;
use super::list::ListView;
use super::ui::{self, Terminal};
use super::views;
use super::worker::Command;
use super::{TuiOptions, ViewMode};
use crate::domain::{Status, Task, TaskId};
use crate::storage::Repository;

/// Interaction mode; each variant carries the state only that mode needs
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    Form(Box<TaskForm>),
    Help,
    Search,
    ConfirmDelete(TaskId),
    TagInput { id: TaskId, input: TextInput },
}

/// Application state
pub struct App {
    /// Storage, used directly only for the editor handoff
    repo: Arc<dyn Repository>,

    /// Queue to the storage worker
    commands: Sender<Command>,

    /// Last collection received from storage
    tasks: Vec<Task>,

    list: ListView,
    kanban: KanbanView,
    view_mode: ViewMode,
    mode: Mode,

    /// Search text, shared by both views
    search: TextInput,

    /// Status message and when it was set
    status_message: Option<(String, Instant)>,
    message_timeout: Duration,

    should_quit: bool,

    /// Open the task file in the editor before the next frame
    pending_edit: bool,
}

impl App {
    pub fn new(repo: Arc<dyn Repository>, commands: Sender<Command>, options: &TuiOptions) -> Self {
        Self {
            repo,
            commands,
            tasks: Vec::new(),
            list: ListView::new(options.group_by),
            kanban: KanbanView::new(options.group_by),
            view_mode: options.view_mode,
            mode: Mode::Normal,
            search: TextInput::new(SEARCH_LIMIT),
            status_message: None,
            message_timeout: options.message_timeout,
            should_quit: false,
            pending_edit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        self.send(Command::Load);

        while !self.should_quit() {
            if self.pending_edit {
                self.pending_edit = false;
                self.execute_editor(terminal, events)?;
                continue;
            }

            terminal.draw(|frame| views::draw(frame, self))?;

            let event = events.next()?;
            self.handle_event(event);
        }

        Ok(())
    }

    /// Hands the terminal to the editor, then reloads whatever it left behind
    fn execute_editor(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        events.pause();
        ui::restore_terminal()?;

        let result = self.repo.open_in_editor();

        // Reinitialize terminal regardless of editor result
        *terminal = ui::init_terminal()?;
        events.resume();

        if let Err(e) = result {
            self.set_status(format!("Failed to open editor: {}", e));
        }
        self.send(Command::Load);

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Loaded(tasks) => self.set_tasks(tasks),
            Event::StorageFailed(message) => self.set_status(format!("Error: {}", message)),
            Event::Tick => self.expire_status(),
            Event::Resize(_, _) => {} // Terminal handles resize automatically
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Form(_) => self.handle_form_key(key),
            Mode::Help => self.handle_help_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::ConfirmDelete(_) => self.handle_confirm_key(key),
            Mode::TagInput { .. } => self.handle_tag_key(key),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            // Quit
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),

            // Kanban: move the task between columns
            KeyCode::Char('H') => self.move_task(false),
            KeyCode::Char('L') => self.move_task(true),
            KeyCode::Left if shift => self.move_task(false),
            KeyCode::Right if shift => self.move_task(true),

            // Kanban: switch columns
            KeyCode::Char('h') | KeyCode::Left => {
                if self.view_mode == ViewMode::Kanban {
                    self.kanban.move_left();
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.view_mode == ViewMode::Kanban {
                    self.kanban.move_right();
                }
            }

            // Task actions
            KeyCode::Char('a') => self.mode = Mode::Form(Box::new(TaskForm::create())),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::Form(Box::new(TaskForm::edit(task)));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::ConfirmDelete(task.id.clone());
                }
            }
            KeyCode::Char('p') => {
                if let Some(task) = self.selected_task() {
                    self.send(Command::CyclePriority(task.id.clone()));
                }
            }
            KeyCode::Char('t') => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::TagInput {
                        id: task.id.clone(),
                        input: TextInput::new(TAG_LIMIT),
                    };
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let status = c
                    .to_digit(10)
                    .and_then(|d| Status::from_index(d as usize - 1));
                if let (Some(status), Some(task)) = (status, self.selected_task()) {
                    self.send(Command::SetStatus(task.id.clone(), status));
                }
            }

            // Views
            KeyCode::Tab => self.toggle_view(),
            KeyCode::Char('g') => match self.view_mode {
                ViewMode::List => self.list.cycle_group_by(&self.tasks),
                ViewMode::Kanban => self.kanban.cycle_group_by(&self.tasks),
            },

            KeyCode::Char('/') => {
                self.search.clear();
                self.apply_filter();
                self.mode = Mode::Search;
            }
            KeyCode::Char('?') => self.mode = Mode::Help,
            KeyCode::Char('r') => self.send(Command::Load),
            KeyCode::Char('o') => self.pending_edit = true,

            _ => {}
        }
    }

    /// Handle keys in the task form
    fn handle_form_key(&mut self, key: KeyEvent) {
        let Mode::Form(form) = &mut self.mode else {
            return;
        };

        match form.handle_key(key) {
            FormAction::None => {}
            FormAction::Cancel => self.mode = Mode::Normal,
            FormAction::Submit => {
                let command = match form.to_task() {
                    Ok(task) if form.is_edit() => Command::Update(task),
                    Ok(task) => Command::Add(task),
                    Err(_) => return,
                };
                self.mode = Mode::Normal;
                self.send(command);
            }
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
            self.mode = Mode::Normal;
        }
    }

    /// Handle keys in search mode; the filter follows every edit
    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search.clear();
                self.apply_filter();
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => self.mode = Mode::Normal,
            _ => {
                if self.search.handle_key(key) {
                    self.apply_filter();
                }
            }
        }
    }

    /// Handle keys in the delete confirmation
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Mode::ConfirmDelete(id) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    self.send(Command::Delete(id));
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
    }

    /// Handle keys in the tag prompt
    fn handle_tag_key(&mut self, key: KeyEvent) {
        let Mode::TagInput { id, input } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let tag = input.value().trim().to_string();
                let id = id.clone();
                self.mode = Mode::Normal;

                if !tag.is_empty() {
                    self.send(Command::ToggleTag(id, tag));
                }
            }
            // Commas separate tags in the form's tag field
            KeyCode::Char(',') => {}
            _ => {
                input.handle_key(key);
            }
        }
    }

    fn move_down(&mut self) {
        match self.view_mode {
            ViewMode::List => self.list.move_down(),
            ViewMode::Kanban => self.kanban.move_down(),
        }
    }

    fn move_up(&mut self) {
        match self.view_mode {
            ViewMode::List => self.list.move_up(),
            ViewMode::Kanban => self.kanban.move_up(),
        }
    }

    /// Moves the selected kanban card one column; no-op in the list view
    fn move_task(&mut self, right: bool) {
        if self.view_mode != ViewMode::Kanban {
            return;
        }
        let moved = if right {
            self.kanban.move_task_right(&self.tasks)
        } else {
            self.kanban.move_task_left(&self.tasks)
        };
        if let Some(task) = moved {
            self.send(Command::MoveTask { id: task.id, right });
        }
    }

    /// Switches views, carrying the selected task across
    fn toggle_view(&mut self) {
        let selected = self.selected_index();
        self.view_mode = match self.view_mode {
            ViewMode::List => {
                if let Some(index) = selected {
                    self.kanban.focus_task(&self.tasks, index);
                }
                ViewMode::Kanban
            }
            ViewMode::Kanban => {
                if let Some(index) = selected {
                    self.list.select_task(index);
                }
                ViewMode::List
            }
        };
    }

    fn apply_filter(&mut self) {
        self.list.set_filter(self.search.value(), &self.tasks);
        self.kanban.set_filter(self.search.value(), &self.tasks);
    }

    /// Replaces the collection and rebuilds both views
    fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.list.set_tasks(&self.tasks);
        self.kanban.set_tasks(&self.tasks);
    }

    fn send(&mut self, command: Command) {
        if self.commands.send(command).is_err() {
            self.set_status("Error: storage worker stopped".to_string());
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    fn expire_status(&mut self) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() >= self.message_timeout {
                self.status_message = None;
            }
        }
    }

    fn selected_index(&self) -> Option<usize> {
        match self.view_mode {
            ViewMode::List => self.list.selected_index(),
            ViewMode::Kanban => self.kanban.selected_index(),
        }
    }

    // Accessors for views

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_index().and_then(|i| self.tasks.get(i))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn kanban(&self) -> &KanbanView {
        &self.kanban
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn search(&self) -> &TextInput {
        &self.search
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupBy, Priority};
    use crate::cli::tui::worker;
    use crate::storage::YamlStore;
    use std::sync::mpsc::{self, Receiver};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn char_key(c: char) -> Event {
        key(KeyCode::Char(c))
    }

    fn app_with(tasks: Vec<Task>, view_mode: ViewMode) -> (App, Receiver<Command>) {
        let (tx, rx) = mpsc::channel();
        let repo: Arc<dyn Repository> = Arc::new(YamlStore::new("unused-tasks.yaml"));
        let options = TuiOptions {
            view_mode,
            group_by: GroupBy::None,
            tick_rate_ms: 250,
            message_timeout: Duration::from_secs(3),
        };
        let mut app = App::new(repo, tx, &options);
        app.handle_event(Event::Loaded(tasks));
        (app, rx)
    }

    fn task(title: &str, status: Status) -> Task {
        let mut t = Task::new(title).unwrap();
        t.status = status;
        t
    }

    fn sample() -> Vec<Task> {
        vec![
            task("alpha", Status::Todo),
            task("beta", Status::InProgress),
            task("gamma", Status::Done),
        ]
    }

    fn updated(rx: &Receiver<Command>) -> Task {
        match rx.try_recv() {
            Ok(Command::Update(task)) => task,
            other => panic!("expected Update, got {:?}", other),
        }
    }

    /// Runs every queued command against a real store, returning the last collection
    fn drain(rx: &Receiver<Command>, repo: &YamlStore) -> Vec<Task> {
        let mut tasks = repo.load().unwrap();
        while let Ok(command) = rx.try_recv() {
            match worker::execute(repo, command) {
                Event::Loaded(fresh) => tasks = fresh,
                other => panic!("expected Loaded, got {:?}", other),
            }
        }
        tasks
    }

    fn store_with(tasks: &[Task]) -> (TempDir, YamlStore) {
        let dir = TempDir::new().unwrap();
        let repo = YamlStore::new(dir.path().join("tasks.yaml"));
        for task in tasks {
            repo.add_task(task.clone()).unwrap();
        }
        (dir, repo)
    }

    #[test]
    fn quit_only_from_normal() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('?'));
        app.handle_event(char_key('q'));
        assert!(matches!(app.mode(), Mode::Normal));
        assert!(!app.should_quit());

        app.handle_event(char_key('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn cycle_priority_four_times_returns_to_low() {
        let mut start = task("alpha", Status::Todo);
        start.priority = Priority::Low;
        let (_dir, repo) = store_with(&[start.clone()]);
        let (mut app, rx) = app_with(vec![start], ViewMode::List);

        let mut seen = Vec::new();
        for _ in 0..4 {
            app.handle_event(char_key('p'));
            let tasks = drain(&rx, &repo);
            seen.push(tasks[0].priority);
            app.handle_event(Event::Loaded(tasks));
        }
        assert_eq!(
            seen,
            vec![Priority::Medium, Priority::High, Priority::Critical, Priority::Low]
        );
    }

    #[test]
    fn priority_presses_before_reload_compose() {
        let mut start = task("alpha", Status::Todo);
        start.priority = Priority::Low;
        let (_dir, repo) = store_with(&[start.clone()]);
        let (mut app, rx) = app_with(vec![start], ViewMode::List);

        for _ in 0..4 {
            app.handle_event(char_key('p'));
        }
        assert_eq!(drain(&rx, &repo)[0].priority, Priority::Low);

        for _ in 0..2 {
            app.handle_event(char_key('p'));
        }
        assert_eq!(drain(&rx, &repo)[0].priority, Priority::High);
    }

    #[test]
    fn kanban_moves_before_reload_compose() {
        let start = task("alpha", Status::Todo);
        let (_dir, repo) = store_with(&[start.clone()]);
        let (mut app, rx) = app_with(vec![start], ViewMode::Kanban);

        app.handle_event(char_key('L'));
        app.handle_event(char_key('L'));
        assert_eq!(drain(&rx, &repo)[0].status, Status::Blocked);
    }

    #[test]
    fn quick_status_keys() {
        let tasks = sample();
        let id = tasks[0].id.clone();
        let (mut app, rx) = app_with(tasks, ViewMode::List);
        app.handle_event(char_key('3'));
        assert_eq!(rx.try_recv().ok(), Some(Command::SetStatus(id, Status::Blocked)));
    }

    #[test]
    fn move_task_right_from_last_column_issues_nothing() {
        let tasks = sample();
        let id = tasks[2].id.clone();
        let (mut app, rx) = app_with(tasks, ViewMode::Kanban);
        for _ in 0..3 {
            app.handle_event(char_key('l'));
        }
        assert_eq!(app.kanban().active_column(), 3);
        app.handle_event(char_key('L'));
        assert!(rx.try_recv().is_err());

        app.handle_event(char_key('H'));
        assert_eq!(rx.try_recv().ok(), Some(Command::MoveTask { id, right: false }));
    }

    #[test]
    fn move_task_ignored_in_list_view() {
        let (mut app, rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('L'));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn shift_arrow_moves_task() {
        let tasks = sample();
        let id = tasks[0].id.clone();
        let (mut app, rx) = app_with(tasks, ViewMode::Kanban);
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT)));
        assert_eq!(rx.try_recv().ok(), Some(Command::MoveTask { id, right: true }));
        assert_eq!(app.kanban().active_column(), 0);
    }

    #[test]
    fn empty_title_keeps_form_open() {
        let (mut app, rx) = app_with(Vec::new(), ViewMode::List);
        app.handle_event(char_key('a'));
        for c in "  ".chars() {
            app.handle_event(char_key(c));
        }
        // Title -> ... -> Submit
        for _ in 0..5 {
            app.handle_event(key(KeyCode::Tab));
        }
        app.handle_event(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Form(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn create_form_submits_add() {
        let (mut app, rx) = app_with(Vec::new(), ViewMode::List);
        app.handle_event(char_key('a'));
        for c in "New task".chars() {
            app.handle_event(char_key(c));
        }
        for _ in 0..5 {
            app.handle_event(key(KeyCode::Tab));
        }
        app.handle_event(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Normal));
        match rx.try_recv() {
            Ok(Command::Add(task)) => assert_eq!(task.title, "New task"),
            other => panic!("expected Add, got {:?}", other),
        }
    }

    #[test]
    fn edit_form_submits_update_with_same_id() {
        let tasks = sample();
        let id = tasks[0].id.clone();
        let (mut app, rx) = app_with(tasks, ViewMode::List);
        app.handle_event(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Form(_)));
        app.handle_event(char_key('!'));
        for _ in 0..5 {
            app.handle_event(key(KeyCode::Tab));
        }
        app.handle_event(key(KeyCode::Enter));
        let task = updated(&rx);
        assert_eq!(task.id, id);
        assert_eq!(task.title, "alpha!");
    }

    #[test]
    fn form_escape_discards() {
        let (mut app, rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('e'));
        app.handle_event(char_key('x'));
        app.handle_event(key(KeyCode::Esc));
        assert!(matches!(app.mode(), Mode::Normal));
        assert!(rx.try_recv().is_err());
        assert_eq!(app.tasks()[0].title, "alpha");
    }

    #[test]
    fn delete_needs_confirmation() {
        let tasks = sample();
        let id = tasks[0].id.clone();
        let (mut app, rx) = app_with(tasks, ViewMode::List);

        app.handle_event(char_key('d'));
        assert!(matches!(app.mode(), Mode::ConfirmDelete(_)));
        app.handle_event(char_key('n'));
        assert!(matches!(app.mode(), Mode::Normal));
        assert!(rx.try_recv().is_err());

        app.handle_event(char_key('d'));
        app.handle_event(char_key('x'));
        assert!(matches!(app.mode(), Mode::ConfirmDelete(_)));
        app.handle_event(char_key('y'));
        assert!(matches!(app.mode(), Mode::Normal));
        assert_eq!(rx.try_recv().ok(), Some(Command::Delete(id)));
    }

    #[test]
    fn selection_dependent_keys_need_a_task() {
        let (mut app, rx) = app_with(Vec::new(), ViewMode::List);
        for c in ['d', 't', 'e', 'p', '1'] {
            app.handle_event(char_key(c));
            assert!(matches!(app.mode(), Mode::Normal));
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn tag_input_toggles_tag() {
        let start = task("alpha", Status::Todo);
        let (_dir, repo) = store_with(&[start.clone()]);
        let (mut app, rx) = app_with(vec![start], ViewMode::List);

        app.handle_event(char_key('t'));
        for c in " work ".chars() {
            app.handle_event(char_key(c));
        }
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(drain(&rx, &repo)[0].tags, vec!["work"]);

        app.handle_event(char_key('t'));
        for c in "work".chars() {
            app.handle_event(char_key(c));
        }
        app.handle_event(key(KeyCode::Enter));
        assert!(drain(&rx, &repo)[0].tags.is_empty());
    }

    #[test]
    fn tag_input_ignores_commas() {
        let start = task("alpha", Status::Todo);
        let (_dir, repo) = store_with(&[start.clone()]);
        let (mut app, rx) = app_with(vec![start], ViewMode::List);

        app.handle_event(char_key('t'));
        for c in "a,b".chars() {
            app.handle_event(char_key(c));
        }
        app.handle_event(key(KeyCode::Enter));
        let tasks = drain(&rx, &repo);
        assert_eq!(tasks[0].tags, vec!["ab"]);

        // The edit form round-trips it as one tag
        app.handle_event(Event::Loaded(tasks));
        app.handle_event(char_key('e'));
        for _ in 0..5 {
            app.handle_event(key(KeyCode::Tab));
        }
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(updated(&rx).tags, vec!["ab"]);
    }

    #[test]
    fn tag_input_empty_or_escape_does_nothing() {
        let (mut app, rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('t'));
        app.handle_event(char_key(' '));
        app.handle_event(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Normal));

        app.handle_event(char_key('t'));
        app.handle_event(char_key('x'));
        app.handle_event(key(KeyCode::Esc));
        assert!(matches!(app.mode(), Mode::Normal));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn search_filters_live_and_escape_clears() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('/'));
        assert!(matches!(app.mode(), Mode::Search));
        for c in "GAM".chars() {
            app.handle_event(char_key(c));
        }
        assert_eq!(app.list().items().len(), 1);
        assert_eq!(app.selected_task().unwrap().title, "gamma");
        // Kanban shares the filter
        let total: usize = app.kanban().columns().iter().map(|c| c.task_count()).sum();
        assert_eq!(total, 1);

        app.handle_event(key(KeyCode::Esc));
        assert!(matches!(app.mode(), Mode::Normal));
        assert_eq!(app.list().items().len(), 3);
    }

    #[test]
    fn search_enter_keeps_filter_and_slash_clears_it() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('/'));
        app.handle_event(char_key('b'));
        app.handle_event(key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Normal));
        assert_eq!(app.list().filter(), "b");
        assert_eq!(app.list().items().len(), 1);

        app.handle_event(char_key('/'));
        assert_eq!(app.search().value(), "");
        assert_eq!(app.list().items().len(), 3);
    }

    #[test]
    fn toggle_view_syncs_kanban_column() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('j'));
        app.handle_event(char_key('j'));
        assert_eq!(app.selected_task().unwrap().title, "gamma");

        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.view_mode(), ViewMode::Kanban);
        assert_eq!(app.kanban().active_column(), Status::Done.index());
        assert_eq!(app.selected_task().unwrap().title, "gamma");

        app.handle_event(char_key('h'));
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.view_mode(), ViewMode::List);
        assert_eq!(app.selected_task().unwrap().title, "gamma");
    }

    #[test]
    fn group_key_cycles_active_view_only() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('g'));
        assert_eq!(app.list().group_by(), GroupBy::Status);
        assert_eq!(app.kanban().group_by(), GroupBy::None);
        // Headers inserted, selection still on a task
        assert_eq!(app.list().items().len(), 6);
        assert!(app.selected_task().is_some());
    }

    #[test]
    fn storage_failure_keeps_tasks() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(Event::StorageFailed("disk full".to_string()));
        assert_eq!(app.status_message(), Some("Error: disk full"));
        assert_eq!(app.tasks().len(), 3);
    }

    #[test]
    fn status_message_expires_on_tick() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.message_timeout = Duration::ZERO;
        app.handle_event(Event::StorageFailed("boom".to_string()));
        app.handle_event(Event::Tick);
        assert!(app.status_message().is_none());
    }

    #[test]
    fn refresh_and_editor_keys() {
        let (mut app, rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('r'));
        assert_eq!(rx.try_recv().ok(), Some(Command::Load));

        app.handle_event(char_key('o'));
        assert!(app.pending_edit);
    }

    #[test]
    fn reload_clamps_selection() {
        let (mut app, _rx) = app_with(sample(), ViewMode::List);
        app.handle_event(char_key('j'));
        app.handle_event(char_key('j'));
        app.handle_event(Event::Loaded(vec![task("only", Status::Todo)]));
        assert_eq!(app.selected_task().unwrap().title, "only");
    }
}
