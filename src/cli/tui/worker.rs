//! Storage command queue
//!
//! A single worker thread owns all repository access. Commands run one at a
//! time in the order they were sent, and each result is posted back to the
//! event loop, so a stale result can never overtake a newer one.
//!
//! Quick edits (priority, status, tags, kanban moves) are sent as intents
//! keyed by id and applied to the collection as it is on disk when the
//! command runs. Several keys pressed before a reload therefore compose
//! instead of each overwriting the last.

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use crate::domain::{Status, Task, TaskId};
use crate::storage::{Repository, StorageError};

use super::event::Event;

/// A repository operation requested by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load,
    Add(Task),
    Update(Task),
    Delete(TaskId),
    /// Advance the task's priority one step, wrapping after Critical
    CyclePriority(TaskId),
    SetStatus(TaskId, Status),
    /// Add the tag if missing, otherwise remove it
    ToggleTag(TaskId, String),
    /// Move the task one status column; nothing happens at either edge
    MoveTask { id: TaskId, right: bool },
}

/// Runs `command` against `repo` and turns the outcome into an event
pub fn execute(repo: &dyn Repository, command: Command) -> Event {
    let result = match command {
        Command::Load => repo.load(),
        Command::Add(task) => repo.add_task(task),
        Command::Update(task) => repo.update_task(task),
        Command::Delete(id) => repo.delete_task(&id),
        Command::CyclePriority(id) => edit(repo, &id, |task| {
            task.priority = task.priority.next();
            true
        }),
        Command::SetStatus(id, status) => edit(repo, &id, |task| {
            let changed = task.status != status;
            task.status = status;
            changed
        }),
        Command::ToggleTag(id, tag) => edit(repo, &id, |task| {
            task.toggle_tag(&tag);
            true
        }),
        Command::MoveTask { id, right } => edit(repo, &id, |task| {
            let target = if right {
                Status::from_index(task.status.index() + 1)
            } else {
                task.status.index().checked_sub(1).and_then(Status::from_index)
            };
            match target {
                Some(status) => {
                    task.status = status;
                    true
                }
                None => false,
            }
        }),
    };
    match result {
        Ok(tasks) => Event::Loaded(tasks),
        Err(e) => Event::StorageFailed(e.to_string()),
    }
}

/// Applies `change` to the stored copy of task `id` and writes it back.
///
/// Unknown ids and changes that report nothing changed skip the write.
fn edit(
    repo: &dyn Repository,
    id: &TaskId,
    change: impl FnOnce(&mut Task) -> bool,
) -> Result<Vec<Task>, StorageError> {
    let mut tasks = repo.load()?;
    let Some(task) = tasks.iter_mut().find(|t| &t.id == id) else {
        return Ok(tasks);
    };
    if !change(task) {
        return Ok(tasks);
    }
    let task = task.clone();
    repo.update_task(task)
}

/// Starts the worker; it exits once every command sender is dropped or the
/// event loop has gone away
pub fn spawn(repo: Arc<dyn Repository>, events: Sender<Event>) -> Sender<Command> {
    let (tx, rx) = mpsc::channel::<Command>();

    thread::spawn(move || {
        for command in rx {
            if events.send(execute(repo.as_ref(), command)).is_err() {
                break;
            }
        }
    });

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::storage::YamlStore;
    use std::time::Duration;
    use tempfile::TempDir;

    fn loaded(event: Event) -> Vec<Task> {
        match event {
            Event::Loaded(tasks) => tasks,
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn commands_complete_in_order() {
        let dir = TempDir::new().unwrap();
        let repo: Arc<dyn Repository> = Arc::new(YamlStore::new(dir.path().join("tasks.yaml")));
        let (events_tx, events_rx) = mpsc::channel();
        let commands = spawn(repo, events_tx);

        let first = Task::new("first").unwrap();
        let second = Task::new("second").unwrap();
        commands.send(Command::Add(first.clone())).unwrap();
        commands.send(Command::Add(second)).unwrap();
        commands.send(Command::Delete(first.id)).unwrap();

        let timeout = Duration::from_secs(5);
        assert_eq!(loaded(events_rx.recv_timeout(timeout).unwrap()).len(), 1);
        assert_eq!(loaded(events_rx.recv_timeout(timeout).unwrap()).len(), 2);
        let last = loaded(events_rx.recv_timeout(timeout).unwrap());
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title, "second");
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
    fn queued_priority_cycles_compose() {
        let mut task = Task::new("alpha").unwrap();
        task.priority = Priority::Low;
        let (_dir, repo) = store_with(&[task.clone()]);

        let mut seen = Vec::new();
        for _ in 0..4 {
            let tasks = loaded(execute(&repo, Command::CyclePriority(task.id.clone())));
            seen.push(tasks[0].priority);
        }
        assert_eq!(
            seen,
            vec![Priority::Medium, Priority::High, Priority::Critical, Priority::Low]
        );
    }

    #[test]
    fn queued_moves_walk_the_columns_and_stop_at_the_edge() {
        let task = Task::new("alpha").unwrap();
        let (_dir, repo) = store_with(&[task.clone()]);
        let right = || Command::MoveTask { id: task.id.clone(), right: true };

        execute(&repo, right());
        let tasks = loaded(execute(&repo, right()));
        assert_eq!(tasks[0].status, Status::Blocked);

        execute(&repo, right());
        let tasks = loaded(execute(&repo, right()));
        assert_eq!(tasks[0].status, Status::Done);

        let left = Command::MoveTask { id: task.id.clone(), right: false };
        assert_eq!(loaded(execute(&repo, left))[0].status, Status::Blocked);
    }

    #[test]
    fn intents_use_the_stored_copy() {
        let task = Task::new("alpha").unwrap();
        let (_dir, repo) = store_with(&[task.clone()]);

        execute(&repo, Command::ToggleTag(task.id.clone(), "work".to_string()));
        execute(&repo, Command::SetStatus(task.id.clone(), Status::InProgress));
        let tasks = loaded(execute(&repo, Command::ToggleTag(task.id.clone(), "home".to_string())));
        assert_eq!(tasks[0].tags, vec!["work", "home"]);
        assert_eq!(tasks[0].status, Status::InProgress);
    }

    #[test]
    fn intents_for_unknown_ids_leave_storage_alone() {
        let task = Task::new("alpha").unwrap();
        let (_dir, repo) = store_with(&[task.clone()]);
        let ghost = Task::new("ghost").unwrap().id;

        let tasks = loaded(execute(&repo, Command::CyclePriority(ghost)));
        assert_eq!(tasks, repo.load().unwrap());
        assert_eq!(tasks[0].priority, task.priority);
    }

    #[test]
    fn failures_become_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.yaml");
        std::fs::write(&path, "tasks: [not: valid: yaml").unwrap();
        let repo = YamlStore::new(path);

        match execute(&repo, Command::Load) {
            Event::StorageFailed(message) => assert!(message.contains("Failed to parse")),
            other => panic!("expected StorageFailed, got {:?}", other),
        }
    }
}
