//! Event handling for the TUI
//!
//! Terminal input and storage results share one channel, so the main loop
//! sees them in arrival order.

use std::sync::{mpsc, Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::domain::Task;

/// Events delivered to the application loop
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event (width, height - currently unused)
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
    /// A storage command completed with the fresh collection
    Loaded(Vec<Task>),
    /// A storage command failed
    StorageFailed(String),
}

/// Whether the input thread may read the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputState {
    Running,
    /// Asked to stop; the thread has not yet confirmed
    Pausing,
    /// The thread is parked and will not read until resumed
    Paused,
}

/// Pause handshake between the UI thread and the input thread
#[derive(Debug)]
struct InputGate {
    state: Mutex<InputState>,
    changed: Condvar,
}

impl InputGate {
    fn new() -> Self {
        Self {
            state: Mutex::new(InputState::Running),
            changed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InputState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests a pause and blocks until the input thread has parked
    fn pause(&self) {
        let mut state = self.lock();
        if *state == InputState::Running {
            *state = InputState::Pausing;
        }
        let _parked = self
            .changed
            .wait_while(state, |s| *s != InputState::Paused)
            .unwrap_or_else(PoisonError::into_inner);
    }

    fn resume(&self) {
        *self.lock() = InputState::Running;
        self.changed.notify_all();
    }

    /// Called by the input thread before each read; parks while paused
    fn checkpoint(&self) {
        let mut state = self.lock();
        if *state == InputState::Pausing {
            *state = InputState::Paused;
            self.changed.notify_all();
        }
        let _running = self
            .changed
            .wait_while(state, |s| *s != InputState::Running)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Handles terminal events in a separate thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    gate: Arc<InputGate>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        let gate = Arc::new(InputGate::new());
        let gate_clone = Arc::clone(&gate);

        thread::spawn(move || loop {
            // Leave the terminal to the editor
            gate_clone.checkpoint();

            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    let sent = match evt {
                        // Only key presses, not releases
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            tx_clone.send(Event::Key(key))
                        }
                        CrosstermEvent::Resize(w, h) => tx_clone.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    };
                    if sent.is_err() {
                        break;
                    }
                }
            } else if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { rx, tx, gate }
    }

    /// Sender for producers other than the terminal (the storage worker)
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    /// Stops reading terminal input until [`EventHandler::resume`].
    ///
    /// Returns once the input thread has finished any poll in progress, so
    /// nothing typed afterwards is read by the TUI.
    pub fn pause(&self) {
        self.gate.pause();
    }

    pub fn resume(&self) {
        self.gate.resume();
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
