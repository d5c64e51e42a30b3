//! Engine notifications
//!
//! Events are pushed synchronously, in registration order, right after the
//! mutation that caused them. Listeners only ever see `&GameEvent`; they cannot
//! reach the engine from inside a handler.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Something observable happened inside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Score, level, lines, pause or run state changed
    GameStateChanged,
    /// The newly spawned piece did not fit; fired once per game
    GameOver,
    /// Board contents or the current piece moved
    BoardChanged,
    /// Rows were removed by the last lock
    LinesCleared(u32),
    /// The current piece rotated
    Rotation { clockwise: bool },
    /// The current piece was written into the board
    PieceLocked,
}

/// Receives engine events
pub trait GameListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn GameListener>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl GameListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that keeps every event it receives
///
/// Clones share the same log, so one clone can be subscribed and another read.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    log: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.log.borrow().clone()
    }

    pub fn count(&self, event: GameEvent) -> usize {
        self.log.borrow().iter().filter(|e| **e == event).count()
    }

    /// Total rows reported by `LinesCleared` events
    pub fn lines_cleared(&self) -> u32 {
        self.log
            .borrow()
            .iter()
            .map(|e| match e {
                GameEvent::LinesCleared(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl GameListener for EventRecorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.log.borrow_mut().push(*event);
    }
}
