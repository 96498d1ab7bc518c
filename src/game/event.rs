//! Event System
//!
//! The controller records what happened during a frame as events instead of
//! logging or reacting inline. The main loop drains them once per frame
//! (for the log); tests read them to check transitions.

use super::challenge::{ChallengeKind, ChallengeOutcome};

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Menu → Playing, or a restart after game over
    AdventureStarted,
    KeyCollected,
    /// A riddle was put in front of the explorer (first try or retry)
    ChallengeStarted(ChallengeKind),
    /// An attempt was resolved
    ChallengeResolved(ChallengeOutcome),
    RankUp(u32),
    GameOver { points: u32, treasures: u32 },
}

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
