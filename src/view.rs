//! Presentation boundary: what the UI reads and what it may ask for

use crate::domain::{Card, DeckEngine, Direction, SessionState};

/// User intents forwarded to the deck engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Decide(Direction),
    Undo,
    ToggleSummary,
    NewSession,
    /// Rebuild after a failed load
    Retry,
    /// A card's picture finished loading (successfully or not)
    FrontLoaded(u32),
}

/// Snapshot of the engine for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub state: SessionState,
    /// Remaining cards, front card first
    pub deck: Vec<Card>,
    pub decided: usize,
    pub current: usize,
    pub total: usize,
    pub liked: Vec<Card>,
    pub can_undo: bool,
    pub front_ready: bool,
    pub load_error: Option<String>,
}

impl ViewModel {
    pub fn front(&self) -> Option<&Card> {
        self.deck.first()
    }

    /// Card shown right behind the front one
    pub fn next(&self) -> Option<&Card> {
        self.deck.get(1)
    }

    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Swiping && self.deck.is_empty()
    }
}

/// Projects engine state into a view model. Pure.
pub fn project(engine: &DeckEngine) -> ViewModel {
    ViewModel {
        state: engine.state(),
        deck: engine.deck().iter().rev().cloned().collect(),
        decided: engine.decided(),
        current: engine.current(),
        total: engine.total(),
        liked: engine.liked().to_vec(),
        can_undo: engine.can_undo(),
        front_ready: engine.front_ready(),
        load_error: engine.load_error().map(str::to_string),
    }
}
