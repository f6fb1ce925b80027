pub mod deck_engine;
pub mod gesture;

pub use deck_engine::DeckEngine;
pub use gesture::DragTracker;

use serde::{Deserialize, Serialize};

/// A single picture in the deck.
///
/// `id` is the display/order key (1-based position of first acceptance),
/// distinct from the provider identifier used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    #[serde(rename = "url")]
    pub reference: String,
}

impl Card {
    pub fn new(id: u32, reference: impl Into<String>) -> Self {
        Self {
            id,
            reference: reference.into(),
        }
    }
}

/// Swipe direction. Right likes the card, left passes on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn from_displacement(displacement: f64) -> Self {
        if displacement > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    pub fn is_like(self) -> bool {
        self == Direction::Right
    }

    /// Label shown on the card while dragging
    pub fn label(self) -> &'static str {
        match self {
            Direction::Left => "PASS",
            Direction::Right => "LIKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub card: Card,
    pub direction: Direction,
}

/// Which top-level view the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Swiping,
    Summary,
}

/// Statistics about decisions made during the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStatistics {
    pub total: usize,
    pub liked: usize,
    pub passed: usize,
    pub remaining: usize,
}
