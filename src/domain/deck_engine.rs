use super::{Card, DecisionRecord, DeckStatistics, Direction, SessionState};
use crate::error::{CatswpError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Session-scoped deck state machine.
///
/// Holds the live deck (front card is the last element), the decision
/// history used for undo and the liked cards. `history.len() + deck.len()`
/// always equals the size of the deck that was loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeckEngine {
    deck: Vec<Card>,
    history: Vec<DecisionRecord>,
    liked: Vec<Card>,
    state: SessionState,
    total: usize,
    /// Card ids whose image finished loading (successfully or not)
    loaded: HashSet<u32>,
    /// Generation counter used to discard results of abandoned builds
    session: u64,
    load_error: Option<String>,
    started_at: Option<DateTime<Utc>>,
}

impl DeckEngine {
    /// Creates an engine in the loading state for session 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that is already swiping through `cards`
    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut engine = Self::new();
        engine.complete_loading(0, cards);
        engine
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Applies a finished build. Returns false (and changes nothing) if the
    /// result belongs to an abandoned session or loading already ended.
    pub fn complete_loading(&mut self, session: u64, cards: Vec<Card>) -> bool {
        if session != self.session || self.state != SessionState::Loading {
            tracing::debug!(
                stale = session,
                current = self.session,
                "Discarding deck from stale build"
            );
            return false;
        }

        self.total = cards.len();
        self.deck = cards;
        self.history.clear();
        self.liked.clear();
        self.loaded.clear();
        self.load_error = None;
        self.started_at = Some(Utc::now());
        self.state = SessionState::Swiping;
        tracing::info!(cards = self.total, session, "Deck ready");
        true
    }

    /// Records a failed build so the loading view can show it
    pub fn fail_loading(&mut self, session: u64, message: impl Into<String>) -> bool {
        if session != self.session || self.state != SessionState::Loading {
            return false;
        }
        self.load_error = Some(message.into());
        true
    }

    /// Starts another build attempt after a failure, returning its session
    pub fn retry_loading(&mut self) -> Option<u64> {
        if self.state != SessionState::Loading || self.load_error.is_none() {
            return None;
        }
        self.load_error = None;
        self.session += 1;
        Some(self.session)
    }

    /// Discards everything and goes back to loading under a new session
    pub fn new_session(&mut self) -> u64 {
        self.deck.clear();
        self.history.clear();
        self.liked.clear();
        self.loaded.clear();
        self.total = 0;
        self.load_error = None;
        self.started_at = None;
        self.state = SessionState::Loading;
        self.session += 1;
        tracing::info!(session = self.session, "Starting new session");
        self.session
    }

    /// Switches between swiping and summary. No-op while loading.
    pub fn toggle_summary(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Swiping => SessionState::Summary,
            SessionState::Summary => SessionState::Swiping,
            SessionState::Loading => return false,
        };
        true
    }

    /// Removes the front card and records the decision.
    ///
    /// Fails without touching any state when not swiping, when the deck is
    /// empty or when the front card has not finished loading.
    pub fn decide(&mut self, direction: Direction) -> Result<DecisionRecord> {
        if self.state != SessionState::Swiping {
            return Err(CatswpError::InvalidOperation("not swiping"));
        }
        if !self.front_ready() {
            return Err(if self.deck.is_empty() {
                CatswpError::InvalidOperation("deck is empty")
            } else {
                CatswpError::InvalidOperation("front card is not ready")
            });
        }

        let card = self
            .deck
            .pop()
            .ok_or(CatswpError::InvalidOperation("deck is empty"))?;

        if direction.is_like() {
            self.liked.push(card.clone());
        }

        let record = DecisionRecord { card, direction };
        self.history.push(record.clone());
        tracing::debug!(card = record.card.id, ?direction, "Decision recorded");
        Ok(record)
    }

    /// Restores the most recently decided card as the front card
    pub fn undo(&mut self) -> Result<DecisionRecord> {
        if self.state == SessionState::Loading {
            return Err(CatswpError::InvalidOperation("deck is loading"));
        }

        let record = self
            .history
            .pop()
            .ok_or(CatswpError::InvalidOperation("no decisions to undo"))?;

        if record.direction.is_like() {
            self.liked.retain(|card| card.id != record.card.id);
        }

        self.deck.push(record.card.clone());
        tracing::debug!(card = record.card.id, "Decision undone");
        Ok(record)
    }

    /// Marks a card's image as loaded. Failed loads count too.
    pub fn mark_loaded(&mut self, card_id: u32) {
        if self.deck.iter().any(|card| card.id == card_id) {
            self.loaded.insert(card_id);
        }
    }

    /// Whether the current front card may be swiped away
    pub fn front_ready(&self) -> bool {
        self.front()
            .map(|card| self.loaded.contains(&card.id))
            .unwrap_or(false)
    }

    pub fn front(&self) -> Option<&Card> {
        self.deck.last()
    }

    /// Remaining cards, front card last
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    pub fn liked(&self) -> &[Card] {
        &self.liked
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn decided(&self) -> usize {
        self.total - self.deck.len()
    }

    /// 1-based position of the front card, capped at the deck size
    pub fn current(&self) -> usize {
        (self.decided() + 1).min(self.total)
    }

    pub fn can_undo(&self) -> bool {
        self.state != SessionState::Loading && !self.history.is_empty()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn statistics(&self) -> DeckStatistics {
        let liked = self.liked.len();
        DeckStatistics {
            total: self.total,
            liked,
            passed: self.history.len() - liked,
            remaining: self.deck.len(),
        }
    }
}
