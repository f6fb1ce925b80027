//! Catswp - swipe through a deck of cat pictures in the terminal
//!
//! This crate provides the core functionality for the catswp application:
//! building a deduplicated deck from a picture provider, caching it between
//! runs, and the swipe/undo/summary session state driven by the TUI.

pub mod builder;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feedback;
pub mod images;
pub mod logging;
pub mod opener;
pub mod preview;
pub mod provider;
pub mod session;
pub mod tui;
pub mod view;

// Re-export primary types for convenience
pub use builder::{DeckBuilder, Preloader};
pub use cache::{CacheStore, DeckCache, FileCacheStore, MemoryCacheStore};
pub use config::UserConfig;
pub use domain::{
    Card, DecisionRecord, DeckEngine, DeckStatistics, Direction, DragTracker, SessionState,
};
pub use error::{CatswpError, Result};
pub use provider::{CataasClient, ImageProvider, ImageReference, ImageSource};
pub use session::SessionRunner;
pub use view::{project, Intent, ViewModel};
