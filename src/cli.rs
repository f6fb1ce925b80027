// CLI module for argument parsing and configuration

use crate::builder::DEFAULT_DECK_SIZE;
use crate::cache::FileCacheStore;
use crate::provider::DEFAULT_PROVIDER_URL;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Largest deck the provider is asked for
pub const MAX_DECK_SIZE: usize = 100;

/// Catswp - pick your favourite kitty from the terminal
///
/// Swipe right to like, left to pass. Drag the card with the mouse or use
/// the arrow keys.
#[derive(Parser, Debug, Clone)]
#[command(name = "catswp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of cards in a fresh deck
    #[arg(short = 'c', long = "count", default_value_t = DEFAULT_DECK_SIZE)]
    pub count: usize,

    /// Base URL of the cat picture service
    #[arg(long = "provider-url", default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// Directory holding the cached deck
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,

    /// Ignore and discard the cached deck
    #[arg(long = "fresh", action = ArgAction::SetTrue)]
    pub fresh: bool,

    /// Don't ring the terminal bell on each swipe
    #[arg(long = "no-bell", action = ArgAction::SetTrue)]
    pub no_bell: bool,

    /// Swipe units per terminal column dragged
    ///
    /// A swipe commits past 60 units, so the default of 4 needs a drag of
    /// 16 columns.
    #[arg(long = "drag-scale", default_value_t = 4.0)]
    pub drag_scale: f64,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Write logs to this file instead of the default location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Show the welcome screen even if it was dismissed before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 || self.count > MAX_DECK_SIZE {
            return Err(format!(
                "Deck size must be between 1 and {}, got {}",
                MAX_DECK_SIZE, self.count
            ));
        }

        if !(self.provider_url.starts_with("http://") || self.provider_url.starts_with("https://"))
        {
            return Err(format!(
                "Provider URL must start with http:// or https://: '{}'",
                self.provider_url
            ));
        }

        if !(self.drag_scale.is_finite() && self.drag_scale > 0.0) {
            return Err(format!(
                "Drag scale must be a positive number, got {}",
                self.drag_scale
            ));
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be at least 1 second".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub deck_size: usize,
    pub provider_url: String,
    pub cache_dir: PathBuf,
    pub fresh: bool,
    pub bell: bool,
    pub drag_scale: f64,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub show_welcome: bool,
}

fn default_cache_dir() -> PathBuf {
    FileCacheStore::default_dir().unwrap_or_else(|| std::env::temp_dir().join("catswp"))
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        let cache_dir = args.cache_dir.unwrap_or_else(default_cache_dir);
        let log_file = args
            .log_file
            .unwrap_or_else(|| cache_dir.join("catswp.log"));

        AppConfig {
            deck_size: args.count,
            provider_url: args.provider_url,
            cache_dir,
            fresh: args.fresh,
            bell: !args.no_bell,
            drag_scale: args.drag_scale,
            timeout: Duration::from_secs(args.timeout_secs),
            log_file,
            show_welcome: args.show_welcome,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let cache_dir = default_cache_dir();
        AppConfig {
            deck_size: DEFAULT_DECK_SIZE,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            log_file: cache_dir.join("catswp.log"),
            cache_dir,
            fresh: false,
            bell: true,
            drag_scale: 4.0,
            timeout: Duration::from_secs(15),
            show_welcome: false,
        }
    }
}
