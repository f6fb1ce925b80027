use catswp::builder::DeckBuilder;
use catswp::cache::{DeckCache, FileCacheStore};
use catswp::cli::{AppConfig, Args};
use catswp::config::UserConfig;
use catswp::domain::{DragTracker, SessionState};
use catswp::feedback::{Feedback, NoFeedback, TerminalBell};
use catswp::images::{ImageLoader, SyncImageManager};
use catswp::opener::open_card;
use catswp::provider::CataasClient;
use catswp::session::SessionRunner;
use catswp::tui::{
    self, handle_key_event, handle_mouse_event, KeyAction, MouseAction, Overlay, UiState,
};
use catswp::view::{Intent, ViewModel};
use catswp::{logging, CatswpError};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::sync::Arc;
use std::{io, time::Duration};
use tokio::runtime::Runtime;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Convert to config
    let config: AppConfig = args.into();

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!("Warning: {}", e);
    }

    match run_app_with_config(&config) {
        Ok(()) => Ok(()),
        Err(CatswpError::Io(e)) => Err(e),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig) -> catswp::Result<()> {
    tracing::info!(
        deck_size = config.deck_size,
        provider = %config.provider_url,
        "starting catswp"
    );

    let runtime = Runtime::new()?;

    let client = Arc::new(CataasClient::new(&config.provider_url, config.timeout)?);
    let loader = ImageLoader::new(client.clone());
    let builder = Arc::new(DeckBuilder::new(client, Arc::new(loader.clone())));

    let cache = DeckCache::new(Box::new(FileCacheStore::new(&config.cache_dir)));
    if config.fresh {
        cache.clear()?;
    }

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load user config: {}", e);
        UserConfig::default()
    });

    let feedback: Box<dyn Feedback> = if config.bell && user_config.bell {
        Box::new(TerminalBell)
    } else {
        Box::new(NoFeedback)
    };

    let mut runner = SessionRunner::new(
        runtime.handle().clone(),
        builder,
        cache,
        config.deck_size,
        feedback,
    );
    runner.start();

    let mut images = SyncImageManager::new(loader, runtime.handle().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(
        &mut terminal,
        &mut runner,
        &mut images,
        config,
        &mut user_config,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Print the favourites after exit
    let view = runner.view();
    if !view.liked.is_empty() {
        println!("You liked {} cat(s):", view.liked_count());
        for card in &view.liked {
            println!("   #{} {}", card.id, card.reference);
        }
    }

    drop(runner);
    runtime.shutdown_timeout(Duration::from_millis(500));

    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
    runner: &mut SessionRunner,
    images: &mut SyncImageManager,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> catswp::Result<()> {
    let mut ui = UiState::new(runner.target(), config.drag_scale);
    let mut drag = DragTracker::new(config.drag_scale);
    let mut card_area: Option<Rect> = None;
    let mut prefetched: Option<String> = None;

    // Show welcome on first launch or if --welcome flag is set
    if config.show_welcome || !user_config.welcome_shown {
        ui.overlay = Overlay::Welcome;
    }

    loop {
        runner.poll();
        track_front_image(runner, images, &mut prefetched);

        let view = runner.view();
        ui.progress = runner.build_progress();
        ui.displacement = drag.displacement();

        terminal.draw(|frame| {
            card_area = tui::render(frame, &view, images, &mut ui);
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Handle overlay-specific input
                match ui.overlay {
                    Overlay::Welcome => {
                        // Any key dismisses welcome and starts swiping
                        ui.overlay = Overlay::None;

                        // Mark welcome as shown and persist
                        user_config.welcome_shown = true;
                        if let Err(e) = user_config.save() {
                            tracing::warn!("Failed to save user config: {}", e);
                        }
                        continue;
                    }
                    Overlay::Help => {
                        let action = handle_key_event(key);
                        if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                            ui.overlay = Overlay::None;
                        }
                        continue;
                    }
                    Overlay::None => {}
                }

                match handle_key_event(key) {
                    KeyAction::Quit => break,
                    KeyAction::Help => ui.overlay = Overlay::Help,
                    KeyAction::Open => {
                        if let Some(card) = view.front() {
                            if let Err(e) = open_card(card) {
                                tracing::warn!("Failed to open card #{}: {}", card.id, e);
                            }
                        }
                    }
                    action => {
                        if let Some(intent) = intent_for(action, &view) {
                            if matches!(intent, Intent::NewSession) {
                                images.reset();
                                ui.clear_thumbnails();
                                prefetched = None;
                            }
                            dispatch(runner, intent);
                        }
                    }
                }
            }
            Event::Mouse(mouse) if ui.overlay == Overlay::None => {
                match handle_mouse_event(mouse, card_area) {
                    MouseAction::Press(column) => {
                        if view.state == SessionState::Swiping && view.front_ready {
                            drag.begin(column as f64);
                        }
                    }
                    MouseAction::Drag(column) => drag.update(column as f64),
                    MouseAction::Release(column) => {
                        drag.update(column as f64);
                        if let Some(direction) = drag.release() {
                            dispatch(runner, Intent::Decide(direction));
                        }
                    }
                    MouseAction::None => {}
                }
            }
            Event::FocusLost => drag.cancel(),
            _ => {}
        }
    }

    Ok(())
}

/// Keeps the image manager on the front card and reports when its picture
/// has settled. Also warms the cache with the card behind it.
fn track_front_image(
    runner: &mut SessionRunner,
    images: &mut SyncImageManager,
    prefetched: &mut Option<String>,
) {
    let view = runner.view();
    if view.state != SessionState::Swiping {
        return;
    }

    let Some(front) = view.front() else {
        images.reset();
        return;
    };

    if images.request(&front.reference).is_settled() && !view.front_ready {
        dispatch(runner, Intent::FrontLoaded(front.id));
    }

    if let Some(next) = view.next() {
        if prefetched.as_deref() != Some(next.reference.as_str()) {
            images.prefetch(&next.reference);
            *prefetched = Some(next.reference.clone());
        }
    }
}

/// Maps a key action to an intent that makes sense in the current state
fn intent_for(action: KeyAction, view: &ViewModel) -> Option<Intent> {
    match action {
        KeyAction::Like => Some(Intent::Decide(catswp::domain::Direction::Right)),
        KeyAction::Pass => Some(Intent::Decide(catswp::domain::Direction::Left)),
        KeyAction::Undo => Some(Intent::Undo),
        KeyAction::ToggleSummary => Some(Intent::ToggleSummary),
        KeyAction::NewDeck if view.state == SessionState::Summary || view.is_finished() => {
            Some(Intent::NewSession)
        }
        KeyAction::Retry if view.load_error.is_some() => Some(Intent::Retry),
        _ => None,
    }
}

/// Forwards an intent; rejected intents are expected (e.g. swiping an
/// unloaded card) and only logged
fn dispatch(runner: &mut SessionRunner, intent: Intent) {
    if let Err(e) = runner.dispatch(intent) {
        tracing::debug!(?intent, "intent rejected: {}", e);
    }
}
