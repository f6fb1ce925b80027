//! Drives one deck session: runs builds in the background and applies
//! user intents to the engine on the caller's thread.

use crate::builder::DeckBuilder;
use crate::cache::DeckCache;
use crate::domain::{Card, DeckEngine};
use crate::error::{CatswpError, Result};
use crate::feedback::Feedback;
use crate::view::{project, Intent, ViewModel};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// A build running in the background for a given session generation
struct PendingBuild {
    session: u64,
    task: JoinHandle<()>,
    result_rx: oneshot::Receiver<Result<Vec<Card>>>,
    progress: watch::Receiver<usize>,
}

pub struct SessionRunner {
    handle: Handle,
    engine: DeckEngine,
    cache: DeckCache,
    builder: Arc<DeckBuilder>,
    target: usize,
    pending: Option<PendingBuild>,
    feedback: Box<dyn Feedback>,
}

impl SessionRunner {
    pub fn new(
        handle: Handle,
        builder: Arc<DeckBuilder>,
        cache: DeckCache,
        target: usize,
        feedback: Box<dyn Feedback>,
    ) -> Self {
        Self {
            handle,
            engine: DeckEngine::new(),
            cache,
            builder,
            target,
            pending: None,
            feedback,
        }
    }

    /// Restores the cached deck or starts building a fresh one
    pub fn start(&mut self) {
        let session = self.engine.session();
        match self.cache.load() {
            Some(cards) => {
                self.engine.complete_loading(session, cards);
            }
            None => self.spawn_build(session),
        }
    }

    fn spawn_build(&mut self, session: u64) {
        self.cancel_pending();

        let (result_tx, result_rx) = oneshot::channel();
        let (progress_tx, progress_rx) = watch::channel(0);
        let builder = Arc::clone(&self.builder);
        let target = self.target;

        tracing::info!(session, target, "Building deck");
        let task = self.handle.spawn(async move {
            let result = builder.build(target, Some(&progress_tx)).await;
            let _ = result_tx.send(result);
        });

        self.pending = Some(PendingBuild {
            session,
            task,
            result_rx,
            progress: progress_rx,
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(session = pending.session, "Cancelling in-flight build");
            pending.task.abort();
        }
    }

    /// Applies a finished build if there is one. Returns true if the engine changed.
    pub fn poll(&mut self) -> bool {
        let Some(mut pending) = self.pending.take() else {
            return false;
        };

        let result = match pending.result_rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => {
                self.pending = Some(pending);
                return false;
            }
            Err(oneshot::error::TryRecvError::Closed) => Err(CatswpError::ProviderUnavailable(
                "Deck build stopped unexpectedly".to_string(),
            )),
        };

        match result {
            Ok(cards) => {
                let accepted = self.engine.complete_loading(pending.session, cards.clone());
                if accepted {
                    if let Err(e) = self.cache.save(&cards) {
                        tracing::warn!("Failed to cache deck: {}", e);
                    }
                }
                accepted
            }
            Err(e) => {
                tracing::error!(session = pending.session, "Deck build failed: {}", e);
                self.engine.fail_loading(pending.session, e.to_string())
            }
        }
    }

    /// Forwards a user intent to the engine.
    ///
    /// Invalid intents (deciding on an empty deck, undoing nothing) are
    /// no-ops and return `Err` without changing state.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Decide(direction) => {
                let record = self.engine.decide(direction)?;
                self.feedback.decision_committed(&record);
            }
            Intent::Undo => {
                self.engine.undo()?;
            }
            Intent::ToggleSummary => {
                if !self.engine.toggle_summary() {
                    return Err(CatswpError::InvalidOperation("deck is loading"));
                }
            }
            Intent::NewSession => {
                self.cancel_pending();
                if let Err(e) = self.cache.clear() {
                    tracing::warn!("Failed to clear deck cache: {}", e);
                }
                let session = self.engine.new_session();
                self.spawn_build(session);
            }
            Intent::Retry => {
                let session = self
                    .engine
                    .retry_loading()
                    .ok_or(CatswpError::InvalidOperation("nothing to retry"))?;
                self.spawn_build(session);
            }
            Intent::FrontLoaded(card_id) => {
                self.engine.mark_loaded(card_id);
            }
        }
        Ok(())
    }

    pub fn engine(&self) -> &DeckEngine {
        &self.engine
    }

    pub fn view(&self) -> ViewModel {
        project(&self.engine)
    }

    /// Cards accepted so far by the running build, if any
    pub fn build_progress(&self) -> Option<usize> {
        self.pending
            .as_ref()
            .map(|pending| *pending.progress.borrow())
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_building(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for SessionRunner {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
