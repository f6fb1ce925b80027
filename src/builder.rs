//! Assembles a fixed-size, duplicate-free deck from the image provider.

use crate::cache::DeckCache;
use crate::domain::Card;
use crate::error::{CatswpError, Result};
use crate::provider::ImageProvider;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Default number of cards in a deck
pub const DEFAULT_DECK_SIZE: usize = 12;

/// Fetch attempts allowed per card before the provider is declared unavailable
const ATTEMPTS_PER_CARD: usize = 10;

/// Warms a picture so it can be shown as soon as its card is on top
#[async_trait]
pub trait Preloader: Send + Sync {
    async fn preload(&self, locator: &str) -> Result<()>;
}

pub struct DeckBuilder {
    provider: Arc<dyn ImageProvider>,
    preloader: Arc<dyn Preloader>,
    attempts_per_card: usize,
}

impl DeckBuilder {
    pub fn new(provider: Arc<dyn ImageProvider>, preloader: Arc<dyn Preloader>) -> Self {
        Self {
            provider,
            preloader,
            attempts_per_card: ATTEMPTS_PER_CARD,
        }
    }

    pub fn with_attempts_per_card(mut self, attempts: usize) -> Self {
        self.attempts_per_card = attempts.max(1);
        self
    }

    /// Builds `target` cards, numbered 1..=target in order of acceptance.
    ///
    /// Duplicate references are skipped without counting. Each accepted
    /// picture is preloaded before the next fetch; preload failures are
    /// tolerated. `progress` receives the number of accepted cards.
    pub async fn build(
        &self,
        target: usize,
        progress: Option<&watch::Sender<usize>>,
    ) -> Result<Vec<Card>> {
        let max_attempts = target.saturating_mul(self.attempts_per_card);
        let mut seen: HashSet<String> = HashSet::new();
        let mut cards: Vec<Card> = Vec::with_capacity(target);
        let mut attempts = 0;

        while cards.len() < target {
            if attempts >= max_attempts {
                return Err(CatswpError::ProviderUnavailable(format!(
                    "Only {} unique pictures after {} requests",
                    cards.len(),
                    attempts
                )));
            }
            attempts += 1;

            let reference = self.provider.fetch_reference().await?;

            if !seen.insert(reference.id.clone()) {
                tracing::debug!(id = %reference.id, "Skipping duplicate picture");
                continue;
            }

            if let Err(e) = self.preloader.preload(&reference.locator).await {
                tracing::warn!(locator = %reference.locator, "Preload failed, continuing: {}", e);
            }

            let card = Card::new(cards.len() as u32 + 1, reference.locator);
            tracing::debug!(card = card.id, "Accepted picture");
            cards.push(card);

            if let Some(progress) = progress {
                progress.send_replace(cards.len());
            }
        }

        tracing::info!(cards = cards.len(), attempts, "Deck built");
        Ok(cards)
    }

    /// Returns the cached deck verbatim, or builds a fresh one and caches it
    pub async fn restore_or_build(&self, cache: &DeckCache, target: usize) -> Result<Vec<Card>> {
        if let Some(cards) = cache.load() {
            return Ok(cards);
        }

        let cards = self.build(target, None).await?;
        if let Err(e) = cache.save(&cards) {
            tracing::warn!("Failed to cache deck: {}", e);
        }
        Ok(cards)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::provider::ImageReference;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provider replaying a fixed script of ids, then failing
    pub struct ScriptedProvider {
        ids: Mutex<VecDeque<String>>,
        pub calls: AtomicUsize,
    }

    impl ScriptedProvider {
        pub fn new(ids: &[&str]) -> Self {
            Self {
                ids: Mutex::new(ids.iter().map(|id| id.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ImageProvider for ScriptedProvider {
        async fn fetch_reference(&self) -> Result<ImageReference> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let id = self
                .ids
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| CatswpError::ProviderUnavailable("script exhausted".to_string()))?;
            Ok(ImageReference {
                locator: format!("mem://cat/{}", id),
                id,
            })
        }
    }

    /// Provider handing out an endless sequence of distinct ids
    #[derive(Default)]
    pub struct CountingProvider {
        next: AtomicUsize,
    }

    #[async_trait]
    impl ImageProvider for CountingProvider {
        async fn fetch_reference(&self) -> Result<ImageReference> {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            Ok(ImageReference {
                id: format!("cat-{}", n),
                locator: format!("mem://cat/cat-{}", n),
            })
        }
    }

    /// Preloader recording every locator, optionally failing all of them
    #[derive(Default)]
    pub struct RecordingPreloader {
        pub preloaded: Mutex<Vec<String>>,
        pub fail: bool,
    }

    #[async_trait]
    impl Preloader for RecordingPreloader {
        async fn preload(&self, locator: &str) -> Result<()> {
            self.preloaded.lock().unwrap().push(locator.to_string());
            if self.fail {
                Err(CatswpError::PreloadFailed("broken image".to_string()))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::cache::MemoryCacheStore;
    use std::sync::atomic::Ordering;

    fn builder(provider: Arc<dyn ImageProvider>, preloader: Arc<RecordingPreloader>) -> DeckBuilder {
        DeckBuilder::new(provider, preloader)
    }

    mod build_tests {
        use super::*;

        #[tokio::test]
        async fn test_duplicates_are_skipped() {
            let provider = Arc::new(ScriptedProvider::new(&["A", "A", "B", "C"]));
            let preloader = Arc::new(RecordingPreloader::default());
            let builder = builder(provider.clone(), preloader.clone());

            let cards = builder.build(3, None).await.unwrap();

            assert_eq!(
                cards,
                vec![
                    Card::new(1, "mem://cat/A"),
                    Card::new(2, "mem://cat/B"),
                    Card::new(3, "mem://cat/C"),
                ]
            );
            assert_eq!(cards.last().unwrap().id, 3);
            assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
            assert_eq!(preloader.preloaded.lock().unwrap().len(), 3);
        }

        #[tokio::test]
        async fn test_output_length_matches_target() {
            let builder = builder(
                Arc::new(CountingProvider::default()),
                Arc::new(RecordingPreloader::default()),
            );

            for target in [0, 1, 12] {
                let cards = builder.build(target, None).await.unwrap();
                assert_eq!(cards.len(), target);
                let unique: HashSet<_> = cards.iter().map(|c| c.reference.clone()).collect();
                assert_eq!(unique.len(), target);
            }
        }

        #[tokio::test]
        async fn test_failed_preload_still_accepts_card() {
            let preloader = Arc::new(RecordingPreloader {
                fail: true,
                ..Default::default()
            });
            let builder = builder(Arc::new(ScriptedProvider::new(&["A", "B"])), preloader);

            let cards = builder.build(2, None).await.unwrap();
            assert_eq!(cards.len(), 2);
        }

        #[tokio::test]
        async fn test_provider_failure_propagates() {
            let builder = builder(
                Arc::new(ScriptedProvider::new(&["A"])),
                Arc::new(RecordingPreloader::default()),
            );

            let result = builder.build(2, None).await;
            assert!(matches!(result, Err(CatswpError::ProviderUnavailable(_))));
        }

        #[tokio::test]
        async fn test_endless_duplicates_give_up() {
            let ids = vec!["A"; 50];
            let builder = builder(
                Arc::new(ScriptedProvider::new(&ids)),
                Arc::new(RecordingPreloader::default()),
            )
            .with_attempts_per_card(5);

            let result = builder.build(3, None).await;
            match result {
                Err(CatswpError::ProviderUnavailable(msg)) => {
                    assert!(msg.contains("Only 1 unique"));
                }
                other => panic!("Expected ProviderUnavailable, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_progress_reports_accepted_cards() {
            let builder = builder(
                Arc::new(ScriptedProvider::new(&["A", "A", "B"])),
                Arc::new(RecordingPreloader::default()),
            );
            let (tx, rx) = watch::channel(0);

            builder.build(2, Some(&tx)).await.unwrap();
            assert_eq!(*rx.borrow(), 2);
        }
    }

    mod cache_tests {
        use super::*;

        #[tokio::test]
        async fn test_fresh_build_is_cached() {
            let cache = DeckCache::new(Box::new(MemoryCacheStore::new()));
            let builder = builder(
                Arc::new(ScriptedProvider::new(&["A", "B"])),
                Arc::new(RecordingPreloader::default()),
            );

            let cards = builder.restore_or_build(&cache, 2).await.unwrap();
            assert_eq!(cache.load(), Some(cards));
        }

        #[tokio::test]
        async fn test_cache_hit_skips_fetching() {
            let cache = DeckCache::new(Box::new(MemoryCacheStore::new()));
            let cached = vec![Card::new(1, "mem://cat/X")];
            cache.save(&cached).unwrap();

            let provider = Arc::new(ScriptedProvider::new(&["A", "B"]));
            let builder = builder(provider.clone(), Arc::new(RecordingPreloader::default()));

            let cards = builder.restore_or_build(&cache, 2).await.unwrap();
            assert_eq!(cards, cached);
            assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        }
    }
}
