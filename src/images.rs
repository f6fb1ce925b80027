// Background picture loading with an LRU cache of decoded images

use crate::builder::Preloader;
use crate::error::{CatswpError, Result};
use crate::preview::{decode_image, render_halfblocks};
use crate::provider::ImageSource;
use async_trait::async_trait;
use image::DynamicImage;
use ratatui::text::Line;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, Mutex};

/// Maximum number of decoded pictures kept in memory
const CACHE_SIZE: usize = 24;

/// Loading state of a single picture
#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Ready(Arc<DynamicImage>),
    Failed(String),
}

impl ImageState {
    /// Whether loading finished, successfully or not
    pub fn is_settled(&self) -> bool {
        !matches!(self, ImageState::Loading)
    }
}

/// LRU cache keyed by locator
#[derive(Debug)]
struct ImageCache {
    entries: HashMap<String, Arc<DynamicImage>>,
    /// Most recently used at the end
    access_order: Vec<String>,
    max_size: usize,
}

impl ImageCache {
    fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: Vec::new(),
            max_size,
        }
    }

    fn get(&mut self, locator: &str) -> Option<Arc<DynamicImage>> {
        let image = self.entries.get(locator).cloned()?;
        self.touch(locator);
        Some(image)
    }

    fn insert(&mut self, locator: String, image: Arc<DynamicImage>) {
        if self.entries.contains_key(&locator) {
            self.access_order.retain(|l| l != &locator);
        } else if self.entries.len() >= self.max_size && !self.access_order.is_empty() {
            let oldest = self.access_order.remove(0);
            self.entries.remove(&oldest);
        }

        self.entries.insert(locator.clone(), image);
        self.access_order.push(locator);
    }

    fn touch(&mut self, locator: &str) {
        self.access_order.retain(|l| l != locator);
        self.access_order.push(locator.to_string());
    }

    fn contains(&self, locator: &str) -> bool {
        self.entries.contains_key(locator)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }
}

/// Downloads and decodes pictures, sharing one cache between the deck
/// builder's preloads and the UI.
#[derive(Clone)]
pub struct ImageLoader {
    source: Arc<dyn ImageSource>,
    cache: Arc<Mutex<ImageCache>>,
}

impl ImageLoader {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self::with_capacity(source, CACHE_SIZE)
    }

    pub fn with_capacity(source: Arc<dyn ImageSource>, capacity: usize) -> Self {
        Self {
            source,
            cache: Arc::new(Mutex::new(ImageCache::new(capacity.max(1)))),
        }
    }

    /// Loads a picture, answering from the cache when possible
    pub async fn load(&self, locator: &str) -> ImageState {
        if let Some(image) = self.get_cached(locator).await {
            return ImageState::Ready(image);
        }

        let bytes = match self.source.fetch_image(locator).await {
            Ok(bytes) => bytes,
            Err(e) => return ImageState::Failed(e.to_string()),
        };

        // Decoding large pictures is CPU bound
        let decoded = tokio::task::spawn_blocking(move || decode_image(&bytes)).await;

        match decoded {
            Ok(Ok(image)) => {
                let image = Arc::new(image);
                self.cache
                    .lock()
                    .await
                    .insert(locator.to_string(), Arc::clone(&image));
                ImageState::Ready(image)
            }
            Ok(Err(e)) => ImageState::Failed(e.to_string()),
            Err(e) => ImageState::Failed(format!("Decode task panicked: {}", e)),
        }
    }

    pub async fn get_cached(&self, locator: &str) -> Option<Arc<DynamicImage>> {
        self.cache.lock().await.get(locator)
    }

    pub async fn is_cached(&self, locator: &str) -> bool {
        self.cache.lock().await.contains(locator)
    }

    pub async fn cache_size(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }
}

#[async_trait]
impl Preloader for ImageLoader {
    async fn preload(&self, locator: &str) -> Result<()> {
        match self.load(locator).await {
            ImageState::Failed(e) => Err(CatswpError::PreloadFailed(e)),
            _ => Ok(()),
        }
    }
}

/// Half-block lines rendered for one picture at one size
struct RenderedImage {
    locator: String,
    cols: u16,
    rows: u16,
    lines: Vec<Line<'static>>,
}

/// Non-blocking wrapper around [`ImageLoader`] for the synchronous UI loop.
///
/// Tracks the picture currently on top of the deck and polls its loading
/// state once per frame.
pub struct SyncImageManager {
    loader: ImageLoader,
    handle: Handle,
    current_state: ImageState,
    current_locator: Option<String>,
    receiver: Option<oneshot::Receiver<ImageState>>,
    rendered: Option<RenderedImage>,
}

impl SyncImageManager {
    pub fn new(loader: ImageLoader, handle: Handle) -> Self {
        Self {
            loader,
            handle,
            current_state: ImageState::Loading,
            current_locator: None,
            receiver: None,
            rendered: None,
        }
    }

    /// Requests the picture for the front card, returning its state so far
    pub fn request(&mut self, locator: &str) -> &ImageState {
        if self.current_locator.as_deref() != Some(locator) {
            self.current_locator = Some(locator.to_string());
            self.receiver = None;

            if let Some(image) = self.handle.block_on(self.loader.get_cached(locator)) {
                self.current_state = ImageState::Ready(image);
                return &self.current_state;
            }

            self.current_state = ImageState::Loading;

            let (tx, rx) = oneshot::channel();
            let loader = self.loader.clone();
            let locator = locator.to_string();
            self.handle.spawn(async move {
                let state = loader.load(&locator).await;
                let _ = tx.send(state);
            });
            self.receiver = Some(rx);
        }

        if let Some(rx) = self.receiver.as_mut() {
            match rx.try_recv() {
                Ok(state) => {
                    self.current_state = state;
                    self.receiver = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.current_state = ImageState::Failed("Image loader stopped".to_string());
                    self.receiver = None;
                }
            }
        }

        &self.current_state
    }

    /// Starts loading a picture in the background without tracking it
    pub fn prefetch(&self, locator: &str) {
        let loader = self.loader.clone();
        let locator = locator.to_string();
        self.handle.spawn(async move {
            if !loader.is_cached(&locator).await {
                let _ = loader.load(&locator).await;
            }
        });
    }

    pub fn current_state(&self) -> &ImageState {
        &self.current_state
    }

    /// Half-block rendering of the current picture, cached per size
    pub fn render_current(&mut self, cols: u16, rows: u16) -> Option<&[Line<'static>]> {
        let ImageState::Ready(image) = &self.current_state else {
            return None;
        };
        let locator = self.current_locator.as_deref()?;

        let stale = match &self.rendered {
            Some(r) => r.locator != locator || r.cols != cols || r.rows != rows,
            None => true,
        };
        if stale {
            self.rendered = Some(RenderedImage {
                locator: locator.to_string(),
                cols,
                rows,
                lines: render_halfblocks(image, cols, rows),
            });
        }

        self.rendered.as_ref().map(|r| r.lines.as_slice())
    }

    /// Renders a cached picture without loading it, for thumbnails
    pub fn thumbnail(&self, locator: &str, cols: u16, rows: u16) -> Option<Vec<Line<'static>>> {
        let image = self.handle.block_on(self.loader.get_cached(locator))?;
        Some(render_halfblocks(&image, cols, rows))
    }

    /// Forgets the tracked picture; cached pictures are kept
    pub fn reset(&mut self) {
        self.current_locator = None;
        self.current_state = ImageState::Loading;
        self.receiver = None;
        self.rendered = None;
    }

    pub fn cache_size(&self) -> usize {
        self.handle.block_on(self.loader.cache_size())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn image() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::new_rgb8(1, 1))
    }

    mod cache_tests {
        use super::*;

        #[test]
        fn test_cache_insert_and_get() {
            let mut cache = ImageCache::new(3);
            cache.insert("a".to_string(), image());

            assert!(cache.contains("a"));
            assert!(cache.get("a").is_some());
            assert!(cache.get("b").is_none());
        }

        #[test]
        fn test_cache_evicts_least_recently_used() {
            let mut cache = ImageCache::new(2);
            cache.insert("a".to_string(), image());
            cache.insert("b".to_string(), image());

            // a becomes most recent, so b is evicted
            let _ = cache.get("a");
            cache.insert("c".to_string(), image());

            assert_eq!(cache.len(), 2);
            assert!(cache.contains("a"));
            assert!(!cache.contains("b"));
            assert!(cache.contains("c"));
        }

        #[test]
        fn test_cache_reinsert_does_not_grow() {
            let mut cache = ImageCache::new(2);
            cache.insert("a".to_string(), image());
            cache.insert("a".to_string(), image());
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_cache_clear() {
            let mut cache = ImageCache::new(2);
            cache.insert("a".to_string(), image());
            cache.clear();
            assert_eq!(cache.len(), 0);
        }
    }

    mod loader_tests {
        use super::*;

        #[tokio::test]
        async fn test_load_caches_result() {
            let loader = ImageLoader::new(Arc::new(MemorySource));

            let state = loader.load("mem://cat/a").await;
            assert!(matches!(state, ImageState::Ready(_)));
            assert!(loader.is_cached("mem://cat/a").await);
            assert_eq!(loader.cache_size().await, 1);
        }

        #[tokio::test]
        async fn test_load_failure_is_reported() {
            let loader = ImageLoader::new(Arc::new(MemorySource));

            let state = loader.load("mem://cat/broken").await;
            assert!(matches!(state, ImageState::Failed(_)));
            assert!(state.is_settled());
            assert_eq!(loader.cache_size().await, 0);
        }

        #[tokio::test]
        async fn test_preload_maps_failure() {
            let loader = ImageLoader::new(Arc::new(MemorySource));

            assert!(loader.preload("mem://cat/a").await.is_ok());
            assert!(matches!(
                loader.preload("mem://cat/broken").await,
                Err(CatswpError::PreloadFailed(_))
            ));
        }

        #[tokio::test]
        async fn test_clear_cache() {
            let loader = ImageLoader::new(Arc::new(MemorySource));
            let _ = loader.load("mem://cat/a").await;
            loader.clear_cache().await;
            assert_eq!(loader.cache_size().await, 0);
        }
    }

    mod sync_manager_tests {
        use super::*;
        use std::time::Duration;

        fn poll_until_settled(manager: &mut SyncImageManager, locator: &str) -> ImageState {
            for _ in 0..50 {
                let state = manager.request(locator).clone();
                if state.is_settled() {
                    return state;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            panic!("Image did not settle in time");
        }

        #[test]
        fn test_request_loads_in_background() {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let loader = ImageLoader::new(Arc::new(MemorySource));
            let mut manager = SyncImageManager::new(loader, runtime.handle().clone());

            let state = poll_until_settled(&mut manager, "mem://cat/a");
            assert!(matches!(state, ImageState::Ready(_)));
            assert_eq!(manager.cache_size(), 1);

            let lines = manager.render_current(10, 5).unwrap();
            assert!(!lines.is_empty());
        }

        #[test]
        fn test_request_reports_failure() {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let loader = ImageLoader::new(Arc::new(MemorySource));
            let mut manager = SyncImageManager::new(loader, runtime.handle().clone());

            let state = poll_until_settled(&mut manager, "mem://cat/broken");
            assert!(matches!(state, ImageState::Failed(_)));
            assert!(manager.render_current(10, 5).is_none());
        }

        #[test]
        fn test_cached_picture_is_ready_immediately() {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let loader = ImageLoader::new(Arc::new(MemorySource));
            runtime.block_on(loader.load("mem://cat/a"));

            let mut manager = SyncImageManager::new(loader, runtime.handle().clone());
            assert!(matches!(
                manager.request("mem://cat/a"),
                ImageState::Ready(_)
            ));
            assert!(manager.thumbnail("mem://cat/a", 4, 2).is_some());
            assert!(manager.thumbnail("mem://cat/b", 4, 2).is_none());
        }

        #[test]
        fn test_reset_forgets_current() {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let loader = ImageLoader::new(Arc::new(MemorySource));
            let mut manager = SyncImageManager::new(loader, runtime.handle().clone());

            let _ = poll_until_settled(&mut manager, "mem://cat/a");
            manager.reset();
            assert!(matches!(manager.current_state(), ImageState::Loading));
        }

        #[test]
        fn test_prefetch_fills_cache() {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let loader = ImageLoader::new(Arc::new(MemorySource));
            let manager = SyncImageManager::new(loader, runtime.handle().clone());

            manager.prefetch("mem://cat/next");

            let mut cached = false;
            for _ in 0..50 {
                if manager.cache_size() > 0 {
                    cached = true;
                    break;
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            assert!(cached, "Prefetched picture should be cached");
        }
    }
}
