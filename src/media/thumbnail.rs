// SPDX-License-Identifier: MPL-2.0
//! Thumbnail images and their in-memory cache.
//!
//! Thumbnails are extracted off the UI thread and stored in an LRU cache
//! keyed by file path. A failed extraction is cached too, so the list shows a
//! placeholder instead of retrying on every redraw.

use crate::config::THUMBNAIL_CACHE_CAPACITY;
use iced::widget::image;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// A decoded, display-ready thumbnail.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// What the cache knows about a path.
#[derive(Debug, Clone)]
pub enum ThumbnailSlot {
    Ready(Thumbnail),
    /// Extraction failed; render a placeholder.
    Failed,
}

/// LRU cache of thumbnails with in-flight tracking.
pub struct ThumbnailCache {
    cache: LruCache<PathBuf, ThumbnailSlot>,
    pending: HashSet<PathBuf>,
}

impl ThumbnailCache {
    /// Creates a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
        }
    }

    /// Looks up a path, refreshing its recency.
    pub fn get(&mut self, path: &Path) -> Option<&ThumbnailSlot> {
        self.cache.get(path)
    }

    /// Looks up a path without touching recency; used while rendering.
    #[must_use]
    pub fn peek(&self, path: &Path) -> Option<&ThumbnailSlot> {
        self.cache.peek(path)
    }

    /// Returns the paths that are neither cached nor already being extracted,
    /// and marks them as pending.
    pub fn claim_missing<'a, I>(&mut self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut claimed = Vec::new();
        for path in paths {
            if self.cache.contains(path) || self.pending.contains(path) {
                continue;
            }
            self.pending.insert(path.to_path_buf());
            claimed.push(path.to_path_buf());
        }
        claimed
    }

    /// Stores an extraction result and clears the pending mark.
    pub fn insert(&mut self, path: PathBuf, slot: ThumbnailSlot) {
        self.pending.remove(&path);
        self.cache.put(path, slot);
    }

    #[must_use]
    pub fn is_pending(&self, path: &Path) -> bool {
        self.pending.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(THUMBNAIL_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ThumbnailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailCache")
            .field("len", &self.cache.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Thumbnail {
        Thumbnail::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn claim_missing_skips_cached_and_pending_paths() {
        let mut cache = ThumbnailCache::new(8);
        cache.insert(PathBuf::from("/v/a.mp4"), ThumbnailSlot::Ready(tiny()));

        let paths = [
            PathBuf::from("/v/a.mp4"),
            PathBuf::from("/v/b.mp4"),
            PathBuf::from("/v/c.mp4"),
        ];
        let first = cache.claim_missing(paths.iter().map(PathBuf::as_path));
        assert_eq!(
            first,
            vec![PathBuf::from("/v/b.mp4"), PathBuf::from("/v/c.mp4")]
        );

        // Already pending, nothing new to claim.
        let second = cache.claim_missing(paths.iter().map(PathBuf::as_path));
        assert!(second.is_empty());
        assert!(cache.is_pending(Path::new("/v/b.mp4")));
    }

    #[test]
    fn insert_clears_pending_and_records_failure() {
        let mut cache = ThumbnailCache::new(8);
        let path = PathBuf::from("/v/broken.mp4");
        cache.claim_missing([path.as_path()]);

        cache.insert(path.clone(), ThumbnailSlot::Failed);

        assert!(!cache.is_pending(&path));
        assert!(matches!(cache.peek(&path), Some(ThumbnailSlot::Failed)));
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let mut cache = ThumbnailCache::new(2);
        cache.insert(PathBuf::from("/a"), ThumbnailSlot::Failed);
        cache.insert(PathBuf::from("/b"), ThumbnailSlot::Failed);

        // Touch /a so /b becomes the eviction candidate.
        assert!(cache.get(Path::new("/a")).is_some());
        cache.insert(PathBuf::from("/c"), ThumbnailSlot::Failed);

        assert_eq!(cache.len(), 2);
        assert!(cache.peek(Path::new("/a")).is_some());
        assert!(cache.peek(Path::new("/b")).is_none());
    }

    #[test]
    fn zero_capacity_still_holds_one_entry() {
        let mut cache = ThumbnailCache::new(0);
        cache.insert(PathBuf::from("/a"), ThumbnailSlot::Failed);
        assert_eq!(cache.len(), 1);
    }
}
