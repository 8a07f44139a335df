//! Asset cache for loaded scenes
//!
//! Provides an LRU cache keyed by asset path so the same model file is
//! parsed once per process.

use crate::scene::SceneGraph;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Statistics about the asset cache
#[derive(Clone, Debug, Default)]
pub struct CacheStats {
    /// Number of entries in the cache
    pub entries: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Total nodes across cached scenes
    pub total_nodes: usize,
}

impl CacheStats {
    /// Get the hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }
}

/// Entry in the asset cache
struct CacheEntry {
    scene: Arc<SceneGraph>,
    access_order: u64,
}

/// LRU cache for loaded scenes
pub struct AssetCache {
    entries: FxHashMap<String, CacheEntry>,
    max_entries: usize,
    access_counter: u64,
    hits: u64,
    misses: u64,
}

impl AssetCache {
    /// Create a new cache with the specified maximum entries (at least 1)
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            max_entries: max_entries.max(1),
            access_counter: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Get a scene from the cache
    pub fn get(&mut self, key: &str) -> Option<Arc<SceneGraph>> {
        self.access_counter += 1;

        if let Some(entry) = self.entries.get_mut(key) {
            entry.access_order = self.access_counter;
            self.hits += 1;
            Some(Arc::clone(&entry.scene))
        } else {
            self.misses += 1;
            None
        }
    }

    /// Insert a scene into the cache
    pub fn insert(&mut self, key: String, scene: Arc<SceneGraph>) {
        self.access_counter += 1;

        // Evict if necessary
        while !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_lru();
        }

        self.entries.insert(
            key,
            CacheEntry {
                scene,
                access_order: self.access_counter,
            },
        );
    }

    /// Insert only if the key isn't cached yet
    pub fn preload(&mut self, key: String, scene: Arc<SceneGraph>) {
        if !self.entries.contains_key(&key) {
            self.insert(key, scene);
        }
    }

    /// Remove and return a scene from the cache
    pub fn remove(&mut self, key: &str) -> Option<Arc<SceneGraph>> {
        self.entries.remove(key).map(|e| e.scene)
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_counter = 0;
        self.hits = 0;
        self.misses = 0;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            total_nodes: self.entries.values().map(|e| e.scene.len()).sum(),
        }
    }

    /// Check if a key is in the cache
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict the least recently used entry
    fn evict_lru(&mut self) {
        let lru_key = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.access_order)
            .map(|(k, _)| k.clone());

        if let Some(key) = lru_key {
            self.entries.remove(&key);
        }
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(16)
    }
}
