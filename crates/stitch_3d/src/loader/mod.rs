//! Asset loading
//!
//! Provides a unified API for turning 3D model files into [`SceneGraph`]s:
//!
//! - glTF 2.0 (`.gltf`, `.glb`) - Feature: `loader-gltf`
//!
//! Loaded graphs are shared read-only through `Arc`; consumers that need to
//! mutate node state clone (or graft) them first.
//!
//! # Example
//!
//! ```ignore
//! use stitch_3d::loader::*;
//!
//! let mut registry = LoaderRegistry::new();
//!
//! // Warm the cache during startup
//! registry.preload("models/WALLET.glb")?;
//!
//! // Later lookups are served from the cache
//! let asset = registry.load("models/WALLET.glb")?;
//! ```

mod cache;

#[cfg(feature = "loader-gltf")]
mod gltf;

pub use cache::{AssetCache, CacheStats};

#[cfg(feature = "loader-gltf")]
pub use self::gltf::GltfLoader;

use crate::scene::SceneGraph;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading an asset
#[derive(Error, Debug)]
pub enum LoadError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(err.to_string())
        } else {
            LoadError::Io(err)
        }
    }
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Trait for asset loaders
pub trait AssetLoader: Send + Sync {
    /// Load a scene graph from a file path
    fn load(&self, path: &Path) -> Result<SceneGraph>;

    /// Get supported file extensions
    fn supported_extensions(&self) -> &[&str];

    /// Check if this loader can handle the given extension
    fn can_load(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Get the loader name for debugging
    fn name(&self) -> &'static str;
}

/// Registry of available loaders plus a path-keyed cache
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn AssetLoader>>,
    cache: AssetCache,
}

impl LoaderRegistry {
    /// Create a registry with all built-in loaders
    pub fn new() -> Self {
        let mut loaders: Vec<Box<dyn AssetLoader>> = Vec::new();

        #[cfg(feature = "loader-gltf")]
        loaders.push(Box::new(GltfLoader::new()));

        Self {
            loaders,
            cache: AssetCache::new(16),
        }
    }

    /// Create a registry without any loaders
    pub fn empty() -> Self {
        Self {
            loaders: Vec::new(),
            cache: AssetCache::new(16),
        }
    }

    /// Create with a specific cache size
    pub fn with_cache_size(mut self, max_entries: usize) -> Self {
        self.cache = AssetCache::new(max_entries);
        self
    }

    /// Register a custom loader
    pub fn register(&mut self, loader: Box<dyn AssetLoader>) {
        self.loaders.push(loader);
    }

    /// Load an asset, serving repeated paths from the cache
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<SceneGraph>> {
        let path = path.as_ref();
        let key = path.to_string_lossy().to_string();

        if let Some(cached) = self.cache.get(&key) {
            debug!(path = %key, "asset served from cache");
            return Ok(cached);
        }

        let scene = Arc::new(self.load_uncached(path)?);
        info!(path = %key, nodes = scene.len(), "asset loaded");
        self.cache.insert(key, Arc::clone(&scene));
        Ok(scene)
    }

    /// Warm the cache for `path` without handing out the asset
    pub fn preload(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let key = path.as_ref().to_string_lossy().to_string();
        if self.cache.contains(&key) {
            return Ok(());
        }
        let scene = self.load_uncached(path.as_ref())?;
        info!(path = %key, nodes = scene.len(), "asset preloaded");
        self.cache.preload(key, Arc::new(scene));
        Ok(())
    }

    /// Load without caching
    pub fn load_uncached(&self, path: impl AsRef<Path>) -> Result<SceneGraph> {
        let path = path.as_ref();

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let loader = self
            .loaders
            .iter()
            .find(|l| l.can_load(extension))
            .ok_or_else(|| LoadError::UnsupportedFormat(extension.to_string()))?;

        debug!(loader = loader.name(), path = %path.display(), "loading asset");
        loader.load(path)
    }

    /// Access the cache
    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Clear the cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Check if a format is supported
    pub fn supports_format(&self, extension: &str) -> bool {
        self.loaders.iter().any(|l| l.can_load(extension))
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
