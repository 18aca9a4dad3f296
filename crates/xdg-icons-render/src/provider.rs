//! Named icon access for applications.
//!
//! [`IconProvider`] wraps a theme chain and hands out decoded pixels by icon
//! name and size, keeping the results for later requests.
//!
//! # Example
//!
//! ```ignore
//! use xdg_icons::StockTheme;
//! use xdg_icons_render::{IconProvider, ProviderConfig};
//!
//! let theme = StockTheme::Adwaita.load("/usr/share/icons")?;
//! let provider = IconProvider::new(theme, ProviderConfig::default());
//! let pixels = provider.icon_or_missing("document-open", 24);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};
use xdg_icons::IconTheme;

use crate::logging::targets;
use crate::materialize::materialize;

/// Name of the icon shown in place of a missing one.
pub const DEFAULT_MISSING_ICON: &str = "image-missing";

/// Configuration for an [`IconProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Icon looked up when the requested one is missing.
    /// Default: `image-missing`.
    pub missing_icon: String,
    /// Maximum number of cached images. Once reached, new images are
    /// returned without being cached.
    /// Default: 512.
    pub cache_capacity: usize,
    /// Whether decoded images are cached at all.
    /// Default: true.
    pub cache_enabled: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            missing_icon: DEFAULT_MISSING_ICON.to_string(),
            cache_capacity: 512,
            cache_enabled: true,
        }
    }
}

impl ProviderConfig {
    /// Set the icon used for missing icons.
    #[must_use]
    pub fn with_missing_icon(mut self, name: impl Into<String>) -> Self {
        self.missing_icon = name.into();
        self
    }

    /// Set the maximum number of cached images.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Enable or disable caching.
    #[must_use]
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

/// Cache key: the resolved file and the size it was drawn at.
type CacheKey = (PathBuf, u32);

/// Resolves icon names to pixels through a theme chain.
///
/// The provider is `Send + Sync`. Two threads asking for the same uncached
/// icon may both draw it; only the first result is kept.
#[derive(Debug)]
pub struct IconProvider {
    theme: Arc<IconTheme>,
    config: ProviderConfig,
    cache: RwLock<HashMap<CacheKey, Arc<RgbaImage>>>,
}

impl IconProvider {
    /// Create a provider for `theme`.
    pub fn new(theme: Arc<IconTheme>, config: ProviderConfig) -> Self {
        Self {
            theme,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The theme icons are looked up in.
    pub fn theme(&self) -> &Arc<IconTheme> {
        &self.theme
    }

    /// The provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Pixels for `name` at `size`, or `None` if no theme in the chain has
    /// the icon or it cannot be decoded.
    ///
    /// Fixed-size raster icons are returned at their own size rather than
    /// `size`.
    pub fn icon(&self, name: &str, size: u32) -> Option<Arc<RgbaImage>> {
        let record = self.theme.find_icon(name, size, 1, true)?;
        let target = if record.scalable() { size } else { record.size() };
        let key = (record.path().to_path_buf(), target);

        if let Some(image) = self.cache.read().get(&key) {
            trace!(target: targets::PROVIDER, icon = name, size = target, "cache hit");
            return Some(Arc::clone(image));
        }

        let image = match materialize(record, target) {
            Ok(image) => Arc::new(image),
            Err(e) => {
                warn!(
                    target: targets::PROVIDER,
                    icon = name,
                    file = %record.path().display(),
                    error = %e,
                    "failed to draw icon"
                );
                return None;
            }
        };

        if !self.config.cache_enabled {
            return Some(image);
        }
        let mut cache = self.cache.write();
        if let Some(existing) = cache.get(&key) {
            return Some(Arc::clone(existing));
        }
        if cache.len() < self.config.cache_capacity {
            cache.insert(key, Arc::clone(&image));
        }
        Some(image)
    }

    /// Like [`icon`](Self::icon), falling back to the configured
    /// missing-icon image.
    pub fn icon_or_missing(&self, name: &str, size: u32) -> Option<Arc<RgbaImage>> {
        self.icon(name, size).or_else(|| {
            debug!(
                target: targets::PROVIDER,
                icon = name,
                substitute = %self.config.missing_icon,
                "icon not found, using missing-icon image"
            );
            self.icon(&self.config.missing_icon, size)
        })
    }

    /// Number of cached images.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Drop all cached images.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }
}
