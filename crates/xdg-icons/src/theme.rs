//! Icon themes and best-match lookup.
//!
//! An [`IconTheme`] is built once from its `index.theme` and is read-only
//! afterwards, so a single instance can be shared across threads behind an
//! [`Arc`]. Each theme may hold one fallback theme that is consulted when the
//! theme itself has nothing suitable, forming a chain that ends at a theme
//! without fallback (usually `hicolor`).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::directory::{DirectoryDescriptor, SizingPolicy};
use crate::error::{Error, Result};
use crate::index::ThemeDirectoryIndex;
use crate::logging::targets;
use crate::manifest::{INDEX_FILE, ThemeManifest};
use crate::record::IconRecord;

/// Parameters for an icon lookup.
///
/// # Example
///
/// ```ignore
/// let lookup = IconLookup::new("document-save", 24).with_scale(2);
/// let icon = theme.lookup(&lookup);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLookup {
    /// Icon name to look up.
    pub name: String,
    /// Desired size in pixels.
    pub size: u32,
    /// Display scale. Accepted but not used for matching yet.
    pub scale: u32,
    /// Return a resized icon from this theme rather than a correctly sized
    /// one from the fallback theme.
    pub prefer_this_theme: bool,
}

impl IconLookup {
    /// Create a lookup for an icon name and size.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
            scale: 1,
            prefer_this_theme: true,
        }
    }

    /// Set the display scale.
    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set whether a resized icon from the same theme is preferred over
    /// deferring to the fallback theme.
    #[must_use]
    pub fn with_prefer_this_theme(mut self, prefer: bool) -> Self {
        self.prefer_this_theme = prefer;
        self
    }
}

/// A parsed icon theme with lazily indexed directories.
#[derive(Debug)]
pub struct IconTheme {
    name: String,
    comment: String,
    root: PathBuf,
    inherits: Vec<String>,
    directories: Vec<ThemeDirectoryIndex>,
    scaled_directories: Vec<ThemeDirectoryIndex>,
    hidden: bool,
    example: String,
    fallback: Option<Arc<IconTheme>>,
}

impl IconTheme {
    /// Load a theme from its `index.theme` file.
    ///
    /// The theme root is the directory containing the file.
    pub fn from_index_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_manifest_str(&text, root)
    }

    /// Load a theme from a theme root directory containing `index.theme`.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self> {
        Self::from_index_file(root.as_ref().join(INDEX_FILE))
    }

    /// Parse manifest text for a theme rooted at `root`.
    pub fn from_manifest_str(text: &str, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let manifest = ThemeManifest::parse(text, root)?;
        Ok(Self::from_manifest(manifest, root))
    }

    /// Build a theme from an already parsed manifest.
    ///
    /// Directories are ordered by descending nominal size; directories of
    /// equal size keep their declaration order.
    pub fn from_manifest(manifest: ThemeManifest, root: impl Into<PathBuf>) -> Self {
        let mut directories = manifest.directories;
        directories.sort_by(|a, b| b.size().cmp(&a.size()));

        let theme = Self {
            name: manifest.name,
            comment: manifest.comment,
            root: root.into(),
            inherits: manifest.inherits,
            directories: directories.into_iter().map(ThemeDirectoryIndex::new).collect(),
            scaled_directories: manifest
                .scaled_directories
                .into_iter()
                .map(ThemeDirectoryIndex::new)
                .collect(),
            hidden: manifest.hidden,
            example: manifest.example,
            fallback: None,
        };
        debug!(
            target: targets::THEME,
            theme = %theme.name,
            root = %theme.root.display(),
            "loaded icon theme"
        );
        theme
    }

    /// Attach the theme consulted when this theme has no suitable icon.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<IconTheme>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Short theme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Longer theme description.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Directory containing `index.theme`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parent theme names as declared. Informational only: fallback is wired
    /// with [`with_fallback`](Self::with_fallback).
    pub fn inherits(&self) -> &[String] {
        &self.inherits
    }

    /// Whether the theme should be hidden from theme pickers.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Name of an icon that showcases the theme.
    pub fn example(&self) -> &str {
        &self.example
    }

    /// Directories in lookup order (largest nominal size first).
    pub fn directories(&self) -> &[ThemeDirectoryIndex] {
        &self.directories
    }

    /// Directories listed under `ScaledDirectories`. Not used by lookup.
    pub fn scaled_directories(&self) -> &[ThemeDirectoryIndex] {
        &self.scaled_directories
    }

    /// Find a directory by its section name.
    pub fn directory(&self, name: &str) -> Option<&ThemeDirectoryIndex> {
        self.directories
            .iter()
            .chain(&self.scaled_directories)
            .find(|d| d.descriptor().name() == name)
    }

    /// The theme consulted when this one has no suitable icon.
    pub fn fallback(&self) -> Option<&Arc<IconTheme>> {
        self.fallback.as_ref()
    }

    /// This theme followed by its fallbacks, in delegation order.
    pub fn chain(&self) -> impl Iterator<Item = &IconTheme> {
        std::iter::successors(Some(self), |theme| theme.fallback.as_deref())
    }

    /// Find the best icon for `icon_name` at `size`, consulting the fallback
    /// chain when this theme has nothing suitable.
    ///
    /// `scale` is accepted for API stability and does not affect matching.
    /// With `prefer_this_theme`, an icon from this theme that has to be
    /// resized wins over a correctly sized one from the fallback theme.
    ///
    /// Returns `None` when no theme in the chain has the icon.
    pub fn find_icon(
        &self,
        icon_name: &str,
        size: u32,
        scale: u32,
        prefer_this_theme: bool,
    ) -> Option<&IconRecord> {
        if let Some(icon) = self.find_icon_local(icon_name, size, scale, prefer_this_theme) {
            return Some(icon);
        }

        let fallback = self.fallback.as_deref()?;
        trace!(
            target: targets::LOOKUP,
            icon = icon_name,
            size,
            from = %self.name,
            to = %fallback.name,
            "deferring to fallback theme"
        );
        fallback.find_icon(icon_name, size, scale, true)
    }

    /// Run a lookup described by an [`IconLookup`].
    pub fn lookup(&self, lookup: &IconLookup) -> Option<&IconRecord> {
        self.find_icon(&lookup.name, lookup.size, lookup.scale, lookup.prefer_this_theme)
    }

    /// Look up an icon in this theme only, without consulting the fallback.
    pub fn find_icon_local(
        &self,
        icon_name: &str,
        size: u32,
        scale: u32,
        prefer_this_theme: bool,
    ) -> Option<&IconRecord> {
        // TODO: match `scale` against directory scales and consult
        // `scaled_directories` once HiDPI lookups are wired up.
        let _ = scale;
        if icon_name.is_empty() || size == 0 {
            return None;
        }

        let mut available = SizesAvailable::default();
        for directory in &self.directories {
            let Some(icon) = directory.get(icon_name) else {
                continue;
            };
            let descriptor = directory.descriptor();
            if descriptor.matches_size(size) {
                trace!(
                    target: targets::LOOKUP,
                    icon = icon_name,
                    size,
                    theme = %self.name,
                    dir = descriptor.name(),
                    "matched icon"
                );
                return Some(icon);
            }
            if prefer_this_theme {
                available.record(descriptor);
            }
        }

        let target = available.resize_target(size)?;
        trace!(
            target: targets::LOOKUP,
            icon = icon_name,
            size,
            target,
            theme = %self.name,
            "no exact match, retrying at nearest available size"
        );
        self.find_icon_local(icon_name, target, scale, false)
    }

    /// Check whether this theme (not its fallbacks) has an icon named `name`
    /// at any size.
    pub fn has_icon(&self, name: &str) -> bool {
        self.directories.iter().any(|d| d.contains(name))
    }

    /// Nominal sizes at which this theme provides `name`, ascending.
    pub fn available_sizes(&self, name: &str) -> Vec<u32> {
        let mut sizes: Vec<u32> = self
            .directories
            .iter()
            .filter(|d| d.contains(name))
            .map(|d| d.descriptor().size())
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Whether any directory holds resizable icons.
    pub fn has_scalable(&self) -> bool {
        self.directories
            .iter()
            .any(|d| d.descriptor().sizing_policy() == SizingPolicy::Scalable)
    }
}

/// Size bounds collected from directories that have an icon but did not
/// match the requested size.
#[derive(Debug, Default)]
struct SizesAvailable {
    bounds: Vec<u32>,
}

impl SizesAvailable {
    fn record(&mut self, descriptor: &DirectoryDescriptor) {
        let (min, max) = descriptor.size_bounds();
        self.bounds.push(min);
        self.bounds.push(max);
    }

    /// Size to retry with: the largest bound when the request is above all
    /// of them, otherwise the smallest bound above the request.
    fn resize_target(&self, size: u32) -> Option<u32> {
        let largest = self.bounds.iter().copied().max()?;
        if size > largest {
            return Some(largest);
        }
        self.bounds.iter().copied().filter(|&b| b > size).min()
    }
}

/// Parse the theme whose manifest is at `path`.
pub fn parse_theme(path: impl AsRef<Path>) -> Result<IconTheme> {
    IconTheme::from_index_file(path)
}
