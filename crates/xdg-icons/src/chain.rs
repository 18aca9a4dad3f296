//! Building fallback chains of themes.
//!
//! Themes are loaded bottom-up: the base theme first, then every theme that
//! inherits from the one before it. The topmost theme is returned and owns
//! the rest of the chain through its fallback link.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::logging::targets;
use crate::manifest::INDEX_FILE;
use crate::theme::IconTheme;

/// Builder for a chain of themes loaded from `index.theme` files.
///
/// # Example
///
/// ```ignore
/// let theme = ThemeChain::builder()
///     .base("/usr/share/icons/hicolor/index.theme")
///     .then("/usr/share/icons/Adwaita/index.theme")
///     .build()?
///     .expect("chain has a base theme");
/// assert_eq!(theme.name(), "Adwaita");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThemeChain {
    manifests: Vec<PathBuf>,
}

impl ThemeChain {
    /// Start an empty chain.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Set the bottom theme, the one without fallback.
    ///
    /// Replaces anything added so far.
    #[must_use]
    pub fn base(mut self, index_file: impl Into<PathBuf>) -> Self {
        self.manifests.clear();
        self.manifests.push(index_file.into());
        self
    }

    /// Add a theme that falls back to the previously added one.
    #[must_use]
    pub fn then(mut self, index_file: impl Into<PathBuf>) -> Self {
        self.manifests.push(index_file.into());
        self
    }

    /// Number of themes in the chain.
    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    /// Returns true if no theme has been added.
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Load every theme and link them together.
    ///
    /// Returns `Ok(None)` for an empty chain. The first manifest that fails
    /// to load aborts the build.
    pub fn build(self) -> Result<Option<Arc<IconTheme>>> {
        let mut top: Option<Arc<IconTheme>> = None;
        for path in &self.manifests {
            let mut theme = IconTheme::from_index_file(path)?;
            if let Some(fallback) = top.take() {
                theme = theme.with_fallback(fallback);
            }
            top = Some(Arc::new(theme));
        }

        if let Some(theme) = &top {
            debug!(
                target: targets::CHAIN,
                top = %theme.name(),
                depth = self.manifests.len(),
                "built theme chain"
            );
        }
        Ok(top)
    }
}

/// Themes with a well-known fallback relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockTheme {
    /// The freedesktop fallback theme every other theme ends in.
    Hicolor,
    /// GNOME default theme, falls back to hicolor.
    Adwaita,
    /// Ubuntu theme, falls back to Adwaita.
    Humanity,
    /// Dark variant of Humanity.
    HumanityDark,
    /// Ubuntu Suru theme, falls back to Humanity.
    Suru,
    /// Tango Desktop Project theme, falls back to hicolor.
    Tango,
}

impl StockTheme {
    /// All stock themes.
    pub const ALL: [StockTheme; 6] = [
        StockTheme::Hicolor,
        StockTheme::Adwaita,
        StockTheme::Humanity,
        StockTheme::HumanityDark,
        StockTheme::Suru,
        StockTheme::Tango,
    ];

    /// Directory name of the theme under an icon root.
    pub fn dir_name(self) -> &'static str {
        match self {
            StockTheme::Hicolor => "hicolor",
            StockTheme::Adwaita => "Adwaita",
            StockTheme::Humanity => "Humanity",
            StockTheme::HumanityDark => "Humanity-Dark",
            StockTheme::Suru => "Suru",
            StockTheme::Tango => "Tango",
        }
    }

    /// The theme this one falls back to.
    pub fn fallback(self) -> Option<StockTheme> {
        match self {
            StockTheme::Hicolor => None,
            StockTheme::Adwaita | StockTheme::Tango => Some(StockTheme::Hicolor),
            StockTheme::Humanity => Some(StockTheme::Adwaita),
            StockTheme::HumanityDark | StockTheme::Suru => Some(StockTheme::Humanity),
        }
    }

    /// The full chain ending in this theme, base first.
    pub fn lineage(self) -> Vec<StockTheme> {
        let mut chain: Vec<_> = std::iter::successors(Some(self), |t| t.fallback()).collect();
        chain.reverse();
        chain
    }

    /// Path of the theme's `index.theme` under `icon_root`.
    pub fn index_file(self, icon_root: impl AsRef<Path>) -> PathBuf {
        icon_root.as_ref().join(self.dir_name()).join(INDEX_FILE)
    }

    /// Load this theme and everything it falls back to from `icon_root`.
    pub fn load(self, icon_root: impl AsRef<Path>) -> Result<Arc<IconTheme>> {
        let icon_root = icon_root.as_ref();
        let top = self
            .lineage()
            .into_iter()
            .map(|theme| theme.index_file(icon_root))
            .fold(ThemeChain::builder(), |chain, path| chain.then(path))
            .build()?
            .ok_or_else(|| Error::io(icon_root, io::ErrorKind::NotFound.into()))?;
        debug!(
            target: targets::CHAIN,
            theme = %self,
            root = %icon_root.display(),
            "loaded stock theme chain"
        );
        Ok(top)
    }
}

impl fmt::Display for StockTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
