//! FreeDesktop icon theme parsing and icon lookup.
//!
//! This crate reads icon themes that follow the freedesktop.org Icon Theme
//! Specification and answers "which file should be shown for icon X at size N":
//!
//! - **Manifests**: parse `index.theme` into validated directory descriptors
//! - **Lazy indexing**: each theme directory is listed on first use, once
//! - **Content sniffing**: files are classified as PNG or SVG by their bytes
//! - **Best-match lookup**: size matching per directory policy, with resize
//!   preference and fallback to parent themes
//!
//! # Example
//!
//! ```ignore
//! use xdg_icons::prelude::*;
//!
//! let theme = StockTheme::Adwaita.load("/usr/share/icons")?;
//! if let Some(icon) = theme.find_icon("document-save", 24, 1, true) {
//!     println!("{} ({})", icon.path().display(), icon.content_type().mime());
//! }
//! ```

pub mod chain;
pub mod content;
pub mod directory;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod record;
pub mod theme;

mod error;

pub use chain::{StockTheme, ThemeChain};
pub use content::ContentType;
pub use directory::{DirectoryDescriptor, DirectoryOptions, IconContext, SizingPolicy};
pub use error::{Error, Result};
pub use index::ThemeDirectoryIndex;
pub use manifest::ThemeManifest;
pub use record::IconRecord;
pub use theme::{IconLookup, IconTheme, parse_theme};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::chain::{StockTheme, ThemeChain};
    pub use crate::content::ContentType;
    pub use crate::record::IconRecord;
    pub use crate::theme::{IconLookup, IconTheme};
}
