//! Rasterization and cached pixel access for `xdg-icons`.
//!
//! Lookups in `xdg-icons` return file records. This crate turns those
//! records into RGBA pixels:
//!
//! - **SVG**: rendered at the requested size with `resvg`
//! - **PNG**: decoded, and resampled when the icon may be scaled
//! - **Provider**: name-based access through a theme chain, with a
//!   missing-icon substitute and a shared pixel cache
//!
//! # Example
//!
//! ```ignore
//! use xdg_icons::StockTheme;
//! use xdg_icons_render::{IconProvider, ProviderConfig, encode_png};
//!
//! let theme = StockTheme::Humanity.load("/usr/share/icons")?;
//! if let Some(record) = theme.find_icon("folder", 48, 1, true) {
//!     std::fs::write("folder.png", encode_png(record, 48)?)?;
//! }
//!
//! let provider = IconProvider::new(theme, ProviderConfig::default());
//! let pixels = provider.icon("folder", 48);
//! ```

pub mod logging;
pub mod materialize;
pub mod provider;
pub mod svg;

mod error;

pub use error::{RenderError, RenderResult};
pub use materialize::{MAX_ICON_SIZE, encode_png, materialize};
pub use provider::{DEFAULT_MISSING_ICON, IconProvider, ProviderConfig};
pub use svg::{SvgIcon, rasterize_svg};
