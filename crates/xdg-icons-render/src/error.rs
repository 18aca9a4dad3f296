//! Error types for the render crate.

use std::path::PathBuf;

use resvg::usvg;
use thiserror::Error;

/// Errors that can occur while turning an icon into pixels.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The icon file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A raster icon could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// An SVG document could not be parsed.
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    /// A fixed-size raster icon was requested at another size.
    #[error("icon '{name}' is fixed at {native}px and cannot be drawn at {size}px")]
    NotScalable { name: String, size: u32, native: u32 },

    /// Invalid target dimensions (zero width or height).
    #[error("invalid target dimensions: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Pixels could not be encoded as PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
