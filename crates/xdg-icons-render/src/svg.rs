//! SVG rasterization for scalable icons.
//!
//! [`SvgIcon`] holds a parsed document that can be drawn at any pixel size.
//! Icons are square, so the document is scaled uniformly to fit the target
//! and centered along the shorter axis.
//!
//! # Usage
//!
//! ```ignore
//! use xdg_icons_render::{SvgIcon, rasterize_svg};
//!
//! let svg = SvgIcon::from_file("scalable/apps/firefox.svg")?;
//! let pixels = svg.render(48)?;
//!
//! // Or in one step
//! let pixels = rasterize_svg("scalable/apps/firefox.svg", 48)?;
//! ```

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use resvg::tiny_skia;
use resvg::usvg;

use crate::error::{RenderError, RenderResult};
use crate::materialize::check_dimension;

/// A parsed SVG document.
///
/// The tree is shared behind an `Arc`, so clones are cheap and may be sent
/// to other threads.
#[derive(Clone)]
pub struct SvgIcon {
    tree: Arc<usvg::Tree>,
    width: f32,
    height: f32,
}

impl SvgIcon {
    /// Load an SVG from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be read and
    /// [`RenderError::Svg`] if it is not a valid document.
    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| RenderError::io(path, e))?;
        Self::from_bytes(&data)
    }

    /// Load an SVG from bytes in memory.
    pub fn from_bytes(data: &[u8]) -> RenderResult<Self> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
        let size = tree.size();
        Ok(Self {
            width: size.width(),
            height: size.height(),
            tree: Arc::new(tree),
        })
    }

    /// Natural size from the document's `width`/`height` or `viewBox`.
    pub fn natural_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Draw the document into a `size` x `size` image.
    ///
    /// Pixels are returned as straight (non-premultiplied) RGBA.
    ///
    /// Fails with [`RenderError::InvalidSize`] for a zero size or one above
    /// [`MAX_ICON_SIZE`](crate::MAX_ICON_SIZE).
    pub fn render(&self, size: u32) -> RenderResult<RgbaImage> {
        check_dimension(size)?;
        let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(RenderError::InvalidSize {
            width: size,
            height: size,
        })?;

        let target = size as f32;
        let scale = (target / self.width).min(target / self.height);
        let dx = (target - self.width * scale) / 2.0;
        let dy = (target - self.height * scale) / 2.0;
        let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(dx, dy);

        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        let rgba = unpremultiply(pixmap.data());
        RgbaImage::from_raw(size, size, rgba).ok_or(RenderError::InvalidSize {
            width: size,
            height: size,
        })
    }
}

impl std::fmt::Debug for SvgIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgIcon")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Parse the SVG at `path` and draw it at `size` x `size` pixels.
pub fn rasterize_svg(path: impl AsRef<Path>, size: u32) -> RenderResult<RgbaImage> {
    check_dimension(size)?;
    SvgIcon::from_file(path)?.render(size)
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let alpha = px[3];
        if alpha == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let a = f32::from(alpha) / 255.0;
        for &channel in &px[..3] {
            out.push((f32::from(channel) / a).round().min(255.0) as u8);
        }
        out.push(alpha);
    }
    out
}
