//! Turning icon records into pixels.

use std::fs;
use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::{trace, warn};
use xdg_icons::{ContentType, IconRecord};

use crate::error::{RenderError, RenderResult};
use crate::logging::targets;
use crate::svg::rasterize_svg;

/// Largest edge length, in pixels, an icon is drawn at.
pub const MAX_ICON_SIZE: u32 = 4096;

/// Produce `size` x `size` pixels for `record`.
///
/// SVG icons are rasterized at `size`. PNG icons are decoded and, when their
/// pixel size differs from `size`, resampled to fit with their aspect ratio
/// kept and centered on a transparent square, the same way SVGs are drawn.
///
/// # Errors
///
/// Fails with [`RenderError::NotScalable`] when a fixed-size raster icon is
/// requested at any size other than its nominal one, and with
/// [`RenderError::InvalidSize`] for a zero size or one above
/// [`MAX_ICON_SIZE`].
pub fn materialize(record: &IconRecord, size: u32) -> RenderResult<RgbaImage> {
    check_size(record, size)?;

    let image = match record.content_type() {
        ContentType::Svg => rasterize_svg(record.path(), size)?,
        ContentType::Png => {
            let decoded = decode_png(record)?;
            if decoded.dimensions() == (size, size) {
                decoded
            } else {
                trace!(
                    target: targets::MATERIALIZE,
                    icon = record.name(),
                    from = ?decoded.dimensions(),
                    to = size,
                    "resampling raster icon"
                );
                fit_square(&decoded, size)
            }
        }
    };
    Ok(image)
}

/// Encode `record` at `size` as PNG bytes.
///
/// A PNG icon requested at its nominal size is returned as stored on disk.
pub fn encode_png(record: &IconRecord, size: u32) -> RenderResult<Vec<u8>> {
    if record.content_type() == ContentType::Png && size == record.size() {
        return fs::read(record.path()).map_err(|e| RenderError::io(record.path(), e));
    }

    let image = materialize(record, size)?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(RenderError::Encode)?;
    Ok(out.into_inner())
}

/// Resample `image` into a `size` x `size` square, keeping its aspect ratio.
fn fit_square(image: &RgbaImage, size: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    let scaled = |edge: u32| {
        ((u64::from(edge) * u64::from(size) + u64::from(longest) / 2) / u64::from(longest))
            .clamp(1, u64::from(size)) as u32
    };
    let (fit_w, fit_h) = (scaled(width), scaled(height));

    let resized = imageops::resize(image, fit_w, fit_h, FilterType::Lanczos3);
    if (fit_w, fit_h) == (size, size) {
        return resized;
    }
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let x = i64::from((size - fit_w) / 2);
    let y = i64::from((size - fit_h) / 2);
    imageops::overlay(&mut canvas, &resized, x, y);
    canvas
}

pub(crate) fn check_dimension(size: u32) -> RenderResult<()> {
    if size == 0 || size > MAX_ICON_SIZE {
        return Err(RenderError::InvalidSize {
            width: size,
            height: size,
        });
    }
    Ok(())
}

fn check_size(record: &IconRecord, size: u32) -> RenderResult<()> {
    check_dimension(size)?;
    if !record.scalable() && size != record.size() {
        return Err(RenderError::NotScalable {
            name: record.name().to_string(),
            size,
            native: record.size(),
        });
    }
    if size < record.min_size() || size > record.max_size() {
        warn!(
            target: targets::MATERIALIZE,
            icon = record.name(),
            size,
            min = record.min_size(),
            max = record.max_size(),
            "icon drawn outside its declared size range"
        );
    }
    Ok(())
}

fn decode_png(record: &IconRecord) -> RenderResult<RgbaImage> {
    let bytes = fs::read(record.path()).map_err(|e| RenderError::io(record.path(), e))?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)?;
    Ok(image.into_rgba8())
}
