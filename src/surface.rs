//! Image loading, creation and scaling on top of raylib's CPU-side `Image`.
//!
//! Everything here works without a window: raylib decodes, converts and
//! resizes images in main memory. Upload to the GPU (`load_texture_from_image`)
//! is left to the game.
//!
//! Transparency policy, shared by [`load_image`] and [`create_image`]:
//! - no color key: the image is converted to 32-bit RGBA and keeps its own
//!   per-pixel alpha
//! - color key: the alpha channel is dropped (the image becomes opaque) and
//!   every pixel equal to the key is made fully transparent

use std::fs::File;
use std::path::Path;

use log::{debug, info};
use raylib::ffi::PixelFormat;
use raylib::prelude::{Color, Image};

use crate::error::{AssetError, Result};
use crate::geometry::ScaleFactor;

/// Fill color used when the caller has no preference.
pub const DEFAULT_BG_COLOR: Color = Color::BLACK;

/// Largest side, in pixels, a scaled image may have.
pub const MAX_IMAGE_SIDE: i32 = 16384;

/// Resampling used when an image is scaled.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum ResizeFilter {
    /// Nearest-neighbor - sharp pixels, no blur.
    /// Best for pixel art sheets.
    #[default]
    Nearest,
    /// raylib's bicubic resize - smooth interpolation.
    Smooth,
}

impl ResizeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Smooth => "smooth",
        }
    }
}

impl std::str::FromStr for ResizeFilter {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(ResizeFilter::Nearest),
            "smooth" | "bilinear" | "bicubic" => Ok(ResizeFilter::Smooth),
            other => Err(AssetError::Config(format!("unknown resize filter '{}'", other))),
        }
    }
}

/// Load an image from `path`, apply the transparency policy, then scale it.
///
/// Fails with [`AssetError::Io`] when the file cannot be opened and with
/// [`AssetError::Image`] when raylib cannot decode it.
pub fn load_image(
    path: impl AsRef<Path>,
    colorkey: Option<Color>,
    scale: ScaleFactor,
) -> Result<Image> {
    load_image_with(path, colorkey, scale, ResizeFilter::Nearest)
}

/// [`load_image`] with an explicit resize filter.
pub fn load_image_with(
    path: impl AsRef<Path>,
    colorkey: Option<Color>,
    scale: ScaleFactor,
    filter: ResizeFilter,
) -> Result<Image> {
    let path = path.as_ref();
    // raylib only reports "failed"; probe the file first so missing and
    // unreadable files surface as I/O errors.
    File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let path_str = path
        .to_str()
        .ok_or_else(|| AssetError::InvalidPath(path.to_path_buf()))?;

    let mut image = Image::load_image(path_str).map_err(|e| AssetError::Image {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if image.width() <= 0 || image.height() <= 0 {
        return Err(AssetError::Image {
            path: path.to_path_buf(),
            reason: "decoded image is empty".into(),
        });
    }
    if let Some(key) = colorkey {
        debug!("Applying color key {:?} to {}", key, path.display());
    }
    apply_transparency(&mut image, colorkey);

    info!(
        "Loaded image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    scale_image_with(image, scale, filter)
}

/// Create a new `size` image filled with `bg_color`, apply the transparency
/// policy, then scale it.
///
/// With a color key the fill is forced opaque, so a `bg_color` equal to the
/// key yields a fully transparent image.
pub fn create_image(
    size: (i32, i32),
    colorkey: Option<Color>,
    bg_color: Color,
    scale: ScaleFactor,
) -> Result<Image> {
    let (width, height) = size;
    if width <= 0 || height <= 0 {
        return Err(AssetError::InvalidSize { width, height });
    }

    let fill = match colorkey {
        Some(_) => opaque(bg_color),
        None => bg_color,
    };
    let mut image = Image::gen_image_color(width, height, fill);
    apply_transparency(&mut image, colorkey);

    scale_image(image, scale)
}

/// Resize `image` by `scale` with nearest-neighbor sampling.
///
/// Returns the image untouched when the factor is not strictly positive.
pub fn scale_image(image: Image, scale: ScaleFactor) -> Result<Image> {
    scale_image_with(image, scale, ResizeFilter::Nearest)
}

/// Resize `image` by `scale` using `filter`.
///
/// A side that would truncate to zero pixels is kept at one pixel. Fails with
/// [`AssetError::InvalidSize`] when a side would exceed [`MAX_IMAGE_SIDE`].
pub fn scale_image_with(
    mut image: Image,
    scale: ScaleFactor,
    filter: ResizeFilter,
) -> Result<Image> {
    if !scale.is_active() {
        return Ok(image);
    }
    let (width, height) = scaled_size(image.width(), image.height(), scale)?;
    if width == image.width() && height == image.height() {
        return Ok(image);
    }

    debug!(
        "Scaling image {}x{} -> {}x{} ({})",
        image.width(),
        image.height(),
        width,
        height,
        filter.as_str()
    );
    match filter {
        ResizeFilter::Nearest => image.resize_nn(width, height),
        ResizeFilter::Smooth => image.resize(width, height),
    }
    Ok(image)
}

/// Size of a `width`x`height` image after scaling, bounded by [`MAX_IMAGE_SIDE`].
pub fn scaled_size(width: i32, height: i32, scale: ScaleFactor) -> Result<(i32, i32)> {
    if !scale.is_active() {
        return Ok((width, height));
    }
    // Checked in f64 so huge factors are caught before the i32 cast saturates.
    let w = (width as f64 * scale.value()).trunc();
    let h = (height as f64 * scale.value()).trunc();
    let limit = MAX_IMAGE_SIDE as f64;
    if w > limit || h > limit {
        return Err(AssetError::InvalidSize {
            width: w.min(i32::MAX as f64) as i32,
            height: h.min(i32::MAX as f64) as i32,
        });
    }
    Ok(((w as i32).max(1), (h as i32).max(1)))
}

/// Encode `image` as PNG and write it to `path`, whatever its extension.
pub fn export_png(image: &Image, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = image
        .export_image_to_memory(".png")
        .map_err(|e| AssetError::Image {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    std::fs::write(path, bytes).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

fn apply_transparency(image: &mut Image, colorkey: Option<Color>) {
    match colorkey {
        None => image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8),
        Some(key) => {
            // Round-trip through RGB to discard the source alpha.
            image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8);
            image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8);
            image.color_replace(opaque(key), Color::BLANK);
        }
    }
}

/// Color keys and keyed fills compare on RGB only.
fn opaque(color: Color) -> Color {
    Color::new(color.r, color.g, color.b, 255)
}
