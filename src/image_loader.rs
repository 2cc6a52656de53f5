//! Image file loading and saving
//!
//! Bridges image files and [`RgbBuffer`] through the `image` crate. Every
//! decoded image is converted to 8-bit RGB; alpha is dropped.
//!
//! ## Supported Formats
//!
//! - JPEG
//! - PNG

use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::buffer::RgbBuffer;
use crate::error::{AnalysisError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Load an image from disk as an RGB buffer
///
/// The format is guessed from the file content, so a misnamed file still
/// decodes.
///
/// # Errors
///
/// Returns `ImageLoadError` if the file cannot be opened or decoded
///
/// # Example
///
/// ```rust,no_run
/// use wall_colors::image_loader::load_rgb;
/// use std::path::Path;
///
/// let image = load_rgb(Path::new("living_room.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), wall_colors::AnalysisError>(())
/// ```
pub fn load_rgb(path: &Path) -> Result<RgbBuffer> {
    let reader = ImageReader::open(path)
        .map_err(|e| {
            AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
        })?
        .with_guessed_format()
        .map_err(|e| {
            AnalysisError::image_load(format!("Failed to read image file: {}", path.display()), e)
        })?;

    let decoded = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(RgbBuffer::from(decoded.to_rgb8()))
}

/// Write an RGB buffer to disk, choosing the encoder from the extension
///
/// # Errors
///
/// Returns `ImageLoadError` for unsupported extensions or encoder failures
pub fn save_rgb(image: &RgbBuffer, path: &Path) -> Result<()> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(AnalysisError::ImageLoadError {
            message: format!("Unsupported output format: {}", path.display()),
            source: None,
        });
    }

    image.to_rgb_image().save(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to write image: {}", path.display()), e)
    })
}

impl From<RgbImage> for RgbBuffer {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        RgbBuffer::from_parts(width, height, image.into_raw())
    }
}

impl RgbBuffer {
    /// Copy into an `image::RgbImage`
    pub fn to_rgb_image(&self) -> RgbImage {
        let (width, height) = self.dimensions();
        // Length is validated on construction, so `from_raw` always succeeds
        RgbImage::from_raw(width, height, self.as_bytes().to_vec())
            .unwrap_or_else(|| RgbImage::new(width, height))
    }
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    ["jpg", "jpeg", "png"].contains(&ext_lower.as_str())
}
