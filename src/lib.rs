//! # Wall Colors
//!
//! A Rust crate for finding the dominant wall colors of a room photograph and
//! repainting them while keeping the original lighting.
//!
//! This library provides:
//! - Strided pixel sampling and per-channel quantization
//! - A positional wall-likelihood heuristic for pixel groups
//! - Greedy clustering into ranked dominant colors with variations
//! - Tolerance-based wall recoloring that preserves luminance
//! - Binary wall masks for generative inpainting services
//!
//! ## Example
//!
//! ```rust,no_run
//! use wall_colors::{analyze_colors, replace_wall_color, image_loader};
//! use std::path::Path;
//!
//! let image = image_loader::load_rgb(Path::new("living_room.jpg"))?;
//! let clusters = analyze_colors(&image)?;
//! if let Some(wall) = clusters.iter().find(|c| c.is_wall) {
//!     let request = wall_colors::ReplacementRequest::new(wall.hex.clone(), "#7A9E7E")
//!         .with_variations(wall.variations.clone());
//!     let outcome = replace_wall_color(&image, &request)?;
//!     image_loader::save_rgb(&outcome.image, Path::new("living_room_green.png"))?;
//! }
//! # Ok::<(), wall_colors::AnalysisError>(())
//! ```

pub mod error;
pub mod constants;
pub mod config;
pub mod buffer;
pub mod sampling;
pub mod color;
pub mod detection;
pub mod recolor;
pub mod collaborators;
pub mod image_loader;

pub use error::{AnalysisError, Result};
pub use config::AnalysisConfig;
pub use buffer::{Pixel, RgbBuffer};
pub use sampling::PixelSampler;
pub use color::{ColorAnalyzer, ColorCluster, ColorVariation};
pub use detection::{Mask, MaskGenerator, WallScoreEstimator};
pub use recolor::{
    recolor_with_inpainting, ColorReplacementEngine, RecolorResult, ReplacementOutcome,
    ReplacementRequest,
};
pub use collaborators::{
    ColorSeed, ColorSeedProvider, InpaintingProvider, InpaintingRequest, NoInpainting, NoSeeds,
};

/// Extract the ranked dominant colors of an image with default parameters
///
/// Wall clusters come first, then by descending share of the sampled pixels.
///
/// # Errors
///
/// Returns `EmptyClusterSet` if the image yields no pixels
pub fn analyze_colors(image: &RgbBuffer) -> Result<Vec<ColorCluster>> {
    ColorAnalyzer::new().analyze(image)
}

/// Recolor an image with default engine parameters
///
/// # Errors
///
/// Returns `InvalidHexColor` if either color in `request` fails to parse
pub fn replace_wall_color(image: &RgbBuffer, request: &ReplacementRequest) -> Result<ReplacementOutcome> {
    ColorReplacementEngine::new().replace(image, request)
}

/// Build the inpainting mask for `target_hex` with default parameters
///
/// # Errors
///
/// Returns `InvalidHexColor` if `target_hex` fails to parse
pub fn generate_mask(image: &RgbBuffer, target_hex: &str, tolerance: u32) -> Result<Mask> {
    MaskGenerator::new().generate(image, target_hex, tolerance)
}
