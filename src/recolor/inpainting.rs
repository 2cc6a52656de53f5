//! Generative recoloring with local fallback
//!
//! Sends the image, a wall mask and a repaint instruction to an
//! [`InpaintingProvider`]. Whenever the provider fails, declines or answers
//! with a buffer of the wrong size, the local replacement engine runs instead.

use log::{debug, warn};

use crate::buffer::RgbBuffer;
use crate::collaborators::{InpaintingProvider, InpaintingRequest};
use crate::color::conversion::hex_to_rgb;
use crate::config::AnalysisConfig;
use crate::detection::mask::MaskGenerator;
use crate::recolor::replacement::{ColorReplacementEngine, ReplacementOutcome, ReplacementRequest};
use crate::Result;

/// Which path produced a recolored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecolorResult {
    /// Opaque buffer returned by the inpainting provider
    Inpainted(RgbBuffer),
    /// Output of the local replacement engine
    Local(ReplacementOutcome),
}

impl RecolorResult {
    pub fn image(&self) -> &RgbBuffer {
        match self {
            RecolorResult::Inpainted(image) => image,
            RecolorResult::Local(outcome) => &outcome.image,
        }
    }

    pub fn into_image(self) -> RgbBuffer {
        match self {
            RecolorResult::Inpainted(image) => image,
            RecolorResult::Local(outcome) => outcome.image,
        }
    }

    pub fn is_inpainted(&self) -> bool {
        matches!(self, RecolorResult::Inpainted(_))
    }
}

/// Recolor through the inpainting provider, falling back to the local engine
///
/// # Errors
///
/// Returns `InvalidHexColor` if either color in `request` fails to parse.
/// Provider errors never surface; they trigger the fallback.
pub fn recolor_with_inpainting(
    provider: &dyn InpaintingProvider,
    image: &RgbBuffer,
    request: &ReplacementRequest,
    config: &AnalysisConfig,
) -> Result<RecolorResult> {
    let target = hex_to_rgb(&request.target_hex)?;
    hex_to_rgb(&request.new_hex)?;

    let mask = MaskGenerator::with_params(config.mask.min_position_score, config.mask.parallel)
        .generate_rgb(image, target, request.tolerance);
    let inpainting = InpaintingRequest::new(
        image.clone(),
        mask,
        InpaintingRequest::repaint_instruction(&request.new_hex),
    );

    match provider.inpaint(&inpainting) {
        Ok(Some(result)) if result.dimensions() == image.dimensions() => {
            debug!("Inpainting provider recolored {}x{} image", image.width(), image.height());
            return Ok(RecolorResult::Inpainted(result));
        }
        Ok(Some(result)) => warn!(
            "Inpainting result is {}x{}, expected {}x{}; using local replacement",
            result.width(),
            result.height(),
            image.width(),
            image.height()
        ),
        Ok(None) => debug!("Inpainting provider declined; using local replacement"),
        Err(e) => warn!("Inpainting provider failed: {}; using local replacement", e),
    }

    let engine = ColorReplacementEngine::with_params(
        config.replacement.min_variation_wall_score,
        config.replacement.parallel,
    );
    engine.replace(image, request).map(RecolorResult::Local)
}
