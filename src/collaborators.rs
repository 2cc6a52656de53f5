//! Capability interfaces for external services
//!
//! Two services sit outside this crate:
//! - a vision service proposing dominant colors, used as a seed when local
//!   analysis finds nothing
//! - a generative inpainting service repainting a masked region from a text
//!   instruction
//!
//! Both are narrow traits so the core never depends on a network client. The
//! no-op implementations report "nothing available", which makes every caller
//! take its local path.

use serde::{Deserialize, Serialize};

use crate::buffer::RgbBuffer;
use crate::color::cluster::{ColorCluster, ColorVariation};
use crate::color::conversion::{hex_to_rgb, Rgb};
use crate::constants::seeds::{OTHER_HINT_SCORE, UNPLACED_SCORE, WALL_HINTS, WALL_HINT_SCORE};
use crate::detection::mask::Mask;
use crate::detection::wall_score::WallScoreEstimator;
use crate::Result;

/// One dominant color proposed by the vision service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSeed {
    pub hex: String,
    #[serde(default)]
    pub rgb: Option<Rgb>,
    #[serde(default)]
    pub percentage: f64,
    /// Free-form placement hint such as "upper wall" or "floor"
    #[serde(default)]
    pub position: Option<String>,
}

/// Source of seed colors for an image
pub trait ColorSeedProvider {
    fn seed_colors(&self, image: &RgbBuffer) -> Result<Vec<ColorSeed>>;
}

/// Seed provider that never proposes anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeeds;

impl ColorSeedProvider for NoSeeds {
    fn seed_colors(&self, _image: &RgbBuffer) -> Result<Vec<ColorSeed>> {
        Ok(Vec::new())
    }
}

/// Source image, mask and instruction sent to the inpainting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InpaintingRequest {
    pub image: RgbBuffer,
    pub mask: Mask,
    pub instruction: String,
}

impl InpaintingRequest {
    pub fn new(image: RgbBuffer, mask: Mask, instruction: impl Into<String>) -> Self {
        Self {
            image,
            mask,
            instruction: instruction.into(),
        }
    }

    /// Instruction asking for the masked wall to be repainted in `new_hex`
    pub fn repaint_instruction(new_hex: &str) -> String {
        format!(
            "Repaint the masked wall area in the solid color {}, keeping the existing lighting, shadows and every object in front of the wall unchanged.",
            new_hex.to_uppercase()
        )
    }
}

/// Generative repainting of a masked region
///
/// `Ok(None)` means the service declined; the returned buffer is treated as
/// opaque and only checked for matching dimensions.
pub trait InpaintingProvider {
    fn inpaint(&self, request: &InpaintingRequest) -> Result<Option<RgbBuffer>>;
}

/// Inpainting provider that always declines
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInpainting;

impl InpaintingProvider for NoInpainting {
    fn inpaint(&self, _request: &InpaintingRequest) -> Result<Option<RgbBuffer>> {
        Ok(None)
    }
}

/// Convert seeds into clusters, skipping entries without a valid hex color
///
/// Seeds carry no pixel positions, so the wall score comes from the placement
/// hint only; `estimator` decides which scores count as walls.
pub fn clusters_from_seeds(seeds: &[ColorSeed], estimator: &WallScoreEstimator) -> Vec<ColorCluster> {
    seeds
        .iter()
        .filter_map(|seed| {
            let rgb = Rgb::from(hex_to_rgb(&seed.hex).ok()?);
            let wall_score = seed_wall_score(seed.position.as_deref());
            Some(ColorCluster {
                hex: rgb.to_hex(),
                rgb,
                percentage: seed.percentage,
                wall_score,
                is_wall: estimator.is_wall(wall_score),
                variations: vec![ColorVariation {
                    rgb,
                    count: 0,
                    wall_score,
                }],
            })
        })
        .collect()
}

fn seed_wall_score(position: Option<&str>) -> f64 {
    match position {
        Some(hint) => {
            let hint = hint.to_lowercase();
            if WALL_HINTS.iter().any(|w| hint.contains(w)) {
                WALL_HINT_SCORE
            } else {
                OTHER_HINT_SCORE
            }
        }
        None => UNPLACED_SCORE,
    }
}
