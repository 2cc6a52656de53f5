//! Tolerance-based, luminance-preserving wall recoloring
//!
//! Every pixel is compared against the wall variations of a cluster (or the
//! plain target color when no variations are given). A pixel matches when any
//! of these holds, with `t` the tolerance:
//! - Euclidean distance `< t`
//! - Euclidean distance `< 1.5·t` and brightness distance `< 0.5·t`
//! - Euclidean distance `< 1.2·t` and hue distance `< 0.3·t`
//!
//! Matched pixels move toward the new color scaled to their own brightness, by
//! a blend factor that fades out toward the tolerance boundary. Shadows and
//! highlights survive the recolor.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::RgbBuffer;
use crate::color::cluster::ColorVariation;
use crate::color::conversion::{brightness, euclidean_distance, hex_to_rgb, hue_distance};
use crate::constants::replacement::*;
use crate::constants::sampling::CHANNELS;
use crate::Result;

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE
}

/// What to recolor and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementRequest {
    pub target_hex: String,
    pub new_hex: String,
    #[serde(default = "default_tolerance")]
    pub tolerance: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<ColorVariation>>,
}

impl ReplacementRequest {
    /// Request with the default tolerance and no variations
    pub fn new(target_hex: impl Into<String>, new_hex: impl Into<String>) -> Self {
        Self {
            target_hex: target_hex.into(),
            new_hex: new_hex.into(),
            tolerance: DEFAULT_TOLERANCE,
            variations: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_variations(mut self, variations: Vec<ColorVariation>) -> Self {
        self.variations = Some(variations);
        self
    }
}

/// Recolored image plus coverage counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementOutcome {
    pub image: RgbBuffer,
    /// Pixels whose bytes differ from the input
    pub pixels_changed: usize,
    /// Pixels that passed the match test (a match may round back to the original)
    pub pixels_matched: usize,
}

/// Per-pixel recoloring engine
#[derive(Debug, Clone)]
pub struct ColorReplacementEngine {
    min_variation_wall_score: f64,
    parallel: bool,
}

impl Default for ColorReplacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference colors and tolerance resolved from a request
struct Matcher {
    references: Vec<[u8; 3]>,
    tolerance: f64,
    new_color: [u8; 3],
}

impl ColorReplacementEngine {
    pub fn new() -> Self {
        Self {
            min_variation_wall_score: MIN_VARIATION_WALL_SCORE,
            parallel: true,
        }
    }

    pub fn with_params(min_variation_wall_score: f64, parallel: bool) -> Self {
        Self {
            min_variation_wall_score,
            parallel,
        }
    }

    /// Recolor `image` according to `request`
    ///
    /// The input is never modified; the result has identical dimensions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHexColor` if either color fails to parse. No pixel is
    /// processed in that case.
    pub fn replace(
        &self,
        image: &RgbBuffer,
        request: &ReplacementRequest,
    ) -> Result<ReplacementOutcome> {
        let matcher = self.matcher(request)?;
        let (width, height) = image.dimensions();
        let mut data = image.as_bytes().to_vec();

        let (changed, matched) = if data.is_empty() {
            (0, 0)
        } else {
            let row_len = width as usize * CHANNELS;
            if self.parallel {
                data.par_chunks_mut(row_len)
                    .map(|row| recolor_row(row, &matcher))
                    .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
            } else {
                data.chunks_mut(row_len)
                    .map(|row| recolor_row(row, &matcher))
                    .fold((0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
            }
        };

        debug!(
            "Replaced {} -> {} (tolerance {}, {} references): {} matched, {} changed",
            request.target_hex,
            request.new_hex,
            request.tolerance,
            matcher.references.len(),
            matched,
            changed
        );

        Ok(ReplacementOutcome {
            image: RgbBuffer::from_parts(width, height, data),
            pixels_changed: changed,
            pixels_matched: matched,
        })
    }

    /// Recolor raw RGB bytes
    ///
    /// # Errors
    ///
    /// Returns `BufferSizeMismatch` if the length does not fit the dimensions,
    /// or `InvalidHexColor` for a bad color
    pub fn replace_raw(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        request: &ReplacementRequest,
    ) -> Result<ReplacementOutcome> {
        let image = RgbBuffer::new(width, height, data.to_vec())?;
        self.replace(&image, request)
    }

    fn matcher(&self, request: &ReplacementRequest) -> Result<Matcher> {
        let target = hex_to_rgb(&request.target_hex)?;
        let new_color = hex_to_rgb(&request.new_hex)?;

        // Supplied variations replace the target entirely; low-scoring ones are dropped
        let references = match request.variations.as_deref() {
            Some(variations) if !variations.is_empty() => variations
                .iter()
                .filter(|v| v.wall_score >= self.min_variation_wall_score)
                .map(|v| v.rgb.to_array())
                .collect(),
            _ => vec![target],
        };

        Ok(Matcher {
            references,
            tolerance: request.tolerance as f64,
            new_color,
        })
    }
}

fn recolor_row(row: &mut [u8], matcher: &Matcher) -> (usize, usize) {
    let mut changed = 0;
    let mut matched = 0;
    for px in row.chunks_exact_mut(CHANNELS) {
        let original = [px[0], px[1], px[2]];
        let factor = matcher
            .references
            .iter()
            .filter_map(|&reference| blend_factor(original, reference, matcher.tolerance))
            .reduce(f64::max);

        if let Some(factor) = factor {
            matched += 1;
            let result = recolor_pixel(original, matcher.new_color, factor);
            if result != original {
                px.copy_from_slice(&result);
                changed += 1;
            }
        }
    }
    (changed, matched)
}

/// Blend strength for `pixel` against `reference`, `None` if it does not match
///
/// Each satisfied clause contributes `1 - distance / limit` for its own metric;
/// the strongest contribution wins.
pub fn blend_factor(pixel: [u8; 3], reference: [u8; 3], tolerance: f64) -> Option<f64> {
    let euclid = euclidean_distance(pixel, reference);
    let mut factor: Option<f64> = None;
    let mut consider = |value: f64| {
        factor = Some(factor.map_or(value, |f| f.max(value)));
    };

    if euclid < tolerance {
        consider(1.0 - euclid / tolerance);
    }

    if euclid < BRIGHTNESS_EUCLIDEAN_FACTOR * tolerance {
        let limit = BRIGHTNESS_FACTOR * tolerance;
        let distance = (brightness(pixel) - brightness(reference)).abs();
        if distance < limit {
            consider(1.0 - distance / limit);
        }
    }

    if euclid < HUE_EUCLIDEAN_FACTOR * tolerance {
        let limit = HUE_FACTOR * tolerance;
        let distance = hue_distance(pixel, reference);
        if distance < limit {
            consider(1.0 - distance / limit);
        }
    }

    factor.map(|f| f.clamp(0.0, 1.0))
}

/// Move `original` toward `new_color` rescaled to the original brightness
pub fn recolor_pixel(original: [u8; 3], new_color: [u8; 3], factor: f64) -> [u8; 3] {
    let ratio = brightness(original) / brightness(new_color).max(BRIGHTNESS_EPSILON);
    let mut out = [0u8; 3];
    for c in 0..3 {
        let adjusted = (new_color[c] as f64 * ratio).clamp(0.0, 255.0);
        let from = original[c] as f64;
        out[c] = (from + (adjusted - from) * factor).round().clamp(0.0, 255.0) as u8;
    }
    out
}
