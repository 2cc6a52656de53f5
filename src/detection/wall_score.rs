//! Wall likelihood heuristic
//!
//! Scores a group of pixels from where they sit in the frame and how they look:
//! - Upper band (`y < 0.3·h`): +0.4 × fraction
//! - Side bands (`x < 0.2·w` or `x > 0.8·w`): +0.3 × fraction
//! - Lower center (`0.3·w < x < 0.7·w`, `y > 0.4·h`, likely floor): −0.2 × fraction
//! - Color uniformity: +0.3 × `max(0, 1 − spread/100)`
//! - Mean brightness below 200: +0.1
//!
//! The result is clamped to `[0, 1]`. Scores are a pure function of the input.

use crate::buffer::Pixel;
use crate::color::conversion::brightness;
use crate::constants::wall_score::*;

/// Wall score estimator with a configurable "is a wall" threshold
#[derive(Debug, Clone, Copy)]
pub struct WallScoreEstimator {
    threshold: f64,
}

impl Default for WallScoreEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl WallScoreEstimator {
    pub fn new() -> Self {
        Self {
            threshold: WALL_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a pixel group, see [`wall_score`]
    pub fn score(&self, pixels: &[Pixel], width: u32, height: u32) -> f64 {
        wall_score(pixels, width, height)
    }

    pub fn is_wall(&self, score: f64) -> bool {
        score > self.threshold
    }
}

/// Combined position, uniformity and brightness score in `[0, 1]`
///
/// An empty pixel set scores 0.
pub fn wall_score(pixels: &[Pixel], width: u32, height: u32) -> f64 {
    if pixels.is_empty() {
        return 0.0;
    }
    let n = pixels.len() as f64;
    let (w, h) = (width as f64, height as f64);

    let mut upper = 0usize;
    let mut side = 0usize;
    let mut floor = 0usize;
    let (mut sum_r, mut sum_g, mut sum_b) = (0.0, 0.0, 0.0);

    for p in pixels {
        let (x, y) = (p.x as f64, p.y as f64);
        if in_upper_band(y, h) {
            upper += 1;
        }
        if in_side_band(x, w) {
            side += 1;
        }
        if in_floor_region(x, y, w, h) {
            floor += 1;
        }
        sum_r += p.r as f64;
        sum_g += p.g as f64;
        sum_b += p.b as f64;
    }

    let mut score = UPPER_WEIGHT * upper as f64 / n + SIDE_WEIGHT * side as f64 / n
        - FLOOR_PENALTY * floor as f64 / n;

    let mean = [sum_r / n, sum_g / n, sum_b / n];
    let spread = pixels
        .iter()
        .map(|p| distance_to_mean(p.rgb(), mean))
        .sum::<f64>()
        / n;
    score += UNIFORMITY_WEIGHT * (1.0 - spread / UNIFORMITY_SCALE).max(0.0);

    let mean_brightness = pixels.iter().map(|p| brightness(p.rgb())).sum::<f64>() / n;
    if mean_brightness < BRIGHTNESS_LIMIT {
        score += BRIGHTNESS_BONUS;
    }

    score.clamp(0.0, 1.0)
}

/// Position-only score for a single pixel, used where no color statistics exist
pub fn position_score(x: u32, y: u32, width: u32, height: u32) -> f64 {
    let (x, y, w, h) = (x as f64, y as f64, width as f64, height as f64);
    let mut score = 0.0;
    if in_upper_band(y, h) {
        score += UPPER_WEIGHT;
    }
    if in_side_band(x, w) {
        score += SIDE_WEIGHT;
    }
    if in_floor_region(x, y, w, h) {
        score -= FLOOR_PENALTY;
    }
    score.clamp(0.0, 1.0)
}

#[inline]
fn in_upper_band(y: f64, h: f64) -> bool {
    y < UPPER_BAND * h
}

#[inline]
fn in_side_band(x: f64, w: f64) -> bool {
    x < SIDE_BAND * w || x > (1.0 - SIDE_BAND) * w
}

#[inline]
fn in_floor_region(x: f64, y: f64, w: f64, h: f64) -> bool {
    x > FLOOR_X_MIN * w && x < FLOOR_X_MAX * w && y > FLOOR_Y_MIN * h
}

fn distance_to_mean(rgb: [u8; 3], mean: [f64; 3]) -> f64 {
    let dr = rgb[0] as f64 - mean[0];
    let dg = rgb[1] as f64 - mean[1];
    let db = rgb[2] as f64 - mean[2];
    (dr * dr + dg * dg + db * db).sqrt()
}
