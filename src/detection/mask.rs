//! Binary wall masks for generative inpainting
//!
//! A pixel is marked when its color is within tolerance of the target and its
//! position alone looks like a wall (see [`position_score`]). The mask is
//! replicated across three channels so it can be written out as an image.

use log::debug;
use rayon::prelude::*;

use crate::buffer::RgbBuffer;
use crate::color::conversion::{euclidean_distance, hex_to_rgb};
use crate::constants::mask::{MIN_POSITION_SCORE, OFF, ON};
use crate::constants::sampling::CHANNELS;
use crate::detection::wall_score::position_score;
use crate::Result;

/// Same-size binary mask, each byte 0 or 255, three bytes per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mask value at `(x, y)`, `None` outside the image
    pub fn value_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize * self.width as usize + x as usize) * CHANNELS])
    }

    /// Number of marked pixels
    pub fn count_on(&self) -> usize {
        self.data
            .chunks_exact(CHANNELS)
            .filter(|px| px[0] == ON)
            .count()
    }

    /// Fraction of marked pixels, 0 for an empty mask
    pub fn coverage(&self) -> f64 {
        let total = self.width as usize * self.height as usize;
        if total == 0 {
            return 0.0;
        }
        self.count_on() as f64 / total as f64
    }

    /// Copy the mask into an RGB buffer (white = repaint)
    pub fn to_rgb_buffer(&self) -> RgbBuffer {
        RgbBuffer::from_parts(self.width, self.height, self.data.clone())
    }
}

/// Builds inpainting masks from a target color
#[derive(Debug, Clone)]
pub struct MaskGenerator {
    min_position_score: f64,
    parallel: bool,
}

impl Default for MaskGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskGenerator {
    pub fn new() -> Self {
        Self {
            min_position_score: MIN_POSITION_SCORE,
            parallel: true,
        }
    }

    pub fn with_params(min_position_score: f64, parallel: bool) -> Self {
        Self {
            min_position_score,
            parallel,
        }
    }

    /// Mask pixels of `image` close to `target_hex` in wall-like positions
    ///
    /// # Errors
    ///
    /// Returns `InvalidHexColor` if `target_hex` fails to parse
    pub fn generate(&self, image: &RgbBuffer, target_hex: &str, tolerance: u32) -> Result<Mask> {
        let target = hex_to_rgb(target_hex)?;
        Ok(self.generate_rgb(image, target, tolerance))
    }

    /// Same as [`MaskGenerator::generate`] with an already parsed target
    pub fn generate_rgb(&self, image: &RgbBuffer, target: [u8; 3], tolerance: u32) -> Mask {
        let (width, height) = image.dimensions();
        let mut data = vec![OFF; image.as_bytes().len()];

        if !data.is_empty() {
            let row_len = width as usize * CHANNELS;
            let tolerance = tolerance as f64;
            let mark_row = |(y, (out, src)): (usize, (&mut [u8], &[u8]))| {
                for (x, (m, px)) in out
                    .chunks_exact_mut(CHANNELS)
                    .zip(src.chunks_exact(CHANNELS))
                    .enumerate()
                {
                    let color_match = euclidean_distance([px[0], px[1], px[2]], target) < tolerance;
                    if color_match
                        && position_score(x as u32, y as u32, width, height)
                            > self.min_position_score
                    {
                        m.fill(ON);
                    }
                }
            };

            if self.parallel {
                data.par_chunks_mut(row_len)
                    .zip(image.as_bytes().par_chunks(row_len))
                    .enumerate()
                    .for_each(mark_row);
            } else {
                data.chunks_mut(row_len)
                    .zip(image.as_bytes().chunks(row_len))
                    .enumerate()
                    .for_each(mark_row);
            }
        }

        let mask = Mask {
            width,
            height,
            data,
        };
        debug!(
            "Generated {}x{} mask, coverage {:.2}%",
            width,
            height,
            mask.coverage() * 100.0
        );
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalysisError;

    #[test]
    fn test_mask_is_binary_and_replicated() {
        let image = RgbBuffer::filled(20, 20, [210, 200, 190]);
        let mask = MaskGenerator::new().generate(&image, "#D2C8BE", 30).unwrap();

        assert_eq!(mask.as_bytes().len(), image.as_bytes().len());
        assert!(mask.as_bytes().iter().all(|&b| b == ON || b == OFF));
        for px in mask.as_bytes().chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
    }

    #[test]
    fn test_only_upper_corners_qualify() {
        let image = RgbBuffer::filled(10, 10, [100, 100, 100]);
        let mask = MaskGenerator::new().generate_rgb(&image, [100, 100, 100], 10);

        assert_eq!(mask.value_at(0, 0), Some(ON));
        assert_eq!(mask.value_at(9, 2), Some(ON));
        assert_eq!(mask.value_at(5, 0), Some(OFF)); // upper band, not side
        assert_eq!(mask.value_at(0, 5), Some(OFF)); // side band, not upper
        assert_eq!(mask.value_at(10, 0), None);
        // x ∈ {0, 1, 9} × y ∈ {0, 1, 2}
        assert_eq!(mask.count_on(), 9);
        assert!((mask.coverage() - 0.09).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_target() {
        let image = RgbBuffer::filled(2, 2, [0, 0, 0]);
        assert!(matches!(
            MaskGenerator::new().generate(&image, "#12345", 10),
            Err(AnalysisError::InvalidHexColor { .. })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..50u32 * 40)
            .flat_map(|i| [(i % 200) as u8, 120, (i % 90) as u8])
            .collect();
        let image = RgbBuffer::new(50, 40, data).unwrap();
        let parallel = MaskGenerator::with_params(0.6, true).generate_rgb(&image, [60, 120, 40], 60);
        let sequential =
            MaskGenerator::with_params(0.6, false).generate_rgb(&image, [60, 120, 40], 60);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_to_rgb_buffer() {
        let image = RgbBuffer::filled(10, 10, [100, 100, 100]);
        let mask = MaskGenerator::new().generate_rgb(&image, [100, 100, 100], 10);
        let rgb = mask.to_rgb_buffer();
        assert_eq!(rgb.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(rgb.pixel(5, 5), Some([0, 0, 0]));
        assert_eq!(rgb.as_bytes(), mask.as_bytes());
        assert_eq!(rgb.dimensions(), mask.dimensions());
    }

    #[test]
    fn test_empty_mask_to_rgb_buffer() {
        let image = RgbBuffer::new(0, 0, Vec::new()).unwrap();
        let rgb = MaskGenerator::new().generate_rgb(&image, [0, 0, 0], 10).to_rgb_buffer();
        assert!(rgb.is_empty());
        assert_eq!(rgb.dimensions(), (0, 0));
    }
}
