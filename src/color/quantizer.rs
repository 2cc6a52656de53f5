//! Coarse RGB binning of sampled pixels
//!
//! Each channel is floored to a multiple of the bucket size (15 by default),
//! collapsing near-duplicate colors before clustering. Bins keep their member
//! pixels so the wall score can later be computed on cluster unions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::buffer::Pixel;
use crate::constants::sampling::BUCKET_SIZE;
use crate::{AnalysisError, Result};

/// How a bin's average color is updated as pixels arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BinAveraging {
    /// True arithmetic mean of all member pixels
    #[default]
    Mean,
    /// `avg = (avg + new) / 2` per pixel; weights recent samples more heavily
    Incremental,
}

/// Quantization key: each channel floored to a bucket multiple
pub type BinKey = [u8; 3];

/// Aggregate of all sampled pixels sharing one quantization key
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBin {
    pub key: BinKey,
    pub count: u64,
    pub avg_r: f64,
    pub avg_g: f64,
    pub avg_b: f64,
    pub members: Vec<Pixel>,
}

impl ColorBin {
    fn new(key: BinKey, pixel: Pixel) -> Self {
        Self {
            key,
            count: 1,
            avg_r: pixel.r as f64,
            avg_g: pixel.g as f64,
            avg_b: pixel.b as f64,
            members: vec![pixel],
        }
    }

    fn push(&mut self, pixel: Pixel, averaging: BinAveraging) {
        self.count += 1;
        match averaging {
            BinAveraging::Mean => {
                let n = self.count as f64;
                self.avg_r += (pixel.r as f64 - self.avg_r) / n;
                self.avg_g += (pixel.g as f64 - self.avg_g) / n;
                self.avg_b += (pixel.b as f64 - self.avg_b) / n;
            }
            BinAveraging::Incremental => {
                self.avg_r = (self.avg_r + pixel.r as f64) / 2.0;
                self.avg_g = (self.avg_g + pixel.g as f64) / 2.0;
                self.avg_b = (self.avg_b + pixel.b as f64) / 2.0;
            }
        }
        self.members.push(pixel);
    }

    /// Average color rounded to whole channels
    pub fn average_rgb(&self) -> [u8; 3] {
        [
            round_channel(self.avg_r),
            round_channel(self.avg_g),
            round_channel(self.avg_b),
        ]
    }
}

pub(crate) fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Groups pixels into coarse RGB bins, keeping first-seen order
#[derive(Debug, Clone)]
pub struct ColorQuantizer {
    bucket_size: u8,
    averaging: BinAveraging,
}

impl Default for ColorQuantizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorQuantizer {
    /// Create a quantizer with the default bucket size and true means
    pub fn new() -> Self {
        Self {
            bucket_size: BUCKET_SIZE,
            averaging: BinAveraging::Mean,
        }
    }

    /// Create a quantizer with custom parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a bucket size of zero
    pub fn with_params(bucket_size: u8, averaging: BinAveraging) -> Result<Self> {
        if bucket_size == 0 {
            return Err(AnalysisError::invalid_parameter("bucket_size", bucket_size));
        }
        Ok(Self {
            bucket_size,
            averaging,
        })
    }

    /// Quantization key for a color
    pub fn key(&self, rgb: [u8; 3]) -> BinKey {
        let step = self.bucket_size;
        rgb.map(|c| c / step * step)
    }

    /// Bin every pixel of the stream
    ///
    /// Bins are returned in the order their key was first seen, which keeps
    /// downstream clustering deterministic.
    pub fn quantize<I>(&self, pixels: I) -> Vec<ColorBin>
    where
        I: IntoIterator<Item = Pixel>,
    {
        let mut index: HashMap<BinKey, usize> = HashMap::new();
        let mut bins: Vec<ColorBin> = Vec::new();

        for pixel in pixels {
            let key = self.key(pixel.rgb());
            match index.get(&key) {
                Some(&i) => bins[i].push(pixel, self.averaging),
                None => {
                    index.insert(key, bins.len());
                    bins.push(ColorBin::new(key, pixel));
                }
            }
        }

        bins
    }
}
