//! Strided pixel sampling over raw RGB buffers
//!
//! Walks the buffer every `stride` pixels (15 bytes for the default stride of 5)
//! so large photographs stay cheap to analyze. The sampler borrows the buffer and
//! can be iterated any number of times.

use crate::buffer::{check_len, Pixel, RgbBuffer};
use crate::constants::sampling::{CHANNELS, STRIDE};
use crate::{AnalysisError, Result};

/// Lazy, restartable strided view over an RGB buffer
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> PixelSampler<'a> {
    /// Create a sampler over raw bytes with the default stride
    ///
    /// # Errors
    ///
    /// Returns `BufferSizeMismatch` if `data.len() != width * height * 3`
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
            stride: STRIDE,
        })
    }

    /// Create a sampler over an already validated buffer
    pub fn from_buffer(buffer: &'a RgbBuffer) -> Self {
        Self {
            data: buffer.as_bytes(),
            width: buffer.width(),
            height: buffer.height(),
            stride: STRIDE,
        }
    }

    /// Sample every `stride`th pixel instead of the default
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a stride of zero
    pub fn with_stride(mut self, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(AnalysisError::invalid_parameter("stride", stride));
        }
        self.stride = stride;
        Ok(self)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels the iterator yields
    pub fn sample_count(&self) -> usize {
        let total = self.data.len() / CHANNELS;
        total.div_ceil(self.stride)
    }

    /// Iterate over the sampled pixels in buffer order
    pub fn iter(&self) -> impl Iterator<Item = Pixel> + 'a {
        let width = self.width as usize;
        let data = self.data;
        data.chunks_exact(CHANNELS)
            .enumerate()
            .step_by(self.stride)
            .map(move |(index, rgb)| Pixel {
                x: (index % width) as u32,
                y: (index / width) as u32,
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                let v = (i % 256) as u8;
                [v, v, v]
            })
            .collect()
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        let data = vec![0u8; 10];
        assert!(matches!(
            PixelSampler::new(&data, 2, 2),
            Err(AnalysisError::BufferSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_default_stride_skips_fifteen_bytes() {
        let data = gradient(10, 2);
        let sampler = PixelSampler::new(&data, 10, 2).unwrap();
        let pixels: Vec<Pixel> = sampler.iter().collect();

        assert_eq!(pixels.len(), 4);
        assert_eq!(sampler.sample_count(), 4);
        assert_eq!((pixels[0].x, pixels[0].y), (0, 0));
        assert_eq!((pixels[1].x, pixels[1].y), (5, 0));
        assert_eq!((pixels[2].x, pixels[2].y), (0, 1));
        assert_eq!(pixels[1].r, 5);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let data = gradient(7, 3);
        let sampler = PixelSampler::new(&data, 7, 3).unwrap().with_stride(2).unwrap();
        let first: Vec<Pixel> = sampler.iter().collect();
        let second: Vec<Pixel> = sampler.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), sampler.sample_count());
    }

    #[test]
    fn test_zero_stride_rejected() {
        let data = gradient(2, 2);
        let sampler = PixelSampler::new(&data, 2, 2).unwrap();
        assert!(sampler.with_stride(0).is_err());
    }

    #[test]
    fn test_empty_buffer_yields_nothing() {
        let sampler = PixelSampler::new(&[], 0, 0).unwrap();
        assert_eq!(sampler.iter().count(), 0);
        assert_eq!(sampler.sample_count(), 0);
    }
}
