//! Owned RGB pixel buffers and pixel samples

use serde::{Deserialize, Serialize};

use crate::constants::sampling::CHANNELS;
use crate::{AnalysisError, Result};

/// One sampled pixel with its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(x: u32, y: u32, r: u8, g: u8, b: u8) -> Self {
        Self { x, y, r, g, b }
    }

    /// Color channels as an array
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Interleaved 3-channel image buffer whose length always matches its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Byte length required for a `width`×`height` RGB buffer
pub fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// Fail with `BufferSizeMismatch` unless `len` fits the dimensions
pub fn check_len(len: usize, width: u32, height: u32) -> Result<()> {
    let expected = expected_len(width, height);
    if len != expected {
        return Err(AnalysisError::BufferSizeMismatch {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

impl RgbBuffer {
    /// Wrap raw RGB bytes
    ///
    /// # Errors
    ///
    /// Returns `BufferSizeMismatch` if `data.len() != width * height * 3`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap bytes whose length is already known to match
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), expected_len(width, height));
        Self {
            width,
            height,
            data,
        }
    }

    /// Buffer filled with a single color
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

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

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Color at `(x, y)`, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let i = self.offset(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Overwrite the color at `(x, y)`; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + CHANNELS].copy_from_slice(&rgb);
        }
    }
}
