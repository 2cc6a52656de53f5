//! Hex color parsing and RGB similarity metrics
//!
//! The clusterer, the replacement engine and the mask generator all compare
//! colors with the same four metrics:
//! - Euclidean distance in RGB space
//! - Brightness distance (brightness = mean of R, G, B)
//! - Saturation distance (saturation = max - min of R, G, B)
//! - Circular hue distance in degrees (HSV hue)

use palette::{encoding, FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// Parse a `#RRGGBB` (or `RRGGBB`) string into RGB channels
///
/// # Errors
///
/// Returns `InvalidHexColor` unless the string holds exactly six hex digits
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AnalysisError::invalid_hex(hex));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| AnalysisError::invalid_hex(hex))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Format RGB channels as an uppercase `#RRGGBB` string
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Mean of the three channels, 0-255
pub fn brightness(rgb: [u8; 3]) -> f64 {
    (rgb[0] as f64 + rgb[1] as f64 + rgb[2] as f64) / 3.0
}

/// Channel spread (max - min), 0-255
pub fn saturation(rgb: [u8; 3]) -> f64 {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    (max - min) as f64
}

/// HSV hue in degrees, `[0, 360)`; grays report 0
pub fn hue(rgb: [u8; 3]) -> f64 {
    let srgb: Srgb<f64> = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format();
    let hsv: Hsv<encoding::Srgb, f64> = Hsv::from_color(srgb);
    hsv.hue.into_positive_degrees()
}

pub fn euclidean_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

pub fn brightness_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    (brightness(a) - brightness(b)).abs()
}

pub fn saturation_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    (saturation(a) - saturation(b)).abs()
}

/// Shortest angular distance between two hues, `[0, 180]`
pub fn hue_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    circular_degrees(hue(a), hue(b))
}

pub(crate) fn circular_degrees(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

/// Plain RGB triple used in serialized results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self.to_array())
    }

    /// Parse a hex color string
    pub fn from_hex(hex: &str) -> Result<Self> {
        hex_to_rgb(hex).map(Self::from)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}
