//! Tuning constants for wall color analysis and replacement
//!
//! Defaults for every stage of the pipeline. [`crate::config::AnalysisConfig`]
//! starts from these values; the weights in [`wall_score`] are fixed.

/// Pixel sampling and quantization
pub mod sampling {
    /// Sample every Nth pixel of the buffer
    pub const STRIDE: usize = 5;

    /// Bytes per pixel for RGB buffers
    pub const CHANNELS: usize = 3;

    /// Quantization bucket width per channel
    pub const BUCKET_SIZE: u8 = 15;
}

/// Weights of the wall score heuristic
pub mod wall_score {
    /// Fraction of the image height counted as the upper band
    pub const UPPER_BAND: f64 = 0.3;

    /// Fraction of the image width on each side counted as a side band
    pub const SIDE_BAND: f64 = 0.2;

    /// Horizontal extent of the lower-center (floor) region
    pub const FLOOR_X_MIN: f64 = 0.3;
    pub const FLOOR_X_MAX: f64 = 0.7;

    /// Vertical start of the lower-center (floor) region
    pub const FLOOR_Y_MIN: f64 = 0.4;

    pub const UPPER_WEIGHT: f64 = 0.4;
    pub const SIDE_WEIGHT: f64 = 0.3;
    pub const FLOOR_PENALTY: f64 = 0.2;
    pub const UNIFORMITY_WEIGHT: f64 = 0.3;

    /// Mean color distance at which uniformity reaches zero
    pub const UNIFORMITY_SCALE: f64 = 100.0;

    /// Bonus for regions that are not blown out
    pub const BRIGHTNESS_BONUS: f64 = 0.1;

    /// Mean brightness below which the bonus applies
    pub const BRIGHTNESS_LIMIT: f64 = 200.0;

    /// Clusters scoring above this are flagged as walls
    pub const WALL_THRESHOLD: f64 = 0.6;
}

/// Greedy cluster merge thresholds
pub mod clustering {
    /// Number of clusters returned by default
    pub const MAX_CLUSTERS: usize = 6;

    /// Plain Euclidean RGB match
    pub const EUCLIDEAN: f64 = 80.0;

    /// Euclidean + brightness match
    pub const BRIGHTNESS_EUCLIDEAN: f64 = 120.0;
    pub const BRIGHTNESS: f64 = 40.0;

    /// Euclidean + saturation match
    pub const SATURATION_EUCLIDEAN: f64 = 100.0;
    pub const SATURATION: f64 = 30.0;

    /// Euclidean + hue match (degrees)
    pub const HUE_EUCLIDEAN: f64 = 90.0;
    pub const HUE: f64 = 20.0;
}

/// Color replacement parameters
pub mod replacement {
    /// Tolerance used when a request does not set one
    pub const DEFAULT_TOLERANCE: u32 = 80;

    /// Variations below this wall score are never recolored
    pub const MIN_VARIATION_WALL_SCORE: f64 = 0.5;

    /// Euclidean limit (× tolerance) for the brightness clause
    pub const BRIGHTNESS_EUCLIDEAN_FACTOR: f64 = 1.5;

    /// Brightness limit (× tolerance)
    pub const BRIGHTNESS_FACTOR: f64 = 0.5;

    /// Euclidean limit (× tolerance) for the hue clause
    pub const HUE_EUCLIDEAN_FACTOR: f64 = 1.2;

    /// Hue limit (× tolerance)
    pub const HUE_FACTOR: f64 = 0.3;

    /// Guard for luminance ratios against black replacement colors
    pub const BRIGHTNESS_EPSILON: f64 = 1e-3;
}

/// Inpainting mask parameters
pub mod mask {
    /// Mask byte for eligible pixels
    pub const ON: u8 = 255;

    /// Mask byte for everything else
    pub const OFF: u8 = 0;

    /// Position-only wall score a pixel must exceed
    pub const MIN_POSITION_SCORE: f64 = 0.6;
}

/// Wall scores for vision seed colors, which carry only a placement hint
pub mod seeds {
    /// Hint mentions a wall-like placement
    pub const WALL_HINT_SCORE: f64 = 0.7;

    /// Hint names some other placement
    pub const OTHER_HINT_SCORE: f64 = 0.3;

    /// No hint given
    pub const UNPLACED_SCORE: f64 = 0.5;

    /// Placement words treated as wall evidence
    pub const WALL_HINTS: [&str; 5] = ["wall", "upper", "top", "background", "side"];
}

/// Palette substituted when clustering yields nothing
pub mod fallback {
    /// Neutral interior wall tones, most common first
    pub const PALETTE: [&str; 6] = [
        "#F5F5F0", "#E8E2D6", "#D9D4CC", "#C8C2B8", "#A9A59E", "#FFFFFF",
    ];

    /// Wall score assigned to fallback entries
    pub const WALL_SCORE: f64 = 0.7;
}
