//! Configuration structures for the wall color pipeline.
//!
//! This module defines the tunable parameters for sampling, clustering,
//! replacement and masking. Defaults come from [`crate::constants`].
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use wall_colors::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), wall_colors::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SamplingConfig`]: stride, quantization bucket, bin averaging
//! - [`ClusteringConfig`]: result count and wall threshold
//! - [`ReplacementConfig`]: default tolerance and variation filter
//! - [`MaskConfig`]: position score threshold

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::quantizer::BinAveraging;
use crate::constants::{clustering, mask, replacement, sampling, wall_score};
use crate::{AnalysisError, Result};

/// Complete pipeline configuration.
///
/// Every section falls back to its defaults when missing from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sampling: SamplingConfig,
    pub clustering: ClusteringConfig,
    pub replacement: ReplacementConfig,
    pub mask: MaskConfig,
}

/// Pixel sampling and quantization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Sample every Nth pixel
    pub stride: usize,

    /// Quantization bucket width per channel
    pub bucket_size: u8,

    /// Running average used for bin colors
    pub averaging: BinAveraging,
}

/// Clustering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of ranked clusters returned
    pub max_clusters: usize,

    /// Wall score above which a cluster counts as a wall (0.0-1.0)
    pub wall_threshold: f64,
}

/// Color replacement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacementConfig {
    /// Tolerance for requests built by the pipeline helpers
    pub default_tolerance: u32,

    /// Variations scoring below this are never recolored (0.0-1.0)
    pub min_variation_wall_score: f64,

    /// Split the pixel loop across threads by rows
    pub parallel: bool,
}

/// Inpainting mask parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Position-only wall score a pixel must exceed (0.0-1.0)
    pub min_position_score: f64,

    /// Split the pixel loop across threads by rows
    pub parallel: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            stride: sampling::STRIDE,
            bucket_size: sampling::BUCKET_SIZE,
            averaging: BinAveraging::Mean,
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_clusters: clustering::MAX_CLUSTERS,
            wall_threshold: wall_score::WALL_THRESHOLD,
        }
    }
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        Self {
            default_tolerance: replacement::DEFAULT_TOLERANCE,
            min_variation_wall_score: replacement::MIN_VARIATION_WALL_SCORE,
            parallel: true,
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            min_position_score: mask::MIN_POSITION_SCORE,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Parse configuration from a JSON string and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::config("Invalid configuration JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Cannot serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Cannot write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sampling.stride == 0 {
            return Err(AnalysisError::invalid_parameter("sampling.stride", 0));
        }
        if self.sampling.bucket_size == 0 {
            return Err(AnalysisError::invalid_parameter("sampling.bucket_size", 0));
        }
        let unit = [
            ("clustering.wall_threshold", self.clustering.wall_threshold),
            (
                "replacement.min_variation_wall_score",
                self.replacement.min_variation_wall_score,
            ),
            ("mask.min_position_score", self.mask.min_position_score),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::invalid_parameter(name, value));
            }
        }
        Ok(())
    }
}
