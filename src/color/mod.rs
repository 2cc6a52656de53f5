//! Color analysis module
//!
//! This module handles hex conversion and similarity metrics, quantization of
//! sampled pixels, clustering into dominant colors, and the analysis pipeline
//! that ties them together.

pub mod conversion;
pub mod quantizer;
pub mod cluster;
pub mod analysis;

pub use conversion::{hex_to_rgb, rgb_to_hex, Rgb};
pub use quantizer::{BinAveraging, ColorBin, ColorQuantizer};
pub use cluster::{rank, ColorCluster, ColorClusterer, ColorVariation, GreedyUnionClustering};
pub use analysis::{fallback_palette, ColorAnalyzer};
