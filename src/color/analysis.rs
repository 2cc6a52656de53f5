//! Dominant color analysis pipeline
//!
//! Drives sampler → quantizer → clusterer over one image and applies the
//! fallbacks for images that yield nothing:
//! - seed colors from the vision collaborator, when one is available
//! - the constant neutral palette otherwise

use log::{debug, warn};

use crate::buffer::RgbBuffer;
use crate::collaborators::{clusters_from_seeds, ColorSeedProvider};
use crate::color::cluster::{rank, ColorCluster, ColorClusterer, ColorVariation};
use crate::color::conversion::{hex_to_rgb, Rgb};
use crate::color::quantizer::ColorQuantizer;
use crate::config::AnalysisConfig;
use crate::constants::fallback;
use crate::detection::wall_score::WallScoreEstimator;
use crate::recolor::ReplacementRequest;
use crate::sampling::PixelSampler;
use crate::{AnalysisError, Result};

/// Analyzer producing ranked dominant colors for a room photograph
#[derive(Debug, Clone, Default)]
pub struct ColorAnalyzer {
    config: AnalysisConfig,
}

impl ColorAnalyzer {
    /// Create an analyzer with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer from a configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration does not validate
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Extract ranked dominant colors from an image
    ///
    /// # Errors
    ///
    /// Returns `EmptyClusterSet` if no pixel could be sampled
    pub fn analyze(&self, image: &RgbBuffer) -> Result<Vec<ColorCluster>> {
        let sampling = &self.config.sampling;
        let sampler = PixelSampler::from_buffer(image).with_stride(sampling.stride)?;
        let quantizer = ColorQuantizer::with_params(sampling.bucket_size, sampling.averaging)?;
        let bins = quantizer.quantize(sampler.iter());

        let clusterer =
            ColorClusterer::with_params(self.config.clustering.max_clusters, self.estimator());
        let (width, height) = image.dimensions();
        let clusters = clusterer.cluster(&bins, width, height);

        debug!(
            "Analyzed {}x{} image: {} samples, {} bins, {} clusters ({} wall)",
            width,
            height,
            sampler.sample_count(),
            bins.len(),
            clusters.len(),
            clusters.iter().filter(|c| c.is_wall).count()
        );

        if clusters.is_empty() {
            return Err(AnalysisError::EmptyClusterSet);
        }
        Ok(clusters)
    }

    /// Extract dominant colors from raw RGB bytes
    ///
    /// # Errors
    ///
    /// Returns `BufferSizeMismatch` if the length does not fit the dimensions
    pub fn analyze_raw(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<ColorCluster>> {
        let image = RgbBuffer::new(width, height, data.to_vec())?;
        self.analyze(&image)
    }

    /// Analyze locally, falling back to seed colors and then the constant palette
    ///
    /// Never returns `EmptyClusterSet`; seed provider failures are logged and
    /// treated as "no seeds".
    pub fn analyze_with_seeds(
        &self,
        image: &RgbBuffer,
        seeds: &dyn ColorSeedProvider,
    ) -> Result<Vec<ColorCluster>> {
        match self.analyze(image) {
            Err(AnalysisError::EmptyClusterSet) => {}
            other => return other,
        }

        let mut seeded = match seeds.seed_colors(image) {
            Ok(list) => clusters_from_seeds(&list, &self.estimator()),
            Err(e) => {
                warn!("Color seed provider failed, using fallback palette: {}", e);
                Vec::new()
            }
        };

        if seeded.is_empty() {
            debug!("No usable seed colors, using fallback palette");
            return Ok(fallback_palette());
        }

        rank(&mut seeded);
        seeded.truncate(self.config.clustering.max_clusters);
        Ok(seeded)
    }

    fn estimator(&self) -> WallScoreEstimator {
        WallScoreEstimator::with_threshold(self.config.clustering.wall_threshold)
    }

    /// Request recoloring every wall variation of `cluster` with `new_hex`
    pub fn replacement_request(&self, cluster: &ColorCluster, new_hex: &str) -> ReplacementRequest {
        ReplacementRequest::new(cluster.hex.clone(), new_hex)
            .with_tolerance(self.config.replacement.default_tolerance)
            .with_variations(cluster.variations.clone())
    }
}

/// Constant neutral palette used when an image yields no clusters
pub fn fallback_palette() -> Vec<ColorCluster> {
    let share = 100.0 / fallback::PALETTE.len() as f64;
    fallback::PALETTE
        .iter()
        .filter_map(|hex| hex_to_rgb(hex).ok())
        .map(|rgb| {
            let rgb = Rgb::from(rgb);
            ColorCluster {
                hex: rgb.to_hex(),
                rgb,
                percentage: share,
                wall_score: fallback::WALL_SCORE,
                is_wall: true,
                variations: vec![ColorVariation {
                    rgb,
                    count: 0,
                    wall_score: fallback::WALL_SCORE,
                }],
            }
        })
        .collect()
}
