//! Dominant color clustering
//!
//! Merges quantized bins into perceptual clusters with [`GreedyUnionClustering`]
//! and ranks them for presentation: wall candidates first, then by coverage.

use serde::{Deserialize, Serialize};

use crate::buffer::Pixel;
use crate::color::conversion::{
    brightness_distance, euclidean_distance, hue_distance, saturation_distance, Rgb,
};
use crate::color::quantizer::{round_channel, ColorBin};
use crate::constants::clustering::*;
use crate::detection::wall_score::WallScoreEstimator;

/// One constituent bin of a cluster, kept so replacement can match every shade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariation {
    pub rgb: Rgb,
    pub count: u64,
    pub wall_score: f64,
}

/// A ranked dominant color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCluster {
    pub hex: String,
    pub rgb: Rgb,
    /// Share of sampled pixels, 0-100
    pub percentage: f64,
    pub wall_score: f64,
    pub is_wall: bool,
    pub variations: Vec<ColorVariation>,
}

/// Greedy single-pass grouping: each unvisited bin seeds a cluster and absorbs
/// every later unvisited bin similar to it under any of the four metrics.
///
/// First match wins. Bins are never reassigned to a closer seed, so output
/// depends on bin order; callers pass bins in first-seen order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyUnionClustering;

impl GreedyUnionClustering {
    /// Partition bin indices into groups
    pub fn group(&self, bins: &[ColorBin]) -> Vec<Vec<usize>> {
        let colors: Vec<[u8; 3]> = bins.iter().map(ColorBin::average_rgb).collect();
        let mut visited = vec![false; bins.len()];
        let mut groups = Vec::new();

        for seed in 0..bins.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut group = vec![seed];

            for candidate in (seed + 1)..bins.len() {
                if !visited[candidate] && is_similar(colors[seed], colors[candidate]) {
                    visited[candidate] = true;
                    group.push(candidate);
                }
            }
            groups.push(group);
        }

        groups
    }
}

/// Whether two colors belong in the same cluster
pub fn is_similar(a: [u8; 3], b: [u8; 3]) -> bool {
    let euclid = euclidean_distance(a, b);
    if euclid < EUCLIDEAN {
        return true;
    }
    if euclid < BRIGHTNESS_EUCLIDEAN && brightness_distance(a, b) < BRIGHTNESS {
        return true;
    }
    if euclid < SATURATION_EUCLIDEAN && saturation_distance(a, b) < SATURATION {
        return true;
    }
    euclid < HUE_EUCLIDEAN && hue_distance(a, b) < HUE
}

/// Order clusters for presentation: walls first, then by descending percentage
///
/// The sort is stable, so ties keep their input order.
pub fn rank(clusters: &mut [ColorCluster]) {
    clusters.sort_by(|a, b| {
        b.is_wall
            .cmp(&a.is_wall)
            .then_with(|| b.percentage.total_cmp(&a.percentage))
    });
}

/// Turns quantized bins into ranked, wall-scored clusters
#[derive(Debug, Clone)]
pub struct ColorClusterer {
    max_clusters: usize,
    estimator: WallScoreEstimator,
    strategy: GreedyUnionClustering,
}

impl Default for ColorClusterer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorClusterer {
    /// Create a clusterer returning the default top 6
    pub fn new() -> Self {
        Self::with_params(MAX_CLUSTERS, WallScoreEstimator::new())
    }

    pub fn with_params(max_clusters: usize, estimator: WallScoreEstimator) -> Self {
        Self {
            max_clusters,
            estimator,
            strategy: GreedyUnionClustering,
        }
    }

    /// Cluster bins sampled from a `width`×`height` image
    ///
    /// Returns at most `max_clusters` clusters, wall clusters first, each group
    /// ordered by descending coverage. An empty bin set yields an empty list.
    pub fn cluster(&self, bins: &[ColorBin], width: u32, height: u32) -> Vec<ColorCluster> {
        let total: u64 = bins.iter().map(|b| b.count).sum();
        if total == 0 {
            return Vec::new();
        }

        let mut clusters: Vec<ColorCluster> = self
            .strategy
            .group(bins)
            .iter()
            .map(|group| self.build_cluster(bins, group, total, width, height))
            .collect();

        rank(&mut clusters);
        clusters.truncate(self.max_clusters);
        clusters
    }

    fn build_cluster(
        &self,
        bins: &[ColorBin],
        group: &[usize],
        total: u64,
        width: u32,
        height: u32,
    ) -> ColorCluster {
        let n = group.len() as f64;
        let mut sum = [0.0f64; 3];
        let mut count = 0u64;
        let mut members: Vec<Pixel> = Vec::new();
        let mut variations = Vec::with_capacity(group.len());

        for &i in group {
            let bin = &bins[i];
            sum[0] += bin.avg_r;
            sum[1] += bin.avg_g;
            sum[2] += bin.avg_b;
            count += bin.count;
            members.extend_from_slice(&bin.members);
            variations.push(ColorVariation {
                rgb: Rgb::from(bin.average_rgb()),
                count: bin.count,
                wall_score: self.estimator.score(&bin.members, width, height),
            });
        }

        let rgb = Rgb::new(
            round_channel(sum[0] / n),
            round_channel(sum[1] / n),
            round_channel(sum[2] / n),
        );
        let wall_score = self.estimator.score(&members, width, height);

        ColorCluster {
            hex: rgb.to_hex(),
            rgb,
            percentage: count as f64 / total as f64 * 100.0,
            wall_score,
            is_wall: self.estimator.is_wall(wall_score),
            variations,
        }
    }
}
