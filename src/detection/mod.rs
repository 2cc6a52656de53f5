//! Wall detection module
//!
//! This module scores pixel groups for wall likelihood and builds the binary
//! masks handed to the generative inpainting collaborator.

pub mod wall_score;
pub mod mask;

pub use wall_score::{position_score, wall_score, WallScoreEstimator};
pub use mask::{Mask, MaskGenerator};
