//! Wall recoloring module
//!
//! This module rewrites pixel buffers, replacing one wall color with another
//! while keeping the lighting of the original photograph, either locally or
//! through the generative inpainting collaborator.

pub mod replacement;
pub mod inpainting;

pub use replacement::{ColorReplacementEngine, ReplacementOutcome, ReplacementRequest};
pub use inpainting::{recolor_with_inpainting, RecolorResult};
