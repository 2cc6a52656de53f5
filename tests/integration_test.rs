//! Integration tests for the wall color pipeline
//!
//! These tests validate the end-to-end workflow including:
//! - Sampling, quantization and clustering of small synthetic rooms
//! - Luminance-preserving replacement and the variation wall-score filter
//! - Inpainting mask generation
//! - Error handling for malformed colors and buffers
//! - Parallel and sequential paths producing identical output

use wall_colors::color::{hex_to_rgb, rgb_to_hex, ColorClusterer, ColorQuantizer};
use wall_colors::config::SamplingConfig;
use wall_colors::detection::wall_score;
use wall_colors::{
    analyze_colors, generate_mask, image_loader, replace_wall_color, AnalysisConfig,
    AnalysisError, ColorAnalyzer, ColorReplacementEngine, ColorVariation, MaskGenerator,
    Pixel, PixelSampler, ReplacementRequest, RgbBuffer,
};

/// Deterministic pseudo-random bytes for noisy test images
fn noise(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

fn noisy_image(width: u32, height: u32, seed: u64) -> RgbBuffer {
    RgbBuffer::new(width, height, noise(seed, (width * height * 3) as usize)).unwrap()
}

fn scenario_a_image() -> RgbBuffer {
    RgbBuffer::new(
        2,
        2,
        vec![
            0xFF, 0xFF, 0xFF, 0xFE, 0xFE, 0xFE, // row 0
            0x00, 0x00, 0x00, 0x01, 0x01, 0x01, // row 1
        ],
    )
    .unwrap()
}

fn every_pixel_analyzer() -> ColorAnalyzer {
    ColorAnalyzer::with_config(AnalysisConfig {
        sampling: SamplingConfig {
            stride: 1,
            ..SamplingConfig::default()
        },
        ..AnalysisConfig::default()
    })
    .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_tone_image_yields_two_even_clusters() {
    let clusters = every_pixel_analyzer().analyze(&scenario_a_image()).unwrap();

    assert_eq!(clusters.len(), 2);
    for cluster in &clusters {
        assert!((cluster.percentage - 50.0).abs() < 1e-9);
    }

    // The white pair sits in the top band and ranks first as a wall
    assert_eq!(clusters[0].hex, "#FFFFFF");
    assert!(clusters[0].is_wall);
    assert!(!clusters[1].is_wall);
    assert!(clusters[1].rgb.to_array().iter().all(|&c| c <= 1));
}

#[test]
fn test_white_pixels_become_red() {
    let image = scenario_a_image();
    let request = ReplacementRequest::new("#FFFFFF", "#FF0000").with_tolerance(10);
    let outcome = replace_wall_color(&image, &request).unwrap();

    for x in 0..2 {
        let [r, g, b] = outcome.image.pixel(x, 0).unwrap();
        assert!(r >= 250, "red channel too low at ({}, 0): {}", x, r);
        assert!(g <= 10 && b <= 10, "pixel ({}, 0) not red: {:?}", x, [r, g, b]);
    }
    assert_eq!(outcome.image.pixel(0, 1), Some([0, 0, 0]));
    assert_eq!(outcome.image.pixel(1, 1), Some([1, 1, 1]));
    assert_eq!(outcome.pixels_matched, 2);
    assert_eq!(outcome.pixels_changed, 2);
}

#[test]
fn test_mask_covers_upper_corners_of_matching_band() {
    let (width, height) = (100u32, 100u32);
    let mut image = RgbBuffer::filled(width, height, [40, 50, 60]);
    for y in 0..30 {
        for x in 0..width {
            image.set_pixel(x, y, [230, 225, 215]);
        }
    }

    let mask = generate_mask(&image, "#E6E1D7", 20).unwrap();

    for y in 0..height {
        for x in 0..width {
            let expected = if y < 30 && (x < 20 || x > 80) { 255 } else { 0 };
            assert_eq!(mask.value_at(x, y), Some(expected), "mask at ({}, {})", x, y);
        }
    }
    assert_eq!(mask.count_on(), 39 * 30);
}

#[test]
fn test_named_color_is_rejected_without_writes() {
    let image = scenario_a_image();
    let before = image.clone();
    let request = ReplacementRequest::new("#FFFFFF", "red");

    match replace_wall_color(&image, &request) {
        Err(AnalysisError::InvalidHexColor { value }) => assert_eq!(value, "red"),
        other => panic!("Expected InvalidHexColor, got: {:?}", other),
    }
    assert_eq!(image, before);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_hex_round_trip_is_uppercase() {
    for hex in ["#000000", "#ffffff", "#a1B2c3", "#7f7F7f", "#0a0B0c"] {
        let rgb = hex_to_rgb(hex).unwrap();
        assert_eq!(rgb_to_hex(rgb), hex.to_uppercase());
    }
    assert!(hex_to_rgb("#12345").is_err());
    assert!(hex_to_rgb("#GGGGGG").is_err());
}

#[test]
fn test_wall_score_bounds() {
    assert_eq!(wall_score(&[], 10, 10), 0.0);

    let data = noise(7, 300);
    for chunk in data.chunks(30) {
        let pixels: Vec<Pixel> = chunk
            .chunks_exact(3)
            .enumerate()
            .map(|(i, c)| Pixel::new((c[0] % 64) as u32, (i * 7 % 48) as u32, c[0], c[1], c[2]))
            .collect();
        let score = wall_score(&pixels, 64, 48);
        assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
    }
}

#[test]
fn test_clustering_partitions_bins() {
    let image = noisy_image(32, 24, 42);
    let sampler = PixelSampler::from_buffer(&image).with_stride(3).unwrap();
    let bins = ColorQuantizer::new().quantize(sampler.iter());
    let clusters = ColorClusterer::with_params(usize::MAX, Default::default()).cluster(&bins, 32, 24);

    let variations: usize = clusters.iter().map(|c| c.variations.len()).sum();
    assert_eq!(variations, bins.len());

    let counted: u64 = clusters
        .iter()
        .flat_map(|c| c.variations.iter().map(|v| v.count))
        .sum();
    assert_eq!(counted as usize, sampler.sample_count());

    let total: f64 = clusters.iter().map(|c| c.percentage).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn test_far_pixels_are_untouched() {
    let image = noisy_image(40, 30, 3);
    let tolerance = 20u32;
    let target = [128, 128, 128];
    let request = ReplacementRequest::new("#808080", "#2040A0").with_tolerance(tolerance);
    let outcome = replace_wall_color(&image, &request).unwrap();

    let limit = 1.5 * tolerance as f64;
    for (before, after) in image
        .as_bytes()
        .chunks_exact(3)
        .zip(outcome.image.as_bytes().chunks_exact(3))
    {
        let distance = before
            .iter()
            .zip(target.iter())
            .map(|(&a, &b)| (a as f64 - b as f64).powi(2))
            .sum::<f64>()
            .sqrt();
        if distance >= limit {
            assert_eq!(before, after);
        }
    }
}

#[test]
fn test_low_score_variations_never_recolor() {
    let image = RgbBuffer::filled(6, 6, [180, 170, 160]);
    let low = ColorVariation {
        rgb: [180, 170, 160].into(),
        count: 36,
        wall_score: 0.49,
    };
    let request = ReplacementRequest::new("#B4AAA0", "#00AA00").with_variations(vec![low.clone()]);
    let outcome = replace_wall_color(&image, &request).unwrap();
    assert_eq!(outcome.image, image);
    assert_eq!(outcome.pixels_matched, 0);

    let high = ColorVariation {
        wall_score: 0.5,
        ..low
    };
    let request = request.with_variations(vec![high]);
    let outcome = replace_wall_color(&image, &request).unwrap();
    assert_eq!(outcome.pixels_matched, 36);
}

#[test]
fn test_mask_is_binary() {
    let image = noisy_image(50, 40, 11);
    let mask = generate_mask(&image, "#808080", 120).unwrap();
    assert!(mask.as_bytes().iter().all(|&b| b == 0 || b == 255));
    assert!(mask.count_on() > 0);
}

// ============================================================================
// Parallel vs sequential
// ============================================================================

#[test]
fn test_parallel_replacement_matches_sequential() {
    let image = noisy_image(64, 48, 99);
    let request = ReplacementRequest::new("#7F7F7F", "#C04020").with_tolerance(60);

    let parallel = ColorReplacementEngine::with_params(0.5, true)
        .replace(&image, &request)
        .unwrap();
    let sequential = ColorReplacementEngine::with_params(0.5, false)
        .replace(&image, &request)
        .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_parallel_mask_matches_sequential() {
    let image = noisy_image(64, 48, 5);
    let parallel = MaskGenerator::with_params(0.6, true)
        .generate(&image, "#808080", 150)
        .unwrap();
    let sequential = MaskGenerator::with_params(0.6, false)
        .generate(&image, "#808080", 150)
        .unwrap();
    assert_eq!(parallel, sequential);
}

// ============================================================================
// File round trip
// ============================================================================

#[test]
fn test_analyze_from_png_file() {
    let path = std::env::temp_dir().join(format!("wall_colors_it_{}.png", std::process::id()));
    let image = RgbBuffer::filled(30, 20, [210, 205, 195]);
    image_loader::save_rgb(&image, &path).unwrap();

    let loaded = image_loader::load_rgb(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let clusters = analyze_colors(&loaded).unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].hex, "#D2CDC3");
}

#[test]
fn test_missing_image_file() {
    let result = image_loader::load_rgb(std::path::Path::new("nonexistent_room.jpg"));
    match result {
        Err(err @ AnalysisError::ImageLoadError { .. }) => assert!(!err.is_recoverable()),
        other => panic!("Expected ImageLoadError, got: {:?}", other),
    }
}

#[test]
fn test_mismatched_buffer_is_rejected() {
    let result = ColorAnalyzer::new().analyze_raw(&[0u8; 10], 2, 2);
    assert!(matches!(
        result,
        Err(AnalysisError::BufferSizeMismatch { expected: 12, actual: 10, .. })
    ));
}
