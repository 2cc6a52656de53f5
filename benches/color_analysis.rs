use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wall_colors::{ColorAnalyzer, ColorReplacementEngine, MaskGenerator, ReplacementRequest, RgbBuffer};

/// 640x480 room: beige walls in the upper two thirds, dark floor below, with
/// a soft vertical light gradient so quantization sees several shades
fn synthetic_room() -> RgbBuffer {
    let (width, height) = (640u32, 480u32);
    let mut image = RgbBuffer::filled(width, height, [0, 0, 0]);
    for y in 0..height {
        let shade = (y * 40 / height) as u8;
        for x in 0..width {
            let rgb = if y < height * 2 / 3 {
                [225 - shade, 215 - shade, 195 - shade]
            } else {
                [90 - shade / 2, 60 - shade / 2, 40 - shade / 2]
            };
            image.set_pixel(x, y, rgb);
        }
    }
    image
}

fn benchmark_color_analysis(c: &mut Criterion) {
    let image = synthetic_room();
    let analyzer = ColorAnalyzer::new();

    c.bench_function("analyze_640x480", |b| {
        b.iter(|| analyzer.analyze(black_box(&image)))
    });

    let request = ReplacementRequest::new("#E1D7C3", "#6B8E9E").with_tolerance(60);
    let parallel = ColorReplacementEngine::with_params(0.5, true);
    let sequential = ColorReplacementEngine::with_params(0.5, false);

    c.bench_function("replace_640x480_parallel", |b| {
        b.iter(|| parallel.replace(black_box(&image), black_box(&request)))
    });
    c.bench_function("replace_640x480_sequential", |b| {
        b.iter(|| sequential.replace(black_box(&image), black_box(&request)))
    });

    let masks = MaskGenerator::new();
    c.bench_function("mask_640x480", |b| {
        b.iter(|| masks.generate(black_box(&image), "#E1D7C3", 60))
    });
}

criterion_group!(benches, benchmark_color_analysis);
criterion_main!(benches);
