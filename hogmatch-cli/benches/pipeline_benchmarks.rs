use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hogmatch_cli::{Pipeline, PipelineBuilder};
use hogmatch_core::{GrayImage, PipelineConfig};
use hogmatch_harris::{DirectSums, IntegralSums, MomentMaps, WindowSums};

/// Create benchmark image with scattered rectangles over a soft gradient
fn create_benchmark_image(width: usize, height: usize, seed: usize) -> GrayImage {
    let mut data = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let gradient = 0.2 * x as f32 / width as f32;
            let noise = ((x * 7 + y * 13 + seed) % 11) as f32 / 200.0;
            data[y * width + x] = 0.3 + gradient + noise;
        }
    }

    for i in 0..24 {
        let cx = (i * 37 + seed * 11) % width;
        let cy = (i * 53 + seed * 7) % height;
        let side = 6 + i % 10;
        let value = if i % 2 == 0 { 0.95 } else { 0.05 };
        for y in cy..(cy + side).min(height) {
            for x in cx..(cx + side).min(width) {
                data[y * width + x] = value;
            }
        }
    }

    GrayImage::new(width, height, data).unwrap()
}

fn create_test_config() -> PipelineConfig {
    PipelineConfig {
        n_threads: 1, // Single-threaded for consistent benchmarks
        ..PipelineConfig::default()
    }
}

/// Benchmark full two-image matching
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let pipeline = Pipeline::new(create_test_config()).unwrap();

    for &(width, height) in &[(128, 128), (256, 256), (512, 384)] {
        let img1 = create_benchmark_image(width, height, 1);
        let img2 = create_benchmark_image(width, height, 2);
        group.bench_with_input(
            BenchmarkId::new("match_images", format!("{}x{}", width, height)),
            &(img1, img2),
            |b, (img1, img2)| b.iter(|| black_box(pipeline.match_images(black_box(img1), black_box(img2)).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark individual pipeline stages
fn bench_pipeline_stages(c: &mut Criterion) {
    let pipeline = Pipeline::new(create_test_config()).unwrap();
    let img1 = create_benchmark_image(256, 256, 1);
    let img2 = create_benchmark_image(256, 256, 2);

    let mut group = c.benchmark_group("pipeline_stages");

    group.bench_function("detect", |b| b.iter(|| black_box(pipeline.detect(black_box(&img1)))));

    let points = pipeline.detect(&img1);
    group.bench_function("describe", |b| {
        b.iter(|| black_box(pipeline.describe(black_box(&img1), black_box(&points)).unwrap()))
    });

    let (_, f1) = pipeline.detect_and_describe(&img1).unwrap();
    let (_, f2) = pipeline.detect_and_describe(&img2).unwrap();
    if f2.len() >= 2 {
        group.bench_function("match", |b| {
            b.iter(|| black_box(pipeline.match_features(black_box(&f1), black_box(&f2)).unwrap()))
        });
    }

    group.finish();
}

/// Compare direct and summed-area window sums
fn bench_window_sums(c: &mut Criterion) {
    let img = create_benchmark_image(256, 256, 3);
    let maps = MomentMaps::compute(&img, 0.3);
    let direct = DirectSums::new(&maps);
    let integral = IntegralSums::new(&maps);

    let mut group = c.benchmark_group("window_sums");
    for &size in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::new("direct", size), &size, |b, &size| {
            b.iter(|| black_box(direct.tensor(black_box(100), black_box(100), size)))
        });
        group.bench_with_input(BenchmarkId::new("integral", size), &size, |b, &size| {
            b.iter(|| black_box(integral.tensor(black_box(100), black_box(100), size)))
        });
    }
    group.finish();
}

fn bench_builder_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder_presets");
    let img = create_benchmark_image(256, 256, 4);

    group.bench_function("dense_detect", |b| {
        let pipeline = PipelineBuilder::new().preset_dense().threads(1).build().unwrap();
        b.iter(|| black_box(pipeline.detect(black_box(&img))))
    });
    group.bench_function("default_detect", |b| {
        let pipeline = PipelineBuilder::new().threads(1).build().unwrap();
        b.iter(|| black_box(pipeline.detect(black_box(&img))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_pipeline_stages,
    bench_window_sums,
    bench_builder_presets
);
criterion_main!(benches);
