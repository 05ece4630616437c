use clap::Parser;
use hogmatch_cli::{init_thread_pool, load_image, Pipeline, PipelineResult};
use hogmatch_core::PipelineConfig;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Match Harris corners between two images using gradient-histogram
/// descriptors and a nearest-neighbour ratio test.
#[derive(Parser)]
#[command(version, about, author)]
struct Cli {
    /// First image; every match points from here into the second image
    image1: PathBuf,

    image2: PathBuf,

    /// Window side for detection and description (multiple of 4)
    #[arg(short = 'w', long)]
    feature_width: Option<usize>,

    /// Pipeline configuration (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads (defaults to the configured value)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write a JSON report of points and matches
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of strongest matches to print
    #[arg(long, default_value = "10")]
    top: usize,
}

fn load_config(path: &Path) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => PipelineConfig::load_toml(path),
        _ => PipelineConfig::load_json(path),
    }
}

fn run(cli: Cli, mut config: PipelineConfig) -> PipelineResult<()> {
    if let Some(feature_width) = cli.feature_width {
        config.feature_width = feature_width;
    }
    if let Some(threads) = cli.threads {
        config.n_threads = threads;
    }
    debug!("{}", config.summary());

    let pipeline = Pipeline::new(config)?;
    init_thread_pool(pipeline.config().n_threads)?;

    let img1 = load_image(&cli.image1)?;
    let img2 = load_image(&cli.image2)?;
    info!(
        "loaded {}x{} and {}x{} images",
        img1.width(),
        img1.height(),
        img2.width(),
        img2.height()
    );

    let t0 = Instant::now();
    let result = pipeline.match_images(&img1, &img2)?;
    let elapsed = t0.elapsed();

    println!("Time taken: {:.2?}", elapsed);
    println!("Detected {} / {} interest points", result.points1.len(), result.points2.len());
    println!("Found {} matches", result.matches.len());
    for m in result.correspondences().iter().take(cli.top) {
        println!(
            "  ({:>4}, {:>4}) -> ({:>4}, {:>4})  confidence {:.3}",
            m.x1, m.y1, m.x2, m.y2, m.confidence
        );
    }

    if let Some(output) = &cli.output {
        result.report(pipeline.config()).save_json(output)?;
        println!("Saved report to {}", output.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => PipelineConfig::default(),
    };

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
