use hogmatch_core::{ConfigError, CoreError, Descriptor, GrayImage, InterestPoints, MatchSet, PipelineConfig};
use hogmatch_descriptor::{DescriptorError, HogDescriptor};
use hogmatch_harris::HarrisDetector;
use hogmatch_matcher::{MatchError, NndrMatcher};
use log::info;
use serde::Serialize;
use std::path::Path;

pub mod builder;

pub use builder::PipelineBuilder;
pub use hogmatch_core::{self, init_thread_pool};

#[derive(Debug)]
pub enum PipelineError {
    Core(CoreError),
    Config(ConfigError),
    Descriptor(DescriptorError),
    Match(MatchError),
    ThreadPool(rayon::ThreadPoolBuildError),
    Image(image::ImageError),
    Io(std::io::Error),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Core(e) => write!(f, "Image error: {}", e),
            PipelineError::Config(e) => write!(f, "Configuration error: {}", e),
            PipelineError::Descriptor(e) => write!(f, "Descriptor error: {}", e),
            PipelineError::Match(e) => write!(f, "Matching error: {}", e),
            PipelineError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
            PipelineError::Image(e) => write!(f, "Image decode error: {}", e),
            PipelineError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<CoreError> for PipelineError {
    fn from(err: CoreError) -> Self {
        PipelineError::Core(err)
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err)
    }
}

impl From<DescriptorError> for PipelineError {
    fn from(err: DescriptorError) -> Self {
        PipelineError::Descriptor(err)
    }
}

impl From<MatchError> for PipelineError {
    fn from(err: MatchError) -> Self {
        PipelineError::Match(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for PipelineError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        PipelineError::ThreadPool(err)
    }
}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> Self {
        PipelineError::Image(err)
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err)
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Everything produced by matching one image pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePairMatches {
    pub points1: InterestPoints,
    pub points2: InterestPoints,
    pub descriptors1: Vec<Descriptor>,
    pub descriptors2: Vec<Descriptor>,
    pub matches: MatchSet,
}

impl ImagePairMatches {
    /// Coordinates of each match in both images, strongest first.
    pub fn correspondences(&self) -> Vec<MatchRecord> {
        self.matches
            .ranked()
            .into_iter()
            .map(|(i1, i2, confidence)| MatchRecord {
                index1: i1,
                index2: i2,
                x1: self.points1.xs()[i1],
                y1: self.points1.ys()[i1],
                x2: self.points2.xs()[i2],
                y2: self.points2.ys()[i2],
                confidence,
            })
            .collect()
    }

    pub fn report(&self, config: &PipelineConfig) -> MatchReport {
        let coords = |p: &InterestPoints| -> Vec<[usize; 2]> { p.iter().map(|(x, y)| [x, y]).collect() };
        MatchReport {
            config: config.clone(),
            points1: coords(&self.points1),
            points2: coords(&self.points2),
            matches: self.correspondences(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub index1: usize,
    pub index2: usize,
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    pub confidence: f32,
}

/// JSON-serializable summary of a run. Descriptors are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub config: PipelineConfig,
    pub points1: Vec<[usize; 2]>,
    pub points2: Vec<[usize; 2]>,
    pub matches: Vec<MatchRecord>,
}

impl MatchReport {
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> PipelineResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::from)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Harris detection, HOG description and NNDR matching behind one config.
pub struct Pipeline {
    config: PipelineConfig,
    detector: HarrisDetector,
    descriptor: HogDescriptor,
    matcher: NndrMatcher,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let detector = HarrisDetector::new(config.harris.clone(), config.feature_width)?;
        let descriptor = HogDescriptor::new(config.descriptor.clone(), config.feature_width)?;
        let matcher = NndrMatcher::new(config.matching.clone())?;
        Ok(Self {
            config,
            detector,
            descriptor,
            matcher,
        })
    }

    pub fn detect(&self, img: &GrayImage) -> InterestPoints {
        self.detector.detect(img)
    }

    pub fn describe(&self, img: &GrayImage, points: &InterestPoints) -> PipelineResult<Vec<Descriptor>> {
        Ok(self.descriptor.describe(img, points)?)
    }

    /// Describe caller-supplied, possibly fractional, coordinates.
    pub fn describe_coordinates(&self, img: &GrayImage, xs: &[f32], ys: &[f32]) -> PipelineResult<Vec<Descriptor>> {
        Ok(self.descriptor.describe_coordinates(img, xs, ys)?)
    }

    pub fn detect_and_describe(&self, img: &GrayImage) -> PipelineResult<(InterestPoints, Vec<Descriptor>)> {
        let points = self.detect(img);
        let descriptors = self.describe(img, &points)?;
        Ok((points, descriptors))
    }

    pub fn match_features(&self, features1: &[Descriptor], features2: &[Descriptor]) -> PipelineResult<MatchSet> {
        Ok(self.matcher.match_descriptors(features1, features2)?)
    }

    /// Full pipeline on two images; matches go from `img1` into `img2`.
    pub fn match_images(&self, img1: &GrayImage, img2: &GrayImage) -> PipelineResult<ImagePairMatches> {
        let (points1, descriptors1) = self.detect_and_describe(img1)?;
        let (points2, descriptors2) = self.detect_and_describe(img2)?;
        let matches = self.match_features(&descriptors1, &descriptors2)?;
        info!(
            "pipeline: {} + {} points, {} matches",
            points1.len(),
            points2.len(),
            matches.len()
        );
        Ok(ImagePairMatches {
            points1,
            points2,
            descriptors1,
            descriptors2,
            matches,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

/// Decode an image file and convert it to a normalized grayscale image.
pub fn load_image<P: AsRef<Path>>(path: P) -> PipelineResult<GrayImage> {
    let luma = image::open(path)?.to_luma8();
    let (w, h) = luma.dimensions();
    Ok(GrayImage::from_luma8(w as usize, h as usize, luma.as_raw())?)
}
