pub mod config;
pub mod error;
pub mod filters;
pub mod image;

pub use config::{
    validate_feature_width, DescriptorParams, HarrisParams, MatchParams, PipelineConfig,
};
pub use error::{ConfigError, CoreError, CoreResult};
pub use image::GrayImage;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cells per descriptor side (4×4 grid).
pub const DESCRIPTOR_CELLS: usize = 4;
/// Orientation bins per cell histogram.
pub const ORIENTATION_BINS: usize = 8;
/// 4 × 4 × 8 = 128 values.
pub const DESCRIPTOR_LEN: usize = DESCRIPTOR_CELLS * DESCRIPTOR_CELLS * ORIENTATION_BINS;

/// Gradient-histogram descriptor, unit length unless all-zero
pub type Descriptor = [f32; DESCRIPTOR_LEN];

/// Interest point coordinates as parallel `xs` / `ys` arrays, with an
/// optional parallel corner-response array.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "InterestPointsRepr"))]
pub struct InterestPoints {
    xs: Vec<usize>,
    ys: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    responses: Option<Vec<f32>>,
}

impl InterestPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_coordinates(xs: Vec<usize>, ys: Vec<usize>) -> CoreResult<Self> {
        if xs.len() != ys.len() {
            return Err(CoreError::LengthMismatch {
                what: "interest point coordinates",
                left: xs.len(),
                right: ys.len(),
            });
        }
        Ok(Self { xs, ys, responses: None })
    }

    /// Points with a corner response attached to each.
    pub fn with_responses(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            responses: Some(Vec::with_capacity(capacity)),
        }
    }

    /// Append a point. The response is recorded only when this set tracks
    /// responses.
    pub fn push(&mut self, x: usize, y: usize, response: f32) {
        self.xs.push(x);
        self.ys.push(y);
        if let Some(r) = self.responses.as_mut() {
            r.push(response);
        }
    }

    pub fn xs(&self) -> &[usize] {
        &self.xs
    }

    pub fn ys(&self) -> &[usize] {
        &self.ys
    }

    pub fn responses(&self) -> Option<&[f32]> {
        self.responses.as_deref()
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Index pairs into the two descriptor sets with a parallel confidence array.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatchSetRepr"))]
pub struct MatchSet {
    pairs: Vec<[usize; 2]>,
    confidences: Vec<f32>,
}

impl MatchSet {
    pub fn new(pairs: Vec<[usize; 2]>, confidences: Vec<f32>) -> CoreResult<Self> {
        if pairs.len() != confidences.len() {
            return Err(CoreError::LengthMismatch {
                what: "match pairs and confidences",
                left: pairs.len(),
                right: confidences.len(),
            });
        }
        Ok(Self { pairs, confidences })
    }

    pub fn pairs(&self) -> &[[usize; 2]] {
        &self.pairs
    }

    pub fn confidences(&self) -> &[f32] {
        &self.confidences
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `(index1, index2, confidence)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.pairs
            .iter()
            .zip(self.confidences.iter())
            .map(|(p, &c)| (p[0], p[1], c))
    }

    /// Matches ordered by decreasing confidence.
    pub fn ranked(&self) -> Vec<(usize, usize, f32)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Unvalidated wire form; deserialization goes through the checking
/// constructors.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct InterestPointsRepr {
    xs: Vec<usize>,
    ys: Vec<usize>,
    #[serde(default)]
    responses: Option<Vec<f32>>,
}

#[cfg(feature = "serde")]
impl TryFrom<InterestPointsRepr> for InterestPoints {
    type Error = CoreError;

    fn try_from(raw: InterestPointsRepr) -> CoreResult<Self> {
        let mut points = Self::from_coordinates(raw.xs, raw.ys)?;
        if let Some(responses) = raw.responses {
            if responses.len() != points.len() {
                return Err(CoreError::LengthMismatch {
                    what: "interest points and responses",
                    left: points.len(),
                    right: responses.len(),
                });
            }
            points.responses = Some(responses);
        }
        Ok(points)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct MatchSetRepr {
    pairs: Vec<[usize; 2]>,
    confidences: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatchSetRepr> for MatchSet {
    type Error = CoreError;

    fn try_from(raw: MatchSetRepr) -> CoreResult<Self> {
        Self::new(raw.pairs, raw.confidences)
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}
