//! Nearest-neighbour distance ratio (NNDR) matching.
//!
//! Every descriptor of the first set is compared against all descriptors
//! of the second set; the pair is kept only when the nearest neighbour is
//! clearly closer than the runner-up. Matching is asymmetric.

pub mod error;

pub use error::{MatchError, MatchResult};

use hogmatch_core::{Descriptor, MatchParams, MatchSet};
use log::{debug, warn};
use rayon::prelude::*;

/// Nearest and second-nearest neighbour of one query descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbours {
    pub index: usize,
    pub nearest: f32,
    pub second: f32,
}

pub struct NndrMatcher {
    params: MatchParams,
}

impl NndrMatcher {
    pub fn new(params: MatchParams) -> MatchResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Match `features1` against `features2`.
    ///
    /// Pairs come out in increasing order of the `features1` index, with at
    /// most one pair per `features1` row. Either set being empty yields no
    /// matches; a single candidate has no runner-up and is an error.
    pub fn match_descriptors(&self, features1: &[Descriptor], features2: &[Descriptor]) -> MatchResult<MatchSet> {
        if features1.is_empty() || features2.is_empty() {
            return Ok(MatchSet::default());
        }
        if features2.len() == 1 {
            return Err(MatchError::InsufficientCandidates { available: 1 });
        }

        let ratio = self.params.ratio;
        let accepted: Vec<([usize; 2], f32)> = features1
            .par_iter()
            .enumerate()
            .filter_map(|(i, query)| {
                let n = nearest_two(query, features2);
                if n.nearest < ratio * n.second {
                    Some(([i, n.index], 1.0 - n.nearest / n.second))
                } else {
                    None
                }
            })
            .collect();

        let (pairs, mut confidences): (Vec<_>, Vec<_>) = accepted.into_iter().unzip();
        fill_invalid_confidences(&mut confidences);

        debug!(
            "matcher: {} of {} descriptors matched against {} candidates",
            pairs.len(),
            features1.len(),
            features2.len()
        );
        Ok(MatchSet::new(pairs, confidences)?)
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }
}

/// Euclidean distance between two descriptors.
#[inline]
pub fn distance(a: &Descriptor, b: &Descriptor) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Linear scan for the two closest candidates. Ties keep the lowest index
/// as nearest and make the runner-up equally distant. NaN distances never
/// win.
pub fn nearest_two(query: &Descriptor, candidates: &[Descriptor]) -> Neighbours {
    let mut best = Neighbours {
        index: 0,
        nearest: f32::INFINITY,
        second: f32::INFINITY,
    };
    for (j, candidate) in candidates.iter().enumerate() {
        let d = distance(query, candidate);
        if d < best.nearest {
            best.second = best.nearest;
            best.nearest = d;
            best.index = j;
        } else if d < best.second {
            best.second = d;
        }
    }
    best
}

/// Replace non-finite or out-of-range confidences with the smallest valid
/// confidence of the same call, or 0.0 when none is valid.
pub fn fill_invalid_confidences(confidences: &mut [f32]) {
    let valid = |c: f32| c.is_finite() && (0.0..=1.0).contains(&c);
    let invalid = confidences.iter().filter(|&&c| !valid(c)).count();
    if invalid == 0 {
        return;
    }

    let fill = confidences
        .iter()
        .copied()
        .filter(|&c| valid(c))
        .fold(None, |acc: Option<f32>, c| Some(acc.map_or(c, |m| m.min(c))))
        .unwrap_or(0.0);
    warn!("matcher: replacing {} invalid confidences with {}", invalid, fill);

    for c in confidences.iter_mut() {
        if !valid(*c) {
            *c = fill;
        }
    }
}
