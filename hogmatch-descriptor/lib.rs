//! SIFT-like local descriptor: a 4×4 grid of 8-bin gradient-orientation
//! histograms around each interest point, without interpolation across
//! cells or bins.

pub mod error;
pub mod gradient;
pub mod window;

pub use error::{DescriptorError, DescriptorResult};
pub use gradient::GradientField;
pub use window::{clamp_window, Window};

use gradient::orientation_bin;
use hogmatch_core::{
    validate_feature_width, Descriptor, DescriptorParams, GrayImage, InterestPoints,
    DESCRIPTOR_CELLS, DESCRIPTOR_LEN, ORIENTATION_BINS,
};
use log::debug;
use rayon::prelude::*;

pub struct HogDescriptor {
    params: DescriptorParams,
    feature_width: usize,
}

impl HogDescriptor {
    pub fn new(params: DescriptorParams, feature_width: usize) -> DescriptorResult<Self> {
        params.validate()?;
        validate_feature_width(feature_width)?;
        Ok(Self { params, feature_width })
    }

    /// One descriptor per detected point, in point order.
    pub fn describe(&self, img: &GrayImage, points: &InterestPoints) -> DescriptorResult<Vec<Descriptor>> {
        let centers: Vec<(i64, i64)> = points.iter().map(|(x, y)| (x as i64, y as i64)).collect();
        self.describe_centers(img, &centers)
    }

    /// Describe arbitrary coordinates; fractional values are rounded to the
    /// nearest pixel, ties to even.
    pub fn describe_coordinates(&self, img: &GrayImage, xs: &[f32], ys: &[f32]) -> DescriptorResult<Vec<Descriptor>> {
        if xs.len() != ys.len() {
            return Err(DescriptorError::CoordinateCountMismatch { xs: xs.len(), ys: ys.len() });
        }
        let centers = xs
            .iter()
            .zip(ys.iter())
            .enumerate()
            .map(|(index, (&x, &y))| {
                if !x.is_finite() || !y.is_finite() {
                    return Err(DescriptorError::NonFiniteCoordinate { index });
                }
                Ok((x.round_ties_even() as i64, y.round_ties_even() as i64))
            })
            .collect::<DescriptorResult<Vec<_>>>()?;
        self.describe_centers(img, &centers)
    }

    fn describe_centers(&self, img: &GrayImage, centers: &[(i64, i64)]) -> DescriptorResult<Vec<Descriptor>> {
        if centers.is_empty() {
            return Ok(Vec::new());
        }
        let (w, h) = (img.width(), img.height());
        if self.feature_width > w || self.feature_width > h {
            return Err(DescriptorError::WindowTooLarge {
                feature_width: self.feature_width,
                width: w,
                height: h,
            });
        }
        for (index, &(x, y)) in centers.iter().enumerate() {
            if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                return Err(DescriptorError::PointOutOfBounds { index, x, y, width: w, height: h });
            }
        }

        let field = GradientField::compute(img, self.params.sigma);

        let descriptors = centers
            .par_iter()
            .map(|&(x, y)| {
                let window = clamp_window(x, y, self.feature_width, w, h)?;
                Ok(self.finalize(self.histogram(&field, &window)))
            })
            .collect::<DescriptorResult<Vec<_>>>()?;

        let zero_rows = descriptors.iter().filter(|d| d.iter().all(|&v| v == 0.0)).count();
        debug!(
            "descriptor: built {} descriptors ({} without gradient energy)",
            descriptors.len(),
            zero_rows
        );
        Ok(descriptors)
    }

    /// Magnitude-weighted orientation histograms, laid out cell-row-major:
    /// index = `(row * 4 + col) * 8 + bin`.
    pub fn histogram(&self, field: &GradientField, window: &Window) -> Descriptor {
        let mut d = [0.0f32; DESCRIPTOR_LEN];
        let side = window.size / DESCRIPTOR_CELLS;

        for row in 0..DESCRIPTOR_CELLS {
            for col in 0..DESCRIPTOR_CELLS {
                let (cx, cy) = window.cell_origin(row, col, DESCRIPTOR_CELLS);
                let base = (row * DESCRIPTOR_CELLS + col) * ORIENTATION_BINS;
                for y in cy..cy + side {
                    for x in cx..cx + side {
                        let bin = orientation_bin(field.orientation(x, y), ORIENTATION_BINS);
                        d[base + bin] += field.magnitude(x, y);
                    }
                }
            }
        }
        d
    }

    /// Unit-normalize, clip, apply the power law, then renormalize.
    ///
    /// Clipping and the power law change the vector's length, so the second
    /// normalization restores unit length for every row that has gradient
    /// energy. All-zero histograms stay all-zero.
    pub fn finalize(&self, mut d: Descriptor) -> Descriptor {
        normalize(&mut d);
        let clip = self.params.clip;
        let power = self.params.power;
        for v in d.iter_mut() {
            if *v >= clip {
                *v = clip;
            }
            *v = v.powf(power);
        }
        normalize(&mut d);
        d
    }

    pub fn params(&self) -> &DescriptorParams {
        &self.params
    }

    pub fn feature_width(&self) -> usize {
        self.feature_width
    }
}

/// Scale to unit Euclidean length; a zero vector is left unchanged.
fn normalize(d: &mut Descriptor) {
    let norm = d.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm = if norm == 0.0 { 1.0 } else { norm };
    for v in d.iter_mut() {
        *v /= norm;
    }
}
