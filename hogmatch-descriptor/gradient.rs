use hogmatch_core::filters::{gaussian_blur, scharr};
use hogmatch_core::GrayImage;
use std::f32::consts::TAU;

/// Per-pixel gradient magnitude and orientation in `[0, 2π)`.
#[derive(Debug, Clone)]
pub struct GradientField {
    width: usize,
    height: usize,
    magnitude: Vec<f32>,
    orientation: Vec<f32>,
}

impl GradientField {
    /// Gaussian pre-smoothing followed by Scharr gradients.
    pub fn compute(img: &GrayImage, sigma: f32) -> Self {
        let smoothed = gaussian_blur(img, sigma);
        let (dx, dy) = scharr(&smoothed);

        let (magnitude, orientation) = dx
            .data()
            .iter()
            .zip(dy.data().iter())
            .map(|(&gx, &gy)| (gx.hypot(gy), wrap_angle(gy.atan2(gx))))
            .unzip();

        Self {
            width: img.width(),
            height: img.height(),
            magnitude,
            orientation,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn magnitude(&self, x: usize, y: usize) -> f32 {
        self.magnitude[y * self.width + x]
    }

    #[inline]
    pub fn orientation(&self, x: usize, y: usize) -> f32 {
        self.orientation[y * self.width + x]
    }
}

/// Map `atan2` output from `(-π, π]` into `[0, 2π)`.
#[inline]
pub fn wrap_angle(theta: f32) -> f32 {
    if theta < 0.0 { theta + TAU } else { theta }
}

/// Histogram bin of an orientation in `[0, 2π)` split into `bins` equal arcs.
#[inline]
pub fn orientation_bin(theta: f32, bins: usize) -> usize {
    let bin = (theta * bins as f32 / TAU) as usize;
    // theta + 2π can round up to exactly 2π
    bin.min(bins - 1)
}
