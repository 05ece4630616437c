//! Separable correlation filters shared by the detector and the descriptor.
//!
//! All filters replicate edge pixels when the kernel reaches outside the
//! image, and apply kernels as correlation (no flip), so a derivative kernel
//! `[-1, 0, 1]` responds positively to intensity increasing along +x / +y.

use crate::image::GrayImage;

/// Sobel 5-tap derivative along the filtered axis.
pub const SOBEL5_DERIV: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];
/// Sobel 5-tap smoothing across the filtered axis.
pub const SOBEL5_SMOOTH: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
/// Scale that maps a unit step edge to a unit Sobel-5 response.
const SOBEL5_NORM: f32 = 1.0 / 48.0;

pub const SCHARR_DERIV: [f32; 3] = [-1.0, 0.0, 1.0];
pub const SCHARR_SMOOTH: [f32; 3] = [3.0, 10.0, 3.0];
const SCHARR_NORM: f32 = 1.0 / 32.0;

/// Gaussian tails are cut at this many standard deviations.
const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Normalized 1D Gaussian with radius `round(4 * sigma)`.
///
/// A non-positive sigma yields the identity kernel `[1.0]`.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / two_sigma_sq).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Correlate every row with `kernel` (horizontal pass).
pub fn correlate_rows(src: &GrayImage, kernel: &[f32]) -> GrayImage {
    debug_assert!(kernel.len() % 2 == 1, "kernel length must be odd");
    let (w, h) = (src.width(), src.height());
    let half = (kernel.len() / 2) as isize;
    let max_x = (w - 1) as isize;
    let mut out = Vec::with_capacity(w * h);

    for y in 0..h {
        let row = src.row(y);
        for x in 0..w as isize {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x + ki as isize - half).clamp(0, max_x) as usize;
                acc += row[sx] * kv;
            }
            out.push(acc);
        }
    }
    GrayImage::from_parts(w, h, out)
}

/// Correlate every column with `kernel` (vertical pass).
pub fn correlate_cols(src: &GrayImage, kernel: &[f32]) -> GrayImage {
    debug_assert!(kernel.len() % 2 == 1, "kernel length must be odd");
    let (w, h) = (src.width(), src.height());
    let half = (kernel.len() / 2) as isize;
    let max_y = (h - 1) as isize;
    let mut out = Vec::with_capacity(w * h);

    for y in 0..h as isize {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y + ki as isize - half).clamp(0, max_y) as usize;
                acc += src.get(x, sy) * kv;
            }
            out.push(acc);
        }
    }
    GrayImage::from_parts(w, h, out)
}

/// Horizontal pass with `kernel_row`, then vertical pass with `kernel_col`.
pub fn correlate_separable(src: &GrayImage, kernel_row: &[f32], kernel_col: &[f32]) -> GrayImage {
    correlate_cols(&correlate_rows(src, kernel_row), kernel_col)
}

pub fn gaussian_blur(src: &GrayImage, sigma: f32) -> GrayImage {
    let kernel = gaussian_kernel_1d(sigma);
    if kernel.len() == 1 {
        return src.clone();
    }
    correlate_separable(src, &kernel, &kernel)
}

fn scaled(img: GrayImage, factor: f32) -> GrayImage {
    let (w, h) = (img.width(), img.height());
    let data = img.data().iter().map(|v| v * factor).collect();
    GrayImage::from_parts(w, h, data)
}

/// 5×5 Sobel gradients `(dx, dy)`, normalized so a unit step gives 1.0.
pub fn sobel5(src: &GrayImage) -> (GrayImage, GrayImage) {
    let dx = correlate_separable(src, &SOBEL5_DERIV, &SOBEL5_SMOOTH);
    let dy = correlate_separable(src, &SOBEL5_SMOOTH, &SOBEL5_DERIV);
    (scaled(dx, SOBEL5_NORM), scaled(dy, SOBEL5_NORM))
}

/// 3×3 Scharr gradients `(dx, dy)`.
pub fn scharr(src: &GrayImage) -> (GrayImage, GrayImage) {
    let dx = correlate_separable(src, &SCHARR_DERIV, &SCHARR_SMOOTH);
    let dy = correlate_separable(src, &SCHARR_SMOOTH, &SCHARR_DERIV);
    (scaled(dx, SCHARR_NORM), scaled(dy, SCHARR_NORM))
}
