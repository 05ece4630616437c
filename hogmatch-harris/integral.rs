/// Summed-area table over a row-major `f32` buffer.
///
/// Stored with one leading row and column of zeros, so entry `(x, y)` holds
/// the sum of all samples strictly above and left of pixel `(x, y)`.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    stride: usize,
    sums: Vec<f64>,
}

impl IntegralImage {
    pub fn new(data: &[f32], width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        let stride = width + 1;
        let mut sums = vec![0.0f64; stride * (height + 1)];

        for y in 0..height {
            let mut row_sum = 0.0f64;
            for x in 0..width {
                row_sum += data[y * width + x] as f64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }

        Self { stride, sums }
    }

    /// Sum over the `size`×`size` window whose top-left pixel is `(x, y)`.
    #[inline]
    pub fn window_sum(&self, x: usize, y: usize, size: usize) -> f64 {
        let s = self.stride;
        let (x1, y1) = (x + size, y + size);
        self.sums[y1 * s + x1] - self.sums[y * s + x1] - self.sums[y1 * s + x] + self.sums[y * s + x]
    }
}
