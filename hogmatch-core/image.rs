use crate::error::{CoreError, CoreResult};

/// Row-major single-channel image with samples in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl GrayImage {
    /// Wrap an existing sample buffer, validating its shape and contents.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidImageSize { width, height });
        }
        let expected_len = width * height;
        if data.len() != expected_len {
            return Err(CoreError::InvalidImageData {
                expected_len,
                actual_len: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::NonFiniteSample { index });
        }
        Ok(Self { width, height, data })
    }

    /// Constant-intensity image.
    pub fn filled(width: usize, height: usize, value: f32) -> CoreResult<Self> {
        Self::new(width, height, vec![value; width * height])
    }

    /// Convert an 8-bit grayscale buffer, scaling to `[0, 1]`.
    pub fn from_luma8(width: usize, height: usize, pixels: &[u8]) -> CoreResult<Self> {
        let data = pixels.iter().map(|&p| p as f32 / 255.0).collect();
        Self::new(width, height, data)
    }

    /// Convert an interleaved 8-bit RGB buffer to luminance.
    pub fn from_rgb8(width: usize, height: usize, pixels: &[u8]) -> CoreResult<Self> {
        let expected_len = width * height * 3;
        if pixels.len() != expected_len {
            return Err(CoreError::InvalidImageData {
                expected_len,
                actual_len: pixels.len(),
            });
        }
        let data = pixels
            .chunks_exact(3)
            .map(|rgb| {
                (0.2125 * rgb[0] as f32 + 0.7154 * rgb[1] as f32 + 0.0721 * rgb[2] as f32) / 255.0
            })
            .collect();
        Self::new(width, height, data)
    }

    /// Internal constructor for filter outputs whose shape is already known good.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}
