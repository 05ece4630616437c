use hogmatch_core::filters::{gaussian_blur, sobel5};
use hogmatch_core::GrayImage;
use crate::integral::IntegralImage;
use crate::types::StructureTensor;

/// Per-pixel second-moment maps `dx²`, `dy²`, `dx·dy` of the smoothed
/// gradients, row-major.
#[derive(Debug, Clone)]
pub struct MomentMaps {
    width: usize,
    height: usize,
    pub dxx: Vec<f32>,
    pub dyy: Vec<f32>,
    pub dxy: Vec<f32>,
}

impl MomentMaps {
    /// Sobel-5 gradients, each smoothed with a Gaussian of `sigma`.
    pub fn compute(img: &GrayImage, sigma: f32) -> Self {
        let (dx, dy) = sobel5(img);
        let dx = gaussian_blur(&dx, sigma);
        let dy = gaussian_blur(&dy, sigma);

        let n = img.width() * img.height();
        let (mut dxx, mut dyy, mut dxy) = (Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n));
        for (&gx, &gy) in dx.data().iter().zip(dy.data().iter()) {
            dxx.push(gx * gx);
            dyy.push(gy * gy);
            dxy.push(gx * gy);
        }

        Self {
            width: img.width(),
            height: img.height(),
            dxx,
            dyy,
            dxy,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Source of structure tensors for square windows.
pub trait WindowSums: Sync {
    /// Tensor for the `size`×`size` window with top-left pixel `(x, y)`.
    fn tensor(&self, x: usize, y: usize, size: usize) -> StructureTensor;
}

/// Direct O(size²) accumulation over the moment maps.
pub struct DirectSums<'a> {
    maps: &'a MomentMaps,
}

impl<'a> DirectSums<'a> {
    pub fn new(maps: &'a MomentMaps) -> Self {
        Self { maps }
    }
}

impl WindowSums for DirectSums<'_> {
    fn tensor(&self, x: usize, y: usize, size: usize) -> StructureTensor {
        let w = self.maps.width;
        let mut t = StructureTensor { sxx: 0.0, syy: 0.0, sxy: 0.0 };
        for yy in y..y + size {
            for i in yy * w + x..yy * w + x + size {
                t.sxx += self.maps.dxx[i] as f64;
                t.syy += self.maps.dyy[i] as f64;
                t.sxy += self.maps.dxy[i] as f64;
            }
        }
        t
    }
}

/// O(1) window sums from one summed-area table per moment map.
pub struct IntegralSums {
    xx: IntegralImage,
    yy: IntegralImage,
    xy: IntegralImage,
}

impl IntegralSums {
    pub fn new(maps: &MomentMaps) -> Self {
        let (w, h) = (maps.width(), maps.height());
        Self {
            xx: IntegralImage::new(&maps.dxx, w, h),
            yy: IntegralImage::new(&maps.dyy, w, h),
            xy: IntegralImage::new(&maps.dxy, w, h),
        }
    }
}

impl WindowSums for IntegralSums {
    #[inline]
    fn tensor(&self, x: usize, y: usize, size: usize) -> StructureTensor {
        StructureTensor {
            sxx: self.xx.window_sum(x, y, size),
            syy: self.yy.window_sum(x, y, size),
            sxy: self.xy.window_sum(x, y, size),
        }
    }
}
