use hogmatch_core::{ConfigError, GrayImage, HarrisParams, InterestPoints};
use crate::moments::{MomentMaps, WindowSums};
use crate::types::ScoredPoint;
use log::{debug, trace};
use rayon::prelude::*;

/// Strided-window Harris corner detector
#[derive(Debug, Clone)]
pub struct HarrisDetector {
    params: HarrisParams,
    feature_width: usize,
}

impl HarrisDetector {
    /// Creates a new detector with validation
    pub fn new(params: HarrisParams, feature_width: usize) -> Result<Self, ConfigError> {
        params.validate()?;
        if feature_width == 0 {
            return Err(ConfigError::InvalidFeatureWidth {
                feature_width,
                reason: "must be > 0",
            });
        }
        Ok(Self { params, feature_width })
    }

    /// Detect interest points; each point carries its Harris response.
    ///
    /// A `feature_width` not smaller than both image dimensions leaves no
    /// window to scan and yields an empty set.
    pub fn detect(&self, img: &GrayImage) -> InterestPoints {
        let scored = self.detect_with_response(img);
        let mut points = InterestPoints::with_responses(scored.len());
        for sp in scored {
            points.push(sp.x, sp.y, sp.response);
        }
        points
    }

    /// Detect interest points as scored window centers, in scan order
    /// (row-major over window positions).
    pub fn detect_with_response(&self, img: &GrayImage) -> Vec<ScoredPoint> {
        let fw = self.feature_width;
        let (w, h) = (img.width(), img.height());
        if fw >= w || fw >= h {
            debug!("harris: feature width {} leaves no window in {}x{} image", fw, w, h);
            return Vec::new();
        }

        let maps = MomentMaps::compute(img, self.params.sigma);

        #[cfg(feature = "integral-images")]
        let sums = crate::moments::IntegralSums::new(&maps);

        #[cfg(not(feature = "integral-images"))]
        let sums = crate::moments::DirectSums::new(&maps);

        let points = self.scan(&sums, w, h);
        debug!(
            "harris: {} of {} windows passed threshold {}",
            points.len(),
            self.window_count(w, h),
            self.params.threshold
        );
        points
    }

    /// Number of candidate windows scanned for an image of this size.
    pub fn window_count(&self, width: usize, height: usize) -> usize {
        let fw = self.feature_width;
        if fw >= width || fw >= height {
            return 0;
        }
        let stride = self.params.stride;
        let steps = |extent: usize| (extent - fw + stride - 1) / stride;
        steps(width) * steps(height)
    }

    /// Harris response of the window with top-left pixel `(x, y)`.
    pub fn response_at<S: WindowSums>(&self, sums: &S, x: usize, y: usize) -> f64 {
        sums.tensor(x, y, self.feature_width)
            .harris_response(self.params.alpha as f64)
    }

    fn scan<S: WindowSums>(&self, sums: &S, w: usize, h: usize) -> Vec<ScoredPoint> {
        let fw = self.feature_width;
        let stride = self.params.stride;
        let threshold = self.params.threshold as f64;
        // Window start to reported center.
        let offset = (fw / 2).saturating_sub(1);

        let rows: Vec<usize> = (0..h - fw).step_by(stride).collect();
        rows.into_par_iter()
            .flat_map_iter(|y| {
                let mut v = Vec::new();
                for x in (0..w - fw).step_by(stride) {
                    let r = self.response_at(sums, x, y);
                    if r > threshold {
                        trace!("harris: window ({}, {}) response {:.6}", x, y, r);
                        v.push(ScoredPoint {
                            x: x + offset,
                            y: y + offset,
                            response: r as f32,
                        });
                    }
                }
                v
            })
            .collect()
    }

    pub fn params(&self) -> &HarrisParams {
        &self.params
    }

    pub fn feature_width(&self) -> usize {
        self.feature_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moments::{DirectSums, IntegralSums};
    use proptest::prelude::*;

    fn create_detector(feature_width: usize) -> HarrisDetector {
        HarrisDetector::new(HarrisParams::default(), feature_width).unwrap()
    }

    /// Dark image with a bright bottom-right quadrant starting at `(cx, cy)`.
    fn create_corner_image(width: usize, height: usize, cx: usize, cy: usize) -> GrayImage {
        let data = (0..width * height)
            .map(|i| if i % width >= cx && i / width >= cy { 1.0 } else { 0.0 })
            .collect();
        GrayImage::new(width, height, data).unwrap()
    }

    fn create_edge_image(width: usize, height: usize, edge_x: usize) -> GrayImage {
        let data = (0..width * height)
            .map(|i| if i % width >= edge_x { 1.0 } else { 0.0 })
            .collect();
        GrayImage::new(width, height, data).unwrap()
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            HarrisDetector::new(HarrisParams::default(), 0),
            Err(ConfigError::InvalidFeatureWidth { .. })
        ));

        let params = HarrisParams { stride: 0, ..HarrisParams::default() };
        assert_eq!(HarrisDetector::new(params, 8).unwrap_err(), ConfigError::InvalidStride(0));

        let params = HarrisParams { alpha: -1.0, ..HarrisParams::default() };
        assert!(HarrisDetector::new(params, 8).is_err());
    }

    #[test]
    fn test_flat_image_has_no_points() {
        let detector = create_detector(8);
        let img = GrayImage::filled(20, 20, 0.5).unwrap();
        let points = detector.detect(&img);
        assert!(points.is_empty());
        assert_eq!(points.xs().len(), points.ys().len());
    }

    #[test]
    fn test_feature_width_exceeding_image_yields_empty() {
        let detector = create_detector(20);
        let img = create_corner_image(20, 40, 10, 20);
        assert!(detector.detect(&img).is_empty());
        assert_eq!(detector.window_count(20, 40), 0);

        let detector = create_detector(32);
        assert!(detector.detect(&img).is_empty());
    }

    #[test]
    fn test_corner_detection() {
        let detector = create_detector(8);
        let img = create_corner_image(32, 32, 16, 16);
        let points = detector.detect(&img);

        assert!(!points.is_empty());
        for (x, y) in points.iter() {
            assert!((x as i64 - 16).abs() <= 8, "x={} too far from corner", x);
            assert!((y as i64 - 16).abs() <= 8, "y={} too far from corner", y);
        }
        // Responses travel with the points.
        let responses = points.responses().unwrap();
        assert_eq!(responses.len(), points.len());
        assert!(responses.iter().all(|&r| r > 0.005));
    }

    #[test]
    fn test_straight_edge_rejected() {
        let detector = create_detector(8);
        let img = create_edge_image(32, 32, 16);
        assert!(detector.detect(&img).is_empty());
    }

    #[test]
    fn test_points_cluster_without_suppression() {
        // Several stride-spaced windows straddle one corner.
        let detector = create_detector(8);
        let img = create_corner_image(32, 32, 16, 16);
        assert!(detector.detect(&img).len() > 1);
    }

    #[test]
    fn test_stride_grid() {
        let detector = create_detector(8);
        let img = create_corner_image(32, 32, 16, 16);
        for sp in detector.detect_with_response(&img) {
            // Window starts are multiples of the stride; centers are start + 3.
            assert_eq!((sp.x - 3) % 2, 0);
            assert_eq!((sp.y - 3) % 2, 0);
        }
    }

    #[test]
    fn test_window_count() {
        let detector = create_detector(8);
        // (20 - 8) / 2 = 6 starts per axis: 0, 2, .., 10
        assert_eq!(detector.window_count(20, 20), 36);
        assert_eq!(detector.window_count(21, 20), 42);
    }

    #[test]
    fn test_response_backends_agree() {
        let detector = create_detector(8);
        let img = create_corner_image(24, 24, 12, 12);
        let maps = MomentMaps::compute(&img, 0.3);
        let direct = DirectSums::new(&maps);
        let integral = IntegralSums::new(&maps);
        for (x, y) in [(0, 0), (6, 6), (8, 4), (14, 14)] {
            let a = detector.response_at(&direct, x, y);
            let b = detector.response_at(&integral, x, y);
            assert!((a - b).abs() < 1e-6 * (1.0 + a.abs()));
        }
    }

    #[test]
    fn test_detection_is_deterministic() {
        let detector = create_detector(8);
        let img = create_corner_image(48, 40, 20, 18);
        let first = detector.detect(&img);
        for _ in 0..5 {
            assert_eq!(detector.detect(&img), first);
        }
    }

    proptest! {
        #[test]
        fn prop_points_inside_scan_region(
            pixels in prop::collection::vec(any::<u8>(), 24 * 20),
            fw in prop::sample::select(vec![4usize, 8, 12]),
        ) {
            let img = GrayImage::from_luma8(24, 20, &pixels).unwrap();
            let detector = create_detector(fw);
            let points = detector.detect(&img);
            prop_assert_eq!(points.xs().len(), points.ys().len());
            let offset = fw / 2 - 1;
            for (x, y) in points.iter() {
                prop_assert!(x >= offset && x < 24 - fw + offset);
                prop_assert!(y >= offset && y < 20 - fw + offset);
            }
        }
    }
}
