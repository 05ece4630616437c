use hogmatch_core::PipelineConfig;
use crate::{Pipeline, PipelineResult};

/// Builder for creating a `Pipeline`
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Window side shared by detection and description (multiple of 4)
    pub fn feature_width(mut self, feature_width: usize) -> Self {
        self.config.feature_width = feature_width;
        self
    }

    /// Set the number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    pub fn harris_alpha(mut self, alpha: f32) -> Self {
        self.config.harris.alpha = alpha;
        self
    }

    /// Minimum Harris response for a window center to be kept
    pub fn harris_threshold(mut self, threshold: f32) -> Self {
        self.config.harris.threshold = threshold;
        self
    }

    /// Step between detector windows
    pub fn stride(mut self, stride: usize) -> Self {
        self.config.harris.stride = stride;
        self
    }

    pub fn harris_sigma(mut self, sigma: f32) -> Self {
        self.config.harris.sigma = sigma;
        self
    }

    pub fn descriptor_sigma(mut self, sigma: f32) -> Self {
        self.config.descriptor.sigma = sigma;
        self
    }

    /// Ceiling for normalized descriptor values
    pub fn clip(mut self, clip: f32) -> Self {
        self.config.descriptor.clip = clip;
        self
    }

    /// Power-law exponent applied after clipping
    pub fn power(mut self, power: f32) -> Self {
        self.config.descriptor.power = power;
        self
    }

    /// Set the nearest-neighbour distance ratio threshold
    pub fn ratio(mut self, ratio: f32) -> Self {
        self.config.matching.ratio = ratio;
        self
    }

    pub fn metadata(mut self, name: &str, description: &str) -> Self {
        self.config = self.config.with_metadata(name, description);
        self
    }

    /// Apply the dense preset, keeping the thread count
    pub fn preset_dense(mut self) -> Self {
        let n_threads = self.config.n_threads;
        self.config = PipelineConfig { n_threads, ..PipelineConfig::dense_preset() };
        self
    }

    /// Apply the strict preset, keeping the thread count
    pub fn preset_strict(mut self) -> Self {
        let n_threads = self.config.n_threads;
        self.config = PipelineConfig { n_threads, ..PipelineConfig::strict_preset() };
        self
    }

    /// Build the `Pipeline`
    pub fn build(self) -> PipelineResult<Pipeline> {
        Pipeline::new(self.config)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.config.summary()
    }

    /// Create a builder from an existing `PipelineConfig`
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Convert the builder into a `PipelineConfig`
    pub fn to_config(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipelineError;

    #[test]
    fn test_builder_defaults() {
        let config = PipelineBuilder::new().to_config();
        assert_eq!(config.feature_width, 16);
        assert_eq!(config.harris.stride, 2);
        assert_eq!(config.matching.ratio, 0.8);
    }

    #[test]
    fn test_builder_setters() {
        let config = PipelineBuilder::new()
            .feature_width(8)
            .threads(2)
            .harris_alpha(0.05)
            .harris_threshold(0.01)
            .stride(3)
            .harris_sigma(0.5)
            .descriptor_sigma(1.0)
            .clip(0.2)
            .power(0.5)
            .ratio(0.7)
            .metadata("Custom", "Builder test")
            .to_config();

        assert_eq!(config.feature_width, 8);
        assert_eq!(config.n_threads, 2);
        assert_eq!(config.harris.alpha, 0.05);
        assert_eq!(config.harris.threshold, 0.01);
        assert_eq!(config.harris.stride, 3);
        assert_eq!(config.harris.sigma, 0.5);
        assert_eq!(config.descriptor.sigma, 1.0);
        assert_eq!(config.descriptor.clip, 0.2);
        assert_eq!(config.descriptor.power, 0.5);
        assert_eq!(config.matching.ratio, 0.7);
        assert_eq!(config.name.as_deref(), Some("Custom"));
    }

    #[test]
    fn test_presets_keep_thread_count() {
        let dense = PipelineBuilder::new().threads(3).preset_dense().to_config();
        assert_eq!(dense.harris.stride, 1);
        assert_eq!(dense.n_threads, 3);

        let strict = PipelineBuilder::new().threads(3).preset_strict().to_config();
        assert_eq!(strict.matching.ratio, 0.6);
        assert_eq!(strict.n_threads, 3);
    }

    #[test]
    fn test_config_round_trip() {
        let original = PipelineConfig::strict_preset();
        let rebuilt = PipelineBuilder::from_config(original.clone()).to_config();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_build_validates() {
        assert!(PipelineBuilder::new().feature_width(8).threads(1).build().is_ok());
        assert!(matches!(
            PipelineBuilder::new().feature_width(10).build(),
            Err(PipelineError::Config(_))
        ));
        assert!(matches!(
            PipelineBuilder::new().stride(0).build(),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_summary_mentions_parameters() {
        let summary = PipelineBuilder::new().ratio(0.65).summary();
        assert!(summary.contains("ratio=0.65"));
        assert!(summary.contains("feature_width=16"));
    }
}
