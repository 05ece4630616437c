use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Harris corner detector parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HarrisParams {
    /// Trace penalty in `R = det(M) - alpha * trace(M)^2`
    pub alpha: f32,
    /// Minimum response for a window center to be accepted
    pub threshold: f32,
    /// Step between candidate windows, in pixels
    pub stride: usize,
    /// Gaussian sigma applied to each gradient channel
    pub sigma: f32,
}

impl Default for HarrisParams {
    fn default() -> Self {
        Self {
            alpha: 0.03,
            threshold: 0.005,
            stride: 2,
            sigma: 0.3,
        }
    }
}

impl HarrisParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ConfigError::InvalidParameter { name: "harris.alpha", value: self.alpha });
        }
        if !self.threshold.is_finite() {
            return Err(ConfigError::InvalidParameter { name: "harris.threshold", value: self.threshold });
        }
        if self.stride == 0 {
            return Err(ConfigError::InvalidStride(self.stride));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(ConfigError::InvalidParameter { name: "harris.sigma", value: self.sigma });
        }
        Ok(())
    }
}

/// Gradient-histogram descriptor parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DescriptorParams {
    /// Gaussian sigma applied to the image before gradients
    pub sigma: f32,
    /// Ceiling applied to normalized descriptor values
    pub clip: f32,
    /// Elementwise power applied after clipping
    pub power: f32,
}

impl Default for DescriptorParams {
    fn default() -> Self {
        Self {
            sigma: 0.8,
            clip: 0.3,
            power: 0.8,
        }
    }
}

impl DescriptorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(ConfigError::InvalidParameter { name: "descriptor.sigma", value: self.sigma });
        }
        if !self.clip.is_finite() || self.clip <= 0.0 {
            return Err(ConfigError::InvalidParameter { name: "descriptor.clip", value: self.clip });
        }
        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(ConfigError::InvalidParameter { name: "descriptor.power", value: self.power });
        }
        Ok(())
    }
}

/// Nearest-neighbour distance ratio matching parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchParams {
    /// A match is kept iff `d1 < ratio * d2`
    pub ratio: f32,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self { ratio: 0.8 }
    }
}

impl MatchParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(ConfigError::InvalidParameter { name: "matching.ratio", value: self.ratio });
        }
        Ok(())
    }
}

/// Checks shared by every stage that uses `feature_width`.
pub fn validate_feature_width(feature_width: usize) -> Result<(), ConfigError> {
    if feature_width == 0 {
        return Err(ConfigError::InvalidFeatureWidth {
            feature_width,
            reason: "must be > 0",
        });
    }
    if feature_width % 4 != 0 {
        return Err(ConfigError::InvalidFeatureWidth {
            feature_width,
            reason: "must be a multiple of 4",
        });
    }
    Ok(())
}

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Window side shared by the detector and the descriptor
    pub feature_width: usize,
    pub n_threads: usize,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    // Sections last so TOML emits plain values before tables
    pub harris: HarrisParams,
    pub descriptor: DescriptorParams,
    pub matching: MatchParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feature_width: 16,
            n_threads: num_cpus::get().max(1),
            name: None,
            description: None,
            harris: HarrisParams::default(),
            descriptor: DescriptorParams::default(),
            matching: MatchParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Every candidate window is scored; more points, slower detection.
    pub fn dense_preset() -> Self {
        Self {
            harris: HarrisParams {
                stride: 1,
                ..HarrisParams::default()
            },
            name: Some("Dense".to_string()),
            description: Some("Stride-1 Harris scan for maximum point density".to_string()),
            ..Self::default()
        }
    }

    /// Tighter ratio test; fewer but more distinctive matches.
    pub fn strict_preset() -> Self {
        Self {
            matching: MatchParams { ratio: 0.6 },
            name: Some("Strict".to_string()),
            description: Some("Low NNDR ratio for high-precision matching".to_string()),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self
    }

    pub fn summary(&self) -> String {
        format!(
            "PipelineConfig: feature_width={}, harris=[alpha:{}, threshold:{}, stride:{}, sigma:{}], descriptor=[sigma:{}, clip:{}, power:{}], ratio={}, threads={}",
            self.feature_width,
            self.harris.alpha, self.harris.threshold, self.harris.stride, self.harris.sigma,
            self.descriptor.sigma, self.descriptor.clip, self.descriptor.power,
            self.matching.ratio, self.n_threads
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_feature_width(self.feature_width)?;
        self.harris.validate()?;
        self.descriptor.validate()?;
        self.matching.validate()?;
        if self.n_threads == 0 {
            return Err(ConfigError::InvalidThreadCount(self.n_threads));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
