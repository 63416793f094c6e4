//! XTF to TIFF conversion configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
}

/// Configuration for XTF to TIFF conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to reject empty or oversized images before encoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height
    pub max_dimension: Option<usize>,
    /// Lay port and starboard side by side (false renders port only)
    pub combine_channels: bool,
    /// Track the bottom and write the ground-range image instead of the waterfall
    pub slant_correct: bool,
    /// Gamma applied to the final image
    pub gamma: Option<f64>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            max_dimension: Some(65535),
            combine_channels: true,
            slant_correct: true,
            gamma: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    combine_channels: Option<bool>,
    slant_correct: Option<bool>,
    gamma: Option<Option<f64>>,
}

impl ConversionConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn combine_channels(mut self, combine: bool) -> Self {
        self.combine_channels = Some(combine);
        self
    }

    pub fn slant_correct(mut self, enable: bool) -> Self {
        self.slant_correct = Some(enable);
        self
    }

    pub fn gamma(mut self, gamma: Option<f64>) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            combine_channels: self.combine_channels.unwrap_or(default.combine_channels),
            slant_correct: self.slant_correct.unwrap_or(default.slant_correct),
            gamma: self.gamma.unwrap_or(default.gamma),
        }
    }
}
