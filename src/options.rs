//! Segmentation options

use crate::detect::DEFAULT_MIN_BAND_FRACTION;
use crate::pixel::DEFAULT_TOLERANCE;

/// Options shared by the detector, trimmer and orchestrator
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Per-channel color tolerance (inclusive)
    pub tolerance: u8,
    /// Pixels re-added around detected content after trimming
    pub padding: u32,
    /// Bands shorter than this fraction of the dimension merge into a
    /// neighbor
    pub min_band_fraction: f32,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            padding: 0,
            min_band_fraction: DEFAULT_MIN_BAND_FRACTION,
        }
    }
}

impl SplitOptions {
    /// Create a new options builder
    pub fn builder() -> SplitOptionsBuilder {
        SplitOptionsBuilder::default()
    }

    /// Exact color matching (clean digital sources, hard edges)
    pub fn exact() -> Self {
        Self {
            tolerance: 0,
            ..Default::default()
        }
    }

    /// Loose matching for noisy scans and JPEG artifacts
    pub fn for_scans() -> Self {
        Self {
            tolerance: 50,
            padding: 2,
            ..Default::default()
        }
    }
}

/// Builder for [`SplitOptions`]
#[derive(Debug, Default)]
pub struct SplitOptionsBuilder {
    options: SplitOptions,
}

impl SplitOptionsBuilder {
    /// Set the per-channel color tolerance
    #[must_use]
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.options.tolerance = tolerance;
        self
    }

    /// Set the trim padding in pixels
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.options.padding = padding;
        self
    }

    /// Set the minimum band fraction, clamped to `0.0..=0.9`
    #[must_use]
    pub fn min_band_fraction(mut self, fraction: f32) -> Self {
        self.options.min_band_fraction = fraction.clamp(0.0, 0.9);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> SplitOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = SplitOptions::default();
        assert_eq!(opts.tolerance, 25);
        assert_eq!(opts.padding, 0);
        assert!((opts.min_band_fraction - 0.10).abs() < f32::EPSILON);
    }

    #[test]
    fn test_builder() {
        let opts = SplitOptions::builder()
            .tolerance(40)
            .padding(3)
            .min_band_fraction(0.05)
            .build();
        assert_eq!(opts.tolerance, 40);
        assert_eq!(opts.padding, 3);
        assert!((opts.min_band_fraction - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn test_builder_clamps_fraction() {
        let opts = SplitOptions::builder().min_band_fraction(3.0).build();
        assert!((opts.min_band_fraction - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_presets() {
        assert_eq!(SplitOptions::exact().tolerance, 0);
        assert!(SplitOptions::for_scans().tolerance > 25);
    }
}
