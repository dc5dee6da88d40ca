//! Explicit fitting configuration.
//!
//! A [`FitConfig`] is built by the caller and passed to every operation that
//! needs it; nothing in this crate keeps process-wide state.

use pagefit_style::{DEFAULT_LINE_HEIGHT_RATIO, WCAG_AA_NORMAL_TEXT};
use thiserror::Error;

/// Padding allowance subtracted from container width and height (px).
pub const DEFAULT_CONTAINER_PADDING: f64 = 4.0;
/// Smallest font size any fit strategy may produce (px).
pub const DEFAULT_MIN_FONT_SIZE: f64 = 8.0;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("container padding must be finite and non-negative, got {0}")]
    InvalidPadding(f64),
    #[error("default line-height ratio must be finite and positive, got {0}")]
    InvalidLineHeightRatio(f64),
    #[error("minimum font size must be finite and positive, got {0}")]
    InvalidMinFontSize(f64),
    #[error("minimum contrast ratio must lie in [1, 21], got {0}")]
    InvalidMinContrast(f64),
}

/// Tunables shared by the metrics calculator, fit engine, and renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FitConfig {
    /// Subtracted from both container dimensions before fitting (px).
    pub container_padding: f64,
    /// Ratio used for automatic or unparseable line heights.
    pub default_line_height_ratio: f64,
    /// Floor for every font size a fit strategy returns (px).
    pub min_font_size: f64,
    /// Nominal minimum contrast handed to the contrast resolver.
    pub min_contrast: f64,
}

impl FitConfig {
    #[must_use]
    pub fn with_container_padding(mut self, padding: f64) -> Self {
        self.container_padding = padding;
        self
    }

    #[must_use]
    pub fn with_default_line_height_ratio(mut self, ratio: f64) -> Self {
        self.default_line_height_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_min_font_size(mut self, size: f64) -> Self {
        self.min_font_size = size;
        self
    }

    #[must_use]
    pub fn with_min_contrast(mut self, ratio: f64) -> Self {
        self.min_contrast = ratio;
        self
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.container_padding.is_finite() || self.container_padding < 0.0 {
            return Err(ConfigError::InvalidPadding(self.container_padding));
        }
        if !self.default_line_height_ratio.is_finite() || self.default_line_height_ratio <= 0.0 {
            return Err(ConfigError::InvalidLineHeightRatio(
                self.default_line_height_ratio,
            ));
        }
        if !self.min_font_size.is_finite() || self.min_font_size <= 0.0 {
            return Err(ConfigError::InvalidMinFontSize(self.min_font_size));
        }
        if !(1.0..=21.0).contains(&self.min_contrast) {
            return Err(ConfigError::InvalidMinContrast(self.min_contrast));
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            container_padding: DEFAULT_CONTAINER_PADDING,
            default_line_height_ratio: DEFAULT_LINE_HEIGHT_RATIO,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            min_contrast: WCAG_AA_NORMAL_TEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FitConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_padding_rejected() {
        let cfg = FitConfig::default().with_container_padding(-1.0);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidPadding(-1.0)));
    }

    #[test]
    fn nan_ratio_rejected() {
        let cfg = FitConfig::default().with_default_line_height_ratio(f64::NAN);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidLineHeightRatio(_))
        ));
    }

    #[test]
    fn zero_min_font_rejected() {
        let cfg = FitConfig::default().with_min_font_size(0.0);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidMinFontSize(0.0)));
    }

    #[test]
    fn contrast_out_of_range_rejected() {
        let cfg = FitConfig::default().with_min_contrast(30.0);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("[1, 21]"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let cfg: FitConfig = serde_json::from_str(r#"{"min_font_size": 9.0}"#).unwrap();
        assert_eq!(cfg.min_font_size, 9.0);
        assert_eq!(cfg.container_padding, DEFAULT_CONTAINER_PADDING);
    }
}
