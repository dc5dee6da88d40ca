//! Physical units and explicit pixel conversion.
//!
//! Converted values are wrapped in [`Px`], which has no conversion method of
//! its own: a length can only reach pixels once, through a
//! [`UnitConverter`] owned and passed in by the caller.

use std::fmt;

/// Units used by page-description sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LengthUnit {
    #[default]
    Px,
    /// PostScript point, 1/72 in.
    Pt,
    /// Pica, 12 pt.
    Pc,
    In,
    Mm,
    Cm,
}

impl LengthUnit {
    /// Size of one unit in inches, or `None` for pixels (device-dependent).
    const fn inches(self) -> Option<f64> {
        match self {
            Self::Px => None,
            Self::Pt => Some(1.0 / 72.0),
            Self::Pc => Some(12.0 / 72.0),
            Self::In => Some(1.0),
            Self::Mm => Some(1.0 / 25.4),
            Self::Cm => Some(1.0 / 2.54),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Mm => "mm",
            Self::Cm => "cm",
        };
        f.write_str(s)
    }
}

/// A length in some source unit, not yet converted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    #[must_use]
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    #[must_use]
    pub const fn pt(value: f64) -> Self {
        Self::new(value, LengthUnit::Pt)
    }

    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// Convert to pixels with the given converter.
    #[must_use]
    pub fn to_px(self, converter: &UnitConverter) -> Px {
        converter.to_pixels(self.value, self.unit)
    }
}

/// A value already in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(pub f64);

impl Px {
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Converts physical lengths to pixels at a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitConverter {
    /// Pixels per inch.
    pub dpi: f64,
}

impl UnitConverter {
    /// CSS reference resolution.
    pub const CSS: Self = Self { dpi: 96.0 };

    #[must_use]
    pub const fn new(dpi: f64) -> Self {
        Self { dpi }
    }

    #[must_use]
    pub fn to_pixels(&self, value: f64, unit: LengthUnit) -> Px {
        match unit.inches() {
            None => Px(value),
            Some(inches) => Px(value * inches * self.dpi),
        }
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::CSS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_at_css_resolution() {
        let px = Length::pt(72.0).to_px(&UnitConverter::CSS);
        assert!((px.get() - 96.0).abs() < 1e-9);
    }

    #[test]
    fn pixels_pass_through() {
        assert_eq!(Length::px(13.5).to_px(&UnitConverter::new(300.0)), Px(13.5));
    }

    #[test]
    fn metric_units() {
        let conv = UnitConverter::new(254.0);
        assert!((conv.to_pixels(10.0, LengthUnit::Mm).get() - 100.0).abs() < 1e-9);
        assert!((conv.to_pixels(1.0, LengthUnit::Cm).get() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pica_is_twelve_points() {
        let conv = UnitConverter::CSS;
        let pica = conv.to_pixels(1.0, LengthUnit::Pc).get();
        let points = conv.to_pixels(12.0, LengthUnit::Pt).get();
        assert!((pica - points).abs() < 1e-9);
    }
}
