//! Font descriptors and line-height specifications.
//!
//! A [`FontDescriptor`] is the immutable input to a single measurement call:
//! family, pixel size, weight, slant, and how line height is derived from the
//! size. Descriptors are cheap to clone and never mutated in place; fit
//! strategies produce new descriptors instead.

use std::fmt;

/// Line-height ratio used when nothing else is known (CSS `normal`).
pub const DEFAULT_LINE_HEIGHT_RATIO: f64 = 1.2;

// =========================================================================
// FontWeight
// =========================================================================

/// Numeric font weight (100..=900).
///
/// Displays as the bare numeric token (`"400"`, `"700"`) because the
/// presentation layer consumes weights as numeric-string tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const LIGHT: Self = Self(300);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const BLACK: Self = Self(900);

    /// Whether this weight renders as bold.
    #[must_use]
    pub const fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// FontStyle
// =========================================================================

/// Slant of a font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Italic => write!(f, "italic"),
        }
    }
}

/// Decode a desktop-publishing style name (`"Bold Italic"`, `"Semibold"`,
/// `"Roman"`) into a weight and slant.
///
/// Words are matched case-insensitively; unknown words are ignored, so an
/// unrecognized token decodes to `(NORMAL, Normal)`.
#[must_use]
pub fn decode_style_token(token: &str) -> (FontWeight, FontStyle) {
    let mut weight = FontWeight::NORMAL;
    let mut style = FontStyle::Normal;
    let lower = token.to_ascii_lowercase();

    for word in lower.split(|c: char| c.is_whitespace() || c == '-' || c == '_') {
        match word {
            "thin" | "hairline" => weight = FontWeight::THIN,
            "light" => weight = FontWeight::LIGHT,
            "regular" | "roman" | "book" | "normal" => {}
            "medium" => weight = FontWeight::MEDIUM,
            "semibold" | "demibold" | "demi" => weight = FontWeight::SEMIBOLD,
            "bold" => weight = FontWeight::BOLD,
            "black" | "heavy" => weight = FontWeight::BLACK,
            "italic" | "oblique" => style = FontStyle::Italic,
            _ => {}
        }
    }

    (weight, style)
}

// =========================================================================
// LineHeight
// =========================================================================

/// How the line height of a font is specified.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", content = "value", rename_all = "lowercase"))]
pub enum LineHeight {
    /// Multiple of the font size.
    Ratio(f64),
    /// Absolute height in pixels.
    Absolute(f64),
    /// Use the default ratio.
    #[default]
    Auto,
}

impl LineHeight {
    /// Parse a line-height token.
    ///
    /// `"18px"` is absolute, a bare number is a ratio, anything else
    /// (including `"normal"` and garbage) is [`LineHeight::Auto`].
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(px) = token.strip_suffix("px") {
            return match px.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => Self::Absolute(v),
                _ => Self::Auto,
            };
        }
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Self::Ratio(v),
            _ => Self::Auto,
        }
    }

    /// Resolve to pixels for the given font size.
    ///
    /// Non-positive or non-finite values fall back to `default_ratio`.
    #[must_use]
    pub fn to_px(self, font_size: f64, default_ratio: f64) -> f64 {
        match self {
            Self::Absolute(px) if px.is_finite() && px > 0.0 => px,
            Self::Ratio(r) if r.is_finite() && r > 0.0 => r * font_size,
            _ => default_ratio * font_size,
        }
    }

    /// Express this line height as a ratio of the font size.
    #[must_use]
    pub fn to_ratio(self, font_size: f64, default_ratio: f64) -> f64 {
        if font_size <= 0.0 || !font_size.is_finite() {
            return default_ratio;
        }
        self.to_px(font_size, default_ratio) / font_size
    }
}

impl fmt::Display for LineHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ratio(r) => write!(f, "{r}"),
            Self::Absolute(px) => write!(f, "{px}px"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

// =========================================================================
// FontDescriptor
// =========================================================================

/// Everything a measurement provider needs to know about a font.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontDescriptor {
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub line_height: LineHeight,
}

impl FontDescriptor {
    /// Create a descriptor with normal weight, upright style, auto line height.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
            line_height: LineHeight::Auto,
        }
    }

    #[must_use]
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn line_height(mut self, line_height: LineHeight) -> Self {
        self.line_height = line_height;
        self
    }

    /// Line height in pixels.
    #[must_use]
    pub fn line_height_px(&self, default_ratio: f64) -> f64 {
        self.line_height.to_px(self.size, default_ratio)
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}px/{} {}",
            self.style, self.weight, self.size, self.line_height, self.family
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Style tokens ─────────────────────────────────────────────────

    #[test]
    fn decode_bold_italic() {
        assert_eq!(
            decode_style_token("Bold Italic"),
            (FontWeight::BOLD, FontStyle::Italic)
        );
    }

    #[test]
    fn decode_semibold_and_roman() {
        assert_eq!(
            decode_style_token("Semibold"),
            (FontWeight::SEMIBOLD, FontStyle::Normal)
        );
        assert_eq!(
            decode_style_token("Roman"),
            (FontWeight::NORMAL, FontStyle::Normal)
        );
    }

    #[test]
    fn decode_unknown_is_regular() {
        assert_eq!(
            decode_style_token("Condensed Wide"),
            (FontWeight::NORMAL, FontStyle::Normal)
        );
    }

    #[test]
    fn weight_displays_numeric_token() {
        assert_eq!(FontWeight::BOLD.to_string(), "700");
        assert!(FontWeight::SEMIBOLD.is_bold());
        assert!(!FontWeight::MEDIUM.is_bold());
    }

    // ── LineHeight ───────────────────────────────────────────────────

    #[test]
    fn parse_absolute_px() {
        assert_eq!(LineHeight::parse("18px"), LineHeight::Absolute(18.0));
        assert_eq!(LineHeight::parse("18px").to_px(12.0, 1.2), 18.0);
    }

    #[test]
    fn parse_ratio() {
        assert_eq!(LineHeight::parse("1.5"), LineHeight::Ratio(1.5));
        assert_eq!(LineHeight::parse("1.5").to_px(10.0, 1.2), 15.0);
    }

    #[test]
    fn parse_garbage_defaults() {
        assert_eq!(LineHeight::parse("normal"), LineHeight::Auto);
        assert_eq!(LineHeight::parse("-3"), LineHeight::Auto);
        assert!((LineHeight::parse("abc").to_px(10.0, 1.2) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_of_absolute() {
        let r = LineHeight::Absolute(15.0).to_ratio(10.0, 1.2);
        assert!((r - 1.5).abs() < 1e-9);
        assert_eq!(LineHeight::Ratio(2.0).to_ratio(0.0, 1.2), 1.2);
    }

    #[test]
    fn descriptor_builder() {
        let font = FontDescriptor::new("Minion Pro", 14.0)
            .weight(FontWeight::BOLD)
            .style(FontStyle::Italic)
            .line_height(LineHeight::Ratio(1.5));
        assert_eq!(font.line_height_px(1.2), 21.0);
        assert_eq!(font.to_string(), "italic 700 14px/1.5 Minion Pro");
    }
}
