//! Colors, color references, and WCAG contrast utilities.
//!
//! # Contrast adjustment
//!
//! [`ensure_contrast`] keeps source colors whenever they are readable enough
//! against their background (contrast ≥ [`LENIENT_CONTRAST_THRESHOLD`]) and
//! only then swaps in pure black or white. The `min_ratio` argument is
//! recorded for diagnostics but does not gate the check.

use std::collections::HashMap;
use std::fmt;

/// Contrast ratio below which text color is replaced.
pub const LENIENT_CONTRAST_THRESHOLD: f64 = 3.0;

/// Nominal WCAG AA ratio for normal text; the default `min_ratio`.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;

// =========================================================================
// Rgb / Color
// =========================================================================

/// 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut it = digits.chars().filter_map(|c| c.to_digit(16));
                let (r, g, b) = (it.next()?, it.next()?, it.next()?);
                // 0xF -> 0xFF
                Some(Self::new((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A paint color: opaque sRGB or fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    Rgb(Rgb),
    Transparent,
}

impl Color {
    pub const BLACK: Self = Self::Rgb(Rgb::BLACK);
    pub const WHITE: Self = Self::Rgb(Rgb::WHITE);

    /// Parse a CSS-ish color literal: hex, `black`, `white`, `transparent`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "transparent" => Some(Self::Transparent),
            _ => Rgb::from_hex(input).map(Self::Rgb),
        }
    }

    #[must_use]
    pub const fn rgb(self) -> Option<Rgb> {
        match self {
            Self::Rgb(rgb) => Some(rgb),
            Self::Transparent => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(rgb) => write!(f, "{rgb}"),
            Self::Transparent => write!(f, "transparent"),
        }
    }
}

// =========================================================================
// Luminance and contrast
// =========================================================================

fn channel_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * channel_to_linear(rgb.r)
        + 0.7152 * channel_to_linear(rgb.g)
        + 0.0722 * channel_to_linear(rgb.b)
}

/// WCAG contrast ratio in `[1, 21]`, symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (light, dark) = if la >= lb { (la, lb) } else { (lb, la) };
    (light + 0.05) / (dark + 0.05)
}

/// Return a text color that stays readable on `background`.
///
/// The original color is kept when the background is transparent or pure
/// white, when the text itself is transparent, or when the pair already
/// reaches [`LENIENT_CONTRAST_THRESHOLD`]. Otherwise the text becomes black
/// on light backgrounds (luminance > 0.5) and white on dark ones.
#[must_use]
pub fn ensure_contrast(text: Color, background: Color, min_ratio: f64) -> Color {
    let Color::Rgb(bg) = background else {
        return text;
    };
    if bg == Rgb::WHITE {
        return text;
    }
    let Color::Rgb(fg) = text else {
        return text;
    };

    let ratio = contrast_ratio(fg, bg);
    if ratio >= LENIENT_CONTRAST_THRESHOLD {
        return text;
    }

    let bg_luminance = relative_luminance(bg);
    let replacement = if bg_luminance > 0.5 {
        Color::BLACK
    } else {
        Color::WHITE
    };
    tracing::debug!(
        text = %fg,
        background = %bg,
        ratio,
        min_ratio,
        replacement = %replacement,
        "low-contrast text color replaced"
    );
    replacement
}

// =========================================================================
// Color references
// =========================================================================

/// Resolves document color references (swatch names, hex literals) to colors.
///
/// Implementations carry whatever document context they need.
pub trait ColorResolver {
    /// Resolve a reference, or `None` if it is unknown.
    fn resolve_color(&self, color_ref: &str) -> Option<Color>;

    /// Resolve a reference, falling back to black so text stays visible.
    fn resolve_or_black(&self, color_ref: &str) -> Color {
        self.resolve_color(color_ref).unwrap_or(Color::BLACK)
    }
}

/// Named swatches of one document plus the well-known sentinel references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwatchTable {
    swatches: HashMap<String, Color>,
}

const SWATCH_PREFIX: &str = "Color/";

impl SwatchTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named swatch.
    #[must_use]
    pub fn with_swatch(mut self, name: impl Into<String>, color: impl Into<Color>) -> Self {
        self.swatches.insert(name.into(), color.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, color: impl Into<Color>) {
        self.swatches.insert(name.into(), color.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

impl ColorResolver for SwatchTable {
    fn resolve_color(&self, color_ref: &str) -> Option<Color> {
        let color_ref = color_ref.trim();
        if let Some(color) = self.swatches.get(color_ref) {
            return Some(*color);
        }
        let bare = color_ref.strip_prefix(SWATCH_PREFIX).unwrap_or(color_ref);
        if let Some(color) = self.swatches.get(bare) {
            return Some(*color);
        }
        match bare {
            "Black" | "Registration" => Some(Color::BLACK),
            "Paper" => Some(Color::WHITE),
            "None" | "Swatch/None" => Some(Color::Transparent),
            _ => Color::parse(bare),
        }
    }
}
