//! Measurement provider contract and built-in providers.
//!
//! The metrics calculator never shapes text itself. It asks a
//! [`MeasureText`] implementation for the advance width of words and of the
//! inter-word space, then estimates wrapping from those numbers. Hosts with a
//! real text surface (canvas, font rasterizer) implement the trait over it;
//! [`CellMeasurer`] and [`FixedAdvance`] cover hosts without one.
//!
//! Implementations must be reentrant if the host measures several frames in
//! parallel.

use pagefit_style::FontDescriptor;
use unicode_width::UnicodeWidthStr;

/// Result of one measurement call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextAdvance {
    /// Horizontal advance in px.
    pub advance_width: f64,
}

impl TextAdvance {
    #[must_use]
    pub const fn new(advance_width: f64) -> Self {
        Self { advance_width }
    }
}

/// Measures the advance width of a string in a given font.
pub trait MeasureText {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextAdvance;
}

impl<T: MeasureText + ?Sized> MeasureText for &T {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextAdvance {
        (**self).measure(text, font)
    }
}

impl<T: MeasureText + ?Sized> MeasureText for Box<T> {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextAdvance {
        (**self).measure(text, font)
    }
}

/// Every character advances by the same fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance per character, in em.
    pub em_per_char: f64,
}

impl FixedAdvance {
    #[must_use]
    pub const fn new(em_per_char: f64) -> Self {
        Self { em_per_char }
    }
}

impl Default for FixedAdvance {
    /// Half an em, a rough average for proportional Latin faces.
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl MeasureText for FixedAdvance {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextAdvance {
        let chars = text.chars().count() as f64;
        TextAdvance::new(chars * self.em_per_char * font.size)
    }
}

/// Advance proportional to Unicode display width (CJK counts double).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasurer {
    /// Width of one display cell, in em.
    pub cell_em: f64,
}

impl CellMeasurer {
    #[must_use]
    pub const fn new(cell_em: f64) -> Self {
        Self { cell_em }
    }
}

impl Default for CellMeasurer {
    /// Typical monospace advance.
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl MeasureText for CellMeasurer {
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextAdvance {
        let cells = text.width() as f64;
        TextAdvance::new(cells * self.cell_em * font.size)
    }
}

/// Adapts a closure `(text, font) -> advance px` into a provider.
#[derive(Clone, Copy)]
pub struct FnMeasurer<F>(pub F);

impl<F> MeasureText for FnMeasurer<F>
where
    F: Fn(&str, &FontDescriptor) -> f64,
{
    fn measure(&self, text: &str, font: &FontDescriptor) -> TextAdvance {
        TextAdvance::new((self.0)(text, font))
    }
}

impl<F> std::fmt::Debug for FnMeasurer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnMeasurer(..)")
    }
}
