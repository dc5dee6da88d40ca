#![forbid(unsafe_code)]

//! Style vocabulary for pagefit.
//!
//! # Role in pagefit
//! `pagefit-style` holds the data model shared by measurement, fitting, and
//! rendering: font descriptors, colors and contrast, formatted runs with
//! their story defaults, and the per-field style resolution that turns a
//! run's sparse formatting into a concrete [`ResolvedStyle`].
//!
//! # This crate provides
//! - [`FontDescriptor`], [`FontWeight`], [`FontStyle`], [`LineHeight`].
//! - [`Color`], [`Rgb`], WCAG luminance/contrast and [`ensure_contrast`].
//! - [`ColorResolver`] with the [`SwatchTable`] implementation.
//! - [`Run`], [`RunFormatting`], [`StoryDefaults`], [`Story`].
//! - [`resolve_run_style`] for the run → story → constant fallback chain.
//! - [`UnitConverter`] for explicit, one-shot conversion to pixels.

/// Colors, color references, and contrast utilities.
pub mod color;
/// Font descriptors and line-height specifications.
pub mod font;
/// Run style resolution.
pub mod resolve;
/// Formatted runs and story defaults.
pub mod run;
/// Physical units and pixel conversion.
pub mod units;

pub use color::{
    Color, ColorResolver, LENIENT_CONTRAST_THRESHOLD, Rgb, SwatchTable, WCAG_AA_NORMAL_TEXT,
    contrast_ratio, ensure_contrast, relative_luminance,
};
pub use font::{
    DEFAULT_LINE_HEIGHT_RATIO, FontDescriptor, FontStyle, FontWeight, LineHeight,
    decode_style_token,
};
pub use resolve::{ResolvedLineHeight, ResolvedStyle, resolve_run_style};
pub use run::{
    BreakKind, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Leading, Run, RunFormatting, Story,
    StoryDefaults, TextAlign,
};
pub use units::{Length, LengthUnit, Px, UnitConverter};
