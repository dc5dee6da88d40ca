//! Run style resolution.
//!
//! Every field of a [`ResolvedStyle`] is looked up independently along the
//! same chain: the run's own formatting, then the story defaults, then a
//! hardcoded constant. A run that sets only its size still inherits family
//! and color from the story; there is no record-level override.
//!
//! Optional box-model fields (indents, paragraph spacing, baseline shift,
//! horizontal scale) are only present in the output when the source sets a
//! non-neutral value, so consumers can treat `None` as "emit nothing".

use crate::color::{Color, ColorResolver};
use crate::font::{FontDescriptor, FontStyle, FontWeight, LineHeight, decode_style_token};
use crate::run::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Leading, RunFormatting, StoryDefaults, TextAlign,
};

/// Bounds applied to line-height ratios derived from fixed leading.
pub const LEADING_RATIO_MIN: f64 = 1.1;
pub const LEADING_RATIO_MAX: f64 = 2.5;

/// Line height of a resolved run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResolvedLineHeight {
    /// Take the line height of the enclosing frame.
    #[default]
    Inherit,
    /// Multiple of the run's font size.
    Ratio(f64),
}

/// Concrete style of one run, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedStyle {
    pub font_family: String,
    /// Size in px.
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Color,
    pub text_align: TextAlign,
    pub line_height: ResolvedLineHeight,
    /// Letter spacing in px, derived from tracking.
    pub letter_spacing: Option<f64>,
    pub left_indent: Option<f64>,
    pub right_indent: Option<f64>,
    pub first_line_indent: Option<f64>,
    pub space_before: Option<f64>,
    pub space_after: Option<f64>,
    pub baseline_shift: Option<f64>,
    /// Horizontal scale in percent.
    pub horizontal_scale: Option<f64>,
}

impl ResolvedStyle {
    /// Style of text that carries no formatting at all.
    #[must_use]
    pub fn unstyled() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            color: Color::BLACK,
            text_align: TextAlign::Left,
            line_height: ResolvedLineHeight::Inherit,
            letter_spacing: None,
            left_indent: None,
            right_indent: None,
            first_line_indent: None,
            space_before: None,
            space_after: None,
            baseline_shift: None,
            horizontal_scale: None,
        }
    }

    /// Font descriptor for measuring this style.
    #[must_use]
    pub fn font(&self) -> FontDescriptor {
        let line_height = match self.line_height {
            ResolvedLineHeight::Inherit => LineHeight::Auto,
            ResolvedLineHeight::Ratio(r) => LineHeight::Ratio(r),
        };
        FontDescriptor::new(self.font_family.clone(), self.font_size)
            .weight(self.font_weight)
            .style(self.font_style)
            .line_height(line_height)
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self::unstyled()
    }
}

fn positive(v: &f64) -> bool {
    v.is_finite() && *v > 0.0
}

fn non_blank(s: &&str) -> bool {
    !s.trim().is_empty()
}

fn non_zero(v: f64) -> Option<f64> {
    (v.is_finite() && v != 0.0).then_some(v)
}

/// Line height for a run of the given size.
fn resolve_line_height(
    run: &RunFormatting,
    defaults: &StoryDefaults,
    font_size: f64,
) -> ResolvedLineHeight {
    if let Some(ratio) = run.effective_line_height {
        return ResolvedLineHeight::Ratio(ratio);
    }
    match run.leading.or(defaults.leading) {
        Some(Leading::Fixed(px)) if px.is_finite() && px > 0.0 => ResolvedLineHeight::Ratio(
            (px / font_size).clamp(LEADING_RATIO_MIN, LEADING_RATIO_MAX),
        ),
        _ => ResolvedLineHeight::Inherit,
    }
}

/// Resolve one run's formatting into a concrete style.
///
/// Color references go through `colors`; an unresolvable reference becomes
/// black.
#[must_use]
pub fn resolve_run_style(
    run: &RunFormatting,
    defaults: &StoryDefaults,
    colors: &dyn ColorResolver,
) -> ResolvedStyle {
    let font_family = run
        .font_family
        .as_deref()
        .filter(non_blank)
        .or(defaults.font_family.as_deref().filter(non_blank))
        .unwrap_or(DEFAULT_FONT_FAMILY)
        .to_string();

    let font_size = run
        .font_size
        .filter(positive)
        .or(defaults.font_size.filter(positive))
        .unwrap_or(DEFAULT_FONT_SIZE);

    let (font_weight, font_style) = run
        .font_style
        .as_deref()
        .or(defaults.font_style.as_deref())
        .map(decode_style_token)
        .unwrap_or((FontWeight::NORMAL, FontStyle::Normal));

    let color = run
        .fill_color
        .as_deref()
        .or(defaults.fill_color.as_deref())
        .map_or(Color::BLACK, |r| colors.resolve_or_black(r));

    let text_align = run
        .alignment
        .or(defaults.alignment)
        .unwrap_or_default();

    let letter_spacing = run
        .tracking
        .or(defaults.tracking)
        .and_then(|t| non_zero(t / 1000.0 * font_size));

    ResolvedStyle {
        font_family,
        font_size,
        font_weight,
        font_style,
        color,
        text_align,
        line_height: resolve_line_height(run, defaults, font_size),
        letter_spacing,
        left_indent: run.left_indent.and_then(non_zero),
        right_indent: run.right_indent.and_then(non_zero),
        first_line_indent: run.first_line_indent.and_then(non_zero),
        space_before: run.space_before.and_then(non_zero),
        space_after: run.space_after.and_then(non_zero),
        baseline_shift: run.baseline_shift.and_then(non_zero),
        horizontal_scale: run
            .horizontal_scale
            .filter(|s| s.is_finite() && (*s - 100.0).abs() > f64::EPSILON),
    }
}
