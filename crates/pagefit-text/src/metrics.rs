//! Greedy word-wrap estimation against a fixed container.
//!
//! [`calculate`] splits text into whitespace-separated words, measures each
//! through a [`MeasureText`] provider, and packs them greedily into lines no
//! wider than the container's effective width. There is no lookahead, no
//! hyphenation, and a word wider than the line is placed alone rather than
//! split. The result is an estimate of the space the text needs, good enough
//! to pick a fit strategy; it is not a pixel-exact layout.
//!
//! # Overflow severity
//!
//! ```text
//!   height ≤ 1.2 × available   → Minor
//!   height ≤ 1.5 × available   → Moderate
//!   height >  1.5 × available  → Severe
//! ```
//!
//! A height exactly at a threshold lands in the lower bucket.

use std::fmt;

use pagefit_style::{FontDescriptor, Length, UnitConverter};

use crate::config::FitConfig;
use crate::measure::MeasureText;

/// Overfill ratio above which overflow is at least moderate.
pub const MODERATE_OVERFLOW: f64 = 1.2;
/// Overfill ratio above which overflow is severe.
pub const SEVERE_OVERFLOW: f64 = 1.5;

// =========================================================================
// ContainerBox
// =========================================================================

/// The fixed rendering region of a text frame, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerBox {
    pub width: f64,
    pub height: f64,
}

impl ContainerBox {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build from source-unit lengths.
    #[must_use]
    pub fn from_lengths(width: Length, height: Length, converter: &UnitConverter) -> Self {
        Self::new(width.to_px(converter).get(), height.to_px(converter).get())
    }

    /// Both dimensions finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl fmt::Display for ContainerBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// =========================================================================
// OverflowSeverity
// =========================================================================

/// How far estimated text height exceeds the available height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverflowSeverity {
    #[default]
    Minor,
    Moderate,
    Severe,
}

impl OverflowSeverity {
    /// Classify an estimated height against the available height.
    #[must_use]
    pub fn classify(text_height: f64, available_height: f64) -> Self {
        if text_height > available_height * SEVERE_OVERFLOW {
            Self::Severe
        } else if text_height > available_height * MODERATE_OVERFLOW {
            Self::Moderate
        } else {
            Self::Minor
        }
    }
}

impl fmt::Display for OverflowSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "minor"),
            Self::Moderate => write!(f, "moderate"),
            Self::Severe => write!(f, "severe"),
        }
    }
}

// =========================================================================
// TextMetrics
// =========================================================================

/// Estimated space needs of a block of text in a container.
///
/// Recomputed on every call; never cached.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextMetrics {
    /// Wrapped line count; at least 1 for non-empty text, 0 for empty text.
    pub estimated_lines: usize,
    pub estimated_text_height: f64,
    pub line_height_px: f64,
    pub available_height: f64,
    pub will_overflow: bool,
    /// `estimated_text_height / available_height`.
    pub overfill_ratio: f64,
    pub overflow_severity: OverflowSeverity,
    /// The wrapped lines, words joined by single spaces.
    pub actual_lines: Vec<String>,
}

impl TextMetrics {
    /// Metrics of nothing: no lines, no height, no overflow.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines that fit in the available height (at least 1).
    #[must_use]
    pub fn visible_lines(&self) -> usize {
        if self.line_height_px <= 0.0 || !self.line_height_px.is_finite() {
            return 1;
        }
        ((self.available_height / self.line_height_px).floor() as usize).max(1)
    }
}

// =========================================================================
// Calculation
// =========================================================================

/// Greedily wrap `words` into lines no wider than `max_width`.
///
/// `space_width` separates words within a line. A word wider than
/// `max_width` always gets a line of its own.
pub fn wrap_words<'a, I, M>(words: I, max_width: f64, measure: M) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    M: Fn(&str) -> f64,
{
    let space_width = measure(" ");
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0;

    for word in words {
        let word_width = measure(word);
        let candidate = if line.is_empty() {
            word_width
        } else {
            line_width + space_width + word_width
        };

        if candidate > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        } else {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            line_width = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Estimate how `text` set in `font` fills `container`.
///
/// Empty text and invalid containers short-circuit to zero metrics without
/// calling the measurement provider.
pub fn calculate<M>(
    text: &str,
    font: &FontDescriptor,
    container: &ContainerBox,
    measurer: &M,
    config: &FitConfig,
) -> TextMetrics
where
    M: MeasureText + ?Sized,
{
    if !container.is_valid() {
        tracing::trace!(container = %container, "invalid container, zero metrics");
        return TextMetrics::empty();
    }

    let line_height_px = font.line_height_px(config.default_line_height_ratio);
    let available_height = (container.height - config.container_padding).max(0.0);

    if text.is_empty() {
        return TextMetrics {
            line_height_px,
            available_height,
            ..TextMetrics::empty()
        };
    }

    let effective_width = (container.width - config.container_padding).max(0.0);
    let actual_lines = wrap_words(text.split_whitespace(), effective_width, |s| {
        measurer.measure(s, font).advance_width
    });

    let estimated_lines = actual_lines.len().max(1);
    let estimated_text_height = estimated_lines as f64 * line_height_px;
    let will_overflow = estimated_text_height > available_height;
    let overfill_ratio = if available_height > 0.0 {
        estimated_text_height / available_height
    } else if estimated_text_height > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };
    let overflow_severity = OverflowSeverity::classify(estimated_text_height, available_height);

    tracing::trace!(
        lines = estimated_lines,
        height = estimated_text_height,
        available = available_height,
        overfill_ratio,
        severity = %overflow_severity,
        "text metrics"
    );

    TextMetrics {
        estimated_lines,
        estimated_text_height,
        line_height_px,
        available_height,
        will_overflow,
        overfill_ratio,
        overflow_severity,
        actual_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{FixedAdvance, MeasureText, TextAdvance};
    use pagefit_style::LineHeight;
    use std::cell::Cell;

    /// 10px per char at size 10.
    fn font() -> FontDescriptor {
        FontDescriptor::new("sans-serif", 10.0).line_height(LineHeight::Ratio(1.0))
    }

    fn metrics(text: &str, width: f64, height: f64) -> TextMetrics {
        calculate(
            text,
            &font(),
            &ContainerBox::new(width, height),
            &FixedAdvance::new(1.0),
            &FitConfig::default(),
        )
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl MeasureText for Counting {
        fn measure(&self, text: &str, _font: &FontDescriptor) -> TextAdvance {
            self.calls.set(self.calls.get() + 1);
            TextAdvance::new(text.len() as f64)
        }
    }

    // ── Short circuits ───────────────────────────────────────────────

    #[test]
    fn empty_text_has_no_lines_and_no_calls() {
        let counting = Counting { calls: Cell::new(0) };
        let m = calculate(
            "",
            &font(),
            &ContainerBox::new(100.0, 100.0),
            &counting,
            &FitConfig::default(),
        );
        assert_eq!(m.estimated_lines, 0);
        assert_eq!(m.estimated_text_height, 0.0);
        assert!(!m.will_overflow);
        assert_eq!(counting.calls.get(), 0);
    }

    #[test]
    fn invalid_container_is_degenerate() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (10.0, f64::INFINITY)] {
            let m = metrics("some words here", w, h);
            assert_eq!(m, TextMetrics::empty(), "container {w}x{h}");
        }
    }

    // ── Greedy wrap ──────────────────────────────────────────────────

    #[test]
    fn two_words_per_line() {
        // Words are 40px, space 10px: "aaaa bbbb" is exactly 90px.
        let m = metrics("aaaa bbbb cccc", 94.0, 100.0);
        assert_eq!(m.estimated_lines, 2);
        assert_eq!(m.actual_lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn overlong_word_sits_alone() {
        let m = metrics("a verylongwordindeed b", 54.0, 100.0);
        assert_eq!(m.actual_lines, vec!["a", "verylongwordindeed", "b"]);
    }

    #[test]
    fn whitespace_runs_collapse_between_words() {
        let m = metrics("  one \t two\n\nthree  ", 1000.0, 100.0);
        assert_eq!(m.actual_lines, vec!["one two three"]);
    }

    #[test]
    fn whitespace_only_text_counts_one_line() {
        let m = metrics("   ", 100.0, 100.0);
        assert_eq!(m.estimated_lines, 1);
        assert!(m.actual_lines.is_empty());
    }

    #[test]
    fn wrap_words_directly() {
        let lines = wrap_words(["ab", "cd", "ef"], 5.0, |s| s.len() as f64);
        assert_eq!(lines, vec!["ab cd", "ef"]);
    }

    // ── Heights and overflow ─────────────────────────────────────────

    #[test]
    fn heights_use_padding() {
        let m = metrics("aaaa bbbb cccc", 94.0, 24.0);
        assert_eq!(m.line_height_px, 10.0);
        assert_eq!(m.available_height, 20.0);
        assert_eq!(m.estimated_text_height, 20.0);
        assert!(!m.will_overflow);
        assert_eq!(m.overfill_ratio, 1.0);
    }

    #[test]
    fn severity_ties_go_low() {
        assert_eq!(OverflowSeverity::classify(12.0, 10.0), OverflowSeverity::Minor);
        assert_eq!(OverflowSeverity::classify(15.0, 10.0), OverflowSeverity::Moderate);
        assert_eq!(OverflowSeverity::classify(15.01, 10.0), OverflowSeverity::Severe);
        assert_eq!(OverflowSeverity::classify(12.01, 10.0), OverflowSeverity::Moderate);
    }

    #[test]
    fn overflowing_text_reports_ratio() {
        // Five one-word lines of 10px in 24px (20px available).
        let m = metrics("aaaa bbbb cccc dddd eeee", 44.0, 24.0);
        assert_eq!(m.estimated_lines, 5);
        assert!(m.will_overflow);
        assert_eq!(m.overfill_ratio, 2.5);
        assert_eq!(m.overflow_severity, OverflowSeverity::Severe);
        assert_eq!(m.visible_lines(), 2);
    }

    #[test]
    fn tiny_container_has_infinite_overfill() {
        let m = metrics("word", 100.0, 3.0);
        assert_eq!(m.available_height, 0.0);
        assert!(m.will_overflow);
        assert!(m.overfill_ratio.is_infinite());
        assert_eq!(m.visible_lines(), 1);
    }

    #[test]
    fn absolute_line_height() {
        let font = FontDescriptor::new("serif", 10.0).line_height(LineHeight::Absolute(18.0));
        let m = calculate(
            "x",
            &font,
            &ContainerBox::new(100.0, 100.0),
            &FixedAdvance::new(1.0),
            &FitConfig::default(),
        );
        assert_eq!(m.line_height_px, 18.0);
        assert_eq!(m.estimated_text_height, 18.0);
    }

    #[test]
    fn container_from_points() {
        let c = ContainerBox::from_lengths(Length::pt(72.0), Length::pt(36.0), &UnitConverter::CSS);
        assert!((c.width - 96.0).abs() < 1e-9);
        assert!((c.height - 48.0).abs() < 1e-9);
    }
}
