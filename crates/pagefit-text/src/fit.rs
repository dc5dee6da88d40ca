//! Fit strategies: reconciling overflowing text with a fixed box.
//!
//! [`fit`] is a pure function of a base style, the text metrics, and a
//! [`FitStrategy`]. Text that does not overflow is returned untouched under
//! every strategy; only overflowing text reaches a strategy branch.
//!
//! # Strategies
//!
//! | Strategy         | Effect on overflow                                         |
//! |------------------|------------------------------------------------------------|
//! | `AutoScale`      | Scale font and line height by severity-capped factor       |
//! | `Truncate`       | Clamp to the lines that fit, with ellipsis                 |
//! | `CompressLines`  | Tighten line height, then font size, floor 0.8×            |
//! | `PreciseFit`     | Four-tier policy keyed on the needed compression           |
//! | `AllowOverflow`  | No numeric change, overflow visible                        |
//!
//! # Precise fit tiers
//!
//! With `c = available_height / estimated_text_height`:
//!
//! ```text
//!   c ≥ 0.95          Minimal        overflow hidden only
//!   0.85 < c < 0.95   LineHeightOnly line × max(0.9, 1.05c)
//!   0.7  < c ≤ 0.85   Dual           font × max(0.9, √c), line × max(0.85, c/font)
//!          c ≤ 0.7    MaximalClamp   font × 0.85, line × 0.8, max-height clip
//! ```
//!
//! No branch returns a font size below [`FitConfig::min_font_size`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use pagefit_style::FontDescriptor;

use crate::config::FitConfig;
use crate::metrics::{OverflowSeverity, TextMetrics};

/// Line-height ratio floor for auto-scaling.
const AUTO_SCALE_MIN_LINE_HEIGHT: f64 = 0.9;
/// Floor applied to both reductions in line compression.
const COMPRESS_FLOOR: f64 = 0.8;

// =========================================================================
// FitStrategy
// =========================================================================

/// Named policy for reconciling overflowing text with its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FitStrategy {
    AutoScale,
    Truncate,
    AllowOverflow,
    #[default]
    PreciseFit,
    CompressLines,
}

impl FitStrategy {
    pub const ALL: [FitStrategy; 5] = [
        FitStrategy::AutoScale,
        FitStrategy::Truncate,
        FitStrategy::AllowOverflow,
        FitStrategy::PreciseFit,
        FitStrategy::CompressLines,
    ];

    /// Parse a strategy token; unknown tokens mean `AllowOverflow`.
    ///
    /// Matching ignores case and treats `-`, `_`, and spaces alike, so
    /// `"AUTO_SCALE"`, `"auto-scale"`, and `"Auto Scale"` are equal.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let normalized: String = token
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "autoscale" => Self::AutoScale,
            "truncate" => Self::Truncate,
            "precisefit" => Self::PreciseFit,
            "compresslines" => Self::CompressLines,
            _ => Self::AllowOverflow,
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::AutoScale => "auto-scale",
            Self::Truncate => "truncate",
            Self::AllowOverflow => "allow-overflow",
            Self::PreciseFit => "precise-fit",
            Self::CompressLines => "compress-lines",
        }
    }
}

impl FromStr for FitStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl fmt::Display for FitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// =========================================================================
// FitStyle
// =========================================================================

/// Overflow policy of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

/// Marker drawn where clamped text is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextOverflow {
    #[default]
    Clip,
    Ellipsis,
}

/// The frame-level style fields a fit strategy may change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitStyle {
    /// Font size in px.
    pub font_size: f64,
    /// Line height as a ratio of the font size.
    pub line_height: f64,
    pub overflow: Overflow,
    /// Maximum number of rendered lines.
    pub line_clamp: Option<usize>,
    pub text_overflow: TextOverflow,
    /// Hard height bound in px.
    pub max_height: Option<f64>,
}

impl FitStyle {
    #[must_use]
    pub fn new(font_size: f64, line_height: f64) -> Self {
        Self {
            font_size,
            line_height,
            overflow: Overflow::Visible,
            line_clamp: None,
            text_overflow: TextOverflow::Clip,
            max_height: None,
        }
    }

    /// Base style of a frame set in `font`.
    #[must_use]
    pub fn from_font(font: &FontDescriptor, config: &FitConfig) -> Self {
        Self::new(
            font.size,
            font.line_height.to_ratio(font.size, config.default_line_height_ratio),
        )
    }

    #[must_use]
    pub fn line_height_px(&self) -> f64 {
        self.font_size * self.line_height
    }
}

// =========================================================================
// Adjustment
// =========================================================================

/// Branch taken by the precise-fit strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PreciseTier {
    Minimal,
    LineHeightOnly,
    Dual,
    MaximalClamp,
}

impl PreciseTier {
    /// Select the tier for a compression ratio (`available / needed`).
    #[must_use]
    pub fn select(compression_needed: f64) -> Self {
        if compression_needed >= 0.95 {
            Self::Minimal
        } else if compression_needed > 0.85 {
            Self::LineHeightOnly
        } else if compression_needed > 0.7 {
            Self::Dual
        } else {
            Self::MaximalClamp
        }
    }
}

impl fmt::Display for PreciseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::LineHeightOnly => write!(f, "line-height-only"),
            Self::Dual => write!(f, "dual"),
            Self::MaximalClamp => write!(f, "maximal-clamp"),
        }
    }
}

/// What a strategy changed and why.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Adjustment {
    AutoScale {
        severity: OverflowSeverity,
        scale_factor: f64,
        original_font_size: f64,
        font_size: f64,
        original_line_height: f64,
        line_height: f64,
    },
    Truncate {
        visible_lines: usize,
        hidden_lines: usize,
    },
    CompressLines {
        compression_ratio: f64,
        /// `None` when only line height was compressed.
        font_reduction: Option<f64>,
        line_reduction: f64,
    },
    PreciseFit {
        tier: PreciseTier,
        compression_needed: f64,
        font_scale: f64,
        line_scale: f64,
        max_height: Option<f64>,
    },
    AllowOverflow,
}

impl Adjustment {
    /// Short tag naming the adjustment kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AutoScale { .. } => "auto-scale",
            Self::Truncate { .. } => "truncate",
            Self::CompressLines { .. } => "compress-lines",
            Self::PreciseFit { .. } => "precise-fit",
            Self::AllowOverflow => "allow-overflow",
        }
    }
}

/// Adjusted style plus the descriptor explaining it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitOutcome {
    pub style: FitStyle,
    /// `None` when the text fit and nothing changed.
    pub adjustment: Option<Adjustment>,
}

impl FitOutcome {
    #[must_use]
    pub const fn was_adjusted(&self) -> bool {
        self.adjustment.is_some()
    }

    /// Font size to force on rendered runs, if the strategy changed it.
    #[must_use]
    pub fn font_size_override(&self, base: &FitStyle) -> Option<f64> {
        (self.style.font_size != base.font_size).then_some(self.style.font_size)
    }
}

// =========================================================================
// Strategy branches
// =========================================================================

fn auto_scale(base: &FitStyle, metrics: &TextMetrics, config: &FitConfig) -> FitOutcome {
    let cap: f64 = match metrics.overflow_severity {
        OverflowSeverity::Severe => 0.7,
        OverflowSeverity::Moderate => 0.8,
        OverflowSeverity::Minor => 0.9,
    };
    let scale_factor = cap.max(1.0 / metrics.overfill_ratio);
    let font_size = (base.font_size * scale_factor).max(config.min_font_size);
    let line_height = (base.line_height * scale_factor).max(AUTO_SCALE_MIN_LINE_HEIGHT);

    FitOutcome {
        style: FitStyle {
            font_size,
            line_height,
            overflow: Overflow::Hidden,
            ..*base
        },
        adjustment: Some(Adjustment::AutoScale {
            severity: metrics.overflow_severity,
            scale_factor,
            original_font_size: base.font_size,
            font_size,
            original_line_height: base.line_height,
            line_height,
        }),
    }
}

fn truncate(base: &FitStyle, metrics: &TextMetrics) -> FitOutcome {
    let visible_lines = metrics.visible_lines();
    FitOutcome {
        style: FitStyle {
            overflow: Overflow::Hidden,
            line_clamp: Some(visible_lines),
            text_overflow: TextOverflow::Ellipsis,
            ..*base
        },
        adjustment: Some(Adjustment::Truncate {
            visible_lines,
            hidden_lines: metrics.estimated_lines.saturating_sub(visible_lines),
        }),
    }
}

fn compress_lines(base: &FitStyle, metrics: &TextMetrics, config: &FitConfig) -> FitOutcome {
    let compression_ratio = metrics.available_height / metrics.estimated_text_height;
    let line_reduction = compression_ratio.max(COMPRESS_FLOOR);

    let font_reduction = (compression_ratio <= COMPRESS_FLOOR).then_some(line_reduction);
    let font_size = match font_reduction {
        Some(reduction) => (base.font_size * reduction).max(config.min_font_size),
        None => base.font_size,
    };

    FitOutcome {
        style: FitStyle {
            font_size,
            line_height: base.line_height * line_reduction,
            overflow: Overflow::Hidden,
            ..*base
        },
        adjustment: Some(Adjustment::CompressLines {
            compression_ratio,
            font_reduction,
            line_reduction,
        }),
    }
}

fn precise_fit(base: &FitStyle, metrics: &TextMetrics, config: &FitConfig) -> FitOutcome {
    let compression_needed = metrics.available_height / metrics.estimated_text_height;
    let tier = PreciseTier::select(compression_needed);

    let (font_scale, line_scale, max_height) = match tier {
        PreciseTier::Minimal => (1.0, 1.0, None),
        PreciseTier::LineHeightOnly => (1.0, (compression_needed * 1.05).max(0.9), None),
        PreciseTier::Dual => {
            let font_scale = compression_needed.sqrt().max(0.9);
            (font_scale, (compression_needed / font_scale).max(0.85), None)
        }
        PreciseTier::MaximalClamp => (0.85, 0.8, Some(metrics.available_height)),
    };

    let font_size = if font_scale < 1.0 {
        (base.font_size * font_scale).max(config.min_font_size)
    } else {
        base.font_size
    };

    FitOutcome {
        style: FitStyle {
            font_size,
            line_height: base.line_height * line_scale,
            overflow: Overflow::Hidden,
            max_height: max_height.or(base.max_height),
            ..*base
        },
        adjustment: Some(Adjustment::PreciseFit {
            tier,
            compression_needed,
            font_scale,
            line_scale,
            max_height,
        }),
    }
}

fn allow_overflow(base: &FitStyle) -> FitOutcome {
    FitOutcome {
        style: FitStyle {
            overflow: Overflow::Visible,
            ..*base
        },
        adjustment: Some(Adjustment::AllowOverflow),
    }
}

/// Adjust `base` so text with `metrics` fits its container under `strategy`.
///
/// Non-overflowing text is returned unchanged with no adjustment, whatever
/// the strategy.
#[must_use]
pub fn fit(
    base: &FitStyle,
    metrics: &TextMetrics,
    strategy: FitStrategy,
    config: &FitConfig,
) -> FitOutcome {
    if !metrics.will_overflow {
        return FitOutcome {
            style: *base,
            adjustment: None,
        };
    }

    let outcome = match strategy {
        FitStrategy::AutoScale => auto_scale(base, metrics, config),
        FitStrategy::Truncate => truncate(base, metrics),
        FitStrategy::CompressLines => compress_lines(base, metrics, config),
        FitStrategy::PreciseFit => precise_fit(base, metrics, config),
        FitStrategy::AllowOverflow => allow_overflow(base),
    };

    tracing::debug!(
        strategy = %strategy,
        severity = %metrics.overflow_severity,
        overfill_ratio = metrics.overfill_ratio,
        font_size = outcome.style.font_size,
        line_height = outcome.style.line_height,
        "fit strategy applied"
    );
    outcome
}
