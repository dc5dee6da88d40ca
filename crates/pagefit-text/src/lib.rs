#![forbid(unsafe_code)]

//! Text fitting for pagefit.
//!
//! # Role in pagefit
//! `pagefit-text` decides how a story fits a fixed box: it estimates wrapped
//! line counts against a pluggable measurer, classifies overflow, picks a
//! style adjustment for the requested strategy, and turns formatted runs
//! into an ordered stream of render segments.
//!
//! # Primary responsibilities
//! - **Measurement**: [`MeasureText`] and the built-in measurers.
//! - **Metrics**: [`calculate`] with greedy word wrap ([`wrap_words`]).
//! - **Fitting**: [`fit`] for the five [`FitStrategy`] variants.
//! - **Spacing**: [`needs_space_between`] for inter-run space synthesis.
//! - **Rendering**: [`render`] producing a restartable [`RenderPlan`].
//!
//! # How it fits in the system
//! Styles, runs and colors come from `pagefit-style`. The `pagefit` facade
//! chains metrics, fitting and rendering into one frame plan.

/// Fit configuration and validation.
pub mod config;
/// Fit strategies and style adjustments.
pub mod fit;
/// Text measurement seam.
pub mod measure;
/// Wrapped-text metrics and overflow classification.
pub mod metrics;
/// Formatted run rendering.
pub mod render;
/// Inter-run space synthesis.
pub mod spacing;

pub use config::{ConfigError, DEFAULT_CONTAINER_PADDING, DEFAULT_MIN_FONT_SIZE, FitConfig};
pub use fit::{
    Adjustment, FitOutcome, FitStrategy, FitStyle, Overflow, PreciseTier, TextOverflow, fit,
};
pub use measure::{CellMeasurer, FixedAdvance, FnMeasurer, MeasureText, TextAdvance};
pub use metrics::{
    ContainerBox, MODERATE_OVERFLOW, OverflowSeverity, SEVERE_OVERFLOW, TextMetrics, calculate,
    wrap_words,
};
pub use render::{RenderContext, RenderPlan, RenderSegment, Segments, render};
pub use spacing::{FRAGMENT_MAX_CHARS, is_split_word, needs_space_between};
