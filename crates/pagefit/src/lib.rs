#![forbid(unsafe_code)]

//! pagefit public facade crate.
//!
//! Re-exports the common types of `pagefit-style` and `pagefit-text` and
//! adds [`FramePlanner`], which chains text metrics, fitting, and run
//! rendering for one text frame.
//!
//! ```
//! use pagefit::prelude::*;
//!
//! let planner = FramePlanner::new(FixedAdvance::default(), FitConfig::default())?;
//! let story = Story::from_runs(
//!     vec![Run::text("Hello"), Run::text("World")],
//!     StoryDefaults::default(),
//! );
//! let frame = TextFrame::new(story, ContainerBox::new(200.0, 40.0));
//! let colors = SwatchTable::new();
//! let plan = planner.plan(&frame, &colors);
//! assert_eq!(plan.segments.plain_text(), "Hello World");
//! # Ok::<(), pagefit::Error>(())
//! ```

pub mod planner;

pub use planner::{FramePlan, FramePlanner, TextFrame};

// --- Style re-exports ------------------------------------------------------

pub use pagefit_style::{
    BreakKind, Color, ColorResolver, FontDescriptor, FontStyle, FontWeight, Leading, Length,
    LengthUnit, LineHeight, Px, ResolvedStyle, Rgb, Run, RunFormatting, Story, StoryDefaults,
    SwatchTable, TextAlign, UnitConverter, contrast_ratio, ensure_contrast, resolve_run_style,
};

// --- Text re-exports -------------------------------------------------------

pub use pagefit_text::{
    Adjustment, CellMeasurer, ConfigError, ContainerBox, FitConfig, FitOutcome, FitStrategy,
    FitStyle, FixedAdvance, FnMeasurer, MeasureText, OverflowSeverity, PreciseTier,
    RenderContext, RenderPlan, RenderSegment, TextAdvance, TextMetrics, calculate, fit,
    needs_space_between, render,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for pagefit hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fit configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Standard result type for pagefit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Color, ContainerBox, Error, FitConfig, FitStrategy, FixedAdvance, FramePlan,
        FramePlanner, MeasureText, RenderSegment, Result, Run, RunFormatting, Story,
        StoryDefaults, SwatchTable, TextFrame,
    };

    pub use crate::{style, text};
}

pub use pagefit_style as style;
pub use pagefit_text as text;
