//! Frame planning: metrics, fitting, and rendering for one text frame.
//!
//! A [`FramePlanner`] owns the measurement provider and a validated
//! [`FitConfig`]. [`FramePlanner::plan`] runs the three stages in order:
//!
//! 1. resolve the story's default style into a [`FontDescriptor`] and
//!    estimate wrapping of the rendered text with [`calculate`], so the
//!    spaces synthesized between runs are measured too;
//! 2. pick a style adjustment with [`fit`] for the frame's strategy;
//! 3. build the [`RenderPlan`], forcing the fitted font size onto every run
//!    when the fit changed it.
//!
//! Each call is independent. Planning several frames in parallel is safe as
//! long as the measurer is.

use pagefit_style::{
    Color, ColorResolver, FontDescriptor, RunFormatting, Story, resolve_run_style,
};
use pagefit_text::{
    ConfigError, ContainerBox, FitConfig, FitOutcome, FitStrategy, FitStyle, MeasureText,
    RenderContext, RenderPlan, TextMetrics, calculate, fit, render,
};

/// A story placed in a fixed box, with the policy for making it fit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub story: Story,
    pub container: ContainerBox,
    pub strategy: FitStrategy,
    /// Background the frame is painted on.
    pub background: Color,
}

impl TextFrame {
    /// Frame with the default strategy on a transparent background.
    #[must_use]
    pub fn new(story: Story, container: ContainerBox) -> Self {
        Self {
            story,
            container,
            strategy: FitStrategy::default(),
            background: Color::Transparent,
        }
    }

    #[must_use]
    pub fn strategy(mut self, strategy: FitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FramePlan<'a> {
    /// Font the metrics were computed with.
    pub font: FontDescriptor,
    pub metrics: TextMetrics,
    /// Frame style before fitting.
    pub base: FitStyle,
    pub fit: FitOutcome,
    pub segments: RenderPlan<'a>,
}

impl FramePlan<'_> {
    /// Font size forced onto rendered runs, if fitting changed it.
    #[must_use]
    pub fn font_size_override(&self) -> Option<f64> {
        self.fit.font_size_override(&self.base)
    }
}

/// Plans text frames against one measurement provider.
#[derive(Debug, Clone)]
pub struct FramePlanner<M> {
    measurer: M,
    config: FitConfig,
}

impl<M: MeasureText> FramePlanner<M> {
    /// Create a planner, rejecting an invalid configuration.
    pub fn new(measurer: M, config: FitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { measurer, config })
    }

    /// Planner with the default configuration.
    #[must_use]
    pub fn with_default_config(measurer: M) -> Self {
        Self {
            measurer,
            config: FitConfig::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &FitConfig {
        &self.config
    }

    #[must_use]
    pub const fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Font the frame's text is measured in: the story defaults resolved
    /// through the same chain runs use.
    #[must_use]
    pub fn frame_font(&self, story: &Story, colors: &dyn ColorResolver) -> FontDescriptor {
        resolve_run_style(&RunFormatting::default(), &story.defaults, colors).font()
    }

    /// Plan `frame`, resolving color references through `colors`.
    #[must_use]
    pub fn plan<'a>(&self, frame: &'a TextFrame, colors: &'a dyn ColorResolver) -> FramePlan<'a> {
        let font = self.frame_font(&frame.story, colors);
        let ctx = RenderContext::new(colors)
            .background(frame.background)
            .min_contrast(self.config.min_contrast);

        let laid_out = render(&frame.story, None, ctx).plain_text();
        let metrics = calculate(
            &laid_out,
            &font,
            &frame.container,
            &self.measurer,
            &self.config,
        );
        let base = FitStyle::from_font(&font, &self.config);
        let outcome = fit(&base, &metrics, frame.strategy, &self.config);
        let font_size_override = outcome.font_size_override(&base);

        let segments = render(&frame.story, font_size_override, ctx);

        tracing::debug!(
            strategy = %frame.strategy,
            lines = metrics.estimated_lines,
            overflow = metrics.will_overflow,
            adjustment = outcome.adjustment.as_ref().map_or("none", |a| a.kind()),
            font_size_override = ?font_size_override,
            "frame planned"
        );

        FramePlan {
            font,
            metrics,
            base,
            fit: outcome,
            segments,
        }
    }
}
