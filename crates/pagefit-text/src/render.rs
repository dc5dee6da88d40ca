//! Formatted run rendering.
//!
//! [`render`] turns a [`Story`] into a [`RenderPlan`]: an ordered,
//! restartable source of [`RenderSegment`]s. Each non-break run yields one
//! styled text segment with its text untouched (no whitespace collapsing);
//! each break run yields one break marker. Between two adjacent text runs a
//! [`RenderSegment::Space`] is inserted whenever
//! [`needs_space_between`](crate::spacing::needs_space_between) says so.
//!
//! Segments are produced lazily. Iterating a plan twice yields the same
//! sequence; nothing is cached or diffed between passes.
//!
//! A story without a usable run list falls back to a single
//! [`RenderSegment::Raw`] carrying the raw story text verbatim.

use std::fmt;

use pagefit_style::{
    BreakKind, Color, ColorResolver, ResolvedStyle, Run, Story, StoryDefaults,
    WCAG_AA_NORMAL_TEXT, ensure_contrast, resolve_run_style,
};

use crate::spacing::needs_space_between;

/// One unit of rendered output.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderSegment<'a> {
    /// A run's text with its resolved style.
    Text {
        style: ResolvedStyle,
        text: &'a str,
    },
    /// A synthesized inter-run space.
    Space,
    /// A forced break; paragraph breaks produce a double gap.
    Break(BreakKind),
    /// Unstyled story text, whitespace preserved.
    Raw(&'a str),
}

impl RenderSegment<'_> {
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. } | Self::Raw(_))
    }
}

impl fmt::Display for RenderSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text, .. } | Self::Raw(text) => f.write_str(text),
            Self::Space => f.write_str(" "),
            Self::Break(kind) => {
                for _ in 0..kind.line_advances() {
                    f.write_str("\n")?;
                }
                Ok(())
            }
        }
    }
}

/// Host-supplied context for style resolution.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub colors: &'a dyn ColorResolver,
    /// Background the text is painted on, for contrast adjustment.
    pub background: Color,
    /// Nominal contrast ratio passed to the contrast resolver.
    pub min_contrast: f64,
}

impl<'a> RenderContext<'a> {
    /// Context with a transparent background (contrast never adjusted).
    #[must_use]
    pub fn new(colors: &'a dyn ColorResolver) -> Self {
        Self {
            colors,
            background: Color::Transparent,
            min_contrast: WCAG_AA_NORMAL_TEXT,
        }
    }

    #[must_use]
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn min_contrast(mut self, ratio: f64) -> Self {
        self.min_contrast = ratio;
        self
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("background", &self.background)
            .field("min_contrast", &self.min_contrast)
            .finish_non_exhaustive()
    }
}

/// Resolves run styles for one render pass.
#[derive(Debug, Clone, Copy)]
struct StylePass<'a> {
    defaults: &'a StoryDefaults,
    ctx: RenderContext<'a>,
    font_size_override: Option<f64>,
}

impl StylePass<'_> {
    fn style_for(&self, run: &Run) -> ResolvedStyle {
        let mut style = resolve_run_style(&run.formatting, self.defaults, self.ctx.colors);
        if let Some(size) = self.font_size_override {
            style.font_size = size;
        }
        style.color = ensure_contrast(style.color, self.ctx.background, self.ctx.min_contrast);
        style
    }
}

#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    Runs(&'a [Run]),
    Raw(&'a str),
}

/// Render plan of one story. Iterate with [`RenderPlan::segments`].
#[derive(Debug, Clone, Copy)]
pub struct RenderPlan<'a> {
    source: Source<'a>,
    pass: StylePass<'a>,
}

impl<'a> RenderPlan<'a> {
    /// A fresh iterator over the plan's segments.
    #[must_use]
    pub fn segments(&self) -> Segments<'a> {
        let state = match self.source {
            Source::Runs(runs) => State::Runs {
                runs,
                next: 0,
                space_checked: false,
            },
            Source::Raw(text) => State::Raw((!text.is_empty()).then_some(text)),
        };
        Segments {
            state,
            pass: self.pass,
        }
    }

    /// Whether the plan fell back to raw story text.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self.source, Source::Raw(_))
    }

    /// Collect all segments.
    #[must_use]
    pub fn to_vec(&self) -> Vec<RenderSegment<'a>> {
        self.segments().collect()
    }

    /// Flatten to text: spaces as `' '`, line breaks as `\n`, paragraph
    /// breaks as `\n\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments().map(|s| s.to_string()).collect()
    }
}

impl<'a> IntoIterator for &RenderPlan<'a> {
    type Item = RenderSegment<'a>;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments()
    }
}

#[derive(Debug, Clone)]
enum State<'a> {
    Runs {
        runs: &'a [Run],
        next: usize,
        /// Spacing before `runs[next]` has been decided.
        space_checked: bool,
    },
    Raw(Option<&'a str>),
}

/// Iterator over render segments, in run order.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    state: State<'a>,
    pass: StylePass<'a>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = RenderSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            State::Raw(text) => text.take().map(RenderSegment::Raw),
            State::Runs {
                runs,
                next,
                space_checked,
            } => {
                let runs: &'a [Run] = *runs;
                let run = runs.get(*next)?;

                if let Some(kind) = run.break_kind() {
                    *next += 1;
                    *space_checked = false;
                    return Some(RenderSegment::Break(kind));
                }

                if !*space_checked && *next > 0 {
                    *space_checked = true;
                    let prev = &runs[*next - 1];
                    if !prev.is_break()
                        && needs_space_between(
                            &prev.text,
                            &prev.formatting,
                            &run.text,
                            &run.formatting,
                        )
                    {
                        return Some(RenderSegment::Space);
                    }
                }

                *next += 1;
                *space_checked = false;
                Some(RenderSegment::Text {
                    style: self.pass.style_for(run),
                    text: &run.text,
                })
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

/// Build the render plan of `story`.
///
/// `font_size_override` replaces every run's resolved font size, typically
/// with the size chosen by a fit strategy.
#[must_use]
pub fn render<'a>(
    story: &'a Story,
    font_size_override: Option<f64>,
    ctx: RenderContext<'a>,
) -> RenderPlan<'a> {
    let source = match story.runs.as_deref() {
        Some(runs) if !runs.is_empty() => Source::Runs(runs),
        _ => {
            tracing::debug!(
                text_len = story.text.len(),
                "no run structure, rendering raw story text"
            );
            Source::Raw(&story.text)
        }
    };
    RenderPlan {
        source,
        pass: StylePass {
            defaults: &story.defaults,
            ctx,
            font_size_override,
        },
    }
}
