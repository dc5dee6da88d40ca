//! Formatted text runs and story-level defaults.
//!
//! A story is the text owned by one frame. Its content arrives as an ordered
//! list of [`Run`]s, each carrying whatever formatting the source markup set
//! explicitly; every field is optional and resolved later against
//! [`StoryDefaults`].

use std::fmt;

/// Family used when neither run nor story names one.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
/// Size in px used when neither run nor story sets one.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Center => write!(f, "center"),
            Self::Right => write!(f, "right"),
            Self::Justify => write!(f, "justify"),
        }
    }
}

/// Source leading: either automatic or a fixed baseline-to-baseline distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Leading {
    Auto,
    /// Absolute leading in px.
    Fixed(f64),
}

/// Kind of forced break carried by a break run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BreakKind {
    #[default]
    Line,
    Paragraph,
}

impl BreakKind {
    /// Number of line advances the break produces; paragraphs get a double gap.
    #[must_use]
    pub const fn line_advances(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Paragraph => 2,
        }
    }
}

/// Formatting explicitly set on a run. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunFormatting {
    pub font_family: Option<String>,
    /// Size in px.
    pub font_size: Option<f64>,
    /// Source style name such as `"Bold Italic"`.
    pub font_style: Option<String>,
    /// Color reference, resolved through a `ColorResolver`.
    pub fill_color: Option<String>,
    pub alignment: Option<TextAlign>,
    /// Tracking in 1/1000 em.
    pub tracking: Option<f64>,
    pub leading: Option<Leading>,
    /// Precomputed line-height ratio; wins over `leading`.
    pub effective_line_height: Option<f64>,
    pub left_indent: Option<f64>,
    pub right_indent: Option<f64>,
    pub first_line_indent: Option<f64>,
    pub space_before: Option<f64>,
    pub space_after: Option<f64>,
    pub baseline_shift: Option<f64>,
    /// Horizontal scale in percent (100 = unscaled).
    pub horizontal_scale: Option<f64>,
    pub paragraph_style: Option<String>,
    pub is_break: bool,
    pub break_kind: Option<BreakKind>,
    /// Provenance tag from the source markup.
    pub source: Option<String>,
}

impl RunFormatting {
    #[must_use]
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    #[must_use]
    pub fn font_style(mut self, token: impl Into<String>) -> Self {
        self.font_style = Some(token.into());
        self
    }

    #[must_use]
    pub fn fill_color(mut self, color_ref: impl Into<String>) -> Self {
        self.fill_color = Some(color_ref.into());
        self
    }

    #[must_use]
    pub fn paragraph_style(mut self, name: impl Into<String>) -> Self {
        self.paragraph_style = Some(name.into());
        self
    }

    #[must_use]
    pub fn leading(mut self, leading: Leading) -> Self {
        self.leading = Some(leading);
        self
    }
}

/// One contiguous span of text sharing a formatting record.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Run {
    pub text: String,
    pub formatting: RunFormatting,
}

impl Run {
    /// A text run with no explicit formatting.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: RunFormatting::default(),
        }
    }

    /// A text run with the given formatting.
    #[must_use]
    pub fn styled(text: impl Into<String>, formatting: RunFormatting) -> Self {
        Self {
            text: text.into(),
            formatting,
        }
    }

    /// A forced break of the given kind. Carries no visible text.
    #[must_use]
    pub fn break_of(kind: BreakKind) -> Self {
        Self {
            text: String::new(),
            formatting: RunFormatting {
                is_break: true,
                break_kind: Some(kind),
                ..RunFormatting::default()
            },
        }
    }

    #[must_use]
    pub fn line_break() -> Self {
        Self::break_of(BreakKind::Line)
    }

    #[must_use]
    pub fn paragraph_break() -> Self {
        Self::break_of(BreakKind::Paragraph)
    }

    #[must_use]
    pub const fn is_break(&self) -> bool {
        self.formatting.is_break
    }

    /// Break kind of a break run; line breaks when the kind is unspecified.
    #[must_use]
    pub fn break_kind(&self) -> Option<BreakKind> {
        self.is_break()
            .then(|| self.formatting.break_kind.unwrap_or_default())
    }
}

/// Story-wide fallbacks for fields a run leaves unset.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoryDefaults {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_style: Option<String>,
    pub fill_color: Option<String>,
    pub alignment: Option<TextAlign>,
    pub tracking: Option<f64>,
    pub leading: Option<Leading>,
}

/// Text content and defaults of one frame.
///
/// `runs` is `None` when the source had no usable run structure; renderers
/// then fall back to `text`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Story {
    pub text: String,
    pub runs: Option<Vec<Run>>,
    pub defaults: StoryDefaults,
}

impl Story {
    /// Story built from runs; the raw text is the concatenation of run texts
    /// with breaks rendered as newlines.
    ///
    /// `text` holds no synthesized inter-run spaces. Layout measures the
    /// rendered text instead, which does.
    #[must_use]
    pub fn from_runs(runs: Vec<Run>, defaults: StoryDefaults) -> Self {
        let mut text = String::new();
        for run in &runs {
            match run.break_kind() {
                Some(kind) => {
                    for _ in 0..kind.line_advances() {
                        text.push('\n');
                    }
                }
                None => text.push_str(&run.text),
            }
        }
        Self {
            text,
            runs: Some(runs),
            defaults,
        }
    }

    /// Unstructured story: raw text only.
    #[must_use]
    pub fn plain(text: impl Into<String>, defaults: StoryDefaults) -> Self {
        Self {
            text: text.into(),
            runs: None,
            defaults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_runs_have_no_text() {
        let br = Run::paragraph_break();
        assert!(br.is_break());
        assert!(br.text.is_empty());
        assert_eq!(br.break_kind(), Some(BreakKind::Paragraph));
    }

    #[test]
    fn unspecified_break_kind_is_line() {
        let run = Run {
            text: String::new(),
            formatting: RunFormatting {
                is_break: true,
                ..RunFormatting::default()
            },
        };
        assert_eq!(run.break_kind(), Some(BreakKind::Line));
        assert_eq!(Run::text("x").break_kind(), None);
    }

    #[test]
    fn story_text_joins_runs() {
        let story = Story::from_runs(
            vec![
                Run::text("Title"),
                Run::paragraph_break(),
                Run::text("Body "),
                Run::text("copy"),
                Run::line_break(),
                Run::text("end"),
            ],
            StoryDefaults::default(),
        );
        assert_eq!(story.text, "Title\n\nBody copy\nend");
        assert_eq!(story.runs.as_ref().map(Vec::len), Some(6));
    }

    #[test]
    fn formatting_builder() {
        let f = RunFormatting::default()
            .font_family("Minion Pro")
            .font_size(14.0)
            .font_style("Bold")
            .fill_color("Color/Black")
            .paragraph_style("Body");
        assert_eq!(f.font_family.as_deref(), Some("Minion Pro"));
        assert_eq!(f.font_size, Some(14.0));
        assert_eq!(f.paragraph_style.as_deref(), Some("Body"));
        assert!(!f.is_break);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn runs_deserialize_with_missing_fields() {
        let json = r#"[
            {"text": "Hello", "formatting": {"font_size": 14.0, "font_style": "Bold"}},
            {"formatting": {"is_break": true, "break_kind": "paragraph"}},
            {"text": "World"}
        ]"#;
        let runs: Vec<Run> = serde_json::from_str(json).unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].formatting.font_size, Some(14.0));
        assert_eq!(runs[1].break_kind(), Some(BreakKind::Paragraph));
        assert_eq!(runs[2].formatting, RunFormatting::default());
    }
}
