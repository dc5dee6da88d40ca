//! Frame pipeline integration tests: metrics → fit → render through the
//! facade.

use pagefit::prelude::*;
use pagefit::{
    Adjustment, CellMeasurer, FnMeasurer, PreciseTier, Rgb, UnitConverter, calculate,
};
use pagefit::{Length, ResolvedStyle};
use proptest::prelude::*;

fn text_styles(plan: &FramePlan<'_>) -> Vec<ResolvedStyle> {
    plan.segments
        .segments()
        .filter_map(|s| match s {
            RenderSegment::Text { style, .. } => Some(style),
            _ => None,
        })
        .collect()
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn styled_heading_and_body() {
    let colors = SwatchTable::new().with_swatch("Brand Blue", Rgb::new(0, 70, 160));
    let story = Story::from_runs(
        vec![
            Run::styled(
                "Annual",
                RunFormatting::default().font_style("Bold").font_size(18.0),
            ),
            Run::styled(
                "Report",
                RunFormatting::default().font_style("Bold").font_size(18.0),
            ),
            Run::paragraph_break(),
            Run::styled("Revenue grew", RunFormatting::default().fill_color("Color/Brand Blue")),
            Run::text("in Q4."),
        ],
        StoryDefaults {
            font_size: Some(10.0),
            ..StoryDefaults::default()
        },
    );
    let frame = TextFrame::new(story, ContainerBox::new(400.0, 300.0));
    let planner = FramePlanner::with_default_config(FixedAdvance::default());
    let plan = planner.plan(&frame, &colors);

    assert!(!plan.fit.was_adjusted());
    // Same explicit style token: continuation, no space.
    assert_eq!(
        plan.segments.plain_text(),
        "AnnualReport\n\nRevenue grew in Q4."
    );
    let styles = text_styles(&plan);
    assert!(styles[0].font_weight.is_bold());
    assert_eq!(styles[0].font_size, 18.0);
    assert_eq!(styles[2].color, Color::Rgb(Rgb::new(0, 70, 160)));
    assert_eq!(styles[3].font_size, 10.0);
}

#[test]
fn precise_fit_clamps_hopeless_overflow() {
    let colors = SwatchTable::new();
    let words = vec!["lorem ipsum dolor sit amet"; 20].join(" ");
    let frame = TextFrame::new(
        Story::plain(words, StoryDefaults::default()),
        ContainerBox::new(120.0, 40.0),
    )
    .strategy(FitStrategy::PreciseFit);
    let plan = FramePlanner::with_default_config(CellMeasurer::default()).plan(&frame, &colors);

    let Some(Adjustment::PreciseFit {
        tier, max_height, ..
    }) = plan.fit.adjustment
    else {
        panic!("expected precise fit, got {:?}", plan.fit.adjustment);
    };
    assert_eq!(tier, PreciseTier::MaximalClamp);
    assert_eq!(max_height, Some(plan.metrics.available_height));
    assert!(plan.fit.style.font_size >= 8.0);
    // Raw story text, fitted size does not apply to an unstyled segment.
    assert!(plan.segments.is_raw());
}

#[test]
fn dark_background_lifts_dim_text() {
    let colors = SwatchTable::new();
    let story = Story::from_runs(
        vec![Run::styled("caption", RunFormatting::default().fill_color("#222222"))],
        StoryDefaults::default(),
    );
    let frame = TextFrame::new(story, ContainerBox::new(300.0, 100.0))
        .background(Color::Rgb(Rgb::new(0x10, 0x10, 0x10)));
    let plan = FramePlanner::with_default_config(FixedAdvance::default()).plan(&frame, &colors);
    assert_eq!(text_styles(&plan)[0].color, Color::WHITE);
}

#[test]
fn container_from_points() {
    let converter = UnitConverter::CSS;
    // 72pt × 36pt is 96px × 48px at 96 dpi.
    let container = ContainerBox::from_lengths(Length::pt(72.0), Length::pt(36.0), &converter);
    assert!((container.width - 96.0).abs() < 1e-9);
    assert!((container.height - 48.0).abs() < 1e-9);
}

#[test]
fn custom_measurer_closure() {
    let colors = SwatchTable::new();
    let measurer = FnMeasurer(|s: &str, font: &pagefit::FontDescriptor| {
        s.len() as f64 * font.size
    });
    let planner = FramePlanner::new(measurer, FitConfig::default().with_container_padding(0.0))
        .unwrap_or_else(|e| panic!("valid config rejected: {e}"));
    let frame = TextFrame::new(
        Story::plain("ab cd", StoryDefaults::default()),
        ContainerBox::new(24.0, 100.0),
    );
    // 12px font: each word 24px, the pair 60px, so two lines.
    let plan = planner.plan(&frame, &colors);
    assert_eq!(plan.metrics.estimated_lines, 2);
}

#[test]
fn invalid_config_surfaces_as_error() {
    let result: pagefit::Result<_> =
        FramePlanner::new(FixedAdvance::default(), FitConfig::default().with_min_contrast(40.0))
            .map_err(Error::from);
    let err = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(err.contains("minimum contrast"), "{err}");
}

// ── Properties ──────────────────────────────────────────────────────────

fn arb_strategy() -> impl Strategy<Value = FitStrategy> {
    prop::sample::select(FitStrategy::ALL.to_vec())
}

proptest! {
    #[test]
    fn override_matches_fitted_size(
        words in prop::collection::vec("[a-z]{1,8}", 1..40),
        size in 8.0f64..40.0,
        width in 20.0f64..400.0,
        height in 10.0f64..200.0,
        strategy in arb_strategy(),
    ) {
        let colors = SwatchTable::new();
        let runs: Vec<Run> = words.into_iter().map(Run::text).collect();
        let story = Story::from_runs(runs, StoryDefaults {
            font_size: Some(size),
            ..StoryDefaults::default()
        });
        let frame = TextFrame::new(story, ContainerBox::new(width, height)).strategy(strategy);
        let plan = FramePlanner::with_default_config(FixedAdvance::default()).plan(&frame, &colors);

        let expected = plan.fit.style.font_size;
        for style in text_styles(&plan) {
            prop_assert_eq!(style.font_size, expected);
        }
        prop_assert!(expected >= 8.0);
    }

    #[test]
    fn metrics_measure_rendered_text(
        words in prop::collection::vec("[A-Za-z]{1,8}[.,]?", 1..30),
        width in 20.0f64..300.0,
        height in 10.0f64..200.0,
    ) {
        let colors = SwatchTable::new();
        let runs: Vec<Run> = words.into_iter().map(Run::text).collect();
        let story = Story::from_runs(runs, StoryDefaults {
            font_size: Some(12.0),
            ..StoryDefaults::default()
        });
        let frame = TextFrame::new(story, ContainerBox::new(width, height));
        let planner = FramePlanner::with_default_config(FixedAdvance::default());
        let plan = planner.plan(&frame, &colors);

        let rendered = calculate(
            &plan.segments.plain_text(),
            &plan.font,
            &frame.container,
            planner.measurer(),
            planner.config(),
        );
        prop_assert_eq!(plan.metrics, rendered);
    }
}
