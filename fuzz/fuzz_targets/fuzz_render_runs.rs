#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagefit_style::{Run, RunFormatting, Story, StoryDefaults, SwatchTable};
use pagefit_text::{RenderContext, RenderSegment, render};

#[derive(Debug, Arbitrary)]
enum FuzzRun {
    Text(String),
    Styled { text: String, style: String, color: String },
    LineBreak,
    ParagraphBreak,
}

fuzz_target!(|input: (Vec<FuzzRun>, Option<f64>)| {
    let (runs, font_size_override) = input;
    let font_size_override = font_size_override.filter(|s| s.is_finite());
    if runs.len() > 256 {
        return;
    }

    let runs: Vec<Run> = runs
        .into_iter()
        .map(|r| match r {
            FuzzRun::Text(text) => Run::text(text),
            FuzzRun::Styled { text, style, color } => Run::styled(
                text,
                RunFormatting::default().font_style(style).fill_color(color),
            ),
            FuzzRun::LineBreak => Run::line_break(),
            FuzzRun::ParagraphBreak => Run::paragraph_break(),
        })
        .collect();
    let run_count = runs.len();

    let colors = SwatchTable::new();
    let story = Story::from_runs(runs, StoryDefaults::default());
    let plan = render(&story, font_size_override, RenderContext::new(&colors));

    let segments = plan.to_vec();
    if run_count > 0 {
        let spaces = segments
            .iter()
            .filter(|s| matches!(s, RenderSegment::Space))
            .count();
        assert_eq!(segments.len() - spaces, run_count);
    }

    // Restartable: a second pass yields the same sequence.
    assert_eq!(segments, plan.to_vec());
});
