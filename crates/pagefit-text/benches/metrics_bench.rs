//! Benchmarks for text metrics and run rendering.
//!
//! Run with: cargo bench -p pagefit-text --bench metrics_bench
//!
//! Workloads:
//! - **calculate**: greedy wrap of prose at several container widths.
//! - **render**: segment stream for run lists split at style boundaries.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pagefit_style::{FontDescriptor, Run, RunFormatting, Story, StoryDefaults, SwatchTable};
use pagefit_text::{
    CellMeasurer, ContainerBox, FitConfig, FitStrategy, FitStyle, FixedAdvance, RenderContext,
    calculate, fit, render,
};
use std::hint::black_box;

// ── Workload Generators ─────────────────────────────────────────────────

const WORDS: [&str; 12] = [
    "layout", "the", "quick", "margin", "baseline", "of", "kerning", "a", "column", "grid",
    "leading", "typeset",
];

fn prose(words: usize) -> String {
    (0..words)
        .map(|i| WORDS[i % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs alternating between two styles, with a paragraph break every 20.
fn styled_runs(count: usize) -> Vec<Run> {
    let bold = RunFormatting::default().font_style("Bold");
    let plain = RunFormatting::default().font_size(11.0);
    (0..count)
        .map(|i| {
            if i % 20 == 19 {
                Run::paragraph_break()
            } else if i % 2 == 0 {
                Run::styled(WORDS[i % WORDS.len()], bold.clone())
            } else {
                Run::styled(WORDS[i % WORDS.len()], plain.clone())
            }
        })
        .collect()
}

// ── Benchmark Functions ─────────────────────────────────────────────────

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics/calculate");
    let config = FitConfig::default();
    let font = FontDescriptor::new("sans-serif", 12.0);
    let text = prose(500);

    for width in [120.0, 320.0, 800.0] {
        let container = ContainerBox::new(width, 400.0);
        group.bench_with_input(
            BenchmarkId::new("fixed_advance", width as u32),
            &container,
            |b, container| {
                let measurer = FixedAdvance::default();
                b.iter(|| calculate(black_box(&text), &font, container, &measurer, &config));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("cell_measurer", width as u32),
            &container,
            |b, container| {
                let measurer = CellMeasurer::default();
                b.iter(|| calculate(black_box(&text), &font, container, &measurer, &config));
            },
        );
    }
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics/fit");
    let config = FitConfig::default();
    let font = FontDescriptor::new("sans-serif", 14.0);
    let metrics = calculate(
        &prose(300),
        &font,
        &ContainerBox::new(200.0, 150.0),
        &FixedAdvance::default(),
        &config,
    );
    let base = FitStyle::from_font(&font, &config);

    for strategy in FitStrategy::ALL {
        group.bench_function(strategy.token(), |b| {
            b.iter(|| fit(&base, black_box(&metrics), strategy, &config));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/segments");
    let colors = SwatchTable::new();

    for count in [10usize, 100, 1000] {
        let story = Story::from_runs(styled_runs(count), StoryDefaults::default());
        group.bench_with_input(BenchmarkId::from_parameter(count), &story, |b, story| {
            b.iter(|| {
                render(black_box(story), Some(10.0), RenderContext::new(&colors))
                    .segments()
                    .count()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_calculate, bench_fit, bench_render);
criterion_main!(benches);
