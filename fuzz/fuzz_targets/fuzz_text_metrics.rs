#![no_main]

use libfuzzer_sys::fuzz_target;
use pagefit_style::FontDescriptor;
use pagefit_text::{CellMeasurer, ContainerBox, FitConfig, FitStrategy, FitStyle, calculate, fit};

fuzz_target!(|input: (&str, f64, f64, f64, u8)| {
    let (text, width, height, size, strategy) = input;
    // Cap length to keep fuzzing fast.
    if text.len() > 2048 {
        return;
    }

    let config = FitConfig::default();
    let font = FontDescriptor::new("sans-serif", size);
    let container = ContainerBox::new(width, height);

    // Arbitrary (even NaN) dimensions must never panic.
    let metrics = calculate(text, &font, &container, &CellMeasurer::default(), &config);
    if text.is_empty() {
        assert_eq!(metrics.estimated_lines, 0);
        assert!(!metrics.will_overflow);
    }

    let strategy = FitStrategy::ALL[usize::from(strategy) % FitStrategy::ALL.len()];
    let base = FitStyle::from_font(&font, &config);
    let outcome = fit(&base, &metrics, strategy, &config);
    if !metrics.will_overflow {
        assert!(outcome.adjustment.is_none());
    }
});
