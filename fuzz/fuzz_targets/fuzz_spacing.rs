#![no_main]

use libfuzzer_sys::fuzz_target;
use pagefit_style::RunFormatting;
use pagefit_text::{is_split_word, needs_space_between};

fuzz_target!(|input: (&str, &str, bool)| {
    let (current, next, same_style) = input;
    if current.len() + next.len() > 512 {
        return;
    }

    let a = RunFormatting::default();
    let b = if same_style {
        RunFormatting::default().font_style("Bold")
    } else {
        RunFormatting::default()
    };

    // Arbitrary UTF-8 (multi-byte joiners, combining marks) must never panic.
    let first = needs_space_between(current, &a, next, &b);
    let _ = is_split_word(current);

    // Pairwise and deterministic.
    assert_eq!(first, needs_space_between(current, &a, next, &b));

    // Boundary whitespace never gets a second space.
    if current.ends_with(char::is_whitespace) || next.starts_with(char::is_whitespace) {
        assert!(!first);
    }
});
