//! Fuzz target for heuristic extraction over arbitrary report text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labscribe::HeuristicExtractor;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let extraction = HeuristicExtractor::new().extract_text(text, 0.8);
        assert!(!extraction.tests_raw.is_empty());
    }
});
