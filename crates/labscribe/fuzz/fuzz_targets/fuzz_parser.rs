//! Fuzz target for the raw test line parser.
//!
//! The parser must never panic, and anything it accepts must carry a
//! non-empty name and a finite value.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labscribe::{LabPipeline, Parser, RawTestInput};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(line) = std::str::from_utf8(data) {
        if let Some(candidate) = Parser::new().parse_line(line) {
            assert!(!candidate.name.is_empty());
            assert!(candidate.value.is_finite());
        }

        let _ = LabPipeline::new().run_raw(&[RawTestInput::from(line)]);
    }
});
