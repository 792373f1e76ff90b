#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tagvalue::parser::tokenize;

/// Fuzz the record tokenizer, including `<text>` block handling.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = tokenize(s);
    }
});
