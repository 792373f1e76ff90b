#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tagvalue::{parse_tag_value, write_tag_value_string};

/// Fuzz the write path: any document that parses must write out to text
/// that parses back cleanly.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = parse_tag_value(s) {
            let written = write_tag_value_string(&document);
            parse_tag_value(&written).expect("written documents must parse");
        }
    }
});
