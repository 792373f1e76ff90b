#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tagvalue::parse_tag_value;

/// Fuzz the tag-value parser.
///
/// Prefixes input with a valid document header to exercise the entity
/// parsing logic past the document scope.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Try raw input
        let _ = parse_tag_value(s);

        // Try wrapping with a valid document header
        if s.len() < 10_000 {
            let wrapped = format!(
                "SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\nSPDXID: SPDXRef-DOCUMENT\nDocumentName: fuzz\nDocumentNamespace: https://example.com/fuzz\nCreator: Tool: fuzz\nCreated: 2024-01-01T00:00:00Z\n{s}",
            );
            let _ = parse_tag_value(&wrapped);
        }
    }
});
