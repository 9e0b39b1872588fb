#![no_main]

use libfuzzer_sys::fuzz_target;
use xmlmap::Document;

// Serialized output must parse again, and serializing is stable from then on.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let Ok(first) = Document::parse_str(s) else {
            return;
        };
        let Ok(xml) = first.to_xml() else {
            return;
        };
        let second = Document::parse_str(&xml).expect("serialized output must parse");
        let normalized = second.to_xml().expect("reparsed document must serialize");
        let third = Document::parse_str(&normalized).expect("normalized output must parse");
        assert_eq!(third.tree(), second.tree());
    }
});
