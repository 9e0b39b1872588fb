#![no_main]

use libfuzzer_sys::fuzz_target;
use xmlmap::Document;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut document = Document::default();
        if document.parse(s).is_err() {
            assert!(document.last_error().is_some());
        }
    }
});
