//! Fuzz target for exception declaration parsing (`.nsprc`).
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_declarations
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = auditgate_settings::parse_declarations_json(text);
    }
});
