//! Fuzz target for `npm audit --json` payload parsing.
//!
//! Goal: The parser should **never panic** on any input.
//! It may return a `ScanError`, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_audit_payload
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(scan) = auditgate_scan::fuzz::parse_audit_json(text) {
            // Findings are merged by id.
            for (i, f) in scan.findings.iter().enumerate() {
                assert!(!f.id.is_empty());
                assert!(scan.findings[i + 1..].iter().all(|g| g.id != f.id));
            }
        }
    }
});
