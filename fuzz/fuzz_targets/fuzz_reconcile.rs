//! Fuzz target for reconciliation.
//!
//! Goal: reconcile never panics, and every unhandled id belongs to a reported row
//! that is not marked excepted.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_reconcile
//! ```

#![no_main]

use arbitrary::Arbitrary;
use auditgate_domain::exceptions::ExceptionSet;
use auditgate_domain::model::{DeclarationRecord, Finding};
use auditgate_domain::policy::admissible_severities;
use auditgate_types::{AdvisoryId, Severity};
use libfuzzer_sys::fuzz_target;
use time::{Date, Duration};

#[derive(Arbitrary, Debug)]
struct RawFinding {
    id: u8,
    module: u8,
    severity: u8,
}

#[derive(Arbitrary, Debug)]
struct RawException {
    key: u8,
    module: bool,
    /// Days relative to the evaluation date; `None` never expires.
    expiry_offset: Option<i8>,
    active: bool,
}

#[derive(Arbitrary, Debug)]
struct ReconcileInput {
    findings: Vec<RawFinding>,
    exceptions: Vec<RawException>,
    adhoc_ids: Vec<u8>,
    threshold: u8,
}

fn severity(raw: u8) -> Severity {
    Severity::ALL[usize::from(raw) % Severity::ALL.len()]
}

fuzz_target!(|input: ReconcileInput| {
    if input.findings.len() > 64 || input.exceptions.len() > 64 {
        return;
    }

    let today = Date::from_calendar_date(2024, time::Month::June, 15).unwrap_or(Date::MIN);

    let findings: Vec<Finding> = input
        .findings
        .iter()
        .map(|f| Finding {
            id: AdvisoryId::from(u64::from(f.id % 16)),
            module: format!("mod{}", f.module % 8),
            title: String::new(),
            severity: severity(f.severity),
            paths: Vec::new(),
            url: String::new(),
        })
        .collect();

    let records = input.exceptions.iter().map(|e| {
        let mut record = if e.module {
            DeclarationRecord::module(format!("mod{}", e.key % 8))
        } else {
            DeclarationRecord::id((e.key % 16).to_string())
        };
        if let Some(offset) = e.expiry_offset {
            record = record.with_expiry(today.saturating_add(Duration::days(i64::from(offset))));
        }
        if !e.active {
            record = record.inactive();
        }
        record
    });
    let adhoc: Vec<String> = input.adhoc_ids.iter().map(|k| (k % 16).to_string()).collect();
    let exceptions = ExceptionSet::build(records, &adhoc, &[], today);

    let result = auditgate_domain::reconcile(
        &findings,
        &exceptions,
        &admissible_severities(severity(input.threshold)),
    );

    for id in &result.unhandled_ids {
        assert!(result.rows.iter().any(|r| &r.id == id && !r.excepted));
    }
});
