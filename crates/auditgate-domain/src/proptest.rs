//! Property-based tests for the reconciliation engine.
//!
//! These tests use proptest to verify invariants around:
//! - Below-threshold findings never reaching any output
//! - Payload order being preserved in unhandled ids
//! - Expired exceptions never suppressing
//! - Determinism of repeated runs

use crate::engine::reconcile;
use crate::model::{DeclarationRecord, Finding};
use crate::policy::admissible_severities;
use crate::test_support::{TODAY, exceptions, yesterday};
use auditgate_types::{AdvisoryId, Severity};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

/// Advisory ids drawn from a small pool so exceptions actually collide with findings.
fn arb_id() -> impl Strategy<Value = String> {
    (1u32..12).prop_map(|n| (1000 + n).to_string())
}

fn arb_module() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["lodash", "minimist", "axios", "semver", "ws"])
        .prop_map(str::to_string)
}

fn arb_finding() -> impl Strategy<Value = Finding> {
    (arb_id(), arb_module(), arb_severity()).prop_map(|(id, module, severity)| Finding {
        id: AdvisoryId::new(&id),
        title: format!("Advisory {id}"),
        paths: vec![format!("app>{module}")],
        url: format!("https://npmjs.com/advisories/{id}"),
        module,
        severity,
    })
}

/// Unique ids in payload order, as the scan parser produces them.
fn arb_findings() -> impl Strategy<Value = Vec<Finding>> {
    prop::collection::vec(arb_finding(), 0..16).prop_map(|mut findings| {
        let mut seen = Vec::new();
        findings.retain(|f| {
            if seen.contains(&f.id) {
                false
            } else {
                seen.push(f.id.clone());
                true
            }
        });
        findings
    })
}

fn arb_record() -> impl Strategy<Value = DeclarationRecord> {
    prop_oneof![
        arb_id().prop_map(DeclarationRecord::id),
        arb_module().prop_map(DeclarationRecord::module),
        arb_id().prop_map(|id| DeclarationRecord::id(id).with_expiry(yesterday())),
        arb_module().prop_map(|m| DeclarationRecord::module(m).with_expiry(TODAY)),
    ]
}

proptest! {
    /// Findings below the threshold never appear in rows or unhandled ids.
    #[test]
    fn below_threshold_findings_are_dropped(
        findings in arb_findings(),
        records in prop::collection::vec(arb_record(), 0..8),
        threshold in arb_severity(),
    ) {
        let result = reconcile(&findings, &exceptions(records), &admissible_severities(threshold));

        for f in findings.iter().filter(|f| f.severity < threshold) {
            prop_assert!(!result.unhandled_ids.contains(&f.id));
            prop_assert!(result.rows.iter().all(|r| r.id != f.id));
        }
        prop_assert!(result.rows.iter().all(|r| r.severity >= threshold));
    }

    /// With no exceptions, unhandled ids are exactly the admissible findings in payload order.
    #[test]
    fn unhandled_preserves_payload_order(
        findings in arb_findings(),
        threshold in arb_severity(),
    ) {
        let result = reconcile(&findings, &exceptions(Vec::new()), &admissible_severities(threshold));

        let expected: Vec<AdvisoryId> = findings
            .iter()
            .filter(|f| f.severity >= threshold)
            .map(|f| f.id.clone())
            .collect();
        prop_assert_eq!(result.unhandled_ids, expected);
    }

    /// Expired exceptions never suppress and are always reported unused.
    #[test]
    fn expired_exceptions_never_suppress(findings in arb_findings()) {
        let records: Vec<DeclarationRecord> = findings
            .iter()
            .map(|f| DeclarationRecord::id(f.id.as_str()).with_expiry(yesterday()))
            .collect();
        let result = reconcile(&findings, &exceptions(records), &admissible_severities(Severity::Info));

        prop_assert_eq!(result.unhandled_ids.len(), findings.len());
        prop_assert!(result.rows.iter().all(|r| !r.excepted));
        prop_assert_eq!(result.unused_exception_ids.len(), findings.len());
    }

    /// Excepted rows are exactly the admissible findings missing from unhandled ids.
    #[test]
    fn every_admissible_finding_has_one_row(
        findings in arb_findings(),
        records in prop::collection::vec(arb_record(), 0..8),
        threshold in arb_severity(),
    ) {
        let result = reconcile(&findings, &exceptions(records), &admissible_severities(threshold));

        let admissible = findings.iter().filter(|f| f.severity >= threshold).count();
        prop_assert_eq!(result.rows.len(), admissible);
        for row in &result.rows {
            prop_assert_eq!(row.excepted, !result.unhandled_ids.contains(&row.id));
        }
    }

    /// A used exception is never also reported as unused.
    #[test]
    fn used_exceptions_are_not_unused(
        findings in arb_findings(),
        records in prop::collection::vec(arb_record(), 0..8),
    ) {
        let set = exceptions(records);
        let result = reconcile(&findings, &set, &admissible_severities(Severity::Info));

        for row in result.rows.iter().filter(|r| r.excepted) {
            let id_used = set.effective(crate::model::ExceptionKind::Id, row.id.as_str()).is_some();
            if id_used {
                prop_assert!(!result.unused_exception_ids.iter().any(|k| k == row.id.as_str()));
            } else {
                prop_assert!(!result.unused_exception_modules.contains(&row.module));
            }
        }
    }

    /// Reconciling twice with identical inputs yields identical results.
    #[test]
    fn reconcile_is_idempotent(
        findings in arb_findings(),
        records in prop::collection::vec(arb_record(), 0..8),
        threshold in arb_severity(),
    ) {
        let set = exceptions(records);
        let admissible = admissible_severities(threshold);
        let first = reconcile(&findings, &set, &admissible);
        let second = reconcile(&findings, &set, &admissible);
        prop_assert_eq!(first, second);
    }
}
