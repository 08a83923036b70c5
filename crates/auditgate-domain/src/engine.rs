use crate::exceptions::ExceptionSet;
use crate::model::{ExceptionKind, Finding};
use crate::policy::AdmissibleSeverities;
use crate::report::{ReconciliationResult, VulnerabilityRow};
use auditgate_types::{AdvisoryId, ExceptionStatus};

/// Cross-reference findings against exceptions and the severity threshold.
///
/// Findings are processed in payload order and that order is kept in every
/// output list. Findings below the threshold are dropped entirely. An ID
/// exception takes precedence over a module exception, and only the entry
/// that actually suppressed a finding counts as used.
pub fn reconcile(
    findings: &[Finding],
    exceptions: &ExceptionSet,
    admissible: &AdmissibleSeverities,
) -> ReconciliationResult {
    let mut used = vec![false; exceptions.len()];
    let mut unhandled_ids: Vec<AdvisoryId> = Vec::new();
    let mut rows = Vec::new();

    for finding in findings {
        if !admissible.contains(finding.severity) {
            continue;
        }

        let matched = exceptions
            .effective(ExceptionKind::Id, finding.id.as_str())
            .or_else(|| exceptions.effective(ExceptionKind::Module, &finding.module));

        match matched {
            Some(idx) => used[idx] = true,
            None => {
                if !unhandled_ids.contains(&finding.id) {
                    unhandled_ids.push(finding.id.clone());
                }
            }
        }

        rows.push(VulnerabilityRow::from_finding(finding, matched.is_some()));
    }

    let mut unused_exception_ids = Vec::new();
    let mut unused_exception_modules = Vec::new();
    for (entry, used) in exceptions.entries().iter().zip(used) {
        // Switched-off entries are neither used nor stale.
        if used || exceptions.status(entry) == ExceptionStatus::Inactive {
            continue;
        }
        match entry.kind {
            ExceptionKind::Id => unused_exception_ids.push(entry.key.clone()),
            ExceptionKind::Module => unused_exception_modules.push(entry.key.clone()),
        }
    }

    ReconciliationResult {
        failed: false,
        unhandled_ids,
        rows,
        unused_exception_ids,
        unused_exception_modules,
    }
}
