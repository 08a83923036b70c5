//! Severity threshold classification.

use auditgate_types::Severity;
use std::collections::BTreeSet;

/// Severities that are in scope for a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmissibleSeverities(BTreeSet<Severity>);

impl AdmissibleSeverities {
    pub fn contains(&self, severity: Severity) -> bool {
        self.0.contains(&severity)
    }
}

impl Default for AdmissibleSeverities {
    fn default() -> Self {
        admissible_severities(Severity::Info)
    }
}

/// Every level at or above `threshold`.
pub fn admissible_severities(threshold: Severity) -> AdmissibleSeverities {
    AdmissibleSeverities(
        Severity::ALL
            .into_iter()
            .filter(|s| *s >= threshold)
            .collect(),
    )
}

/// Parse a threshold, falling back to `info` when unrecognized.
pub fn threshold_or_default(level: &str) -> Severity {
    level.parse().unwrap_or(Severity::Info)
}
