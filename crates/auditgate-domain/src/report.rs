use crate::exceptions::{ExceptionRow, ExceptionSet};
use crate::model::Finding;
use auditgate_types::{AdvisoryId, Column, Severity, Verdict, ids};

/// Security report row for one admissible finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VulnerabilityRow {
    pub id: AdvisoryId,
    pub module: String,
    pub title: String,
    /// Dependency paths joined with newlines.
    pub paths: String,
    pub severity: Severity,
    pub url: String,
    pub excepted: bool,
}

impl VulnerabilityRow {
    pub fn from_finding(finding: &Finding, excepted: bool) -> Self {
        Self {
            id: finding.id.clone(),
            module: finding.module.clone(),
            title: finding.title.clone(),
            paths: finding.paths.join("\n"),
            severity: finding.severity,
            url: finding.url.clone(),
            excepted,
        }
    }

    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Id => self.id.to_string(),
            Column::Module => self.module.clone(),
            Column::Title => self.title.clone(),
            Column::Paths => self.paths.clone(),
            Column::Severity => self.severity.to_string(),
            Column::Url => self.url.clone(),
            Column::Excepted => {
                let flag = if self.excepted {
                    ids::EXCEPTED_YES
                } else {
                    ids::EXCEPTED_NO
                };
                flag.to_string()
            }
        }
    }
}

/// Outcome of reconciling one scan payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// The payload could not be parsed; every other field is empty.
    pub failed: bool,
    /// Admissible findings with no effective exception, in payload order.
    pub unhandled_ids: Vec<AdvisoryId>,
    pub rows: Vec<VulnerabilityRow>,
    pub unused_exception_ids: Vec<String>,
    pub unused_exception_modules: Vec<String>,
}

impl ReconciliationResult {
    pub fn structural_failure() -> Self {
        Self {
            failed: true,
            ..Self::default()
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.failed || !self.unhandled_ids.is_empty() {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    pub fn has_unused_exceptions(&self) -> bool {
        !self.unused_exception_ids.is_empty() || !self.unused_exception_modules.is_empty()
    }
}

/// Row tuples ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledReport {
    /// Security report columns, in canonical order.
    pub columns: Vec<Column>,
    pub vulnerability_rows: Vec<Vec<String>>,
    pub exception_rows: Vec<ExceptionRow>,
}

/// Project reconciliation output onto the requested columns.
///
/// An empty request selects every column. Requested columns are always
/// emitted in canonical order, never in request order. The exception report
/// is not affected by column selection.
pub fn assemble(
    result: &ReconciliationResult,
    exceptions: &ExceptionSet,
    requested: &[Column],
) -> AssembledReport {
    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| requested.is_empty() || requested.contains(c))
        .collect();

    let vulnerability_rows = result
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| row.cell(*c)).collect())
        .collect();

    AssembledReport {
        columns,
        vulnerability_rows,
        exception_rows: exceptions.report_rows(),
    }
}
