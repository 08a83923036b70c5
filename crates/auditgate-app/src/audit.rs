//! The `audit` use case: reconcile a scan payload against declared exceptions.

use anyhow::Context;
use auditgate_domain::exceptions::ExceptionSet;
use auditgate_domain::report::{AssembledReport, ReconciliationResult};
use auditgate_settings::{Overrides, ResolvedConfig};
use auditgate_types::{AuditReportV1, Verdict};
use time::Date;
use tracing::{debug, warn};

use crate::document::build_report_document;

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Raw `npm audit --json` output.
    pub payload_text: &'a str,
    /// Exceptions file contents (empty string if not found).
    pub declarations_text: &'a str,
    pub resolved: &'a ResolvedConfig,
    /// Date that exception expiry is evaluated against.
    pub today: Date,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub result: ReconciliationResult,
    pub exceptions: ExceptionSet,
    pub assembled: AssembledReport,
    pub report: AuditReportV1,
    /// Why the payload could not be processed, if it could not.
    pub scan_error: Option<String>,
}

impl AuditOutput {
    pub fn verdict(&self) -> Verdict {
        self.result.verdict()
    }
}

/// Parse config text and apply CLI/env overrides.
pub fn resolve_options(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty config is allowed, defaults apply.
    let cfg = if config_text.trim().is_empty() {
        auditgate_settings::AuditgateConfigV1::default()
    } else {
        auditgate_settings::parse_config_toml(config_text).context("parse config")?
    };

    let resolved = auditgate_settings::resolve_config(cfg, overrides).context("resolve config")?;
    for w in &resolved.warnings {
        warn!("{w}");
    }
    debug!(
        threshold = %resolved.threshold,
        columns = resolved.columns.len(),
        exceptions_file = %resolved.exceptions_file,
        "resolved options"
    );
    Ok(resolved)
}

/// Run the audit use case: build the exception set, parse the payload, reconcile, assemble.
///
/// A payload that cannot be processed is not an error here. It yields a failed
/// result with empty lists. An unreadable exceptions file is an error.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let resolved = input.resolved;

    let declarations = auditgate_settings::parse_declarations_json(input.declarations_text)
        .context("parse exceptions file")?;
    for w in &declarations.warnings {
        warn!("exceptions file: {w}");
    }

    let exceptions = ExceptionSet::build(
        declarations.records,
        &resolved.adhoc_ids,
        &resolved.adhoc_modules,
        input.today,
    );
    debug!(
        exceptions = exceptions.len(),
        today = %exceptions.evaluated_on(),
        "built exception set"
    );

    let (result, scan_error) = match auditgate_scan::parse_audit_json(input.payload_text) {
        Ok(scan) => {
            for w in &scan.warnings {
                warn!("scan payload: {w}");
            }
            debug!(
                format = ?scan.format,
                findings = scan.findings.len(),
                "parsed scan payload"
            );
            let result = auditgate_domain::reconcile(&scan.findings, &exceptions, &resolved.admissible);
            (result, None)
        }
        Err(err) => {
            warn!("{err}");
            (ReconciliationResult::structural_failure(), Some(err.to_string()))
        }
    };

    debug!(
        unhandled = result.unhandled_ids.len(),
        rows = result.rows.len(),
        unused_ids = result.unused_exception_ids.len(),
        unused_modules = result.unused_exception_modules.len(),
        "reconciled"
    );

    let assembled = auditgate_domain::assemble(&result, &exceptions, &resolved.columns);
    let report = build_report_document(&result, &assembled);

    Ok(AuditOutput {
        result,
        exceptions,
        assembled,
        report,
        scan_error,
    })
}

/// Map a verdict to a process exit code.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
