//! Render use cases: terminal tables, console messages, and the JSON document.

use anyhow::Context;
use auditgate_domain::report::{AssembledReport, ReconciliationResult};
use auditgate_render::RenderableTable;
use auditgate_types::{AuditReportV1, ExceptionColumn, ids};

/// The "list of exceptions" table, or `None` when no exceptions are declared.
pub fn exception_table(assembled: &AssembledReport) -> Option<RenderableTable> {
    if assembled.exception_rows.is_empty() {
        return None;
    }
    let headers = ExceptionColumn::ALL
        .iter()
        .map(|c| c.header().to_string())
        .collect();
    let rows = assembled
        .exception_rows
        .iter()
        .map(|row| row.cells().to_vec())
        .collect();
    Some(RenderableTable::new(ids::EXCEPTION_REPORT_TITLE, headers).with_rows(rows))
}

/// The security report table, or `None` when nothing reached the report.
pub fn security_table(assembled: &AssembledReport) -> Option<RenderableTable> {
    if assembled.vulnerability_rows.is_empty() {
        return None;
    }
    let headers = assembled
        .columns
        .iter()
        .map(|c| c.header().to_string())
        .collect();
    Some(
        RenderableTable::new(ids::SECURITY_REPORT_TITLE, headers)
            .with_rows(assembled.vulnerability_rows.clone()),
    )
}

/// One warning line per kind of unused exception.
pub fn unused_exception_warnings(
    result: &ReconciliationResult,
    exceptions_file: &str,
) -> Vec<String> {
    let mut out = Vec::new();
    if !result.unused_exception_ids.is_empty() {
        out.push(format!(
            "{} unused exception id(s): {}. Consider removing them from {}.",
            result.unused_exception_ids.len(),
            result.unused_exception_ids.join(", "),
            exceptions_file
        ));
    }
    if !result.unused_exception_modules.is_empty() {
        out.push(format!(
            "{} unused exception module(s): {}. Consider removing them from {} or --module-ignore.",
            result.unused_exception_modules.len(),
            result.unused_exception_modules.join(", "),
            exceptions_file
        ));
    }
    out
}

/// Final console line for a table-mode run.
pub fn summary_message(result: &ReconciliationResult) -> String {
    if result.failed {
        return "Unable to process the audit JSON payload.".to_string();
    }
    if result.unhandled_ids.is_empty() {
        return "All good!".to_string();
    }
    let listed: Vec<&str> = result.unhandled_ids.iter().map(|id| id.as_str()).collect();
    format!(
        "{} vulnerabilities found. Advisories: {}",
        result.unhandled_ids.len(),
        listed.join(", ")
    )
}

pub fn serialize_report(report: &AuditReportV1) -> anyhow::Result<String> {
    auditgate_render::render_report_json(report).context("serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditgate_domain::exceptions::ExceptionRow;
    use auditgate_types::{AdvisoryId, Column, ExceptionStatus};

    fn assembled(rows: Vec<Vec<String>>, exception_rows: Vec<ExceptionRow>) -> AssembledReport {
        AssembledReport {
            columns: vec![Column::Id, Column::Severity],
            vulnerability_rows: rows,
            exception_rows,
        }
    }

    #[test]
    fn tables_are_omitted_when_empty() {
        let a = assembled(Vec::new(), Vec::new());
        assert!(exception_table(&a).is_none());
        assert!(security_table(&a).is_none());
    }

    #[test]
    fn security_table_uses_projected_headers() {
        let a = assembled(vec![vec!["1001".to_string(), "high".to_string()]], Vec::new());
        let table = security_table(&a).expect("table");
        assert_eq!(table.title, "=== npm audit security report ===");
        assert_eq!(table.headers, vec!["ID".to_string(), "Severity".to_string()]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn exception_table_has_four_columns() {
        let a = assembled(
            Vec::new(),
            vec![ExceptionRow {
                key: "lodash".to_string(),
                status: ExceptionStatus::Expired,
                expiry: None,
                notes: String::new(),
            }],
        );
        let table = exception_table(&a).expect("table");
        assert_eq!(table.title, "=== list of exceptions ===");
        assert_eq!(table.headers, vec!["ID", "Status", "Expiry", "Notes"]);
        assert_eq!(table.rows[0][1], "expired");
        assert_eq!(table.rows[0][2], "never");
    }

    #[test]
    fn summary_messages() {
        assert_eq!(summary_message(&ReconciliationResult::default()), "All good!");
        assert_eq!(
            summary_message(&ReconciliationResult::structural_failure()),
            "Unable to process the audit JSON payload."
        );
        let result = ReconciliationResult {
            unhandled_ids: vec![AdvisoryId::from("1001"), AdvisoryId::from("2002")],
            ..ReconciliationResult::default()
        };
        assert_eq!(
            summary_message(&result),
            "2 vulnerabilities found. Advisories: 1001, 2002"
        );
    }

    #[test]
    fn unused_warnings_name_keys_and_file() {
        let result = ReconciliationResult {
            unused_exception_ids: vec!["1001".to_string()],
            unused_exception_modules: vec!["lodash".to_string(), "minimist".to_string()],
            ..ReconciliationResult::default()
        };
        let warnings = unused_exception_warnings(&result, ".nsprc");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("1001"));
        assert!(warnings[0].contains(".nsprc"));
        assert!(warnings[1].contains("lodash, minimist"));
    }
}
