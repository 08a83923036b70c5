//! Build the `auditgate.report.v1` document from reconciliation output.

use auditgate_domain::report::{AssembledReport, ReconciliationResult};
use auditgate_types::{
    AuditReportV1, Column, ExceptionReportObject, SCHEMA_REPORT_V1, VulnerabilityReportObject,
};

/// Build the report document. Vulnerability objects carry only the projected columns.
pub fn build_report_document(
    result: &ReconciliationResult,
    assembled: &AssembledReport,
) -> AuditReportV1 {
    let vulnerabilities_report = assembled
        .vulnerability_rows
        .iter()
        .map(|cells| vulnerability_object(&assembled.columns, cells))
        .collect();

    let exceptions_report = assembled
        .exception_rows
        .iter()
        .map(|row| ExceptionReportObject {
            id: row.key.clone(),
            status: row.status,
            expiry: row.expiry_display(),
            notes: row.notes.clone(),
        })
        .collect();

    AuditReportV1 {
        schema: SCHEMA_REPORT_V1.to_string(),
        failed: result.failed,
        verdict: result.verdict(),
        unhandled_vulnerability_ids: result.unhandled_ids.clone(),
        vulnerabilities_report,
        exceptions_report,
        unused_exception_ids: result.unused_exception_ids.clone(),
        unused_exception_modules: result.unused_exception_modules.clone(),
    }
}

fn vulnerability_object(columns: &[Column], cells: &[String]) -> VulnerabilityReportObject {
    let mut obj = VulnerabilityReportObject::default();
    for (column, cell) in columns.iter().zip(cells) {
        let slot = match column {
            Column::Id => &mut obj.id,
            Column::Module => &mut obj.module,
            Column::Title => &mut obj.title,
            Column::Paths => &mut obj.paths,
            Column::Severity => &mut obj.severity,
            Column::Url => &mut obj.url,
            Column::Excepted => &mut obj.is_excepted,
        };
        *slot = Some(cell.clone());
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuditInput, resolve_options, run_audit};
    use auditgate_settings::Overrides;
    use auditgate_test_util::{advisory, declarations, legacy_payload};
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn document_snapshot() {
        let resolved = resolve_options("", Overrides::default()).expect("resolve");
        let payload = legacy_payload(&[
            advisory(1001, "lodash", "high").with_paths(&["app>lodash", "app>util>lodash"]),
            advisory(2002, "minimist", "low"),
        ]);
        let decls = declarations(&[
            ("2002", json!({ "expiry": "2099-01-01", "notes": "dev only" })),
            ("3003", json!(true)),
        ]);

        let out = run_audit(AuditInput {
            payload_text: &payload,
            declarations_text: &decls,
            resolved: &resolved,
            today: date!(2024 - 06 - 15),
        })
        .expect("run audit");

        insta::assert_json_snapshot!(out.report, @r#"
        {
          "schema": "auditgate.report.v1",
          "failed": false,
          "verdict": "fail",
          "unhandledVulnerabilityIds": [
            "1001"
          ],
          "vulnerabilitiesReport": [
            {
              "id": "1001",
              "module": "lodash",
              "title": "Advisory 1001",
              "paths": "app>lodash\napp>util>lodash",
              "severity": "high",
              "url": "https://npmjs.com/advisories/1001",
              "isExcepted": "n"
            },
            {
              "id": "2002",
              "module": "minimist",
              "title": "Advisory 2002",
              "paths": "minimist",
              "severity": "low",
              "url": "https://npmjs.com/advisories/2002",
              "isExcepted": "y"
            }
          ],
          "exceptionsReport": [
            {
              "id": "2002",
              "status": "active",
              "expiry": "2099-01-01",
              "notes": "dev only"
            },
            {
              "id": "3003",
              "status": "active",
              "expiry": "never",
              "notes": ""
            }
          ],
          "unusedExceptionIds": [
            "3003"
          ],
          "unusedExceptionModules": []
        }
        "#);
    }

    #[test]
    fn structural_failure_document_is_empty() {
        let result = ReconciliationResult::structural_failure();
        let assembled = AssembledReport {
            columns: Column::ALL.to_vec(),
            vulnerability_rows: Vec::new(),
            exception_rows: Vec::new(),
        };
        let doc = build_report_document(&result, &assembled);
        assert!(doc.failed);
        assert!(doc.unhandled_vulnerability_ids.is_empty());
        assert!(doc.vulnerabilities_report.is_empty());
        assert!(doc.unused_exception_ids.is_empty());
    }
}
