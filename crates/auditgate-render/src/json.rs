use auditgate_types::AuditReportV1;

/// Serialize the report document as pretty JSON with a trailing newline.
pub fn render_report_json(report: &AuditReportV1) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditgate_types::{AdvisoryId, SCHEMA_REPORT_V1, Verdict};

    #[test]
    fn keys_follow_document_order() {
        let report = AuditReportV1 {
            schema: SCHEMA_REPORT_V1.to_string(),
            failed: false,
            verdict: Verdict::Fail,
            unhandled_vulnerability_ids: vec![AdvisoryId::from("1001")],
            vulnerabilities_report: Vec::new(),
            exceptions_report: Vec::new(),
            unused_exception_ids: Vec::new(),
            unused_exception_modules: Vec::new(),
        };

        let out = render_report_json(&report).expect("serialize");
        assert!(out.ends_with('\n'));
        let failed = out.find("\"failed\"").expect("failed key");
        let unhandled = out.find("\"unhandledVulnerabilityIds\"").expect("unhandled key");
        let unused = out.find("\"unusedExceptionIds\"").expect("unused key");
        assert!(failed < unhandled);
        assert!(unhandled < unused);
        assert!(out.contains("\"1001\""));
    }
}
