use crate::AdvisoryId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable schema identifier for the structured report.
pub const SCHEMA_REPORT_V1: &str = "auditgate.report.v1";

/// Advisory severity, in ascending order of urgency.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0} (expected info|low|moderate|high|critical)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "moderate" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// Derived status of an exception entry at evaluation time. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionStatus {
    Active,
    Expired,
    /// Declared with `"active": false`.
    Inactive,
}

impl ExceptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExceptionStatus::Active => "active",
            ExceptionStatus::Expired => "expired",
            ExceptionStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ExceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// One row of the security report in object form.
///
/// Columns that were not requested are omitted, so every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityReportObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_excepted: Option<String>,
}

/// One row of the exception report in object form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExceptionReportObject {
    pub id: String,
    pub status: ExceptionStatus,
    pub expiry: String,
    pub notes: String,
}

/// Structured report emitted in `--json` mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditReportV1 {
    /// Versioned schema identifier (`auditgate.report.v1`).
    pub schema: String,
    /// True only when the scan payload could not be parsed at all.
    pub failed: bool,
    pub verdict: Verdict,
    pub unhandled_vulnerability_ids: Vec<AdvisoryId>,
    pub vulnerabilities_report: Vec<VulnerabilityReportObject>,
    pub exceptions_report: Vec<ExceptionReportObject>,
    pub unused_exception_ids: Vec<String>,
    pub unused_exception_modules: Vec<String>,
}

pub type AuditReport = AuditReportV1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_is_total_and_ascending() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Severity>(), Ok(Severity::High));
        assert_eq!(" moderate ".parse::<Severity>(), Ok(Severity::Moderate));
        assert!("medium".parse::<Severity>().is_err());
    }

    #[test]
    fn report_uses_camel_case_keys() {
        let report = AuditReportV1 {
            schema: SCHEMA_REPORT_V1.to_string(),
            failed: false,
            verdict: Verdict::Fail,
            unhandled_vulnerability_ids: vec![AdvisoryId::from(1001u64)],
            vulnerabilities_report: vec![VulnerabilityReportObject {
                id: Some("1001".to_string()),
                is_excepted: Some("n".to_string()),
                ..VulnerabilityReportObject::default()
            }],
            exceptions_report: Vec::new(),
            unused_exception_ids: Vec::new(),
            unused_exception_modules: Vec::new(),
        };

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["unhandledVulnerabilityIds"][0], "1001");
        assert_eq!(value["vulnerabilitiesReport"][0]["isExcepted"], "n");
        assert!(value["vulnerabilitiesReport"][0].get("title").is_none());
        assert_eq!(value["verdict"], "fail");
    }
}
