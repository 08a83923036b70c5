//! Scan payload adapters: turn `npm audit --json` output into domain findings.
//!
//! Parsing is IO-free. The only fatal outcome is a [`ScanError`], which means
//! the payload does not have the expected report shape at all. Individual
//! unusable advisory records are skipped and reported as warnings.

#![forbid(unsafe_code)]

mod parse;

use auditgate_domain::model::Finding;

pub use parse::parse_audit_json;

/// Which npm audit report shape the payload used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadFormat {
    /// npm 6 and earlier: top-level `advisories` keyed by advisory id.
    Advisories,
    /// npm 7 and later: top-level `vulnerabilities` keyed by package name.
    Vulnerabilities,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedScan {
    pub format: PayloadFormat,
    /// Findings in payload order, one per advisory id.
    pub findings: Vec<Finding>,
    /// Descriptions of records that were skipped.
    pub warnings: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("scan payload is not a JSON object")]
    NotAnObject,

    #[error("scanner reported an error: {0}")]
    ScannerError(String),

    #[error("scan payload has neither an `advisories` nor a `vulnerabilities` collection")]
    MissingFindings,
}

/// Entry points for fuzzing. Not part of the stable API.
#[doc(hidden)]
pub mod fuzz {
    pub fn parse_audit_json(text: &str) -> Result<crate::ParsedScan, crate::ScanError> {
        crate::parse::parse_audit_json(text)
    }
}
