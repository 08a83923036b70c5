//! Stable DTOs and IDs used across the auditgate workspace.
//!
//! This crate is intentionally boring:
//! - severity ordering and advisory identifiers
//! - stable column names for the security and exception reports
//! - the structured report emitted in `--json` mode

#![forbid(unsafe_code)]

pub mod advisory;
pub mod column;
pub mod ids;
pub mod receipt;

pub use advisory::AdvisoryId;
pub use column::{Column, ExceptionColumn};
pub use receipt::{
    AuditReport, AuditReportV1, ExceptionReportObject, ExceptionStatus, SCHEMA_REPORT_V1,
    Severity, UnknownSeverity, Verdict, VulnerabilityReportObject,
};
