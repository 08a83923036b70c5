//! Use case orchestration for auditgate.
//!
//! This crate provides the application layer: use cases that coordinate the scan, settings,
//! domain, and render layers. It performs no IO; the CLI reads files and stdin and passes text in.

#![forbid(unsafe_code)]

mod audit;
mod document;
mod render;

pub use audit::{AuditInput, AuditOutput, resolve_options, run_audit, verdict_exit_code};
pub use document::build_report_document;
pub use render::{
    exception_table, security_table, serialize_report, summary_message, unused_exception_warnings,
};
