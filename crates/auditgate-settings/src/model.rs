use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `auditgate.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditgateConfigV1 {
    /// Optional schema string for tooling (`auditgate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Minimum severity to audit: `info`, `low`, `moderate`, `high`, `critical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Path of the exception declarations file, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions_file: Option<String>,

    /// Security report columns to include (header or key names).
    #[serde(default)]
    pub include_columns: Vec<String>,

    /// Output mode: `table` (default) or `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Table,
    Json,
}
