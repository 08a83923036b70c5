//! Stable string identifiers shared by the app, CLI, and renderers.

// Report headings
pub const SECURITY_REPORT_TITLE: &str = "=== npm audit security report ===";
pub const EXCEPTION_REPORT_TITLE: &str = "=== list of exceptions ===";

// Exception report sentinels
pub const EXPIRY_NEVER: &str = "never";

// `Ex.` cell values
pub const EXCEPTED_YES: &str = "y";
pub const EXCEPTED_NO: &str = "n";

// Defaults
pub const DEFAULT_EXCEPTIONS_FILE: &str = ".nsprc";
pub const DEFAULT_CONFIG_FILE: &str = "auditgate.toml";
pub const ENV_AUDIT_LEVEL: &str = "NPM_CONFIG_AUDIT_LEVEL";
