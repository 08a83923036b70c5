//! Config parsing, exception declarations, and option resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod declarations;
mod model;
mod resolve;

pub use declarations::{ParsedDeclarations, parse_expiry};
pub use model::{AuditgateConfigV1, OutputMode};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `auditgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<AuditgateConfigV1> {
    let cfg: AuditgateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse the exceptions file (`.nsprc`). Empty input means no declarations.
pub fn parse_declarations_json(input: &str) -> anyhow::Result<ParsedDeclarations> {
    declarations::parse_declarations_json(input)
}

/// Resolve the effective options (CLI/env overrides, then config file, then defaults).
pub fn resolve_config(
    cfg: AuditgateConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
