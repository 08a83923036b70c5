use crate::model::{AuditgateConfigV1, OutputMode};
use auditgate_domain::policy::{AdmissibleSeverities, admissible_severities, threshold_or_default};
use auditgate_types::{Column, Severity, ids};

/// Command-line (and environment) overrides. Anything set here beats the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// `--level` or `NPM_CONFIG_AUDIT_LEVEL`.
    pub level: Option<String>,
    /// `--exclude`: advisory ids to except for this run.
    pub exclude: Vec<String>,
    /// `--module-ignore`: module names to except for this run.
    pub module_ignore: Vec<String>,
    pub include_columns: Vec<String>,
    pub exceptions_file: Option<String>,
    pub json: bool,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub threshold: Severity,
    pub admissible: AdmissibleSeverities,
    /// Requested columns; empty means all.
    pub columns: Vec<Column>,
    pub output: OutputMode,
    pub exceptions_file: String,
    pub adhoc_ids: Vec<String>,
    pub adhoc_modules: Vec<String>,
    /// Options that were ignored or replaced with a default.
    pub warnings: Vec<String>,
}

pub fn resolve_config(
    cfg: AuditgateConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut warnings = Vec::new();

    let threshold = match overrides.level.as_deref().or(cfg.level.as_deref()) {
        None => Severity::Info,
        Some(level) => {
            if let Err(err) = level.parse::<Severity>() {
                warnings.push(format!("{err}; auditing all severities"));
            }
            threshold_or_default(level)
        }
    };

    let requested = if overrides.include_columns.is_empty() {
        &cfg.include_columns
    } else {
        &overrides.include_columns
    };
    let columns = parse_columns(requested, &mut warnings);

    let output = if overrides.json {
        OutputMode::Json
    } else {
        match cfg.output.as_deref() {
            None | Some("table") => OutputMode::Table,
            Some("json") => OutputMode::Json,
            Some(other) => anyhow::bail!("unknown output: {other} (expected 'table' or 'json')"),
        }
    };

    let exceptions_file = overrides
        .exceptions_file
        .or(cfg.exceptions_file)
        .unwrap_or_else(|| ids::DEFAULT_EXCEPTIONS_FILE.to_string());

    Ok(ResolvedConfig {
        threshold,
        admissible: admissible_severities(threshold),
        columns,
        output,
        exceptions_file,
        adhoc_ids: overrides.exclude,
        adhoc_modules: overrides.module_ignore,
        warnings,
    })
}

fn parse_columns(names: &[String], warnings: &mut Vec<String>) -> Vec<Column> {
    let mut columns = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match Column::parse(name) {
            Some(column) if !columns.contains(&column) => columns.push(column),
            Some(_) => {}
            None => warnings.push(format!("unknown column `{name}` ignored")),
        }
    }
    columns
}
